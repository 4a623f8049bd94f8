use crate::utils::error::{DeaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free test domain that the service always answers with `ok`.
pub const TEST_DOMAIN_OK: &str = "ok.bdea.cc";
/// Free test domain that the service always answers with `block`.
pub const TEST_DOMAIN_BLOCK: &str = "block.bdea.cc";

/// Status API version this client was written against.
pub const SUPPORTED_STATUS_API_VERSION: f64 = 1.3;

/// API key for the service.
///
/// `Debug` never prints the full key, use [`ApiKey::masked`] for logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Last four characters, or the whole key when shorter.
    pub fn ending(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(3)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &self.0[start..]
    }

    /// Every character but the last four replaced with `x`.
    pub fn masked(&self) -> String {
        let ending = self.ending();
        let hidden = self.0.chars().count() - ending.chars().count();
        format!("{}{}", "x".repeat(hidden), ending)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Answer of the EasyAPI domain check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum DomainCheckOutcome {
    Allow,
    Block,
    Failure(String),
}

impl DomainCheckOutcome {
    /// Classify the first line of an EasyAPI answer.
    pub fn from_body(body: &str) -> Self {
        match body {
            "ok" => DomainCheckOutcome::Allow,
            "block" => DomainCheckOutcome::Block,
            other => DomainCheckOutcome::Failure(other.to_string()),
        }
    }

    pub fn failure_code(&self) -> Option<FailureCode> {
        match self {
            DomainCheckOutcome::Failure(reason) => Some(FailureCode::parse(reason)),
            _ => None,
        }
    }

    /// Turn a `Failure` answer into [`DeaError::ProtocolFailure`].
    pub fn into_result(self) -> Result<Self> {
        match self {
            DomainCheckOutcome::Failure(reason) => Err(DeaError::ProtocolFailure(reason)),
            outcome => Ok(outcome),
        }
    }
}

/// Documented EasyAPI failure codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCode {
    Key,
    Server,
    InputDomain,
    ParameterCount,
    KeyLowCredits,
    Other(String),
}

impl FailureCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "fail_key" => FailureCode::Key,
            "fail_server" => FailureCode::Server,
            "fail_input_domain" => FailureCode::InputDomain,
            "fail_parameter_count" => FailureCode::ParameterCount,
            "fail_key_low_credits" => FailureCode::KeyLowCredits,
            other => FailureCode::Other(other.to_string()),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            FailureCode::Key => "the API key is unknown or inactive",
            FailureCode::Server => "the service had an internal problem",
            FailureCode::InputDomain => "the domain is not valid",
            FailureCode::ParameterCount => "the request had a wrong number of parameters",
            FailureCode::KeyLowCredits => "the key has no credits left",
            FailureCode::Other(_) => "unrecognized answer",
        }
    }
}

/// Classification of the `apikeystatus` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Invalid,
    Inactive,
    Active,
    Unknown,
}

impl KeyStatus {
    pub fn description(&self) -> &'static str {
        match self {
            KeyStatus::Invalid => "Invalid Key",
            KeyStatus::Inactive => "Unactivated Key (Deactivated due to abuse?)",
            KeyStatus::Active => "Key OK",
            KeyStatus::Unknown => "Unknown key status",
        }
    }
}

pub fn classify_key_status(status: &str) -> KeyStatus {
    match status {
        "fail" => KeyStatus::Invalid,
        "inactive" => KeyStatus::Inactive,
        "active" => KeyStatus::Active,
        _ => KeyStatus::Unknown,
    }
}

/// Classification of the `commercial_credit_status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    Good,
    Low,
    Exhausted,
    Unknown,
}

impl CreditStatus {
    pub fn description(&self) -> &'static str {
        match self {
            CreditStatus::Good => "Credits are higher than 20% of your last purchase",
            CreditStatus::Low => "Remaining credits are lower than 20% of your last purchase",
            CreditStatus::Exhausted => "You have exhausted your supply of credits!",
            CreditStatus::Unknown => "Unknown credit status",
        }
    }
}

pub fn classify_credit_status(status: &str) -> CreditStatus {
    match status {
        "good" => CreditStatus::Good,
        "low" => CreditStatus::Low,
        "exhausted" => CreditStatus::Exhausted,
        _ => CreditStatus::Unknown,
    }
}

/// Parsed answer of the status endpoint for an accepted key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStatusOutcome {
    pub request_status: String,
    pub api_key_status: String,
    pub server_time: Option<String>,
    pub api_version: Option<String>,
    pub credits_remaining: i64,
    pub credits_time: Option<String>,
    pub commercial_credit_status: Option<String>,
    pub commercial_credit_percent: Option<f64>,
}

impl KeyStatusOutcome {
    pub fn key_status(&self) -> KeyStatus {
        classify_key_status(&self.api_key_status)
    }

    pub fn credit_status(&self) -> Option<CreditStatus> {
        self.commercial_credit_status
            .as_deref()
            .map(classify_credit_status)
    }

    /// `false` when the service reports a version other than the one this
    /// client was tested with, or no parsable version at all.
    pub fn is_supported_version(&self) -> bool {
        is_supported_status_version(self.api_version.as_deref())
    }
}

pub fn is_supported_status_version(version: Option<&str>) -> bool {
    version
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|v| (v - SUPPORTED_STATUS_API_VERSION).abs() < f64::EPSILON)
        .unwrap_or(false)
}
