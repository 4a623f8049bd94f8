use crate::core::{ApiKey, ConfigProvider, DeaService, DomainCheckOutcome, KeyStatusOutcome};
use crate::domain::model::{is_supported_status_version, SUPPORTED_STATUS_API_VERSION};
use crate::utils::error::{DeaError, Result};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

pub const DEFAULT_CHECK_ENDPOINT: &str = "http://check.block-disposable-email.com/easyapi/txt";
pub const DEFAULT_STATUS_ENDPOINT: &str = "http://status.block-disposable-email.com/status/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// HTTP client for the EasyAPI and status endpoints.
///
/// Holds no per-request state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DeaClient {
    client: Client,
    check_endpoint: Url,
    status_endpoint: Url,
}

impl DeaClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoints(
            DEFAULT_CHECK_ENDPOINT,
            DEFAULT_STATUS_ENDPOINT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_endpoints(
            config.check_endpoint(),
            config.status_endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn with_endpoints(check_endpoint: &str, status_endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            check_endpoint: parse_endpoint("check_endpoint", check_endpoint)?,
            status_endpoint: parse_endpoint("status_endpoint", status_endpoint)?,
        })
    }

    fn domain_url(&self, api_key: &ApiKey, domain: &str) -> Result<Url> {
        let mut url = self.check_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| DeaError::InvalidConfigValueError {
                field: "check_endpoint".to_string(),
                value: self.check_endpoint.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(api_key.as_str())
            .push(domain);
        Ok(url)
    }

    fn status_url(&self, api_key: &ApiKey) -> Url {
        let mut url = self.status_endpoint.clone();
        url.query_pairs_mut().append_pair("apikey", api_key.as_str());
        url
    }

    /// GET `url` and return the first line of the body.
    async fn fetch_first_line(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?;

        tracing::debug!("Service response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DeaError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let first_line = body.lines().next().unwrap_or_default().trim();
        if first_line.is_empty() {
            return Err(DeaError::EmptyResponse);
        }

        Ok(first_line.to_string())
    }
}

#[async_trait::async_trait]
impl DeaService for DeaClient {
    async fn check_domain(&self, api_key: &ApiKey, domain: &str) -> Result<DomainCheckOutcome> {
        tracing::debug!("Checking domain {} with key {}", domain, api_key.masked());

        let url = self.domain_url(api_key, domain)?;
        let body = self.fetch_first_line(url).await?;
        let outcome = DomainCheckOutcome::from_body(&body);

        tracing::debug!("Domain {} classified as {:?}", domain, outcome);
        Ok(outcome)
    }

    async fn check_key_status(&self, api_key: &ApiKey) -> Result<KeyStatusOutcome> {
        tracing::debug!("Requesting status for key {}", api_key.masked());

        let body = self.fetch_first_line(self.status_url(api_key)).await?;
        parse_key_status(&body)
    }
}

fn parse_endpoint(field: &str, endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| DeaError::InvalidConfigValueError {
        field: field.to_string(),
        value: endpoint.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if url.cannot_be_a_base() {
        return Err(DeaError::InvalidConfigValueError {
            field: field.to_string(),
            value: endpoint.to_string(),
            reason: "URL cannot carry path segments".to_string(),
        });
    }

    Ok(url)
}

/// Parse one line of status JSON.
///
/// A rejected key short-circuits before any numeric field is read.
pub fn parse_key_status(body: &str) -> Result<KeyStatusOutcome> {
    let value: Value = serde_json::from_str(body)?;
    let fields = value.as_object().ok_or_else(|| DeaError::Parse {
        message: "status response is not a JSON object".to_string(),
    })?;

    let request_status = text_field(fields, "request_status").unwrap_or_default();
    let api_key_status = text_field(fields, "apikeystatus").unwrap_or_default();
    let api_version = text_field(fields, "version");

    if !is_supported_status_version(api_version.as_deref()) {
        tracing::warn!(
            "Untested Status API version {:?} (supported: {})",
            api_version,
            SUPPORTED_STATUS_API_VERSION
        );
    }

    if request_status != "ok" || api_key_status != "active" {
        return Err(DeaError::InvalidKey {
            request_status,
            api_key_status,
        });
    }

    let credits_remaining = number_field::<i64>(fields, "credits")?.unwrap_or(0);
    let commercial_credit_percent = number_field::<f64>(fields, "commercial_credit_status_percent")?;

    Ok(KeyStatusOutcome {
        request_status,
        api_key_status,
        server_time: text_field(fields, "servertime"),
        api_version,
        credits_remaining,
        credits_time: text_field(fields, "credits_time"),
        commercial_credit_status: text_field(fields, "commercial_credit_status"),
        commercial_credit_percent,
    })
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric fields arrive string-encoded; plain JSON numbers are accepted too.
fn number_field<T: std::str::FromStr>(fields: &Map<String, Value>, name: &str) -> Result<Option<T>> {
    let raw = match fields.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(_)) | Some(Value::Null) | None => return Ok(None),
        Some(other) => {
            return Err(DeaError::Parse {
                message: format!("field '{}' is not numeric: {}", name, other),
            })
        }
    };

    raw.parse::<T>().map(Some).map_err(|_| DeaError::Parse {
        message: format!("field '{}' is not numeric: {}", name, raw),
    })
}
