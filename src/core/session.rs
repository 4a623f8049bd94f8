//! Presentation model for an interactive front-end.
//!
//! Button state is derived from the current field contents and every result
//! is rendered into an [`OutputLog`] whose newest entries come first.

use crate::core::{DomainCheckOutcome, KeyStatusOutcome};
use crate::domain::model::{FailureCode, TEST_DOMAIN_BLOCK, TEST_DOMAIN_OK};
use crate::utils::error::{DeaError, Result};
use crate::{MANAGE_ACCOUNT_URL, PERSONAL_STATS_URL};
use chrono::NaiveTime;

const TIME_FORMAT: &str = "%H:%M:%S";

/// Which actions are available for the given field contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub can_query: bool,
    pub can_test: bool,
    pub can_check_status: bool,
}

impl Controls {
    pub fn from_fields(api_key: &str, domain: &str) -> Self {
        let has_key = !api_key.trim().is_empty();
        let has_domain = !domain.trim().is_empty();

        Self {
            can_query: has_key && has_domain,
            can_test: has_key,
            can_check_status: has_key,
        }
    }

    pub fn allows(&self, command: &Command) -> bool {
        match command {
            Command::Query { .. } => self.can_query,
            Command::TestOk | Command::TestBlock => self.can_test,
            Command::CheckStatus => self.can_check_status,
            Command::ClearList => true,
        }
    }
}

/// User actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query { domain: String },
    TestOk,
    TestBlock,
    CheckStatus,
    ClearList,
}

impl Command {
    /// Domain that a domain-check command will send.
    pub fn target_domain(&self) -> Option<&str> {
        match self {
            Command::Query { domain } => Some(domain),
            Command::TestOk => Some(TEST_DOMAIN_OK),
            Command::TestBlock => Some(TEST_DOMAIN_BLOCK),
            Command::CheckStatus | Command::ClearList => None,
        }
    }
}

/// Finished command, ready to be rendered.
#[derive(Debug)]
pub enum CommandResult {
    Domain {
        domain: String,
        outcome: Result<DomainCheckOutcome>,
    },
    Status {
        key_ending: String,
        outcome: Result<KeyStatusOutcome>,
    },
    Cleared,
}

pub fn render_domain_outcome(time: NaiveTime, domain: &str, outcome: &DomainCheckOutcome) -> String {
    let time = time.format(TIME_FORMAT);
    match outcome {
        DomainCheckOutcome::Allow => format!("{} | ALLOW: {}", time, domain),
        DomainCheckOutcome::Block => format!("{} | BLOCK: {}", time, domain),
        DomainCheckOutcome::Failure(reason) => format!("{} | FAILURE: {}", time, reason),
    }
}

/// Explanation of a `FAILURE` answer, shown next to the list.
pub fn failure_hint(result: &CommandResult) -> Option<String> {
    match result {
        CommandResult::Domain {
            outcome: Ok(DomainCheckOutcome::Failure(reason)),
            ..
        } => Some(format!("{}: {}", reason, FailureCode::parse(reason).description())),
        _ => None,
    }
}

pub fn render_account_links() -> Vec<String> {
    vec![
        format!("Manage Account: {}", MANAGE_ACCOUNT_URL),
        format!("Personal Statistics: {}", PERSONAL_STATS_URL),
    ]
}

pub fn render_error(time: NaiveTime, err: &DeaError) -> String {
    format!("{} | ERROR: {}", time.format(TIME_FORMAT), err.user_friendly_message())
}

pub fn render_key_status(key_ending: &str, status: &KeyStatusOutcome) -> Vec<String> {
    let mut lines = vec![
        "~~~~~ Key Check ~~~~~".to_string(),
        format!("Checking status on key... ({})", key_ending),
        format!(
            "Request Status: {}, Version: {}, Server Time: {}",
            status.request_status.to_uppercase(),
            status.api_version.as_deref().unwrap_or("?"),
            status.server_time.as_deref().unwrap_or("?")
        ),
    ];

    if !status.is_supported_version() {
        lines.push("Warning: untested Status API version".to_string());
    }

    lines.push(format!(
        "Key Status: {} :: {}",
        status.api_key_status.to_uppercase(),
        status.key_status().description()
    ));
    lines.push(format!(
        "Credits Remaining: {} :: (Last Updated in Server Time: {})",
        status.credits_remaining,
        status.credits_time.as_deref().unwrap_or("?")
    ));

    if let (Some(raw), Some(credit)) = (&status.commercial_credit_status, status.credit_status()) {
        lines.push(format!(
            "Credit Status: {} :: {}",
            raw.to_uppercase(),
            credit.description()
        ));
    }

    lines
}

/// Scrolling output list, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLog {
    lines: Vec<String>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn push_front(&mut self, line: String) {
        self.lines.insert(0, line);
    }

    /// Insert a multi-line block at the top, keeping its internal order.
    pub fn prepend_block(&mut self, block: Vec<String>) {
        let older = std::mem::replace(&mut self.lines, block);
        self.lines.extend(older);
    }

    pub fn apply(&mut self, result: &CommandResult, time: NaiveTime) {
        match result {
            CommandResult::Domain { domain, outcome } => match outcome {
                Ok(outcome) => self.push_front(render_domain_outcome(time, domain, outcome)),
                Err(err) => self.push_front(render_error(time, err)),
            },
            CommandResult::Status { key_ending, outcome } => match outcome {
                Ok(status) => self.prepend_block(render_key_status(key_ending, status)),
                Err(err) => self.push_front(render_error(time, err)),
            },
            CommandResult::Cleared => self.clear(),
        }
    }
}
