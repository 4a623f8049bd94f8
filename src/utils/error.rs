use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeaError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service answered with HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Service closed the response without any data")]
    EmptyResponse,

    #[error("Malformed status response: {message}")]
    Parse { message: String },

    #[error("API key rejected (request_status: {request_status}, apikeystatus: {api_key_status})")]
    InvalidKey {
        request_status: String,
        api_key_status: String,
    },

    #[error("Domain check failed: {0}")]
    ProtocolFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },
}

impl From<serde_json::Error> for DeaError {
    fn from(err: serde_json::Error) -> Self {
        DeaError::Parse {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Credential,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeaError::Network(_) | DeaError::UnexpectedStatus { .. } | DeaError::EmptyResponse => {
                ErrorCategory::Network
            }
            DeaError::Parse { .. } | DeaError::ProtocolFailure(_) | DeaError::TaskFailed { .. } => {
                ErrorCategory::Service
            }
            DeaError::InvalidKey { .. } => ErrorCategory::Credential,
            DeaError::Io(_)
            | DeaError::ConfigError { .. }
            | DeaError::InvalidConfigValueError { .. }
            | DeaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DeaError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Service | ErrorCategory::Credential | ErrorCategory::Input => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // 可重試
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3, // 配置錯誤
        }
    }

    /// 是否為傳輸層錯誤（不可與服務回應混淆）
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeaError::Network(e) if e.is_timeout() => {
                "The BDEA service did not answer in time".to_string()
            }
            DeaError::Network(_) => "Could not reach the BDEA service".to_string(),
            DeaError::UnexpectedStatus { status } => {
                format!("The BDEA service answered with HTTP {}", status)
            }
            DeaError::EmptyResponse => "The BDEA service returned an empty answer".to_string(),
            DeaError::Parse { .. } => "The status response could not be understood".to_string(),
            DeaError::InvalidKey { .. } => {
                "It appears that your key is invalid, please check your API key and try again."
                    .to_string()
            }
            DeaError::ProtocolFailure(reason) => format!("The domain check failed: {}", reason),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DeaError::Network(_) | DeaError::UnexpectedStatus { .. } | DeaError::EmptyResponse => {
                "Check your connection and try again later".to_string()
            }
            DeaError::Parse { .. } => {
                "The status API may have changed; check for a newer client version".to_string()
            }
            DeaError::InvalidKey { .. } => {
                "Verify the key on the account management page".to_string()
            }
            DeaError::ProtocolFailure(_) => {
                "Make sure the domain has no protocol or port and the key has credits left"
                    .to_string()
            }
            DeaError::Io(_) => "Check that the file exists and is readable".to_string(),
            DeaError::ConfigError { .. }
            | DeaError::InvalidConfigValueError { .. }
            | DeaError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            DeaError::ValidationError { .. } => {
                "API keys contain only letters and digits; domains carry no protocol".to_string()
            }
            DeaError::TaskFailed { .. } => {
                "Run again with --verbose and report the log if it keeps happening".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DeaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_not_service_answers() {
        assert!(DeaError::EmptyResponse.is_transport());
        assert!(DeaError::UnexpectedStatus { status: 503 }.is_transport());
        assert!(!DeaError::ProtocolFailure("fail_key".to_string()).is_transport());
        assert!(!DeaError::InvalidKey {
            request_status: "fail".to_string(),
            api_key_status: "fail".to_string(),
        }
        .is_transport());
    }

    #[test]
    fn test_severity_ordering() {
        assert_eq!(DeaError::EmptyResponse.severity(), ErrorSeverity::Medium);
        assert_eq!(
            DeaError::MissingConfigError {
                field: "api_key".to_string()
            }
            .severity(),
            ErrorSeverity::Critical
        );
        assert!(ErrorSeverity::High > ErrorSeverity::Medium);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DeaError::EmptyResponse.exit_code(), 2);
        assert_eq!(
            DeaError::InvalidKey {
                request_status: "fail".to_string(),
                api_key_status: "fail".to_string(),
            }
            .exit_code(),
            1
        );
        assert_eq!(
            DeaError::TaskFailed {
                message: "panicked".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            DeaError::MissingConfigError {
                field: "api_key".to_string()
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let err: DeaError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, DeaError::Parse { .. }));
        assert_eq!(err.category(), ErrorCategory::Service);
    }
}
