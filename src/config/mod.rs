#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::client::{DEFAULT_CHECK_ENDPOINT, DEFAULT_STATUS_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{ApiKey, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};

/// Settings after defaults, TOML file and command line have been merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub check_endpoint: String,
    pub status_endpoint: String,
    pub timeout_seconds: u64,
    pub api_key: Option<ApiKey>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            check_endpoint: DEFAULT_CHECK_ENDPOINT.to_string(),
            status_endpoint: DEFAULT_STATUS_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            api_key: None,
        }
    }
}

impl ConfigProvider for ServiceSettings {
    fn check_endpoint(&self) -> &str {
        &self.check_endpoint
    }

    fn status_endpoint(&self) -> &str {
        &self.status_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ApiKey::as_str)
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_url("check_endpoint", &self.check_endpoint)?;
        validate_url("status_endpoint", &self.status_endpoint)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;

        // 字元檢查只在網域查詢時做，狀態查詢接受任何非空白金鑰
        if let Some(key) = &self.api_key {
            validate_non_empty_string("api_key", key.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = ServiceSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn test_debug_hides_key() {
        let settings = ServiceSettings {
            api_key: Some(ApiKey::new("secretkey1234")),
            ..ServiceSettings::default()
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("secretkey"));
        assert!(debug.contains("1234"));
    }

    #[test]
    fn test_key_charset_is_left_to_domain_checks() {
        let settings = ServiceSettings {
            api_key: Some(ApiKey::new("abc-123")),
            ..ServiceSettings::default()
        };
        assert!(settings.validate().is_ok());

        let settings = ServiceSettings {
            api_key: Some(ApiKey::new("   ")),
            ..ServiceSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(crate::utils::error::DeaError::ValidationError { .. })
        ));
    }
}
