use crate::config::ServiceSettings;
use crate::core::client::{DEFAULT_CHECK_ENDPOINT, DEFAULT_STATUS_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{ApiKey, ConfigProvider};
use crate::utils::error::{DeaError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    pub credentials: Option<CredentialsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub check_endpoint: Option<String>,
    pub status_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub api_key: Option<ApiKey>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeaError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BDEA_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeaError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn credentials_key(&self) -> Option<&ApiKey> {
        self.credentials.as_ref().and_then(|c| c.api_key.as_ref())
    }

    pub fn to_settings(&self) -> ServiceSettings {
        ServiceSettings {
            check_endpoint: self.check_endpoint().to_string(),
            status_endpoint: self.status_endpoint().to_string(),
            timeout_seconds: self.timeout_seconds(),
            api_key: self.credentials_key().cloned(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn check_endpoint(&self) -> &str {
        self.service
            .check_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_CHECK_ENDPOINT)
    }

    fn status_endpoint(&self) -> &str {
        self.service
            .status_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_STATUS_ENDPOINT)
    }

    fn timeout_seconds(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn api_key(&self) -> Option<&str> {
        self.credentials_key().map(ApiKey::as_str)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        // 未設定的環境變數會原樣留下
        if let Some(key) = self.credentials_key().filter(|k| k.as_str().contains("${")) {
            return Err(DeaError::InvalidConfigValueError {
                field: "credentials.api_key".to_string(),
                value: key.as_str().to_string(),
                reason: "environment variable is not set".to_string(),
            });
        }
        self.to_settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[service]
check_endpoint = "http://localhost:8080/easyapi/txt"
status_endpoint = "http://localhost:8080/status/"
timeout_seconds = 3

[credentials]
api_key = "abc123"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.check_endpoint(), "http://localhost:8080/easyapi/txt");
        assert_eq!(config.status_endpoint(), "http://localhost:8080/status/");
        assert_eq!(config.timeout_seconds(), 3);
        assert_eq!(config.api_key(), Some("abc123"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_empty_file() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.check_endpoint(), DEFAULT_CHECK_ENDPOINT);
        assert_eq!(config.status_endpoint(), DEFAULT_STATUS_ENDPOINT);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(config.credentials_key().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BDEA_TOML_TEST_KEY", "fromenv42");

        let toml_content = r#"
[credentials]
api_key = "${BDEA_TOML_TEST_KEY}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.credentials_key().map(ApiKey::as_str), Some("fromenv42"));

        std::env::remove_var("BDEA_TOML_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[credentials]
api_key = "${BDEA_TOML_SURELY_UNSET_VARIABLE}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.credentials_key().map(ApiKey::as_str),
            Some("${BDEA_TOML_SURELY_UNSET_VARIABLE}")
        );
        assert!(matches!(
            config.validate(),
            Err(DeaError::InvalidConfigValueError { ref field, .. }) if field == "credentials.api_key"
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
check_endpoint = "ftp://example.com"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[service]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[service\ncheck_endpoint = 1");
        assert!(matches!(result, Err(DeaError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[service]\ntimeout_seconds = 7").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_seconds(), 7);

        assert!(matches!(
            TomlConfig::from_file("/definitely/not/here.toml"),
            Err(DeaError::Io(_))
        ));
    }
}
