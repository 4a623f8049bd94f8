use crate::config::toml_config::TomlConfig;
use crate::config::ServiceSettings;
use crate::core::session::Command;
use crate::core::ApiKey;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "bdea")]
#[command(about = "Query the Block Disposable Email service from the command line")]
pub struct CliConfig {
    /// API key (falls back to the config file)
    #[arg(long, env = "BDEA_API_KEY", hide_env_values = true)]
    pub api_key: Option<ApiKey>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub check_endpoint: Option<String>,

    #[arg(long)]
    pub status_endpoint: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Format of the diagnostic log on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Check a domain (uses credits)
    Check { domain: String },
    /// Free query that always answers ALLOW
    TestOk,
    /// Free query that always answers BLOCK
    TestBlock,
    /// Show status and credits of the API key
    Status,
    /// Print the account management pages
    Links,
}

impl Action {
    /// Service command for this action; `Links` needs no request.
    pub fn to_command(&self) -> Option<Command> {
        match self {
            Action::Check { domain } => Some(Command::Query {
                domain: domain.clone(),
            }),
            Action::TestOk => Some(Command::TestOk),
            Action::TestBlock => Some(Command::TestBlock),
            Action::Status => Some(Command::CheckStatus),
            Action::Links => None,
        }
    }
}

impl CliConfig {
    /// Merge defaults, the optional TOML file and command line overrides.
    pub fn resolve(&self) -> Result<ServiceSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.to_settings()
            }
            None => ServiceSettings::default(),
        };

        if let Some(endpoint) = &self.check_endpoint {
            settings.check_endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.status_endpoint {
            settings.status_endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(key) = &self.api_key {
            settings.api_key = Some(key.clone());
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use crate::utils::validation::Validate;
    use std::io::Write;

    #[test]
    fn test_parse_subcommands() {
        let config =
            CliConfig::try_parse_from(["bdea", "--api-key", "abc123", "check", "mailinator.com"])
                .unwrap();
        assert_eq!(
            config.action.to_command(),
            Some(Command::Query {
                domain: "mailinator.com".to_string()
            })
        );

        let config = CliConfig::try_parse_from(["bdea", "links"]).unwrap();
        assert_eq!(config.action.to_command(), None);

        assert!(CliConfig::try_parse_from(["bdea"]).is_err());
    }

    #[test]
    fn test_log_format_flag() {
        let config = CliConfig::try_parse_from(["bdea", "links"]).unwrap();
        assert_eq!(config.log_format, LogFormat::Compact);

        let config = CliConfig::try_parse_from(["bdea", "--log-format", "json", "links"]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        assert!(CliConfig::try_parse_from(["bdea", "--log-format", "xml", "links"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[service]\ntimeout_seconds = 7\ncheck_endpoint = \"http://file.example/easyapi/txt\"\n\n[credentials]\napi_key = \"fromfile1\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = CliConfig::try_parse_from([
            "bdea",
            "--config",
            path,
            "--timeout-seconds",
            "2",
            "--api-key",
            "fromflag1",
            "status",
        ])
        .unwrap();
        let settings = config.resolve().unwrap();

        assert_eq!(settings.timeout_seconds(), 2);
        assert_eq!(settings.check_endpoint(), "http://file.example/easyapi/txt");
        assert_eq!(settings.api_key(), Some("fromflag1"));
    }

    #[test]
    fn test_status_accepts_non_alphanumeric_key() {
        let config =
            CliConfig::try_parse_from(["bdea", "--api-key", "abc-123", "status"]).unwrap();
        let settings = config.resolve().unwrap();

        assert!(settings.validate().is_ok());
        assert_eq!(config.action.to_command(), Some(Command::CheckStatus));
    }
}
