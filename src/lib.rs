pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Action, CliConfig};
pub use config::{toml_config::TomlConfig, ServiceSettings};

pub use crate::core::client::DeaClient;
pub use crate::core::dispatch::{execute, join_dispatched, Dispatcher};
pub use crate::core::session::{Command, CommandResult, Controls, OutputLog};
pub use domain::model::{
    classify_credit_status, classify_key_status, ApiKey, CreditStatus, DomainCheckOutcome,
    FailureCode, KeyStatus, KeyStatusOutcome, TEST_DOMAIN_BLOCK, TEST_DOMAIN_OK,
};
pub use domain::ports::{ConfigProvider, DeaService};
pub use utils::error::{DeaError, Result};
pub use utils::validation::validate_key;

/// Account management page of the service.
pub const MANAGE_ACCOUNT_URL: &str = "http://www.block-disposable-email.com/cms/manage/";
/// Per-key usage statistics page of the service.
pub const PERSONAL_STATS_URL: &str =
    "http://www.block-disposable-email.com/cms/manage/your-personal-dea-statistics/";
