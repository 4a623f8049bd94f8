use crate::domain::model::{ApiKey, DomainCheckOutcome, KeyStatusOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn check_endpoint(&self) -> &str;
    fn status_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn api_key(&self) -> Option<&str>;
}

/// Operations offered by the disposable email service.
#[async_trait]
pub trait DeaService: Send + Sync {
    async fn check_domain(&self, api_key: &ApiKey, domain: &str) -> Result<DomainCheckOutcome>;
    async fn check_key_status(&self, api_key: &ApiKey) -> Result<KeyStatusOutcome>;
}
