pub mod client;
pub mod dispatch;
pub mod session;

pub use crate::domain::model::{ApiKey, DomainCheckOutcome, KeyStatusOutcome};
pub use crate::domain::ports::{ConfigProvider, DeaService};
pub use crate::utils::error::Result;
