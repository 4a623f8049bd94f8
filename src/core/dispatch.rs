use crate::core::session::{Command, CommandResult};
use crate::core::{ApiKey, DeaService};
use crate::utils::error::{DeaError, Result};
use crate::utils::validation::{validate_api_key, validate_non_empty_string};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run one command against the service.
///
/// Domain-check commands refuse a non-alphanumeric key before any request.
pub async fn execute<S: DeaService + ?Sized>(service: &S, api_key: &ApiKey, command: Command) -> CommandResult {
    match command.target_domain() {
        Some(domain) => {
            let domain = domain.to_string();
            let outcome = match guard_domain_check(api_key, &domain) {
                Ok(()) => service.check_domain(api_key, &domain).await,
                Err(e) => Err(e),
            };
            CommandResult::Domain { domain, outcome }
        }
        None if command == Command::CheckStatus => {
            let outcome = match validate_non_empty_string("api_key", api_key.as_str()) {
                Ok(()) => service.check_key_status(api_key).await,
                Err(e) => Err(e),
            };
            CommandResult::Status {
                key_ending: api_key.ending().to_string(),
                outcome,
            }
        }
        None => CommandResult::Cleared,
    }
}

fn guard_domain_check(api_key: &ApiKey, domain: &str) -> Result<()> {
    validate_api_key("api_key", api_key.as_str())?;
    validate_non_empty_string("domain", domain)
}

/// Wait for a dispatched command; a panicked or cancelled task is an error.
pub async fn join_dispatched(handle: JoinHandle<()>) -> Result<()> {
    handle.await.map_err(|e| DeaError::TaskFailed {
        message: e.to_string(),
    })
}

/// Runs commands on background tasks and reports each result on a channel,
/// so the interaction loop never waits on the network.
pub struct Dispatcher<S: DeaService + 'static> {
    service: Arc<S>,
    results: mpsc::UnboundedSender<CommandResult>,
}

impl<S: DeaService + 'static> Dispatcher<S> {
    pub fn new(service: S) -> (Self, mpsc::UnboundedReceiver<CommandResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                service: Arc::new(service),
                results: tx,
            },
            rx,
        )
    }

    pub fn dispatch(&self, api_key: ApiKey, command: Command) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let results = self.results.clone();

        tokio::spawn(async move {
            tracing::debug!("Dispatching {:?}", command);
            let result = execute(service.as_ref(), &api_key, command).await;
            if results.send(result).is_err() {
                tracing::warn!("Result receiver dropped, discarding command result");
            }
        })
    }
}
