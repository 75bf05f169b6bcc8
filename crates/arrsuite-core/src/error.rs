use arrsuite_intent::{IntentError, Service};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrSuiteError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error("{service} is not configured")]
    ServiceNotConfigured {
        service: Service,
        available: Vec<Service>,
    },
}
