pub mod config;
pub mod dispatch;
pub mod error;

pub use config::AppConfig;
pub use dispatch::{Action, Dispatcher, Plan};
pub use error::ArrSuiteError;
