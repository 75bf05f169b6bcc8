//! Turns a classified request into a concrete action for a configured
//! service. Executing the action against the service API is left to the
//! caller.

use std::collections::BTreeSet;

use arrsuite_intent::{Context, Intent, IntentEngine, Operation, Service};
use serde::Serialize;
use serde_json::json;

use crate::config::AppConfig;
use crate::error::ArrSuiteError;

/// A service call the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    LookupSeries { term: String },
    ListSeries,
    LookupMovie { term: String },
    ListMovies,
    SearchIndexers { query: String },
    ListIndexers,
    SearchMedia { query: String },
    RequestMedia { title: Option<String>, is_4k: bool },
    SearchLibrary { query: String },
    ListLibraries,
    ScanLibrary,
    ListSessions,
    RecentlyAdded,
    Unsupported { service: Service, operation: Operation },
}

/// Map a classified request onto an action. Search terms come from the
/// extracted title and default to an empty string.
pub fn plan_action(service: Service, operation: Operation, context: &Context) -> Action {
    let term = || context.title().unwrap_or_default().to_string();

    match (service, operation) {
        (Service::Sonarr, Operation::Search) => Action::LookupSeries { term: term() },
        (Service::Sonarr, Operation::List) => Action::ListSeries,
        (Service::Radarr, Operation::Search) => Action::LookupMovie { term: term() },
        (Service::Radarr, Operation::List) => Action::ListMovies,
        (Service::Prowlarr, Operation::Search) => Action::SearchIndexers { query: term() },
        (Service::Prowlarr, Operation::List) => Action::ListIndexers,
        (Service::Overseerr, Operation::Search) => Action::SearchMedia { query: term() },
        (Service::Overseerr, Operation::Request) => Action::RequestMedia {
            title: context.title().map(str::to_string),
            is_4k: context.is_4k(),
        },
        (Service::Plex, Operation::Search) => Action::SearchLibrary { query: term() },
        (Service::Plex, Operation::List | Operation::Get) => Action::ListLibraries,
        (Service::Plex, Operation::Scan) => Action::ScanLibrary,
        (Service::Plex, Operation::Play) => Action::ListSessions,
        (Service::Plex, Operation::Refresh) => Action::RecentlyAdded,
        (service, operation) => Action::Unsupported { service, operation },
    }
}

/// A request resolved to an action.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub intent: Intent,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub service: Service,
    pub enabled: bool,
}

/// Classifies requests and routes them to enabled services.
pub struct Dispatcher {
    engine: IntentEngine,
    enabled: BTreeSet<Service>,
}

impl Dispatcher {
    pub fn new(engine: IntentEngine, enabled: impl IntoIterator<Item = Service>) -> Self {
        Self {
            engine,
            enabled: enabled.into_iter().collect(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ArrSuiteError> {
        Ok(Self::new(
            config.build_engine()?,
            config.services.enabled.iter().copied(),
        ))
    }

    pub fn engine(&self) -> &IntentEngine {
        &self.engine
    }

    pub fn is_enabled(&self, service: Service) -> bool {
        self.enabled.contains(&service)
    }

    /// Enabled services in declaration order.
    pub fn available(&self) -> Vec<Service> {
        self.enabled.iter().copied().collect()
    }

    /// Every service with its enabled state.
    pub fn services(&self) -> Vec<ServiceStatus> {
        Service::ALL
            .iter()
            .map(|&service| ServiceStatus {
                service,
                enabled: self.is_enabled(service),
            })
            .collect()
    }

    /// Classify `query` and plan the action for it.
    ///
    /// Fails with [`ArrSuiteError::ServiceNotConfigured`] when the request is
    /// routed to a service that is not enabled.
    #[tracing::instrument(skip(self), fields(query = %query))]
    pub fn plan(&self, query: &str) -> Result<Plan, ArrSuiteError> {
        let intent = self.engine.parse_intent(query);

        if !self.is_enabled(intent.service) {
            tracing::warn!(service = %intent.service, "Request routed to unconfigured service");
            return Err(ArrSuiteError::ServiceNotConfigured {
                service: intent.service,
                available: self.available(),
            });
        }

        let action = plan_action(intent.service, intent.operation, &intent.context);
        tracing::debug!(?action, "Action planned");
        Ok(Plan { intent, action })
    }
}

/// JSON error object reported to callers: `{error, available_services}` for
/// unconfigured services, `{error}` otherwise.
pub fn error_report(err: &ArrSuiteError) -> serde_json::Value {
    match err {
        ArrSuiteError::ServiceNotConfigured { available, .. } => json!({
            "error": err.to_string(),
            "available_services": available,
        }),
        _ => json!({ "error": err.to_string() }),
    }
}
