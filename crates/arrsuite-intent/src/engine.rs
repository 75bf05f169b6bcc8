mod classify;
mod extract;

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::IntentError;
use crate::keyword::KeywordTable;
use crate::operation::Operation;
use crate::pattern::ContextPatternTable;
use crate::service::Service;

pub use classify::{
    FALLBACK_OPERATION_CONFIDENCE, FALLBACK_SERVICE, FALLBACK_SERVICE_CONFIDENCE,
};

/// A classified request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub service: Service,
    pub operation: Operation,
    /// Mean of the service and operation confidences, in `[0, 1]`.
    pub confidence: f64,
    pub context: Context,
}

/// Deterministic keyword/pattern classifier.
///
/// Holds read-only tables; build it once and share it. Every method takes
/// `&self` and performs no I/O, so one engine can serve many threads.
#[derive(Debug, Clone)]
pub struct IntentEngine {
    keywords: KeywordTable,
    patterns: ContextPatternTable,
}

impl Default for IntentEngine {
    fn default() -> Self {
        Self::builtin().expect("built-in context patterns are valid")
    }
}

impl IntentEngine {
    pub fn new(keywords: KeywordTable, patterns: ContextPatternTable) -> Self {
        Self { keywords, patterns }
    }

    /// Engine over the built-in keyword and pattern tables.
    pub fn builtin() -> Result<Self, IntentError> {
        Ok(Self::new(KeywordTable::builtin(), ContextPatternTable::builtin()?))
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn patterns(&self) -> &ContextPatternTable {
        &self.patterns
    }

    /// Classify the target service of an already-lowercased query.
    pub fn identify_service(&self, query: &str) -> (Service, f64) {
        classify::identify_service(&self.keywords, query)
    }

    /// Classify the operation of an already-lowercased query.
    pub fn identify_operation(&self, query: &str, service: Service) -> (Operation, f64) {
        classify::identify_operation(&self.keywords, query, service)
    }

    /// Extract parameters from a query in its original case.
    pub fn extract_context(&self, query: &str) -> Context {
        extract::extract_context(&self.patterns, query)
    }

    /// Classify a free-text request.
    ///
    /// Never fails: unmatched requests fall back to a default service and
    /// operation with low confidence.
    ///
    /// # Example
    /// ```
    /// use arrsuite_intent::{IntentEngine, Operation, Service};
    ///
    /// let engine = IntentEngine::default();
    /// let intent = engine.parse_intent("Add Breaking Bad to my TV shows");
    /// assert_eq!(intent.service, Service::Sonarr);
    /// assert_eq!(intent.operation, Operation::Add);
    /// assert_eq!(intent.context.title(), Some("Breaking Bad"));
    /// ```
    #[tracing::instrument(name = "parse_intent", skip(self), fields(query = %query))]
    pub fn parse_intent(&self, query: &str) -> Intent {
        let lower = query.to_lowercase();

        let (service, service_confidence) = self.identify_service(&lower);
        let (operation, operation_confidence) = self.identify_operation(&lower, service);
        let context = self.extract_context(query);
        let confidence = (service_confidence + operation_confidence) / 2.0;

        tracing::debug!(
            service = %service,
            operation = %operation,
            confidence,
            context_keys = context.len(),
            "Intent parsed"
        );

        Intent {
            service,
            operation,
            confidence,
            context,
        }
    }

    /// `parse_intent` without the confidence.
    pub fn route(&self, query: &str) -> (Service, Operation, Context) {
        let intent = self.parse_intent(query);
        (intent.service, intent.operation, intent.context)
    }

    /// Human-readable summary of how `query` is interpreted.
    pub fn explain_intent(&self, query: &str) -> String {
        let intent = self.parse_intent(query);

        let mut out = format!(
            "Service: {} ({:.0}% confident)\nOperation: {}\n",
            intent.service,
            intent.confidence * 100.0,
            intent.operation,
        );
        for (key, value) in &intent.context {
            out.push_str(&format!("  - {key}: {value}\n"));
        }
        out
    }
}
