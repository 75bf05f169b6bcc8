//! Keyword and pattern based intent classification for media-management
//! requests.
//!
//! Given a sentence like "Add Breaking Bad to my TV shows", the engine picks
//! the target [`Service`], the [`Operation`], a confidence for both, and a
//! [`Context`] of parameters (title, year, season, episode, quality,
//! language, flags). Everything is table driven and deterministic.

use std::sync::LazyLock;

pub mod context;
pub mod engine;
pub mod error;
pub mod keyword;
pub mod operation;
pub mod pattern;
pub mod service;

pub use context::{Context, ContextKey, ContextValue};
pub use engine::{Intent, IntentEngine};
pub use error::IntentError;
pub use keyword::KeywordTable;
pub use operation::Operation;
pub use pattern::{ContextPatternTable, PatternFlags, PatternSpec};
pub use service::Service;

static DEFAULT_ENGINE: LazyLock<IntentEngine> = LazyLock::new(IntentEngine::default);

/// Shared engine over the built-in tables.
pub fn default_engine() -> &'static IntentEngine {
    &DEFAULT_ENGINE
}

/// Classify `query` with the built-in tables.
pub fn parse_intent(query: &str) -> Intent {
    DEFAULT_ENGINE.parse_intent(query)
}

/// Explain `query` with the built-in tables.
pub fn explain_intent(query: &str) -> String {
    DEFAULT_ENGINE.explain_intent(query)
}
