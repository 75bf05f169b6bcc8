use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use arrsuite_intent::{ContextPatternTable, IntentEngine, KeywordTable, Operation, Service};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ArrSuiteError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub services: ServicesConfig,
    #[serde(default)]
    pub router: RouterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Services that have a configured client.
    pub enabled: Vec<Service>,
}

/// Extra keyword phrases, appended after the built-in ones.
/// Keys are service or operation names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub service_keywords: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub operation_keywords: BTreeMap<String, Vec<String>>,
}

impl AppConfig {
    /// Load config: the user file if it exists, otherwise built-in defaults.
    pub fn load() -> Result<Self, ArrSuiteError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::from_toml(DEFAULT_CONFIG)
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ArrSuiteError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ArrSuiteError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ArrSuiteError> {
        toml::from_str(content).map_err(|e| ArrSuiteError::Config(e.to_string()))
    }

    /// Save current config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ArrSuiteError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ArrSuiteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "arrsuite")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Build a classifier from the built-in tables plus the router section.
    ///
    /// Unknown service/operation names and malformed phrases are errors.
    pub fn build_engine(&self) -> Result<IntentEngine, ArrSuiteError> {
        let mut keywords = KeywordTable::builtin();

        for (name, phrases) in &self.router.service_keywords {
            let service: Service = name.parse()?;
            keywords.extend_service(service, phrases)?;
        }
        for (name, phrases) in &self.router.operation_keywords {
            let operation: Operation = name.parse()?;
            keywords.extend_operation(operation, phrases)?;
        }

        Ok(IntentEngine::new(keywords, ContextPatternTable::builtin()?))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.logging.filter, "arrsuite=info");
        assert_eq!(config.services.enabled, Service::ALL.to_vec());
        assert!(config.router.service_keywords.is_empty());
        assert!(config.router.operation_keywords.is_empty());
    }

    #[test]
    fn test_router_section_is_optional() {
        let config = AppConfig::from_toml(
            r#"
            [logging]
            filter = "arrsuite=debug"

            [services]
            enabled = ["plex"]
            "#,
        )
        .unwrap();
        assert_eq!(config.services.enabled, vec![Service::Plex]);
        assert!(config.router.service_keywords.is_empty());
    }

    #[test]
    fn test_unknown_service_in_enabled_list() {
        let err = AppConfig::from_toml(
            r#"
            [logging]
            filter = "info"

            [services]
            enabled = ["jackett"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ArrSuiteError::Config(_)));
    }

    #[test]
    fn test_extra_keywords_change_classification() {
        let mut config = AppConfig::default();
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.parse_intent("Grab the blockbuster").service, Service::Overseerr);

        config
            .router
            .service_keywords
            .insert("radarr".into(), vec!["blockbuster".into()]);
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.parse_intent("Grab the blockbuster").service, Service::Radarr);
    }

    #[test]
    fn test_unknown_keyword_owner_is_rejected() {
        let mut config = AppConfig::default();
        config
            .router
            .operation_keywords
            .insert("rewind".into(), vec!["go back".into()]);
        assert!(matches!(config.build_engine(), Err(ArrSuiteError::Intent(_))));
    }

    #[test]
    fn test_uppercase_phrase_is_rejected() {
        let mut config = AppConfig::default();
        config
            .router
            .service_keywords
            .insert("plex".into(), vec!["Plexamp".into()]);
        assert!(config.build_engine().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.services.enabled = vec![Service::Sonarr, Service::Radarr];
        config
            .router
            .operation_keywords
            .insert("search".into(), vec!["look for".into()]);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.services.enabled, vec![Service::Sonarr, Service::Radarr]);
        assert_eq!(
            loaded.router.operation_keywords.get("search"),
            Some(&vec!["look for".to_string()])
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ArrSuiteError::Config(_)));
    }
}
