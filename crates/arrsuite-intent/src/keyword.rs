use crate::error::IntentError;
use crate::operation::Operation;
use crate::service::Service;

/// Phrases that point at a service. All lowercase.
///
/// Plural forms are listed separately where a singular keyword of another
/// service would otherwise tie ("show all indexers"). Radarr's "search" only
/// decides a request when no other service matches; ties go to Sonarr.
const SERVICE_KEYWORDS: &[(Service, &[&str])] = &[
    (
        Service::Sonarr,
        &[
            "tv", "show", "series", "episode", "season", "sonarr", "television", "tvdb", "anime",
        ],
    ),
    (
        Service::Radarr,
        &[
            "movie", "film", "radarr", "tmdb", "collection", "cinema", "search",
        ],
    ),
    (
        Service::Prowlarr,
        &[
            "indexer", "indexers", "prowlarr", "tracker", "search engine", "torrent site", "usenet",
        ],
    ),
    (
        Service::Bazarr,
        &[
            "subtitle", "subtitles", "subs", "caption", "bazarr", "language", "translation",
        ],
    ),
    (
        Service::Overseerr,
        &[
            "request", "overseerr", "approve", "decline", "user", "discover", "trending",
        ],
    ),
    (
        Service::Plex,
        &[
            "plex",
            "library",
            "libraries",
            "playing",
            "sessions",
            "watch",
            "watched",
            "on deck",
            "recently added",
            "playlist",
            "collection",
            "transcode",
            "stream",
            "server",
            "media server",
        ],
    ),
];

/// Phrases that point at an operation. All lowercase.
const OPERATION_KEYWORDS: &[(Operation, &[&str])] = &[
    (Operation::Search, &["search", "find", "lookup", "query", "locate"]),
    (Operation::Add, &["add", "create", "new", "insert", "import"]),
    (Operation::Delete, &["delete", "remove", "unmonitor", "destroy"]),
    (Operation::Update, &["update", "modify", "change", "edit", "set"]),
    (Operation::List, &["list", "show all", "get all", "display", "view"]),
    (Operation::Get, &["get", "retrieve", "fetch", "show", "details"]),
    (Operation::Configure, &["configure", "config", "settings", "setup", "customize"]),
    (Operation::Monitor, &["monitor", "watch", "track", "follow"]),
    (Operation::Download, &["download", "grab", "get subtitle", "fetch subtitle"]),
    (Operation::Request, &["request", "want", "need", "ask for"]),
    (Operation::Approve, &["approve", "accept", "decline", "reject"]),
    (Operation::Sync, &["sync", "synchronize", "update apps"]),
    (Operation::Backup, &["backup", "save", "export database"]),
    (Operation::Play, &["play", "playing", "stream", "streaming"]),
    (Operation::Scan, &["scan", "analyze", "index"]),
    (Operation::Refresh, &["refresh", "reload", "update library"]),
    (Operation::Watch, &["mark watched", "mark as watched", "scrobble"]),
];

/// Operation assumed when a request names no operation at all.
const FALLBACK_OPERATIONS: &[(Service, Operation)] = &[
    (Service::Sonarr, Operation::Search),
    (Service::Radarr, Operation::Search),
    (Service::Prowlarr, Operation::List),
    (Service::Bazarr, Operation::Search),
    (Service::Overseerr, Operation::Request),
    (Service::Plex, Operation::Get),
];

/// A keyword phrase with its precomputed match weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    text: String,
    weight: f64,
}

impl Phrase {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            weight: phrase_weight(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Weight added when a phrase matches: `1.0 + 0.2` per word.
///
/// Multi-word phrases are less likely to match by accident, so they count more.
pub fn phrase_weight(phrase: &str) -> f64 {
    1.0 + 0.2 * phrase.split_whitespace().count() as f64
}

/// Keyword tables for service and operation classification.
///
/// Built once and read-only afterwards. Phrase lists are indexed by the
/// enum's declaration order.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    services: Vec<Vec<Phrase>>,
    operations: Vec<Vec<Phrase>>,
    fallback_operations: Vec<(Service, Operation)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordTable {
    /// The built-in phrase tables.
    pub fn builtin() -> Self {
        let mut services = vec![Vec::new(); Service::ALL.len()];
        for (service, phrases) in SERVICE_KEYWORDS {
            services[service.index()].extend(phrases.iter().map(|p| Phrase::new(p)));
        }
        let mut operations = vec![Vec::new(); Operation::ALL.len()];
        for (op, phrases) in OPERATION_KEYWORDS {
            operations[op.index()].extend(phrases.iter().map(|p| Phrase::new(p)));
        }
        Self {
            services,
            operations,
            fallback_operations: FALLBACK_OPERATIONS.to_vec(),
        }
    }

    /// A table with no phrases and no fallback operations.
    pub fn empty() -> Self {
        Self {
            services: vec![Vec::new(); Service::ALL.len()],
            operations: vec![Vec::new(); Operation::ALL.len()],
            fallback_operations: Vec::new(),
        }
    }

    /// Append phrases to a service's list, after the existing ones.
    pub fn extend_service<S: AsRef<str>>(
        &mut self,
        service: Service,
        phrases: impl IntoIterator<Item = S>,
    ) -> Result<(), IntentError> {
        let list = &mut self.services[service.index()];
        for phrase in phrases {
            let phrase = phrase.as_ref();
            validate_phrase(service.as_str(), phrase)?;
            list.push(Phrase::new(phrase));
        }
        Ok(())
    }

    /// Append phrases to an operation's list, after the existing ones.
    pub fn extend_operation<S: AsRef<str>>(
        &mut self,
        operation: Operation,
        phrases: impl IntoIterator<Item = S>,
    ) -> Result<(), IntentError> {
        let list = &mut self.operations[operation.index()];
        for phrase in phrases {
            let phrase = phrase.as_ref();
            validate_phrase(operation.as_str(), phrase)?;
            list.push(Phrase::new(phrase));
        }
        Ok(())
    }

    /// Set the operation used for `service` when no operation keyword matches.
    pub fn set_fallback_operation(&mut self, service: Service, operation: Operation) {
        self.fallback_operations.retain(|(s, _)| *s != service);
        self.fallback_operations.push((service, operation));
    }

    pub fn service_phrases(&self, service: Service) -> &[Phrase] {
        &self.services[service.index()]
    }

    pub fn operation_phrases(&self, operation: Operation) -> &[Phrase] {
        &self.operations[operation.index()]
    }

    /// Default operation for `service`; services without an entry get `List`.
    pub fn fallback_operation(&self, service: Service) -> Operation {
        self.fallback_operations
            .iter()
            .find(|(s, _)| *s == service)
            .map(|(_, op)| *op)
            .unwrap_or(Operation::List)
    }
}

/// A phrase must be non-empty, lowercase, and free of surrounding whitespace.
fn validate_phrase(owner: &str, phrase: &str) -> Result<(), IntentError> {
    let valid = !phrase.trim().is_empty()
        && phrase.trim() == phrase
        && phrase.to_lowercase() == phrase;
    if valid {
        Ok(())
    } else {
        Err(IntentError::InvalidPhrase {
            owner: owner.to_string(),
            phrase: phrase.to_string(),
        })
    }
}
