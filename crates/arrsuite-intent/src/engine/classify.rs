use crate::keyword::{KeywordTable, Phrase};
use crate::operation::Operation;
use crate::service::Service;

/// Service assumed when no service keyword matches: a bare "get me this"
/// request is treated as a media request.
pub const FALLBACK_SERVICE: Service = Service::Overseerr;
pub const FALLBACK_SERVICE_CONFIDENCE: f64 = 0.3;
pub const FALLBACK_OPERATION_CONFIDENCE: f64 = 0.5;

/// Score at which service confidence saturates.
const SERVICE_SCORE_CEILING: f64 = 3.0;
/// Score at which operation confidence saturates. Operation phrase lists are
/// shorter, so this saturates sooner.
const OPERATION_SCORE_CEILING: f64 = 2.0;

/// Pick the service whose phrases best match a lowercased query.
pub fn identify_service(table: &KeywordTable, query: &str) -> (Service, f64) {
    let scores = Service::ALL.map(|s| (s, score(query, table.service_phrases(s))));

    match strongest(&scores) {
        Some((service, max)) => {
            tracing::debug!(service = %service, score = max, "Service identified");
            (service, (max / SERVICE_SCORE_CEILING).min(1.0))
        }
        None => {
            tracing::debug!(service = %FALLBACK_SERVICE, "No service keyword matched, using fallback");
            (FALLBACK_SERVICE, FALLBACK_SERVICE_CONFIDENCE)
        }
    }
}

/// Pick the operation whose phrases best match a lowercased query.
///
/// `service` only matters when nothing matches: each service has its own
/// default operation.
pub fn identify_operation(table: &KeywordTable, query: &str, service: Service) -> (Operation, f64) {
    let scores = Operation::ALL.map(|op| (op, score(query, table.operation_phrases(op))));

    match strongest(&scores) {
        Some((operation, max)) => {
            tracing::debug!(operation = %operation, score = max, "Operation identified");
            (operation, (max / OPERATION_SCORE_CEILING).min(1.0))
        }
        None => {
            let operation = table.fallback_operation(service);
            tracing::debug!(
                service = %service,
                operation = %operation,
                "No operation keyword matched, using service default"
            );
            (operation, FALLBACK_OPERATION_CONFIDENCE)
        }
    }
}

/// Sum of the weights of every phrase contained in `query`.
/// Each phrase counts at most once.
fn score(query: &str, phrases: &[Phrase]) -> f64 {
    phrases
        .iter()
        .filter(|p| query.contains(p.text()))
        .inspect(|p| tracing::trace!(phrase = p.text(), weight = p.weight(), "Keyword matched"))
        .map(Phrase::weight)
        .sum()
}

/// First candidate holding the strictly highest score, or `None` when
/// every score is zero.
fn strongest<K: Copy>(scores: &[(K, f64)]) -> Option<(K, f64)> {
    let mut best: Option<(K, f64)> = None;
    for &(key, value) in scores {
        if value > best.map_or(0.0, |(_, v)| v) {
            best = Some((key, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> KeywordTable {
        KeywordTable::builtin()
    }

    #[test]
    fn test_strongest_prefers_first_on_tie() {
        let scores = [("a", 1.2), ("b", 1.2), ("c", 0.0)];
        assert_eq!(strongest(&scores), Some(("a", 1.2)));
    }

    #[test]
    fn test_strongest_none_when_all_zero() {
        let scores = [("a", 0.0), ("b", 0.0)];
        assert_eq!(strongest(&scores), None);
    }

    #[test]
    fn test_single_keyword_service() {
        let (service, confidence) = identify_service(&builtin(), "list my anime");
        assert_eq!(service, Service::Sonarr);
        assert!((confidence - 1.2 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_word_phrase_counts_more() {
        // "media server" (1.4) + "server" (1.2) for Plex.
        let (service, confidence) = identify_service(&builtin(), "restart the media server");
        assert_eq!(service, Service::Plex);
        assert!((confidence - 2.6 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_service_fallback() {
        assert_eq!(
            identify_service(&builtin(), "hello there"),
            (Service::Overseerr, 0.3)
        );
    }

    #[test]
    fn test_service_confidence_saturates() {
        let query = "tv show series episode season sonarr television tvdb anime";
        let (service, confidence) = identify_service(&builtin(), query);
        assert_eq!(service, Service::Sonarr);
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn test_service_tie_goes_to_first_declared() {
        // "collection" belongs to both Radarr and Plex.
        let (service, _) = identify_service(&builtin(), "collection");
        assert_eq!(service, Service::Radarr);
    }

    #[test]
    fn test_operation_fallback_per_service() {
        let table = builtin();
        let query = "hello there";
        assert_eq!(identify_operation(&table, query, Service::Sonarr), (Operation::Search, 0.5));
        assert_eq!(identify_operation(&table, query, Service::Radarr), (Operation::Search, 0.5));
        assert_eq!(identify_operation(&table, query, Service::Prowlarr), (Operation::List, 0.5));
        assert_eq!(identify_operation(&table, query, Service::Bazarr), (Operation::Search, 0.5));
        assert_eq!(identify_operation(&table, query, Service::Overseerr), (Operation::Request, 0.5));
        assert_eq!(identify_operation(&table, query, Service::Plex), (Operation::Get, 0.5));
    }

    #[test]
    fn test_operation_fallback_without_table_entry() {
        let table = KeywordTable::empty();
        assert_eq!(identify_operation(&table, "anything", Service::Plex), (Operation::List, 0.5));
    }

    #[test]
    fn test_operation_ignores_service_when_matched() {
        let table = builtin();
        let (op, confidence) = identify_operation(&table, "scrobble this", Service::Sonarr);
        assert_eq!(op, Operation::Watch);
        assert!((confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_operation_confidence_saturates() {
        let (op, confidence) =
            identify_operation(&builtin(), "search find lookup query locate", Service::Radarr);
        assert_eq!(op, Operation::Search);
        assert_eq!(confidence, 1.0);
    }
}
