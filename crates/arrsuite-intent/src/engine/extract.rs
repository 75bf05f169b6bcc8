use crate::context::{Context, ContextKey};
use crate::pattern::ContextPatternTable;

/// Pull structured parameters out of an original-case query.
///
/// Each key takes the capture of its first matching pattern; keys with no
/// match are left out. `monitored` and `search_on_add` are always set,
/// `is_4k` only when 4K is mentioned.
pub fn extract_context(patterns: &ContextPatternTable, query: &str) -> Context {
    let mut context = Context::new();

    for (key, regexes) in patterns.iter() {
        let captured = regexes
            .iter()
            .find_map(|re| re.captures(query))
            .and_then(|caps| caps.get(1));
        if let Some(m) = captured {
            tracing::trace!(key = %key, value = m.as_str(), "Context extracted");
            context.insert_text(key, m.as_str());
        }
    }

    let lower = query.to_lowercase();
    context.insert_flag(ContextKey::Monitored, !lower.contains("unmonitor"));
    context.insert_flag(ContextKey::SearchOnAdd, !lower.contains("don't search"));
    if lower.contains("4k") {
        context.insert_flag(ContextKey::Is4k, true);
    }

    context
}
