//! Multi-line extractor
//!
//! Runs every multiline rule of a registry over the whole text and collects what they
//! claim. Nothing is reconciled here: matches may overlap, and are returned sorted by
//! start offset with registration order breaking ties. See
//! [`super::assembler::resolve_overlaps`] for what happens next.

use crate::context::ParserContext;
use crate::element::Match;
use crate::registry::RuleRegistry;

/// All multiline matches in `text`, sorted by start offset.
pub fn find_all_matches(registry: &RuleRegistry, text: &str, ctx: &ParserContext<'_>) -> Vec<Match> {
    let fallback = registry.fallback().name();
    let mut matches = Vec::new();

    for rule in registry.multiline_rules() {
        if rule.name() == fallback || !rule.matches_markdown(text) {
            continue;
        }
        let Some(multiline) = rule.as_multiline() else {
            continue;
        };

        let found = multiline.find_matches(text, ctx);
        let before = matches.len();
        matches.extend(
            found
                .into_iter()
                .filter(|m| is_valid_claim(text, m, rule.name())),
        );
        log::debug!("{} claimed {} span(s)", rule.name(), matches.len() - before);
    }

    // Stable, so equal starts keep registration order
    matches.sort_by_key(|m| m.start);
    matches
}

/// A claim must cover a non-empty range that starts a line at column 0.
fn is_valid_claim(text: &str, m: &Match, rule: &str) -> bool {
    let in_bounds = m.start < m.end
        && m.end <= text.len()
        && text.is_char_boundary(m.start)
        && text.is_char_boundary(m.end);
    let valid = in_bounds
        && (m.start == 0 || text.as_bytes()[m.start - 1] == b'\n')
        && !text[m.start..].starts_with([' ', '\t']);

    if !valid {
        log::warn!(
            "{rule} returned an invalid span {}..{}, ignoring it",
            m.start,
            m.end
        );
    }
    valid
}
