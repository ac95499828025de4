//! Entity occurrence counting.
//!
//! Entities are matched longest-name-first and every matched name span is
//! masked before shorter names are tried, so "bitcoin cash" is never also
//! counted as "bitcoin".

use collector_core::{Entity, Weighting, REPLACEMENT_CHAR};
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Written over each matched name span.
const MASK: &str = "___";

/// Count occurrences of every entity in `text`, keyed by entity symbol.
///
/// The count for an entity is the larger of its name count and its symbol
/// count. Entities with no occurrence are omitted.
pub fn compute_weighting(text: &str, entities: &[Entity]) -> Weighting {
    let mut result = Weighting::new();
    if text.is_empty() || entities.is_empty() {
        return result;
    }

    // Stable: equal word counts keep catalog order
    let mut ordered: Vec<&Entity> = entities.iter().collect();
    ordered.sort_by(|a, b| b.word_count().cmp(&a.word_count()));

    let mut working = text.to_string();
    for entity in ordered {
        let name_count = match token_pattern(&entity.name) {
            Some(pattern) => {
                let spans = bounded_matches(&working, &pattern);
                if !spans.is_empty() {
                    working = mask_spans(&working, &spans);
                }
                spans.len()
            }
            None => 0,
        };

        let symbol_count = token_pattern(&entity.symbol)
            .map(|pattern| bounded_matches(&working, &pattern).len())
            .unwrap_or(0);

        // Entities sharing a symbol see the same symbol tokens; keep the larger count
        let count = name_count.max(symbol_count) as u32;
        if count > 0 {
            let entry = result.entry(entity.symbol.clone()).or_insert(0);
            *entry = (*entry).max(count);
        }
    }

    result
}

fn token_pattern(token: &str) -> Option<Regex> {
    let token = token.trim();
    // Tokens made only of placeholders would match the mask itself
    if token.chars().all(|c| c == REPLACEMENT_CHAR || c.is_whitespace()) {
        return None;
    }
    match RegexBuilder::new(&regex::escape(token))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("Skipping unmatchable entity token {:?}: {}", token, e);
            None
        }
    }
}

/// Non-overlapping matches whose neighbours are whitespace or the text edge.
fn bounded_matches(text: &str, pattern: &Regex) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;

    while start <= text.len() {
        let Some(m) = pattern.find_at(text, start) else {
            break;
        };

        let before_ok = text[..m.start()]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let after_ok = text[m.end()..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);

        if before_ok && after_ok && !m.range().is_empty() {
            spans.push(m.range());
            start = m.end();
        } else {
            // Retry one character further so an overlapping bounded match is not missed
            start = m.start()
                + text[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
    }

    spans
}

fn mask_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        masked.push_str(&text[last..span.start]);
        masked.push_str(MASK);
        last = span.end;
    }
    masked.push_str(&text[last..]);
    masked
}
