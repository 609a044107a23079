//! Tag attribute parsing.

use std::collections::BTreeSet;

/// Parse a raw `data-tags` attribute into a set of lowercase tag tokens.
///
/// Tokens are separated by any Unicode whitespace; empty tokens are dropped.
/// The result is ordered so that iteration is deterministic.
#[must_use]
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split_whitespace().map(str::to_lowercase).collect()
}
