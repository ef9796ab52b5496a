//! Extraction of school records from the portal's raw search response.
//!
//! A detail-search response is a `||`-delimited string: one segment carries
//! the grand total as a bare decimal, another carries (or contains) a JSON
//! array of school objects. The format is fragile — the delimiter can land
//! inside JSON string values and corrupt segment boundaries — so candidate
//! location runs two strategies in fixed order, and every failure mode
//! degrades to an empty result instead of an error.

use crate::types::{RawSchool, School, SearchResults};

/// Separator between segments of a search response.
const SEGMENT_SEPARATOR: &str = "||";

/// Quoted field name that positively identifies the school-array segment.
const SCHOOL_ARRAY_MARKER: &str = "\"cod_mod\"";

/// Extracts the grand total and school records from a raw search response.
///
/// Never fails: inputs with no recognizable total yield `total = 0`, inputs
/// with no recognizable JSON array yield an empty record list, and a
/// candidate array that fails to parse discards the whole result, an
/// already-scanned total included. Diagnostics are logged, not returned.
#[must_use]
pub fn extract_schools(raw: &str) -> SearchResults {
    let total = scan_total(raw);

    let Some(candidate) = marker_segment(raw).or_else(|| bracket_span(raw)) else {
        tracing::warn!("no school JSON found in search response");
        return SearchResults {
            total,
            schools: Vec::new(),
        };
    };

    match serde_json::from_str::<Vec<RawSchool>>(candidate) {
        Ok(records) => SearchResults {
            total,
            schools: records.into_iter().map(School::from_raw).collect(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "school JSON candidate failed to parse");
            // A bad candidate invalidates the whole response, total included.
            SearchResults {
                total: 0,
                schools: Vec::new(),
            }
        }
    }
}

/// Scans `||` segments for the grand total: the first trimmed segment made
/// up entirely of ASCII digits wins, later digit-only segments are ignored.
/// Returns 0 when no segment qualifies. A digit run too long for `u64`
/// still counts as the match and saturates.
fn scan_total(raw: &str) -> u64 {
    raw.split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .find(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .map_or(0, |s| s.parse().unwrap_or(u64::MAX))
}

/// Primary strategy: the first trimmed `||` segment that starts with `[`
/// and carries the `"cod_mod"` marker. The marker check is a content
/// sniff, not schema validation; it keeps unrelated bracketed segments
/// from being picked up.
fn marker_segment(raw: &str) -> Option<&str> {
    raw.split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .find(|s| s.starts_with('[') && s.contains(SCHOOL_ARRAY_MARKER))
}

/// Fallback strategy: the span from the first `[{` to the last `]` of the
/// untrimmed input. Recovers the array when `||` landed inside a JSON
/// string value and broke the segment boundaries. The last `]` is not
/// guaranteed to close the array the `[{` opened; the JSON parse decides.
fn bracket_span(raw: &str) -> Option<&str> {
    let start = raw.find("[{")?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}
