//! Record filter engine.
//!
//! Case-insensitive substring matching over a per-record search corpus.
//! Pure functions only: the same records and query always give the same
//! result, with no dependence on view state.

use crate::model::FlowRecord;

/// Build the searchable text for a record.
///
/// Fields are taken in fixed order (`stage`, `company`, `from`, `to`,
/// `date`, then every tag) and joined by single spaces. Absent or empty
/// fields contribute nothing, not even a separator. Reference codes and
/// metrics are not searchable.
pub fn search_corpus(record: &FlowRecord) -> String {
    let fields = [
        Some(record.stage.as_str()),
        record.company.as_deref(),
        record.from.as_deref(),
        record.to.as_deref(),
        record.date.as_deref(),
    ];

    fields
        .into_iter()
        .flatten()
        .chain(record.tags().iter().map(String::as_str))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a record matches an already lower-cased, non-empty query.
fn matches_lowered(record: &FlowRecord, query_lower: &str) -> bool {
    search_corpus(record).to_lowercase().contains(query_lower)
}

/// Whether `record` matches `query`.
///
/// The empty query matches everything. No trimming is applied: a query of
/// a single space matches only records whose corpus contains a space.
pub fn record_matches(record: &FlowRecord, query: &str) -> bool {
    query.is_empty() || matches_lowered(record, &query.to_lowercase())
}

/// Filter records by query, preserving their original order.
///
/// The exactly-empty query returns every record.
pub fn filter<'a>(records: &'a [FlowRecord], query: &str) -> Vec<&'a FlowRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let query_lower = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_lowered(record, &query_lower))
        .collect()
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
