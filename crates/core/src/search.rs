//! Free-text search and exact-match filtering over list results.
//!
//! Records are matched on their wire representation, so any top-level field
//! the store returns is searchable.

use serde::Serialize;
use serde_json::Value;

/// Keep the records that contain `search` (case-insensitive, any top-level
/// value) and match every `(field, value)` filter exactly.
///
/// A blank search term or a blank filter value matches everything.
pub fn filter_records<T: Serialize>(
    records: Vec<T>,
    search: Option<&str>,
    filters: &[(&str, Option<&str>)],
) -> Vec<T> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let filters: Vec<(&str, &str)> = filters
        .iter()
        .filter_map(|(field, value)| value.filter(|v| !v.is_empty()).map(|v| (*field, v)))
        .collect();

    if needle.is_none() && filters.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            let Ok(Value::Object(map)) = serde_json::to_value(record) else {
                return false;
            };
            let matches_search = needle.as_deref().map_or(true, |needle| {
                map.values()
                    .any(|v| display(v).to_lowercase().contains(needle))
            });
            matches_search
                && filters
                    .iter()
                    .all(|(field, want)| map.get(*field).is_some_and(|v| display(v) == *want))
        })
        .collect()
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
