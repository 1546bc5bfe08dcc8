use std::cmp::Ordering;

use super::model::{Catalog, PriceRecord};

// ---------------------------------------------------------------------------
// Filter criteria: free text plus location patterns
// ---------------------------------------------------------------------------

/// Case-insensitive substring patterns. An empty pattern matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Matched against the product name.
    pub text: String,
    pub city: String,
    pub state: String,
}

impl FilterCriteria {
    pub fn new(text: impl Into<String>, city: impl Into<String>, state: impl Into<String>) -> Self {
        FilterCriteria {
            text: text.into(),
            city: city.into(),
            state: state.into(),
        }
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a single record passes `criteria`.
///
/// Only product, city and state are looked at; brand, unit and place are
/// never filtered.
pub fn matches(rec: &PriceRecord, criteria: &FilterCriteria) -> bool {
    contains_folded(&rec.product, &criteria.text)
        && contains_folded(&rec.city, &criteria.city)
        && contains_folded(&rec.state, &criteria.state)
}

/// Return catalog indices of records that pass `criteria`, cheapest first.
///
/// Always rescans the whole catalog; nothing is cached between calls, so the
/// result only depends on the catalog and the criteria. Equal prices keep
/// their catalog order (`sort_by` is stable).
pub fn filtered_indices(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<usize> {
    let records = catalog.records();

    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, criteria))
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| {
        records[a]
            .price
            .partial_cmp(&records[b].price)
            .unwrap_or(Ordering::Equal)
    });
    indices
}

/// The matching records themselves, in the same order as [`filtered_indices`].
pub fn query<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a PriceRecord> {
    filtered_indices(catalog, criteria)
        .into_iter()
        .filter_map(|i| catalog.get(i))
        .collect()
}

/// Counter text shown above the result table.
pub fn result_summary(count: usize) -> String {
    match count {
        0 => "No product found".to_string(),
        1 => "1 result found".to_string(),
        n => format!("{n} results found"),
    }
}
