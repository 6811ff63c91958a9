use std::collections::BTreeSet;

use tracing::warn;

use crate::config::SourceKind;
use crate::record::ApiRecord;

/// Search text and category as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl Query {
    pub fn matches(&self, api: &ApiRecord) -> bool {
        self.matches_search(api) && self.matches_category(api)
    }

    fn matches_search(&self, api: &ApiRecord) -> bool {
        let Some(needle) = non_empty(&self.search) else {
            return true;
        };
        let needle = needle.to_lowercase();
        api.name.to_lowercase().contains(&needle)
            || api.description.to_lowercase().contains(&needle)
            || api.category.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, api: &ApiRecord) -> bool {
        match non_empty(&self.category) {
            Some(category) => api.category == category,
            None => true,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn apply(records: &[ApiRecord], query: &Query) -> Vec<ApiRecord> {
    records.iter().filter(|api| query.matches(api)).cloned().collect()
}

/// Distinct categories, sorted.
pub fn categories(records: &[ApiRecord]) -> Vec<String> {
    records
        .iter()
        .map(|api| api.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Category filtering only applies to the markdown source; the directory has
/// no curated categories to choose from.
pub fn effective_category(source: SourceKind, category: Option<String>) -> Option<String> {
    match source {
        SourceKind::Directory if category.is_some() => {
            warn!("--category is ignored for the directory source");
            None
        }
        _ => category,
    }
}

/// Resolve a detail-view key: a record id first, then an exact name. Names
/// are not unique; the first in source order wins.
pub fn find<'a>(records: &'a [ApiRecord], key: &str) -> Option<&'a ApiRecord> {
    if let Some(api) = records.iter().find(|api| api.id() == key) {
        return Some(api);
    }

    let mut by_name = records.iter().filter(|api| api.name == key);
    let first = by_name.next()?;
    let others = by_name.count();
    if others > 0 {
        warn!(
            "{} records are named {:?}; showing {}. Use the id to pick another.",
            others + 1,
            key,
            first.id()
        );
    }
    Some(first)
}

/// Page parameter → page number, floored at 1. Garbage reads as 1.
pub fn clamp_page(raw: Option<&str>) -> usize {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .map(|p| p.max(1) as usize)
        .unwrap_or(1)
}
