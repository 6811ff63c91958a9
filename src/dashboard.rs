use std::collections::HashMap;

use serde::Serialize;

use crate::record::ApiRecord;

const NO_AUTH_LABEL: &str = "None";
const CORS_YES: &str = "Yes";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
    /// Share of all records, 0.0..=1.0.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingStats {
    pub auth_types: Vec<Bucket>,
    pub cors_yes: usize,
    pub https_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryStats {
    pub openapi_versions: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub categories: Vec<Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<ListingStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<DirectoryStats>,
}

impl Summary {
    pub fn from_records(apis: &[ApiRecord]) -> Self {
        let total = apis.len();
        let categories = breakdown(total, apis.iter().map(|a| a.category.as_str()));

        let listings: Vec<(&str, bool, &str)> = apis.iter().filter_map(ApiRecord::listing).collect();
        let listing = (!listings.is_empty()).then(|| {
            let auth_types = breakdown(
                total,
                listings
                    .iter()
                    .map(|&(auth, _, _)| if auth.is_empty() { NO_AUTH_LABEL } else { auth }),
            );
            let https = listings.iter().filter(|(_, https, _)| *https).count();
            ListingStats {
                auth_types,
                cors_yes: listings.iter().filter(|(_, _, cors)| *cors == CORS_YES).count(),
                https_percent: percent(https, total),
            }
        });

        let versions: Vec<&str> = apis
            .iter()
            .filter_map(ApiRecord::directory)
            .map(|d| d.openapi_version.as_str())
            .collect();
        let directory = (!versions.is_empty()).then(|| DirectoryStats {
            openapi_versions: breakdown(total, versions.into_iter()),
        });

        Summary {
            total,
            categories,
            listing,
            directory,
        }
    }
}

/// Count labels; highest count first, ties by label.
fn breakdown<'a>(total: usize, labels: impl Iterator<Item = &'a str>) -> Vec<Bucket> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, count)| Bucket {
            label: label.to_string(),
            count,
            share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    buckets
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::listing;

    fn sample() -> Vec<ApiRecord> {
        vec![
            listing("API 1", "Test", "apiKey", true, "yes"),
            listing("API 2", "Development", "OAuth", true, "no"),
            listing("API 3", "Test", "", false, "yes"),
        ]
    }

    fn count(buckets: &[Bucket], label: &str) -> Option<usize> {
        buckets.iter().find(|b| b.label == label).map(|b| b.count)
    }

    #[test]
    fn headline_metrics() {
        let s = Summary::from_records(&sample());
        assert_eq!(s.total, 3);
        assert_eq!(s.categories.len(), 2);
        let l = s.listing.unwrap();
        assert_eq!(l.auth_types.len(), 3);
        // only the exact "Yes" counts
        assert_eq!(l.cors_yes, 0);
        assert_eq!(l.https_percent, 67);
        assert!(s.directory.is_none());
    }

    #[test]
    fn breakdown_counts() {
        let s = Summary::from_records(&sample());
        assert_eq!(count(&s.categories, "Test"), Some(2));
        assert_eq!(count(&s.categories, "Development"), Some(1));
        let l = s.listing.unwrap();
        assert_eq!(count(&l.auth_types, "apiKey"), Some(1));
        assert_eq!(count(&l.auth_types, "OAuth"), Some(1));
        assert_eq!(count(&l.auth_types, "None"), Some(1));
    }

    #[test]
    fn ties_sorted_by_label() {
        let s = Summary::from_records(&sample());
        let labels: Vec<&str> = s.listing.as_ref().unwrap().auth_types.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["None", "OAuth", "apiKey"]);
        assert_eq!(s.categories[0].label, "Test");
        assert!((s.categories[0].share - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn category_scoped_summary() {
        let query = crate::filter::Query {
            search: None,
            category: Some("Test".to_string()),
        };
        let scoped = Summary::from_records(&crate::filter::apply(&sample(), &query));
        assert_eq!(scoped.total, 2);
        assert_eq!(scoped.categories.len(), 1);
        assert_eq!(scoped.categories[0].label, "Test");
        assert!((scoped.categories[0].share - 1.0).abs() < 1e-9);
        assert_eq!(scoped.listing.unwrap().https_percent, 50);
    }

    #[test]
    fn empty() {
        let s = Summary::from_records(&[]);
        assert_eq!(s.total, 0);
        assert!(s.categories.is_empty());
        assert!(s.listing.is_none());
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn directory_fixture() {
        let body = std::fs::read_to_string("tests/fixtures/apis-guru.json").unwrap();
        let apis = crate::parser::directory::parse_directory(&body).unwrap();
        let s = Summary::from_records(&apis);
        assert_eq!(s.total, 4);
        assert_eq!(s.categories[0].label, "amazonaws.com");
        assert_eq!(s.categories[0].count, 2);
        let versions = s.directory.unwrap().openapi_versions;
        assert_eq!(versions[0].label, "3.0.0");
        assert_eq!(count(&versions, "2.0"), Some(1));
        assert!(s.listing.is_none());
    }
}
