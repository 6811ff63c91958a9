use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::record::{
    ApiRecord, Contact, DirectoryDetails, ExternalDocs, RecordDetails, NO_DESCRIPTION,
    UNKNOWN_OPENAPI,
};

/// One `list.json` entry, keyed by `<provider>:<suffix>` in the parent object.
#[derive(Debug, Deserialize)]
pub struct DirectoryEntry {
    pub added: String,
    pub preferred: String,
    /// Left raw: only the preferred version is ever read, and older versions
    /// are often incomplete.
    #[serde(default)]
    pub versions: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryVersion {
    pub updated: String,
    pub info: VersionInfo,
    pub swagger_url: String,
    pub swagger_yaml_url: String,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    #[serde(default)]
    pub openapi_ver: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VersionInfo {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default, rename = "x-logo")]
    pub logo: Option<Logo>,
}

#[derive(Debug, Deserialize)]
pub struct Logo {
    pub url: String,
}

/// Deserialize a raw directory body and normalize it.
///
/// Entries that do not match the entry shape are logged and skipped; only a
/// body that is not a JSON object is an error.
pub fn parse_directory(body: &str) -> Result<Vec<ApiRecord>> {
    let raw: Map<String, Value> =
        serde_json::from_str(body).context("Directory response is not a JSON object")?;

    let mut entries = Vec::with_capacity(raw.len());
    for (id, value) in raw {
        match serde_json::from_value::<DirectoryEntry>(value) {
            Ok(entry) => entries.push((id, entry)),
            Err(e) => warn!("Skipping malformed directory entry {}: {}", id, e),
        }
    }

    Ok(transform_directory(entries))
}

/// Build one record per entry from its preferred version, keeping input order.
/// Entries whose preferred version is missing produce nothing.
pub fn transform_directory<I>(entries: I) -> Vec<ApiRecord>
where
    I: IntoIterator<Item = (String, DirectoryEntry)>,
{
    entries
        .into_iter()
        .filter_map(|(id, entry)| transform_entry(&id, entry))
        .collect()
}

fn transform_entry(id: &str, mut entry: DirectoryEntry) -> Option<ApiRecord> {
    let Some(raw) = entry.versions.remove(&entry.preferred) else {
        debug!("No preferred version {:?} for {}", entry.preferred, id);
        return None;
    };
    let version = match serde_json::from_value::<DirectoryVersion>(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Skipping {}: malformed version {:?}: {}", id, entry.preferred, e);
            return None;
        }
    };

    let info = version.info;
    let url = info
        .contact
        .as_ref()
        .and_then(|c| c.url.clone())
        .unwrap_or_else(|| version.swagger_url.clone());

    Some(ApiRecord {
        name: info.title,
        description: info.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        url,
        category: provider(id).to_string(),
        details: RecordDetails::Directory(DirectoryDetails {
            version: info.version,
            added: entry.added,
            updated: version.updated,
            openapi_version: version
                .openapi_ver
                .unwrap_or_else(|| UNKNOWN_OPENAPI.to_string()),
            swagger_url: version.swagger_url,
            swagger_yaml_url: version.swagger_yaml_url,
            logo: info.logo.map(|l| l.url),
            contact: info.contact,
            external_docs: version.external_docs,
        }),
    })
}

/// Text before the first `:`; the whole id when there is none.
fn provider(id: &str) -> &str {
    id.split(':').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry() {
        let body = r#"{
            "test:v1": {
                "added": "2020-01-01T00:00:00.000Z",
                "preferred": "1.0.0",
                "versions": {
                    "1.0.0": {
                        "added": "2020-01-01T00:00:00.000Z",
                        "updated": "2021-06-01T00:00:00.000Z",
                        "info": { "title": "Test API", "version": "1.0.0" },
                        "swaggerUrl": "https://example.com/swagger.json",
                        "swaggerYamlUrl": "https://example.com/swagger.yaml"
                    }
                }
            }
        }"#;
        let apis = parse_directory(body).unwrap();
        assert_eq!(apis.len(), 1);
        let api = &apis[0];
        assert_eq!(api.name, "Test API");
        assert_eq!(api.category, "test");
        assert_eq!(api.description, NO_DESCRIPTION);
        assert_eq!(api.url, "https://example.com/swagger.json");
        let d = api.directory().unwrap();
        assert_eq!(d.openapi_version, UNKNOWN_OPENAPI);
        assert_eq!(d.updated, "2021-06-01T00:00:00.000Z");
        assert!(d.logo.is_none() && d.contact.is_none() && d.external_docs.is_none());
    }

    #[test]
    fn missing_preferred_version() {
        let body = r#"{ "test:v1": { "added": "2020-01-01", "preferred": "non-existent", "versions": {} } }"#;
        assert!(parse_directory(body).unwrap().is_empty());
    }

    #[test]
    fn incomplete_older_version_ignored() {
        let body = r#"{
            "p:x": {
                "added": "2020-01-01T00:00:00.000Z",
                "preferred": "2.0",
                "versions": {
                    "1.0": { "updated": "2019-01-01T00:00:00.000Z", "info": { "title": "Old" } },
                    "2.0": {
                        "updated": "2021-01-01T00:00:00.000Z",
                        "info": { "title": "Current", "version": "2.0" },
                        "swaggerUrl": "https://example.com/2.0/openapi.json",
                        "swaggerYamlUrl": "https://example.com/2.0/openapi.yaml"
                    }
                }
            }
        }"#;
        let apis = parse_directory(body).unwrap();
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].name, "Current");
        assert_eq!(apis[0].category, "p");
    }

    #[test]
    fn malformed_preferred_version_skipped() {
        let body = r#"{
            "bad:x": {
                "added": "2020-01-01T00:00:00.000Z",
                "preferred": "1.0",
                "versions": { "1.0": { "updated": "2019-01-01T00:00:00.000Z", "info": { "title": "Half" } } }
            },
            "good:y": {
                "added": "2020-01-01T00:00:00.000Z",
                "preferred": "1.0",
                "versions": {
                    "1.0": {
                        "updated": "2021-01-01T00:00:00.000Z",
                        "info": { "title": "Whole", "version": "1.0" },
                        "swaggerUrl": "https://example.com/openapi.json",
                        "swaggerYamlUrl": "https://example.com/openapi.yaml"
                    }
                }
            }
        }"#;
        let apis = parse_directory(body).unwrap();
        let names: Vec<&str> = apis.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Whole"]);
    }

    #[test]
    fn empty_object() {
        assert!(parse_directory("{}").unwrap().is_empty());
        assert!(transform_directory(Vec::<(String, DirectoryEntry)>::new()).is_empty());
    }

    #[test]
    fn not_an_object() {
        assert!(parse_directory("[1, 2]").is_err());
        assert!(parse_directory("not json").is_err());
    }

    #[test]
    fn fixture_keeps_order_and_skips_bad_entries() {
        let body = std::fs::read_to_string("tests/fixtures/apis-guru.json").unwrap();
        let apis = parse_directory(&body).unwrap();
        let names: Vec<&str> = apis.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Weather Service", "Amazon S3", "Amazon EC2", "1Forge Finance APIs"]);

        let categories: Vec<&str> = apis.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(categories, ["zeta.example", "amazonaws.com", "amazonaws.com", "1forge.com"]);
    }

    #[test]
    fn fixture_optional_fields() {
        let body = std::fs::read_to_string("tests/fixtures/apis-guru.json").unwrap();
        let apis = parse_directory(&body).unwrap();

        let forge = apis.iter().find(|a| a.category == "1forge.com").unwrap();
        assert_eq!(forge.url, "http://1forge.com");
        let d = forge.directory().unwrap();
        assert_eq!(d.version, "0.0.1");
        assert_eq!(d.openapi_version, "2.0");
        assert_eq!(d.logo.as_deref(), Some("https://api.apis.guru/v2/cache/logo/https_1forge.com_wp-content_uploads_2017_12_1forge-logo.png"));
        assert_eq!(d.contact.as_ref().and_then(|c| c.email.as_deref()), Some("contact@1forge.com"));
        assert_eq!(d.added, "2017-05-30T08:34:14.000Z");
        assert_eq!(d.updated, "2017-06-27T16:49:57.000Z");

        let s3 = apis.iter().find(|a| a.name == "Amazon S3").unwrap();
        let docs = s3.directory().unwrap().external_docs.as_ref().unwrap();
        assert_eq!(docs.url, "https://docs.aws.amazon.com/s3/");
        assert_eq!(s3.url, "https://api.apis.guru/v2/specs/amazonaws.com/s3/2006-03-01/openapi.json");
    }
}
