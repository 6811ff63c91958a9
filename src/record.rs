use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN_OPENAPI: &str = "Unknown";

/// One normalized catalog entry. Shared fields live here, source-specific
/// fields live in `details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRecord {
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    #[serde(flatten)]
    pub details: RecordDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RecordDetails {
    /// Row from the curated markdown table.
    Listing {
        auth: String,
        https: bool,
        cors: String,
    },
    /// Entry from the directory service.
    Directory(DirectoryDetails),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryDetails {
    pub version: String,
    pub added: String,
    pub updated: String,
    pub openapi_version: String,
    pub swagger_url: String,
    pub swagger_yaml_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

impl ApiRecord {
    /// Stable lookup key: `<category>/<name>`, both slugged. Names alone
    /// collide across categories.
    pub fn id(&self) -> String {
        format!("{}/{}", slugify(&self.category), slugify(&self.name))
    }

    pub fn listing(&self) -> Option<(&str, bool, &str)> {
        match &self.details {
            RecordDetails::Listing { auth, https, cors } => Some((auth, *https, cors)),
            RecordDetails::Directory(_) => None,
        }
    }

    pub fn directory(&self) -> Option<&DirectoryDetails> {
        match &self.details {
            RecordDetails::Directory(d) => Some(d),
            RecordDetails::Listing { .. } => None,
        }
    }
}

/// Lowercase ASCII alphanumerics; every other run becomes a single `-`.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn listing(name: &str, category: &str, auth: &str, https: bool, cors: &str) -> ApiRecord {
    ApiRecord {
        name: name.to_string(),
        description: format!("{} description", name),
        url: format!("https://{}.example.com", slugify(name)),
        category: category.to_string(),
        details: RecordDetails::Listing {
            auth: auth.to_string(),
            https,
            cors: cors.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_runs() {
        assert_eq!(slugify("Cat Facts!!  API"), "cat-facts-api");
        assert_eq!(slugify("  --Open Library"), "open-library");
        assert_eq!(slugify("1forge.com"), "1forge-com");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn id_disambiguates_same_name() {
        let a = listing("Weather", "Science", "No", true, "Yes");
        let b = listing("Weather", "Travel", "No", true, "Yes");
        assert_eq!(a.name, b.name);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), "science/weather");
    }

    #[test]
    fn serializes_listing_flat() {
        let r = listing("Dog API", "Animals", "", true, "Yes");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["source"], "listing");
        assert_eq!(v["https"], true);
        assert_eq!(v["category"], "Animals");
    }
}
