pub mod directory;
pub mod markdown;

use anyhow::Result;

use crate::record::ApiRecord;

/// Raw input as handed over by the source loader.
pub enum RawSource {
    Markdown(String),
    Directory(String),
}

/// Raw text → uniform records. Every record in the result shares one variant.
pub fn normalize(raw: &RawSource) -> Result<Vec<ApiRecord>> {
    match raw {
        RawSource::Markdown(text) => Ok(markdown::parse_apis(text)),
        RawSource::Directory(body) => directory::parse_directory(body),
    }
}
