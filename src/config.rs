use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};

pub const DEFAULT_MARKDOWN_PATH: &str = "test.md";
pub const DEFAULT_DIRECTORY_URL: &str = "https://api.apis.guru/v2/list.json";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Curated markdown table on disk
    Markdown,
    /// Remote APIs.guru-style directory listing
    Directory,
}

/// Options shared by every subcommand. Each one can also come from the
/// environment.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Where records come from
    #[arg(long, global = true, env = "APIS_SOURCE", value_enum, default_value_t = SourceKind::Markdown)]
    pub source: SourceKind,

    /// Markdown file to parse when --source=markdown
    #[arg(long, global = true, env = "APIS_MARKDOWN", default_value = DEFAULT_MARKDOWN_PATH)]
    pub markdown: PathBuf,

    /// Directory listing URL when --source=directory
    #[arg(long, global = true, env = "APIS_DIRECTORY_URL", default_value = DEFAULT_DIRECTORY_URL)]
    pub directory_url: String,

    /// HTTP timeout for the directory fetch
    #[arg(long, global = true, env = "APIS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Records per page in list view
    #[arg(long, global = true, env = "APIS_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = parse_page_size)]
    pub page_size: usize,
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
