use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::{Settings, SourceKind};
use crate::parser::RawSource;

/// Fetch raw input for the configured source. Nothing is parsed here.
pub async fn load(settings: &Settings) -> Result<RawSource> {
    match settings.source {
        SourceKind::Markdown => read_markdown(&settings.markdown).await.map(RawSource::Markdown),
        SourceKind::Directory => fetch_directory(&settings.directory_url, settings.timeout())
            .await
            .map(RawSource::Directory),
    }
}

async fn read_markdown(path: &Path) -> Result<String> {
    info!("Reading API list: {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// GET the directory listing. Any non-2xx status is an error; the body is
/// returned untouched.
pub async fn fetch_directory(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    info!("Fetching API directory: {}", url);
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result: Result<String> = async {
        let response = client
            .get(url)
            .send()
            .await
            .context("Failed to fetch APIs")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Failed to fetch APIs: HTTP {}", status);
        }

        response
            .text()
            .await
            .context("Failed to read directory response")
    }
    .await;

    pb.finish_and_clear();
    let body = result?;
    info!("Directory response: {} bytes", body.len());
    Ok(body)
}
