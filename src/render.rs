use chrono::DateTime;

use crate::dashboard::{Bucket, Summary};
use crate::paginate::{has_next, has_previous, page_window, PageResult, PageSlot};
use crate::record::{ApiRecord, DirectoryDetails, RecordDetails};

const WORDS_PER_LINE: usize = 12;
const DESCRIPTION_LINES: usize = 3;
const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 24;

/// List view: one block per record, then the pager.
pub fn list(page: &PageResult<ApiRecord>) -> String {
    if page.apis.is_empty() {
        let mut lines = vec!["No APIs found.".to_string()];
        if page.total > 0 {
            lines.push(format!(
                "Page {} is past the end ({} pages).",
                page.page, page.total_pages
            ));
        }
        return lines.join("\n");
    }

    let offset = (page.page - 1) * page.page_size;
    let mut lines = Vec::new();
    for (i, api) in page.apis.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {}  [{}]",
            offset + i + 1,
            api.name,
            api.category
        ));
        lines.push(format!("     {}", truncate_description(&api.description)));
        lines.push(format!("     {}", badges(api)));
        lines.push(format!("     id: {}", api.id()));
        lines.push(String::new());
    }

    lines.push(pager(page.page, page.total_pages));
    lines.push(format!(
        "{} APIs | page {} of {}",
        page.total, page.page, page.total_pages
    ));
    lines.join("\n")
}

fn badges(api: &ApiRecord) -> String {
    match &api.details {
        RecordDetails::Listing { auth, https, cors } => format!(
            "Auth: {} | HTTPS: {} | CORS: {}",
            auth_label(auth),
            if *https { "Yes" } else { "No" },
            cors
        ),
        RecordDetails::Directory(d) => format!(
            "Version: {} | OpenAPI: {} | Updated: {}",
            d.version,
            d.openapi_version,
            format_date(&d.updated)
        ),
    }
}

fn auth_label(auth: &str) -> &str {
    if auth.is_empty() {
        "None"
    } else {
        auth
    }
}

/// `< 1 … 4 [5] 6 … 10 >`, with `<`/`>` blanked at the edges.
pub fn pager(current: usize, total_pages: usize) -> String {
    if total_pages == 0 {
        return String::new();
    }

    let mut parts = vec![if has_previous(current) { "<" } else { " " }.to_string()];
    for slot in page_window(current, total_pages) {
        parts.push(match slot {
            PageSlot::Page(n) if n == current => format!("[{}]", n),
            PageSlot::Page(n) => n.to_string(),
            PageSlot::Gap => "…".to_string(),
        });
    }
    parts.push(if has_next(current, total_pages) { ">" } else { " " }.to_string());
    parts.join(" ").trim_end().to_string()
}

/// Detail view for a single record.
pub fn details(api: &ApiRecord) -> String {
    let mut lines = vec![
        api.name.clone(),
        "=".repeat(api.name.chars().count().max(3)),
        format!("Category: {}", api.category),
        format!("ID:       {}", api.id()),
        String::new(),
        api.description.clone(),
        String::new(),
    ];

    match &api.details {
        RecordDetails::Listing { auth, https, cors } => {
            lines.push(format!("Auth: {}", auth_label(auth)));
            lines.push(if auth.is_empty() {
                "No authentication required".to_string()
            } else {
                format!("Authentication required ({})", auth)
            });
            lines.push(format!(
                "HTTPS: {}",
                if *https { "Required" } else { "Not Required" }
            ));
            lines.push(format!("CORS: {}", cors));
            lines.push(String::new());
            lines.push(format!("Visit API: {}", api.url));
        }
        RecordDetails::Directory(d) => directory_details(api, d, &mut lines),
    }

    lines.join("\n")
}

fn directory_details(api: &ApiRecord, d: &DirectoryDetails, lines: &mut Vec<String>) {
    lines.push(format!("Version {}", d.version));
    lines.push(format!("Added: {}", format_date(&d.added)));
    lines.push(format!("Updated: {}", format_date(&d.updated)));
    if let Some(contact) = d
        .contact
        .as_ref()
        .and_then(|c| c.name.as_deref().or(c.email.as_deref()))
    {
        lines.push(format!("Contact: {}", contact));
    }
    lines.push(format!("OpenAPI Version: {}", d.openapi_version));
    if let Some(logo) = &d.logo {
        lines.push(format!("Logo: {}", logo));
    }
    lines.push(String::new());
    lines.push(format!("Visit API: {}", api.url));
    lines.push(format!("OpenAPI Spec (JSON): {}", d.swagger_url));
    lines.push(format!("OpenAPI Spec (YAML): {}", d.swagger_yaml_url));
    if let Some(docs) = &d.external_docs {
        lines.push(format!("Documentation: {}", docs.url));
    }
}

/// Dashboard: headline numbers, then one bar chart per breakdown.
pub fn dashboard(summary: &Summary) -> String {
    let mut lines = vec![
        format!("Total APIs:   {}", summary.total),
        format!("Categories:   {}", summary.categories.len()),
    ];
    if let Some(l) = &summary.listing {
        lines.push(format!("Auth Types:   {}", l.auth_types.len()));
        lines.push(format!("CORS Support: {} APIs", l.cors_yes));
        lines.push(format!("HTTPS Usage:  {}%", l.https_percent));
    }
    if let Some(d) = &summary.directory {
        lines.push(format!("OpenAPI Versions: {}", d.openapi_versions.len()));
    }

    lines.push(String::new());
    lines.push("APIs by Category".to_string());
    lines.extend(summary.categories.iter().map(bar));

    if let Some(l) = &summary.listing {
        lines.push(String::new());
        lines.push("Authentication Types".to_string());
        lines.extend(l.auth_types.iter().map(bar));
    }
    if let Some(d) = &summary.directory {
        lines.push(String::new());
        lines.push("OpenAPI Versions".to_string());
        lines.extend(d.openapi_versions.iter().map(bar));
    }

    lines.join("\n")
}

fn bar(bucket: &Bucket) -> String {
    let filled = (bucket.share * BAR_WIDTH as f64).round() as usize;
    format!(
        "  {:<width$} {:>5}  {}{}",
        truncate(&bucket.label, LABEL_WIDTH),
        bucket.count,
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH.saturating_sub(filled)),
        width = LABEL_WIDTH + 3
    )
}

/// Keep the first `12 * 3` words; mark the cut with `...`.
pub fn truncate_description(description: &str) -> String {
    let words: Vec<&str> = description.split(' ').collect();
    let max_words = WORDS_PER_LINE * DESCRIPTION_LINES;
    if words.len() <= max_words {
        return description.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}

/// RFC 3339 timestamp → `Jun 27, 2017`. Anything else comes back as is.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
