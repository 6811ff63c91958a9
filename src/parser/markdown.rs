use std::sync::LazyLock;

use regex::Regex;

use crate::record::{ApiRecord, RecordDetails};

static NAME_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

const HEADER_PREFIX: &str = "### ";
const ROW_PREFIX: &str = "| [";

/// Parse the curated markdown table into listing records.
///
/// `### Category` lines set the category for every row after them. Rows start
/// with `| [` and need five content columns with a `[name](url)` first cell;
/// anything else is skipped without complaint.
pub fn parse_apis(markdown: &str) -> Vec<ApiRecord> {
    let mut apis = Vec::new();
    let mut current_category = String::new();

    for line in markdown.split('\n') {
        if let Some(rest) = line.strip_prefix(HEADER_PREFIX) {
            current_category = rest.trim().to_string();
            continue;
        }

        if line.starts_with(ROW_PREFIX) {
            if let Some(api) = parse_row(line, &current_category) {
                apis.push(api);
            }
        }
    }

    apis
}

fn parse_row(line: &str, category: &str) -> Option<ApiRecord> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    // leading empty split + 5 content columns
    if parts.len() < 6 {
        return None;
    }

    let caps = NAME_LINK_RE.captures(parts[1])?;

    Some(ApiRecord {
        name: caps[1].to_string(),
        url: caps[2].to_string(),
        description: parts[2].to_string(),
        category: category.to_string(),
        details: RecordDetails::Listing {
            auth: strip_backticks(parts[3]),
            https: parts[4].eq_ignore_ascii_case("yes"),
            cors: parts[5].to_string(),
        },
    })
}

/// `apiKey` → apiKey. Only the first pair is removed.
fn strip_backticks(cell: &str) -> String {
    cell.replacen('`', "", 2)
}
