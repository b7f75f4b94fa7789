//! Bulk import parser
//!
//! Turns raw user-supplied text (pasted or read from a file) into a
//! list of validated prompt form records. Two formats are accepted:
//! - JSON: a top-level array of objects with title/content (required)
//!   and category/tags (optional)
//! - CSV: a header row naming at least title,content; tag cells use
//!   `|` between tags and may be double-quoted
//!
//! The parser never raises: malformed individual records are dropped,
//! and an unusable overall shape yields an empty list the caller can
//! surface as "nothing importable".

use serde_json::{Map, Value};

use crate::db::prompts::{PromptFormData, UNCLASSIFIED};

/// Parse a JSON array of prompt objects
///
/// Non-object elements and records failing normalization are skipped;
/// input order is preserved for the valid ones. Anything that is not a
/// parseable top-level array yields an empty list.
pub fn parse_json_import(text: &str) -> Vec<PromptFormData> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![];
    }
    let parsed: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => return vec![],
    };
    let items = match parsed {
        Value::Array(items) => items,
        _ => return vec![],
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => normalize_record(&map),
            _ => None,
        })
        .collect()
}

/// Parse CSV text whose first non-blank line is the header row
///
/// The header must name title and content columns (case-insensitive,
/// trimmed); category and tags columns are optional. Rows go through
/// the same normalization as JSON records.
pub fn parse_csv_import(text: &str) -> Vec<PromptFormData> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![];
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return vec![];
    }

    let header: Vec<String> = parse_csv_line(lines[0])
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let title_idx = header.iter().position(|h| h == "title");
    let content_idx = header.iter().position(|h| h == "content");
    let category_idx = header.iter().position(|h| h == "category");
    let tags_idx = header.iter().position(|h| h == "tags");

    let (title_idx, content_idx) = match (title_idx, content_idx) {
        (Some(t), Some(c)) => (t, c),
        _ => return vec![],
    };

    lines[1..]
        .iter()
        .filter_map(|line| {
            let cells = parse_csv_line(line);
            let cell = |idx: Option<usize>| -> String {
                idx.and_then(|i| cells.get(i).cloned()).unwrap_or_default()
            };
            let mut raw = Map::new();
            raw.insert("title".into(), Value::String(cell(Some(title_idx))));
            raw.insert("content".into(), Value::String(cell(Some(content_idx))));
            raw.insert("category".into(), Value::String(cell(category_idx)));
            raw.insert("tags".into(), Value::String(cell(tags_idx)));
            normalize_record(&raw)
        })
        .collect()
}

/// True iff the first non-whitespace character is `[`
pub fn looks_like_json(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

/// Auto-detect the format of pasted text and parse it
pub fn parse_bulk_import(text: &str) -> Vec<PromptFormData> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![];
    }
    if looks_like_json(trimmed) {
        parse_json_import(text)
    } else {
        parse_csv_import(text)
    }
}

/// Dispatch on file extension: `.json` and `.csv` pick their parser
/// directly, anything else falls back to auto-detection
pub fn parse_named_import(text: &str, file_name: &str) -> Vec<PromptFormData> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".json") {
        parse_json_import(text)
    } else if lower.ends_with(".csv") {
        parse_csv_import(text)
    } else {
        parse_bulk_import(text)
    }
}

/// Split one CSV line into trimmed cells
///
/// A double quote toggles quoting; inside quotes a comma is literal.
/// The quote character itself is never emitted, so `"a""b"` becomes
/// `ab` (no unescaping pass).
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if in_quotes || ch != ',' {
            current.push(ch);
        } else {
            cells.push(current.trim().to_string());
            current.clear();
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Normalize one loosely-typed record into form data, or None when
/// title or content is blank after coercion
fn normalize_record(raw: &Map<String, Value>) -> Option<PromptFormData> {
    let title = coerce_string(raw.get("title"));
    let content = coerce_string(raw.get("content"));
    if title.is_empty() || content.is_empty() {
        return None;
    }

    let category = match raw.get("category") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => UNCLASSIFIED.to_string(),
    };
    let tags = normalize_tags(raw.get("tags"));

    Some(PromptFormData {
        title,
        content,
        category,
        tags: Some(tags),
    })
}

/// Stringify a loosely-typed scalar and trim it; missing/null become
/// empty (and therefore reject the record for title/content)
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Tag coercion: arrays keep their string elements (trimmed, empties
/// dropped, order and duplicates preserved); non-empty strings split on
/// `|`; any other shape is an empty list
fn normalize_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => s
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![],
    }
}
