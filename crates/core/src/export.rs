//! Backup export
//!
//! Produces the user-triggered download payload: a versioned JSON
//! object carrying the full prompt and category collections. The file
//! is not re-imported by this system.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{categories::Category, prompts::Prompt};
use crate::errors::Result;

pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub version: u32,
    /// ISO-8601 UTC timestamp of the export
    pub exported_at: String,
    pub prompts: Vec<Prompt>,
    pub categories: Vec<Category>,
}

/// Snapshot the current collections into an export payload
pub fn build_export(prompts: &[Prompt], categories: &[Category]) -> ExportData {
    ExportData {
        version: EXPORT_VERSION,
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        prompts: prompts.to_vec(),
        categories: categories.to_vec(),
    }
}

/// Pretty-printed JSON body for the download
pub fn export_json(data: &ExportData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Dated default file name, e.g. `prompt-manager-backup-2026-08-30.json`
pub fn suggested_file_name() -> String {
    format!("prompt-manager-backup-{}.json", Utc::now().format("%Y-%m-%d"))
}
