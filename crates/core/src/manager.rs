//! Orchestrating layer over the four stores
//!
//! `PromptManager` is constructed once at application start from a
//! single storage handle and injected into whatever host component
//! needs it; there are no ambient singletons, so tests can build
//! isolated instances over a temp directory.
//!
//! Cross-store flows live here. There are no cross-store transactions:
//! deleting a prompt category is two independent persisted writes
//! (reassign affected prompts, then delete the category).

use std::path::Path;

use crate::db::{
    ai_links::AiLinkStore,
    categories::CategoryStore,
    preferences::Preferences,
    prompts::{PromptStore, UNCLASSIFIED},
    Db,
};
use crate::errors::{DeckError, Result};
use crate::export::{build_export, export_json, ExportData};
use crate::import::{parse_bulk_import, parse_named_import};

pub struct PromptManager {
    prompts: PromptStore,
    categories: CategoryStore,
    ai_links: AiLinkStore,
    preferences: Preferences,
}

impl PromptManager {
    /// Load all stores from one storage handle
    pub fn open(db: Db) -> Self {
        Self {
            prompts: PromptStore::load(db.clone()),
            categories: CategoryStore::load(db.clone()),
            ai_links: AiLinkStore::load(db.clone()),
            preferences: Preferences::new(db),
        }
    }

    /// Open over the platform-default storage directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Db::open_default()?))
    }

    pub fn prompts(&self) -> &PromptStore {
        &self.prompts
    }

    pub fn prompts_mut(&mut self) -> &mut PromptStore {
        &mut self.prompts
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryStore {
        &mut self.categories
    }

    pub fn ai_links(&self) -> &AiLinkStore {
        &self.ai_links
    }

    pub fn ai_links_mut(&mut self) -> &mut AiLinkStore {
        &mut self.ai_links
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Delete a prompt category, first moving its prompts to the
    /// unclassified sentinel
    ///
    /// Prompts reference categories by name, so the reassignment keys
    /// on the category's current name. Returns the number of prompts
    /// moved; an unknown id is a no-op.
    pub fn delete_category(&mut self, id: &str) -> usize {
        let name = self.categories.name_by_id(id);
        if name.is_empty() {
            return 0;
        }
        let moved = self.prompts.reassign_category(&name, UNCLASSIFIED);
        self.categories.delete(id);
        moved
    }

    pub fn prompt_count_by_category(&self, name: &str) -> usize {
        self.prompts.count_by_category(name)
    }

    /// Bulk-import pasted text (format auto-detected); returns the
    /// number of prompts added. Zero means nothing importable.
    pub fn import_text(&mut self, text: &str) -> usize {
        self.prompts.add_many(parse_bulk_import(text))
    }

    /// Bulk-import an uploaded file
    ///
    /// Anything but a `.json` or `.csv` extension is rejected before
    /// the file is read. Returns the number of prompts added.
    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let lower = file_name.to_lowercase();
        if !lower.ends_with(".json") && !lower.ends_with(".csv") {
            return Err(DeckError::ImportRejected(file_name));
        }
        let text = std::fs::read_to_string(path)?;
        Ok(self
            .prompts
            .add_many(parse_named_import(&text, &file_name)))
    }

    /// Snapshot prompts and categories into the backup payload
    pub fn export(&self) -> ExportData {
        build_export(self.prompts.all(), self.categories.all())
    }

    /// The backup payload as pretty-printed JSON
    pub fn export_to_json(&self) -> Result<String> {
        export_json(&self.export())
    }
}
