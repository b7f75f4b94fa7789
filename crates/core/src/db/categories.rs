//! Prompt category store
//!
//! Categories classify prompts by display name; prompts carry the name,
//! not the id, so deleting a category never cascades here. The
//! orchestrating layer reassigns affected prompts first (see
//! `PromptStore::reassign_category`).

use serde::{Deserialize, Serialize};

use super::{new_id, now_millis, persist, prompts::SEED_BASE_TS, Db, KEY_CATEGORIES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFormData {
    pub name: String,
    pub color: Option<String>,
}

/// The fixed default category set (high-school teacher workflows),
/// with deterministic ids and timestamps
pub fn default_categories() -> Vec<Category> {
    let mk = |id: &str, name: &str, offset: i64| Category {
        id: id.to_string(),
        name: name.to_string(),
        color: None,
        created_at: SEED_BASE_TS + offset,
    };
    vec![
        mk("default-teaching", "수업·강의", 0),
        mk("default-assessment", "평가·채점", 1),
        mk("default-guidance", "학습지도·상담", 2),
        mk("default-class", "학급·행정", 3),
        mk("default-materials", "자료·연구", 4),
    ]
}

pub struct CategoryStore {
    db: Db,
    categories: Vec<Category>,
}

impl CategoryStore {
    /// Load the stored collection, seeding the defaults on first run or
    /// on a corrupt stored entry
    pub fn load(db: Db) -> Self {
        let categories = match db.get_json::<Vec<Category>>(KEY_CATEGORIES) {
            Ok(Some(stored)) => stored,
            Ok(None) => default_categories(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse stored categories, reseeding");
                default_categories()
            },
        };
        let store = Self { db, categories };
        persist(&store.db, KEY_CATEGORIES, &store.categories);
        store
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Append a new category; returns its id
    ///
    /// Names are expected to be unique in practice (prompts reference
    /// them by name) but the store does not enforce it.
    pub fn add(&mut self, data: CategoryFormData) -> String {
        let category = Category {
            id: new_id(),
            name: data.name,
            color: data.color,
            created_at: now_millis(),
        };
        let id = category.id.clone();
        self.categories.push(category);
        self.persist();
        id
    }

    /// Replace name/color; no-op on an unknown id
    pub fn update(&mut self, id: &str, data: CategoryFormData) {
        if let Some(c) = self.categories.iter_mut().find(|c| c.id == id) {
            c.name = data.name;
            c.color = data.color;
            self.persist();
        }
    }

    /// Remove a category. Prompts referencing it are NOT touched; the
    /// caller reassigns them beforehand.
    pub fn delete(&mut self, id: &str) {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() != before {
            self.persist();
        }
    }

    /// Replace the whole collection with the fixed default set
    pub fn reset_to_defaults(&mut self) {
        self.categories = default_categories();
        self.persist();
    }

    /// Display name for an id, or empty string when unknown
    pub fn name_by_id(&self, id: &str) -> String {
        self.get(id).map(|c| c.name.clone()).unwrap_or_default()
    }

    /// First id carrying the given name, or empty string when unknown
    pub fn id_by_name(&self, name: &str) -> String {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id.clone())
            .unwrap_or_default()
    }

    fn persist(&self) {
        persist(&self.db, KEY_CATEGORIES, &self.categories);
    }
}
