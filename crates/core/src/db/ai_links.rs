//! AI-link store
//!
//! A two-level hierarchy: link categories carry an integer display rank
//! and are kept sorted by it after every mutation; links are a flat
//! list keyed to their owning category. Unlike prompt categories,
//! deleting a link category cascades to its links.

use serde::{Deserialize, Serialize};

use super::{new_id, now_millis, persist, Db, KEY_AI_LINKS, KEY_AI_LINK_CATEGORIES};

/// Rank used when a category has no explicit order; stable sort keeps
/// appearance order among these
const UNRANKED: i64 = 99;

/// Fixed default category names, in display order
const DEFAULT_CATEGORY_ORDER: [&str; 4] = ["채팅·작문", "이미지", "음악·음성", "도구·기타"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiLinkCategory {
    pub id: String,
    pub name: String,
    /// Display rank, lower first; None on records persisted before
    /// ordering existed (filled in at load time)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiLink {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub url: String,
    /// Display-hint token for the host UI (e.g. "text-blue-600")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiLinkCategoryFormData {
    pub name: String,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiLinkFormData {
    pub category_id: String,
    pub name: String,
    pub url: String,
    pub color: Option<String>,
}

/// The fixed seed: 4 categories and 15 links to well-known AI services
pub fn default_data() -> (Vec<AiLinkCategory>, Vec<AiLink>) {
    let now = now_millis();
    let cat = |name: &str, order: i64| AiLinkCategory {
        id: new_id(),
        name: name.to_string(),
        order: Some(order),
        created_at: now,
    };
    let categories: Vec<AiLinkCategory> = DEFAULT_CATEGORY_ORDER
        .iter()
        .enumerate()
        .map(|(i, name)| cat(name, i as i64))
        .collect();
    let (chat, image, audio, tools) = (
        categories[0].id.clone(),
        categories[1].id.clone(),
        categories[2].id.clone(),
        categories[3].id.clone(),
    );
    let link = |category_id: &str, name: &str, url: &str, color: &str| AiLink {
        id: new_id(),
        category_id: category_id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        color: Some(color.to_string()),
        created_at: now,
    };
    let links = vec![
        link(&chat, "Gemini", "https://gemini.google.com", "text-blue-600"),
        link(&chat, "ChatGPT", "https://chat.openai.com", "text-emerald-600"),
        link(&chat, "Claude", "https://claude.ai", "text-orange-600"),
        link(&chat, "Copilot", "https://copilot.microsoft.com", "text-sky-600"),
        link(&chat, "DeepSeek", "https://chat.deepseek.com", "text-slate-700"),
        link(&chat, "NotebookLM", "https://notebooklm.google.com", "text-green-600"),
        link(&image, "DALL·E", "https://chat.openai.com", "text-emerald-600"),
        link(&image, "Midjourney", "https://www.midjourney.com", "text-violet-600"),
        link(&image, "Ideogram", "https://ideogram.ai", "text-pink-600"),
        link(&audio, "Suno", "https://suno.com", "text-amber-500"),
        link(&audio, "Udio", "https://udio.com", "text-indigo-600"),
        link(&audio, "ElevenLabs", "https://elevenlabs.io", "text-orange-600"),
        link(&tools, "Flux", "https://flux.ai", "text-rose-600"),
        link(&tools, "Leonardo", "https://leonardo.ai", "text-amber-600"),
        link(&tools, "Grok", "https://x.com/i/grok", "text-gray-800"),
    ];
    (categories, links)
}

pub struct AiLinkStore {
    db: Db,
    categories: Vec<AiLinkCategory>,
    links: Vec<AiLink>,
}

impl AiLinkStore {
    /// Load both collections; if either is missing or corrupt, install
    /// the full default seed
    pub fn load(db: Db) -> Self {
        let stored_categories = db.get_json::<Vec<AiLinkCategory>>(KEY_AI_LINK_CATEGORIES);
        let stored_links = db.get_json::<Vec<AiLink>>(KEY_AI_LINKS);

        let (categories, links) = match (stored_categories, stored_links) {
            (Ok(Some(cats)), Ok(Some(links))) => (migrate_orders(cats), links),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "failed to parse stored AI links, reseeding");
                default_data()
            },
            _ => default_data(),
        };

        let mut store = Self {
            db,
            categories,
            links,
        };
        store.sort_categories();
        store.persist_categories();
        store.persist_links();
        store
    }

    pub fn categories(&self) -> &[AiLinkCategory] {
        &self.categories
    }

    pub fn links(&self) -> &[AiLink] {
        &self.links
    }

    /// Append a category; without an explicit order it lands after the
    /// current maximum. Returns the new id.
    pub fn add_category(&mut self, data: AiLinkCategoryFormData) -> String {
        let max_order = self
            .categories
            .iter()
            .map(|c| c.order.unwrap_or(0))
            .fold(-1, i64::max);
        let category = AiLinkCategory {
            id: new_id(),
            name: data.name.trim().to_string(),
            order: Some(data.order.unwrap_or(max_order + 1)),
            created_at: now_millis(),
        };
        let id = category.id.clone();
        self.categories.push(category);
        self.sort_categories();
        self.persist_categories();
        id
    }

    /// Rename (and re-rank, when supplied) a category; no-op on an
    /// unknown id
    pub fn update_category(&mut self, id: &str, data: AiLinkCategoryFormData) {
        if let Some(c) = self.categories.iter_mut().find(|c| c.id == id) {
            c.name = data.name.trim().to_string();
            if data.order.is_some() {
                c.order = data.order;
            }
            self.sort_categories();
            self.persist_categories();
        }
    }

    /// Remove a category AND every link it owns
    pub fn delete_category(&mut self, id: &str) {
        self.categories.retain(|c| c.id != id);
        self.links.retain(|l| l.category_id != id);
        self.persist_categories();
        self.persist_links();
    }

    /// Prepend a link; returns the new id
    pub fn add_link(&mut self, data: AiLinkFormData) -> String {
        let link = AiLink {
            id: new_id(),
            category_id: data.category_id,
            name: data.name.trim().to_string(),
            url: data.url.trim().to_string(),
            color: data.color,
            created_at: now_millis(),
        };
        let id = link.id.clone();
        self.links.insert(0, link);
        self.persist_links();
        id
    }

    /// Replace a link's fields; no-op on an unknown id
    pub fn update_link(&mut self, id: &str, data: AiLinkFormData) {
        if let Some(l) = self.links.iter_mut().find(|l| l.id == id) {
            l.category_id = data.category_id;
            l.name = data.name.trim().to_string();
            l.url = data.url.trim().to_string();
            l.color = data.color;
            self.persist_links();
        }
    }

    /// Remove a link; no-op when absent
    pub fn delete_link(&mut self, id: &str) {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        if self.links.len() != before {
            self.persist_links();
        }
    }

    /// Replace both collections with the fixed seed
    pub fn reset_to_defaults(&mut self) {
        let (categories, links) = default_data();
        self.categories = categories;
        self.links = links;
        self.sort_categories();
        self.persist_categories();
        self.persist_links();
    }

    /// All links owned by a category, in list order
    pub fn links_by_category(&self, category_id: &str) -> Vec<AiLink> {
        self.links
            .iter()
            .filter(|l| l.category_id == category_id)
            .cloned()
            .collect()
    }

    fn sort_categories(&mut self) {
        // Stable: ties and unranked entries keep appearance order
        self.categories.sort_by_key(|c| c.order.unwrap_or(UNRANKED));
    }

    fn persist_categories(&self) {
        persist(&self.db, KEY_AI_LINK_CATEGORIES, &self.categories);
    }

    fn persist_links(&self) {
        persist(&self.db, KEY_AI_LINKS, &self.links);
    }
}

/// Fill in ranks for categories persisted before ordering existed:
/// known default names get their fixed position, everything else sorts
/// after, in stored order
fn migrate_orders(categories: Vec<AiLinkCategory>) -> Vec<AiLinkCategory> {
    categories
        .into_iter()
        .enumerate()
        .map(|(i, mut c)| {
            if c.order.is_none() {
                let rank = DEFAULT_CATEGORY_ORDER
                    .iter()
                    .position(|name| *name == c.name)
                    .map(|pos| pos as i64)
                    .unwrap_or(UNRANKED + i as i64);
                c.order = Some(rank);
            }
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn store() -> (tempfile::TempDir, AiLinkStore) {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();
        (dir, AiLinkStore::load(db))
    }

    #[test]
    fn test_first_run_seeds_defaults() {
        let (_dir, store) = store();
        assert_eq!(store.categories().len(), 4);
        assert_eq!(store.links().len(), 15);
        let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CATEGORY_ORDER);
    }

    #[test]
    fn test_add_category_assigns_next_order() {
        let (_dir, mut store) = store();
        let id = store.add_category(AiLinkCategoryFormData {
            name: "  실험  ".into(),
            order: None,
        });
        let added = store.categories().iter().find(|c| c.id == id).unwrap();
        assert_eq!(added.name, "실험");
        assert_eq!(added.order, Some(4));
        // New max-order category sorts last
        assert_eq!(store.categories().last().unwrap().id, id);
    }

    #[test]
    fn test_explicit_order_resorts() {
        let (_dir, mut store) = store();
        let id = store.add_category(AiLinkCategoryFormData {
            name: "먼저".into(),
            order: Some(-1),
        });
        assert_eq!(store.categories().first().unwrap().id, id);

        store.update_category(
            &id,
            AiLinkCategoryFormData {
                name: "먼저".into(),
                order: Some(10),
            },
        );
        assert_eq!(store.categories().last().unwrap().id, id);
    }

    #[test]
    fn test_update_category_without_order_keeps_rank() {
        let (_dir, mut store) = store();
        let id = store.categories()[1].id.clone();
        store.update_category(
            &id,
            AiLinkCategoryFormData {
                name: "그림".into(),
                order: None,
            },
        );
        let c = store.categories().iter().find(|c| c.id == id).unwrap();
        assert_eq!(c.name, "그림");
        assert_eq!(c.order, Some(1));
    }

    #[test]
    fn test_delete_category_cascades_to_links() {
        let (_dir, mut store) = store();
        let chat_id = store.categories()[0].id.clone();
        let chat_links = store.links_by_category(&chat_id).len();
        assert!(chat_links > 0);

        let total = store.links().len();
        store.delete_category(&chat_id);

        assert!(store.categories().iter().all(|c| c.id != chat_id));
        assert_eq!(store.links().len(), total - chat_links);
        assert!(store.links_by_category(&chat_id).is_empty());
    }

    #[test]
    fn test_link_crud() {
        let (_dir, mut store) = store();
        let cat = store.categories()[0].id.clone();
        let other = store.categories()[1].id.clone();

        let id = store.add_link(AiLinkFormData {
            category_id: cat.clone(),
            name: " Perplexity ".into(),
            url: " https://perplexity.ai ".into(),
            color: None,
        });
        // Prepended, trimmed
        assert_eq!(store.links()[0].id, id);
        assert_eq!(store.links()[0].name, "Perplexity");
        assert_eq!(store.links()[0].url, "https://perplexity.ai");

        store.update_link(
            &id,
            AiLinkFormData {
                category_id: other.clone(),
                name: "Perplexity".into(),
                url: "https://www.perplexity.ai".into(),
                color: Some("text-cyan-600".into()),
            },
        );
        let l = store.links().iter().find(|l| l.id == id).unwrap();
        assert_eq!(l.category_id, other);
        assert_eq!(l.color.as_deref(), Some("text-cyan-600"));

        store.delete_link(&id);
        assert!(store.links().iter().all(|l| l.id != id));
    }

    #[test]
    fn test_reset_to_defaults() {
        let (_dir, mut store) = store();
        store.add_category(AiLinkCategoryFormData {
            name: "Extra".into(),
            order: None,
        });
        store.reset_to_defaults();
        assert_eq!(store.categories().len(), 4);
        assert_eq!(store.links().len(), 15);
    }

    #[test]
    fn test_load_migrates_missing_orders() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();

        // Pre-ordering storage shape: no order field at all
        db.put_raw(
            KEY_AI_LINK_CATEGORIES,
            r#"[
                {"id":"c1","name":"도구·기타","createdAt":1},
                {"id":"c2","name":"채팅·작문","createdAt":2},
                {"id":"c3","name":"사용자 정의","createdAt":3}
            ]"#,
        )
        .unwrap();
        db.put_raw(KEY_AI_LINKS, "[]").unwrap();

        let store = AiLinkStore::load(db);
        let ids: Vec<&str> = store.categories().iter().map(|c| c.id.as_str()).collect();
        // Known names take their fixed rank; unknown ones sort after
        assert_eq!(ids, vec!["c2", "c1", "c3"]);
        assert_eq!(store.categories()[0].order, Some(0));
        assert_eq!(store.categories()[1].order, Some(3));
        assert_eq!(store.categories()[2].order, Some(UNRANKED + 2));
    }

    #[test]
    fn test_missing_links_key_reseeds_both() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();
        db.put_raw(KEY_AI_LINK_CATEGORIES, "[]").unwrap();
        // KEY_AI_LINKS absent: both collections come from the seed
        let store = AiLinkStore::load(db);
        assert_eq!(store.categories().len(), 4);
        assert_eq!(store.links().len(), 15);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let dir = tempdir().unwrap();
        let db = Db::open(dir.path()).unwrap();
        let mut store = AiLinkStore::load(db.clone());
        let cat = store.categories()[0].id.clone();
        store.add_link(AiLinkFormData {
            category_id: cat,
            name: "Kagi".into(),
            url: "https://kagi.com".into(),
            color: None,
        });
        let categories = store.categories().to_vec();
        let links = store.links().to_vec();

        let reloaded = AiLinkStore::load(db);
        assert_eq!(reloaded.categories(), categories.as_slice());
        assert_eq!(reloaded.links(), links.as_slice());
    }
}
