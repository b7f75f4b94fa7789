//! Derived prompt projections for display
//!
//! Pure functions over the current prompt list plus transient filter
//! state; nothing here is persisted.

use crate::db::prompts::Prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
}

/// Transient filter state held by the host UI
#[derive(Debug, Clone, Default)]
pub struct PromptFilter {
    /// Case-insensitive substring matched against title, content and tags
    pub query: String,
    /// OR-set of category names; empty means "all"
    pub selected_categories: Vec<String>,
    pub favorites_only: bool,
    pub sort: SortKey,
}

/// The filtered, sorted projection of the prompt list
pub fn filter_prompts(prompts: &[Prompt], filter: &PromptFilter) -> Vec<Prompt> {
    let query = filter.query.to_lowercase();
    let mut result: Vec<Prompt> = prompts
        .iter()
        .filter(|p| {
            if !query.is_empty() {
                let hit = p.title.to_lowercase().contains(&query)
                    || p.content.to_lowercase().contains(&query)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&query));
                if !hit {
                    return false;
                }
            }
            if !filter.selected_categories.is_empty()
                && !filter.selected_categories.contains(&p.category)
            {
                return false;
            }
            if filter.favorites_only && !p.favorite {
                return false;
            }
            true
        })
        .cloned()
        .collect();

    match filter.sort {
        SortKey::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Name => {
            result.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        },
    }
    result
}

/// The favorites panel: every favorited prompt, most recently updated
/// first, independent of the filter state above
pub fn favorite_prompts(prompts: &[Prompt]) -> Vec<Prompt> {
    let mut result: Vec<Prompt> = prompts.iter().filter(|p| p.favorite).cloned().collect();
    result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    result
}
