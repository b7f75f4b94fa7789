//! promptdeck: local-first prompt library core
//!
//! The storage-and-logic core behind a personal prompt manager, with
//! features including:
//! - Prompt library (create, edit, duplicate, favorite, bulk import)
//! - Prompt categories with reassignment-on-delete
//! - AI service links grouped under ordered link categories
//! - Scratch note and background theme preferences
//!
//! ## Architecture
//!
//! - **db**: file-backed key-value storage, one whole-collection JSON
//!   write per mutation (the original host persisted the same keys in
//!   browser localStorage)
//! - **import**: tolerant JSON/CSV bulk-import parsing
//! - **view**: pure filter/sort projections for display
//! - **manager**: cross-store flows (category delete cascade, import
//!   dispatch, backup export)
//!
//! The core is synchronous and single-instance: every operation
//! completes before the next host callback runs, and a second instance
//! over the same directory will silently diverge until reloaded.

pub mod db;
pub mod errors;
pub mod export;
pub mod import;
pub mod manager;
pub mod view;

pub use db::ai_links::{AiLink, AiLinkCategory, AiLinkCategoryFormData, AiLinkFormData, AiLinkStore};
pub use db::categories::{Category, CategoryFormData, CategoryStore};
pub use db::preferences::{BackgroundTheme, Preferences};
pub use db::prompts::{Prompt, PromptFormData, PromptStore, COPY_SUFFIX, UNCLASSIFIED};
pub use db::Db;
pub use errors::{DeckError, Result};
pub use export::ExportData;
pub use manager::PromptManager;
pub use view::{PromptFilter, SortKey};
