//! In-memory state storage modules.
//!
//! Stores manage runtime state that lives only for the life of the process:
//! - `CharacterDraftStore` - in-progress character drafts

pub mod character_drafts;

pub use character_drafts::{CharacterDraftStore, DraftHandle, DEFAULT_MAX_DRAFTS};
