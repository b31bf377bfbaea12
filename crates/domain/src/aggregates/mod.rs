//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Leaves its state untouched when an operation is rejected

pub mod character_draft;

pub use character_draft::{AllocationOutcome, CharacterDraft, RenamePolicy, SkillRef};
