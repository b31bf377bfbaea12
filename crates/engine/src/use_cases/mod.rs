//! Use cases - user story orchestration.
//!
//! Use cases coordinate domain operations and infrastructure to fulfill user
//! requests. Handlers call use cases; use cases own the locking and logging.

pub mod character_creation;

pub use character_creation::{
    AllocationResult, CharacterCreationError, CharacterCreationUseCases, CompletenessResult,
    SlotUpdateResult,
};
