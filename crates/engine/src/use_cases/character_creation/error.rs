//! Character creation operation errors.

use sheetforge_domain::{CharacterDraftId, DomainError};

/// Errors that can occur during character creation operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterCreationError {
    #[error("Character draft not found: {0}")]
    DraftNotFound(CharacterDraftId),

    #[error("A profession is required to generate this character")]
    ProfessionRequired,

    #[error("Draft limit of {0} reached; discard a draft first")]
    DraftLimitReached(usize),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
