//! Unified error types for the domain layer
//!
//! Every rejection leaves the prior character state untouched, so none of
//! these errors is fatal: callers re-prompt and try again.

use thiserror::Error;

use crate::value_objects::DiceError;

/// Why a point allocation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationRejection {
    /// The requested value was below zero
    Negative,
    /// The requested value was NaN or infinite
    NotANumber,
    /// Committing the value would push the total past the budget
    OverBudget { requested_total: u64, budget: u32 },
}

impl std::fmt::Display for AllocationRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "points cannot be negative"),
            Self::NotANumber => write!(f, "points must be a finite number"),
            Self::OverBudget {
                requested_total,
                budget,
            } => write!(
                f,
                "total of {} would exceed the budget of {}",
                requested_total, budget
            ),
        }
    }
}

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Profession lookup miss; no default is substituted
    #[error("Unknown profession: {0}")]
    UnknownProfession(String),

    /// Point allocation refused; prior allocations are preserved
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(AllocationRejection),

    /// Slot input does not fit the slot's kind
    #[error("Invalid input for slot {slot}: {reason}")]
    InvalidSlotInput { slot: usize, reason: String },

    /// Categorical option already held by a sibling slot
    #[error("Option '{option}' is already taken by slot {held_by}")]
    OptionUnavailable {
        slot: usize,
        option: String,
        held_by: usize,
    },

    /// Slot index past the end of the profession's slot list
    #[error("Slot {index} out of range (profession has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    /// No addressable skill carries this display name
    #[error("No addressable skill named '{0}'")]
    UnknownSkill(String),

    /// More than one addressable skill carries this display name
    #[error("Skill name '{name}' matches slots {slots:?}; address it by slot")]
    AmbiguousSkill { name: String, slots: Vec<usize> },

    /// Placeholder custom-text or unset categorical slots remain
    #[error("Incomplete slots: {0:?}")]
    IncompleteSlots(Vec<usize>),

    /// Operation needs a generated character
    #[error("Character has not been generated yet")]
    NotGenerated,

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if id.is_empty() {
    ///     return Err(DomainError::validation("Profession id cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unknown profession error
    pub fn unknown_profession(id: impl Into<String>) -> Self {
        Self::UnknownProfession(id.into())
    }

    /// Create an invalid slot input error
    pub fn invalid_slot_input(slot: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSlotInput {
            slot,
            reason: reason.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<AllocationRejection> for DomainError {
    fn from(rejection: AllocationRejection) -> Self {
        Self::InvalidAllocation(rejection)
    }
}

impl From<DiceError> for DomainError {
    fn from(err: DiceError) -> Self {
        Self::Parse(err.to_string())
    }
}
