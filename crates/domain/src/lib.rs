//! Sheetforge domain: characteristic rolls, the profession catalog, skill
//! slot resolution and budget-checked point allocation.
//!
//! Everything here is synchronous and free of I/O. Randomness is injected
//! as a `FnMut(min, max) -> i32` closure returning an inclusive draw.

pub mod aggregates;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod skills;
pub mod value_objects;

pub use aggregates::{AllocationOutcome, CharacterDraft, RenamePolicy, SkillRef};
pub use catalog::{
    BudgetFormula, BudgetTerm, ChoiceOptions, ProfessionCatalog, ProfessionDefinition,
    ProfessionId, SkillPool, SkillSlot,
};
pub use error::{AllocationRejection, DomainError};
pub use ids::CharacterDraftId;
pub use skills::{
    AllocationLedger, AllocationTotals, PointInput, ResolvedName, ResolvedSkillEntry, SlotInput,
    SlotInputs,
};
pub use value_objects::{AttributeSet, Characteristic, DiceError, DiceFormula};
