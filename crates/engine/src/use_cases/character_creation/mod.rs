//! Character creation use cases.
//!
//! Handles the life of a character draft: generation, slot edits, point
//! allocation and the completeness check. Every operation on a draft holds
//! that draft's lock for its whole duration.

mod error;

pub use error::CharacterCreationError;

use std::sync::Arc;

use sheetforge_domain::{
    AllocationOutcome, AllocationRejection, AllocationTotals, CharacterDraft, CharacterDraftId,
    DomainError, ProfessionCatalog, ProfessionDefinition, RenamePolicy, ResolvedSkillEntry,
    SkillRef, SlotInput,
};

use crate::infrastructure::ports::RandomPort;
use crate::stores::{CharacterDraftStore, DraftHandle};

// =============================================================================
// Result Types
// =============================================================================

/// Result of a slot edit.
#[derive(Debug, Clone)]
pub struct SlotUpdateResult {
    /// The re-materialized skill list.
    pub skills: Vec<ResolvedSkillEntry>,
    /// Options now offered for the edited slot.
    pub offered: Vec<String>,
}

/// Result of an allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationResult {
    /// Why the value was refused; `None` when it was committed or ignored.
    pub rejection: Option<AllocationRejection>,
    /// Totals after the request; `None` before the first generation.
    pub totals: Option<AllocationTotals>,
}

impl AllocationResult {
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none() && self.totals.is_some()
    }
}

/// Result of the completeness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessResult {
    pub complete: bool,
    /// Placeholder or unset slots, in slot order.
    pub incomplete_slots: Vec<usize>,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for character creation use cases.
pub struct CharacterCreationUseCases {
    catalog: Arc<ProfessionCatalog>,
    drafts: Arc<CharacterDraftStore>,
    random: Arc<dyn RandomPort>,
    rename_policy: RenamePolicy,
}

impl CharacterCreationUseCases {
    pub fn new(
        catalog: Arc<ProfessionCatalog>,
        drafts: Arc<CharacterDraftStore>,
        random: Arc<dyn RandomPort>,
        rename_policy: RenamePolicy,
    ) -> Self {
        Self {
            catalog,
            drafts,
            random,
            rename_policy,
        }
    }

    /// All professions, in presentation order.
    pub fn list_professions(&self) -> Vec<Arc<ProfessionDefinition>> {
        self.catalog.iter().cloned().collect()
    }

    pub fn describe_profession(
        &self,
        profession_id: &str,
    ) -> Result<Arc<ProfessionDefinition>, CharacterCreationError> {
        Ok(self.catalog.lookup(profession_id)?)
    }

    /// Create a draft, generated right away when a profession is given.
    ///
    /// An unknown profession is reported before anything is stored.
    pub async fn create_draft(
        &self,
        profession_id: Option<&str>,
    ) -> Result<CharacterDraft, CharacterCreationError> {
        let mut draft = CharacterDraft::new();
        if let Some(profession_id) = profession_id {
            let profession = self.catalog.lookup(profession_id)?;
            self.roll(&mut draft, profession)?;
        }

        let snapshot = draft.clone();
        if self.drafts.insert(draft).is_none() {
            let limit = self.drafts.max_drafts();
            tracing::warn!(limit = limit, "Draft store full, refusing new draft");
            return Err(CharacterCreationError::DraftLimitReached(limit));
        }

        tracing::info!(
            draft_id = %snapshot.id(),
            generated = snapshot.is_generated(),
            "Created character draft"
        );

        Ok(snapshot)
    }

    /// Regenerate a draft: new attributes, new budget, no allocations and no
    /// slot inputs. Without a profession id the draft's current profession is
    /// used again.
    pub async fn generate(
        &self,
        draft_id: CharacterDraftId,
        profession_id: Option<&str>,
    ) -> Result<CharacterDraft, CharacterCreationError> {
        let handle = self.handle(draft_id)?;
        let mut draft = handle.lock().await;

        let profession = match profession_id {
            Some(profession_id) => self.catalog.lookup(profession_id)?,
            None => draft
                .profession()
                .cloned()
                .ok_or(CharacterCreationError::ProfessionRequired)?,
        };
        self.roll(&mut draft, profession)?;

        Ok(draft.clone())
    }

    /// Apply a slot edit and re-materialize the skill list.
    pub async fn set_slot_input(
        &self,
        draft_id: CharacterDraftId,
        slot: usize,
        input: SlotInput,
    ) -> Result<SlotUpdateResult, CharacterCreationError> {
        let handle = self.handle(draft_id)?;
        let mut draft = handle.lock().await;

        let skills = draft.set_slot_input(slot, input, self.rename_policy)?;
        let offered = draft.offered_options(slot)?;

        tracing::debug!(
            draft_id = %draft_id,
            slot = slot,
            name = %skills.get(slot).map(|e| e.display_name()).unwrap_or_default(),
            "Updated skill slot"
        );

        Ok(SlotUpdateResult { skills, offered })
    }

    /// Set one skill's points.
    ///
    /// A refused value is reported in the result, not as an error, together
    /// with the unchanged totals.
    pub async fn set_allocation(
        &self,
        draft_id: CharacterDraftId,
        target: SkillRef,
        value: f64,
    ) -> Result<AllocationResult, CharacterCreationError> {
        let handle = self.handle(draft_id)?;
        let mut draft = handle.lock().await;

        match draft.set_allocation(&target, value) {
            Ok(AllocationOutcome::Accepted(totals)) => {
                tracing::debug!(
                    draft_id = %draft_id,
                    target = %target,
                    allocated = totals.allocated,
                    remaining = totals.remaining,
                    "Allocated skill points"
                );
                Ok(AllocationResult {
                    rejection: None,
                    totals: Some(totals),
                })
            }
            Ok(AllocationOutcome::Ignored) => {
                tracing::debug!(draft_id = %draft_id, "Ignored allocation before generation");
                Ok(AllocationResult {
                    rejection: None,
                    totals: None,
                })
            }
            Err(DomainError::InvalidAllocation(rejection)) => {
                tracing::warn!(
                    draft_id = %draft_id,
                    target = %target,
                    value = value,
                    reason = %rejection,
                    "Rejected skill point allocation"
                );
                Ok(AllocationResult {
                    rejection: Some(rejection),
                    totals: draft.totals(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Current state of a draft.
    pub async fn get_sheet(
        &self,
        draft_id: CharacterDraftId,
    ) -> Result<CharacterDraft, CharacterCreationError> {
        let handle = self.handle(draft_id)?;
        let draft = handle.lock().await;
        Ok(draft.clone())
    }

    /// Whether every slot has a usable name.
    pub async fn check_complete(
        &self,
        draft_id: CharacterDraftId,
    ) -> Result<CompletenessResult, CharacterCreationError> {
        let handle = self.handle(draft_id)?;
        let draft = handle.lock().await;

        match draft.check_complete() {
            Ok(()) => Ok(CompletenessResult {
                complete: true,
                incomplete_slots: Vec::new(),
            }),
            Err(DomainError::IncompleteSlots(incomplete_slots)) => Ok(CompletenessResult {
                complete: false,
                incomplete_slots,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Drop a draft.
    pub async fn discard(&self, draft_id: CharacterDraftId) -> Result<(), CharacterCreationError> {
        self.drafts
            .remove(draft_id)
            .ok_or(CharacterCreationError::DraftNotFound(draft_id))?;
        tracing::info!(draft_id = %draft_id, "Discarded character draft");
        Ok(())
    }

    fn handle(&self, draft_id: CharacterDraftId) -> Result<DraftHandle, CharacterCreationError> {
        self.drafts
            .get(draft_id)
            .ok_or(CharacterCreationError::DraftNotFound(draft_id))
    }

    fn roll(
        &self,
        draft: &mut CharacterDraft,
        profession: Arc<ProfessionDefinition>,
    ) -> Result<(), CharacterCreationError> {
        let profession_id = profession.id().clone();
        draft.generate(profession, |min, max| self.random.gen_range(min, max))?;

        tracing::info!(
            draft_id = %draft.id(),
            profession = %profession_id,
            budget = draft.budget().unwrap_or_default(),
            "Generated character"
        );
        Ok(())
    }
}
