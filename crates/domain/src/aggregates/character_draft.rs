//! CharacterDraft aggregate - one in-progress character sheet
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: the attribute set, budget, slot inputs and point
//!   ledger are only reachable through the operations below
//! - **Explicit state**: `Unbudgeted` until the first generation, then
//!   `Budgeted`; regeneration always replaces the whole generated state
//! - **Injected randomness**: `generate` takes the RNG as a closure so the
//!   domain never touches a global entropy source

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::ProfessionDefinition;
use crate::error::DomainError;
use crate::ids::CharacterDraftId;
use crate::skills::{
    materialize, offered_options, resolve_name, validate_input, AllocationLedger,
    AllocationTotals, PointInput, ResolvedSkillEntry, SlotInput, SlotInputs,
};
use crate::value_objects::AttributeSet;

/// What happens to a slot's points when its resolved name changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenamePolicy {
    /// Points stay with the slot position
    #[default]
    Retain,
    /// Points of a renamed slot are dropped
    Discard,
}

impl fmt::Display for RenamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Discard => write!(f, "discard"),
        }
    }
}

impl FromStr for RenamePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "discard" => Ok(Self::Discard),
            other => Err(DomainError::parse(format!(
                "Unknown rename policy '{}' (expected 'retain' or 'discard')",
                other
            ))),
        }
    }
}

/// How a caller addresses a skill when allocating points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillRef {
    /// Slot position in the profession's list
    Slot(usize),
    /// Resolved display name; must match exactly one addressable slot
    Name(String),
}

impl fmt::Display for SkillRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(index) => write!(f, "slot {}", index),
            Self::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Result of an allocation request that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// Committed; totals after the change
    Accepted(AllocationTotals),
    /// No budget yet, nothing changed
    Ignored,
}

/// Everything one generation produces.
#[derive(Debug, Clone)]
struct GeneratedState {
    profession: Arc<ProfessionDefinition>,
    attributes: AttributeSet,
    inputs: SlotInputs,
    ledger: AllocationLedger,
}

#[derive(Debug, Clone)]
enum DraftState {
    Unbudgeted,
    Budgeted(Box<GeneratedState>),
}

/// An in-progress character.
///
/// # Invariants
///
/// - Committed points never exceed the budget
/// - No two categorical slots of one pool hold the same option
/// - Every rejected operation leaves the draft unchanged
#[derive(Debug, Clone)]
pub struct CharacterDraft {
    id: CharacterDraftId,
    state: DraftState,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterDraft {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create an unbudgeted draft.
    pub fn new() -> Self {
        Self {
            id: CharacterDraftId::new(),
            state: DraftState::Unbudgeted,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> CharacterDraftId {
        self.id
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.state, DraftState::Budgeted(_))
    }

    pub fn profession(&self) -> Option<&Arc<ProfessionDefinition>> {
        self.generated().map(|g| &g.profession)
    }

    pub fn attributes(&self) -> Option<&AttributeSet> {
        self.generated().map(|g| &g.attributes)
    }

    pub fn budget(&self) -> Option<u32> {
        self.generated().map(|g| g.ledger.budget())
    }

    pub fn slot_inputs(&self) -> Option<&SlotInputs> {
        self.generated().map(|g| &g.inputs)
    }

    pub fn totals(&self) -> Option<AllocationTotals> {
        self.generated().map(|g| g.ledger.totals())
    }

    /// Ordered resolved skill list; empty before the first generation.
    pub fn resolved_skills(&self) -> Vec<ResolvedSkillEntry> {
        self.generated()
            .map(|g| materialize(&g.profession, &g.inputs, &g.ledger))
            .unwrap_or_default()
    }

    /// Candidate options for a choose-one or categorical slot.
    pub fn offered_options(&self, slot: usize) -> Result<Vec<String>, DomainError> {
        let generated = self.generated().ok_or(DomainError::NotGenerated)?;
        offered_options(&generated.profession, &generated.inputs, slot)
    }

    /// Slots still showing a placeholder or without a categorical pick.
    pub fn incomplete_slots(&self) -> Vec<usize> {
        self.resolved_skills()
            .into_iter()
            .filter(|entry| !entry.name.is_complete())
            .map(|entry| entry.slot)
            .collect()
    }

    /// Whether the sheet is ready to play.
    pub fn check_complete(&self) -> Result<(), DomainError> {
        if !self.is_generated() {
            return Err(DomainError::NotGenerated);
        }
        let incomplete = self.incomplete_slots();
        if incomplete.is_empty() {
            Ok(())
        } else {
            Err(DomainError::IncompleteSlots(incomplete))
        }
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Roll a fresh attribute set for `profession`.
    ///
    /// Always a full reset: new budget, no allocations, no slot inputs, even
    /// when the same profession is chosen again.
    pub fn generate(
        &mut self,
        profession: Arc<ProfessionDefinition>,
        rng: impl FnMut(i32, i32) -> i32,
    ) -> Result<(), DomainError> {
        let attributes = AttributeSet::roll(rng)?;
        self.generate_with(profession, attributes);
        Ok(())
    }

    /// Full reset using a caller-supplied attribute set.
    pub fn generate_with(&mut self, profession: Arc<ProfessionDefinition>, attributes: AttributeSet) {
        let budget = profession.budget_for(&attributes);
        self.state = DraftState::Budgeted(Box::new(GeneratedState {
            profession,
            attributes,
            inputs: SlotInputs::new(),
            ledger: AllocationLedger::new(budget),
        }));
    }

    // =========================================================================
    // Slot inputs
    // =========================================================================

    /// Apply a slot edit and return the re-materialized skill list.
    ///
    /// A slot that ends up unset loses its points. Under
    /// [`RenamePolicy::Discard`] a slot whose display name changed loses its
    /// points as well.
    pub fn set_slot_input(
        &mut self,
        slot: usize,
        input: SlotInput,
        policy: RenamePolicy,
    ) -> Result<Vec<ResolvedSkillEntry>, DomainError> {
        let generated = self.generated_mut().ok_or(DomainError::NotGenerated)?;
        let value = validate_input(&generated.profession, &generated.inputs, slot, input)?;

        let definition = generated.profession.slot(slot)?.clone();
        let before = resolve_name(&definition, generated.inputs.get(slot));
        generated.inputs.set(slot, value);
        let after = resolve_name(&definition, generated.inputs.get(slot));

        let renamed = before.display_name() != after.display_name();
        if !after.is_addressable() || (renamed && policy == RenamePolicy::Discard) {
            generated.ledger.release(slot);
        }

        Ok(materialize(
            &generated.profession,
            &generated.inputs,
            &generated.ledger,
        ))
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Set the points of one skill.
    ///
    /// Before the first generation this is a no-op. Negative, non-finite and
    /// over-budget values are rejected with every allocation left as it was.
    pub fn set_allocation(
        &mut self,
        target: &SkillRef,
        value: f64,
    ) -> Result<AllocationOutcome, DomainError> {
        if !self.is_generated() {
            return Ok(AllocationOutcome::Ignored);
        }
        let slot = self.resolve_target(target)?;
        let points = PointInput::from_f64(value)?;
        let generated = self.generated_mut().ok_or(DomainError::NotGenerated)?;
        let totals = generated.ledger.commit(slot, points)?;
        Ok(AllocationOutcome::Accepted(totals))
    }

    /// Map a skill reference to an addressable slot position.
    pub fn resolve_target(&self, target: &SkillRef) -> Result<usize, DomainError> {
        let entries = self.resolved_skills();
        match target {
            SkillRef::Slot(index) => {
                let entry = entries.get(*index).ok_or(DomainError::SlotOutOfRange {
                    index: *index,
                    len: entries.len(),
                })?;
                if entry.name.is_addressable() {
                    Ok(*index)
                } else {
                    Err(DomainError::invalid_slot_input(
                        *index,
                        "pick an option before allocating points",
                    ))
                }
            }
            SkillRef::Name(name) => {
                let name = name.trim();
                let matches: Vec<usize> = entries
                    .iter()
                    .filter(|entry| entry.name.is_addressable() && entry.display_name() == name)
                    .map(|entry| entry.slot)
                    .collect();
                match matches.as_slice() {
                    [] => Err(DomainError::UnknownSkill(name.to_string())),
                    [slot] => Ok(*slot),
                    _ => Err(DomainError::AmbiguousSkill {
                        name: name.to_string(),
                        slots: matches,
                    }),
                }
            }
        }
    }

    fn generated(&self) -> Option<&GeneratedState> {
        match &self.state {
            DraftState::Budgeted(generated) => Some(generated),
            DraftState::Unbudgeted => None,
        }
    }

    fn generated_mut(&mut self) -> Option<&mut GeneratedState> {
        match &mut self.state {
            DraftState::Budgeted(generated) => Some(generated),
            DraftState::Unbudgeted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProfessionCatalog;
    use crate::error::AllocationRejection;
    use crate::value_objects::Characteristic;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn catalog() -> ProfessionCatalog {
        ProfessionCatalog::builtin()
    }

    fn attributes_with_edu(edu: u32) -> AttributeSet {
        AttributeSet::from_primaries(
            Characteristic::ALL
                .into_iter()
                .map(|c| (c, if c == Characteristic::Edu { edu } else { 50 })),
            50,
        )
    }

    fn accountant_draft() -> CharacterDraft {
        let mut draft = CharacterDraft::new();
        let accountant = catalog().lookup("會計師").expect("registered");
        draft.generate_with(accountant, attributes_with_edu(70));
        draft
    }

    fn lawyer_draft() -> CharacterDraft {
        let mut draft = CharacterDraft::new();
        let lawyer = catalog().lookup("律師").expect("registered");
        draft.generate_with(lawyer, attributes_with_edu(60));
        draft
    }

    fn slot(index: usize) -> SkillRef {
        SkillRef::Slot(index)
    }

    fn name(value: &str) -> SkillRef {
        SkillRef::Name(value.to_string())
    }

    #[test]
    fn new_draft_is_unbudgeted() {
        let mut draft = CharacterDraft::new();
        assert!(!draft.is_generated());
        assert_eq!(draft.budget(), None);
        assert!(draft.resolved_skills().is_empty());
        assert_eq!(
            draft.set_allocation(&name("會計"), 10.0),
            Ok(AllocationOutcome::Ignored)
        );
        assert_eq!(
            draft.set_slot_input(0, SlotInput::Clear, RenamePolicy::Retain),
            Err(DomainError::NotGenerated)
        );
        assert_eq!(draft.check_complete(), Err(DomainError::NotGenerated));
    }

    #[test]
    fn accountant_budget_scenario() {
        let mut draft = accountant_draft();
        assert_eq!(draft.budget(), Some(280));

        for (skill, points) in [("會計", 100.0), ("法律", 80.0), ("圖書館使用", 60.0), ("聆聽", 40.0)] {
            let outcome = draft.set_allocation(&name(skill), points).expect("within budget");
            assert!(matches!(outcome, AllocationOutcome::Accepted(_)));
        }
        let totals = draft.totals().expect("generated");
        assert_eq!(totals.allocated, 280);
        assert_eq!(totals.remaining, 0);

        let err = draft.set_allocation(&name("說服"), 1.0);
        assert!(matches!(
            err,
            Err(DomainError::InvalidAllocation(AllocationRejection::OverBudget { .. }))
        ));
        assert_eq!(draft.totals(), Some(totals));
    }

    #[test]
    fn single_skill_over_budget_keeps_previous_totals() {
        let mut draft = accountant_draft();
        draft.set_allocation(&name("會計"), 30.0).expect("within budget");
        assert!(draft.set_allocation(&name("法律"), 281.0).is_err());
        assert_eq!(draft.totals().map(|t| t.allocated), Some(30));
    }

    #[test]
    fn negative_allocation_is_rejected_without_change() {
        let mut draft = accountant_draft();
        draft.set_allocation(&slot(0), 25.0).expect("within budget");
        assert_eq!(
            draft.set_allocation(&slot(0), -5.0),
            Err(DomainError::InvalidAllocation(AllocationRejection::Negative))
        );
        assert_eq!(draft.resolved_skills()[0].points, 25);
    }

    #[test]
    fn fractional_points_are_floored() {
        let mut draft = accountant_draft();
        draft.set_allocation(&slot(1), 12.75).expect("within budget");
        assert_eq!(draft.resolved_skills()[1].points, 12);
    }

    #[test]
    fn duplicate_names_must_be_addressed_by_slot() {
        let mut draft = accountant_draft();
        let err = draft.set_allocation(&name("個人專長"), 10.0);
        assert_eq!(
            err,
            Err(DomainError::AmbiguousSkill {
                name: "個人專長".to_string(),
                slots: vec![6, 7],
            })
        );
        draft.set_allocation(&slot(7), 10.0).expect("slot is addressable");
        assert_eq!(draft.resolved_skills()[7].points, 10);
        assert_eq!(draft.resolved_skills()[6].points, 0);
    }

    #[test]
    fn unknown_skill_name_is_rejected() {
        let mut draft = accountant_draft();
        assert_eq!(
            draft.set_allocation(&name("游泳"), 10.0),
            Err(DomainError::UnknownSkill("游泳".to_string()))
        );
    }

    #[test]
    fn regeneration_resets_everything() {
        let mut draft = lawyer_draft();
        draft
            .set_slot_input(3, SlotInput::Choice("魅力".into()), RenamePolicy::Retain)
            .expect("free option");
        draft
            .set_slot_input(6, SlotInput::Text("神秘學".into()), RenamePolicy::Retain)
            .expect("text");
        draft.set_allocation(&name("魅力"), 40.0).expect("within budget");

        let lawyer = catalog().lookup("律師").expect("registered");
        draft.generate_with(lawyer, attributes_with_edu(80));

        assert_eq!(draft.budget(), Some(320));
        assert_eq!(draft.totals().map(|t| t.allocated), Some(0));
        assert!(draft.slot_inputs().is_some_and(SlotInputs::is_empty));
        assert!(draft.resolved_skills().iter().all(|e| e.points == 0));
    }

    #[test]
    fn generate_rolls_attributes_and_budget() {
        let mut draft = CharacterDraft::new();
        let accountant = catalog().lookup("會計師").expect("registered");
        let mut rng = StdRng::seed_from_u64(42);
        draft
            .generate(accountant, |min, max| rng.gen_range(min..=max))
            .expect("valid formulas");

        let attributes = draft.attributes().expect("generated");
        assert_eq!(draft.budget(), Some(attributes.get(Characteristic::Edu) * 4));
        assert_eq!(draft.resolved_skills().len(), 8);
    }

    #[test]
    fn categorical_exclusivity_through_the_draft() {
        let mut draft = lawyer_draft();
        draft
            .set_slot_input(3, SlotInput::Choice("魅力".into()), RenamePolicy::Retain)
            .expect("free option");
        let offered = draft.offered_options(4).expect("in range");
        assert!(!offered.contains(&"魅力".to_string()));

        let err = draft.set_slot_input(4, SlotInput::Choice("魅力".into()), RenamePolicy::Retain);
        assert!(matches!(err, Err(DomainError::OptionUnavailable { held_by: 3, .. })));

        draft
            .set_slot_input(3, SlotInput::Clear, RenamePolicy::Retain)
            .expect("clear");
        let offered = draft.offered_options(4).expect("in range");
        assert!(offered.contains(&"魅力".to_string()));
    }

    #[test]
    fn unset_categorical_slot_cannot_receive_points_and_releases_on_clear() {
        let mut draft = lawyer_draft();
        assert!(matches!(
            draft.set_allocation(&slot(3), 10.0),
            Err(DomainError::InvalidSlotInput { slot: 3, .. })
        ));

        draft
            .set_slot_input(3, SlotInput::Choice("話術".into()), RenamePolicy::Retain)
            .expect("free option");
        draft.set_allocation(&slot(3), 30.0).expect("within budget");

        let skills = draft
            .set_slot_input(3, SlotInput::Clear, RenamePolicy::Retain)
            .expect("clear");
        assert_eq!(skills[3].points, 0);
        assert_eq!(draft.totals().map(|t| t.allocated), Some(0));
    }

    #[test]
    fn retain_policy_keeps_points_on_rename() {
        let mut draft = accountant_draft();
        draft.set_allocation(&slot(6), 20.0).expect("within budget");
        let skills = draft
            .set_slot_input(6, SlotInput::Text("神秘學".into()), RenamePolicy::Retain)
            .expect("text");
        assert_eq!(skills[6].display_name(), "神秘學");
        assert_eq!(skills[6].points, 20);
    }

    #[test]
    fn discard_policy_drops_points_on_rename() {
        let mut draft = accountant_draft();
        draft.set_allocation(&slot(6), 20.0).expect("within budget");
        let skills = draft
            .set_slot_input(6, SlotInput::Text("神秘學".into()), RenamePolicy::Discard)
            .expect("text");
        assert_eq!(skills[6].points, 0);

        // Same name again is not a rename
        draft.set_allocation(&slot(6), 15.0).expect("within budget");
        let skills = draft
            .set_slot_input(6, SlotInput::Text("神秘學".into()), RenamePolicy::Discard)
            .expect("text");
        assert_eq!(skills[6].points, 15);
    }

    #[test]
    fn rejected_slot_input_leaves_state_unchanged() {
        let mut draft = lawyer_draft();
        draft.set_allocation(&slot(0), 10.0).expect("within budget");
        let before = draft.resolved_skills();
        assert!(draft
            .set_slot_input(0, SlotInput::Text("x".into()), RenamePolicy::Discard)
            .is_err());
        assert!(draft
            .set_slot_input(3, SlotInput::Choice("游泳".into()), RenamePolicy::Discard)
            .is_err());
        assert_eq!(draft.resolved_skills(), before);
    }

    #[test]
    fn completeness_tracks_placeholders_and_unset_picks() {
        let mut draft = lawyer_draft();
        assert_eq!(
            draft.check_complete(),
            Err(DomainError::IncompleteSlots(vec![3, 4, 6, 7]))
        );

        for (index, input) in [
            (3, SlotInput::Choice("魅力".into())),
            (4, SlotInput::Choice("說服".into())),
            (6, SlotInput::Text("神秘學".into())),
            (7, SlotInput::Text("攝影".into())),
        ] {
            draft
                .set_slot_input(index, input, RenamePolicy::Retain)
                .expect("valid input");
        }
        assert_eq!(draft.check_complete(), Ok(()));
    }

    #[test]
    fn random_operation_sequences_respect_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        let catalog = catalog();
        let professions: Vec<_> = catalog.iter().cloned().collect();
        let pool = ["魅力", "威脅", "話術", "說服", "游泳"];

        for _ in 0..50 {
            let mut draft = CharacterDraft::new();
            let profession = professions[rng.gen_range(0..professions.len())].clone();
            let mut dice = StdRng::seed_from_u64(rng.gen());
            draft
                .generate(profession, |min, max| dice.gen_range(min..=max))
                .expect("valid formulas");
            let budget = u64::from(draft.budget().expect("generated"));

            for _ in 0..40 {
                let index = rng.gen_range(0..8);
                if rng.gen_bool(0.3) {
                    let choice = pool[rng.gen_range(0..pool.len())].to_string();
                    let _ = draft.set_slot_input(index, SlotInput::Choice(choice), RenamePolicy::Retain);
                } else {
                    let before = draft.totals();
                    let value = rng.gen_range(-20.0..200.0);
                    if draft.set_allocation(&slot(index), value).is_err() {
                        assert_eq!(draft.totals(), before);
                    }
                }

                let totals = draft.totals().expect("generated");
                assert!(totals.allocated <= budget);

                let skills = draft.resolved_skills();
                let picks: Vec<&str> = skills
                    .iter()
                    .filter(|e| draft.profession().is_some_and(|p| p.slots()[e.slot].pool().is_some()))
                    .filter(|e| e.name.is_complete())
                    .map(|e| e.display_name())
                    .collect();
                let mut unique = picks.clone();
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(unique.len(), picks.len());
            }
        }
    }
}
