//! Response types returned by the engine's HTTP API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sheetforge_domain::{
    AllocationTotals, AttributeSet, CharacterDraft, ProfessionDefinition, ResolvedName,
    ResolvedSkillEntry, SkillSlot,
};

// =============================================================================
// Errors
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request was malformed or invalid
    BadRequest,
    /// Requested resource not found
    NotFound,
    /// Operation conflicts with current state
    Conflict,
    /// Input was well-formed but refused by a rule
    Rejected,
    /// Service cannot take the request right now
    Unavailable,
    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    /// Additional error details (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }
}

// =============================================================================
// Professions
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionSummary {
    pub id: String,
    pub budget_formula: String,
    pub slot_count: usize,
}

impl From<&ProfessionDefinition> for ProfessionSummary {
    fn from(profession: &ProfessionDefinition) -> Self {
        Self {
            id: profession.id().to_string(),
            budget_formula: profession.budget_formula().to_string(),
            slot_count: profession.slots().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSlotData {
    pub index: usize,
    pub kind: String,
    pub label: String,
    /// Listed options for choose-one and categorical slots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl SkillSlotData {
    fn new(index: usize, slot: &SkillSlot) -> Self {
        let options = match slot {
            SkillSlot::ChooseOne { options } => options.iter().map(str::to_string).collect(),
            SkillSlot::Categorical { pool } => pool.options.clone(),
            SkillSlot::Literal { .. } | SkillSlot::CustomText { .. } => Vec::new(),
        };
        Self {
            index,
            kind: slot.kind().to_string(),
            label: slot.label().to_string(),
            options,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionDetail {
    pub id: String,
    pub budget_formula: String,
    /// Characteristic codes the budget formula reads
    pub budget_inputs: Vec<String>,
    pub slots: Vec<SkillSlotData>,
}

impl From<&ProfessionDefinition> for ProfessionDetail {
    fn from(profession: &ProfessionDefinition) -> Self {
        Self {
            id: profession.id().to_string(),
            budget_formula: profession.budget_formula().to_string(),
            budget_inputs: profession
                .budget_formula()
                .inputs()
                .into_iter()
                .map(|c| c.code().to_string())
                .collect(),
            slots: profession
                .slots()
                .iter()
                .enumerate()
                .map(|(index, slot)| SkillSlotData::new(index, slot))
                .collect(),
        }
    }
}

// =============================================================================
// Character sheet
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    pub code: String,
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSetData {
    pub primaries: Vec<AttributeValue>,
    pub luck: u32,
    pub sanity: u32,
    pub magic_points: u32,
    pub hit_points: u32,
}

impl From<&AttributeSet> for AttributeSetData {
    fn from(attributes: &AttributeSet) -> Self {
        Self {
            primaries: attributes
                .primaries()
                .map(|(characteristic, value)| AttributeValue {
                    code: characteristic.code().to_string(),
                    label: characteristic.label().to_string(),
                    value,
                })
                .collect(),
            luck: attributes.luck(),
            sanity: attributes.sanity(),
            magic_points: attributes.magic_points(),
            hit_points: attributes.hit_points(),
        }
    }
}

/// Resolution state of a skill row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillNameState {
    Final,
    Placeholder,
    Unset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntryData {
    pub slot: usize,
    pub kind: String,
    pub name: String,
    pub state: SkillNameState,
    pub points: u32,
}

impl From<&ResolvedSkillEntry> for SkillEntryData {
    fn from(entry: &ResolvedSkillEntry) -> Self {
        let state = match entry.name {
            ResolvedName::Final(_) => SkillNameState::Final,
            ResolvedName::Placeholder(_) => SkillNameState::Placeholder,
            ResolvedName::Unset => SkillNameState::Unset,
        };
        Self {
            slot: entry.slot,
            kind: entry.kind.clone(),
            name: entry.display_name().to_string(),
            state,
            points: entry.points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsData {
    pub budget: u32,
    pub allocated: u64,
    pub remaining: i64,
}

impl From<AllocationTotals> for TotalsData {
    fn from(totals: AllocationTotals) -> Self {
        Self {
            budget: totals.budget,
            allocated: totals.allocated,
            remaining: totals.remaining,
        }
    }
}

/// Read-only projection of one draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheetResponse {
    pub id: Uuid,
    pub generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeSetData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<TotalsData>,
    pub skills: Vec<SkillEntryData>,
}

impl From<&CharacterDraft> for CharacterSheetResponse {
    fn from(draft: &CharacterDraft) -> Self {
        Self {
            id: draft.id().to_uuid(),
            generated: draft.is_generated(),
            profession: draft.profession().map(|p| p.id().to_string()),
            attributes: draft.attributes().map(AttributeSetData::from),
            totals: draft.totals().map(TotalsData::from),
            skills: draft
                .resolved_skills()
                .iter()
                .map(SkillEntryData::from)
                .collect(),
        }
    }
}

/// Result of a slot edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotUpdateResponse {
    pub skills: Vec<SkillEntryData>,
    /// Options now offered for the edited slot
    pub offered: Vec<String>,
}

/// Result of an allocation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResponse {
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<TotalsData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessResponse {
    pub complete: bool,
    pub incomplete_slots: Vec<usize>,
}
