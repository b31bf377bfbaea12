//! Skill list materialization.
//!
//! Turns a profession's slot list plus the user's per-slot inputs into the
//! ordered list of resolved skill entries. Materialization is a pure read:
//! it never touches stored allocations, it only reports them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::allocation::AllocationLedger;
use crate::catalog::{ProfessionDefinition, SkillPool, SkillSlot};
use crate::error::DomainError;

/// A user edit to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SlotInput {
    /// Display name for a custom-text slot
    Text(String),
    /// Selected option for a choose-one or categorical slot
    Choice(String),
    /// Remove the slot's input
    Clear,
}

/// Current per-slot inputs, keyed by slot position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInputs {
    values: BTreeMap<usize, String>,
}

impl SlotInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.values.get(&slot).map(String::as_str)
    }

    pub(crate) fn set(&mut self, slot: usize, value: Option<String>) {
        match value {
            Some(value) => {
                self.values.insert(slot, value);
            }
            None => {
                self.values.remove(&slot);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.values.iter().map(|(slot, value)| (*slot, value.as_str()))
    }
}

/// Display name of a slot after applying the user's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "name", rename_all = "snake_case")]
pub enum ResolvedName {
    /// A usable skill name
    Final(String),
    /// Custom-text slot still showing its category label
    Placeholder(String),
    /// Categorical slot with no selection
    Unset,
}

impl ResolvedName {
    /// Name as displayed; empty for an unset categorical slot.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Final(name) | Self::Placeholder(name) => name,
            Self::Unset => "",
        }
    }

    /// Placeholders and unset slots do not count toward a complete sheet.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Final(_))
    }

    /// Unset categorical slots cannot receive points.
    pub fn is_addressable(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// One user-addressable row of the skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSkillEntry {
    pub slot: usize,
    pub kind: String,
    pub name: ResolvedName,
    pub points: u32,
}

impl ResolvedSkillEntry {
    pub fn display_name(&self) -> &str {
        self.name.display_name()
    }
}

/// Resolve one slot's display name from its current input.
pub fn resolve_name(slot: &SkillSlot, input: Option<&str>) -> ResolvedName {
    match slot {
        SkillSlot::Literal { name } => ResolvedName::Final(name.clone()),
        SkillSlot::CustomText { category } => match input {
            Some(text) if !text.trim().is_empty() => ResolvedName::Final(text.to_string()),
            _ => ResolvedName::Placeholder(category.clone()),
        },
        SkillSlot::ChooseOne { options } => ResolvedName::Final(
            input
                .filter(|choice| options.contains(choice))
                .unwrap_or(options.default_option())
                .to_string(),
        ),
        SkillSlot::Categorical { pool } => match input {
            Some(choice) if pool.contains(choice) => ResolvedName::Final(choice.to_string()),
            _ => ResolvedName::Unset,
        },
    }
}

/// Produce the ordered resolved skill list.
pub fn materialize(
    profession: &ProfessionDefinition,
    inputs: &SlotInputs,
    ledger: &AllocationLedger,
) -> Vec<ResolvedSkillEntry> {
    profession
        .slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| ResolvedSkillEntry {
            slot: index,
            kind: slot.kind().to_string(),
            name: resolve_name(slot, inputs.get(index)),
            points: ledger.points_for(index),
        })
        .collect()
}

/// Slot of the same pool, other than `excluding`, currently holding `option`.
pub fn holder_of(
    profession: &ProfessionDefinition,
    inputs: &SlotInputs,
    pool: &SkillPool,
    option: &str,
    excluding: usize,
) -> Option<usize> {
    profession
        .slots()
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != excluding)
        .filter(|(_, slot)| slot.pool().is_some_and(|p| p.label == pool.label))
        .find(|(index, _)| inputs.get(*index) == Some(option))
        .map(|(index, _)| index)
}

/// Options offered to the user for a slot.
///
/// For categorical slots, options held by sibling slots of the same pool are
/// excluded, except the slot's own current selection. Literal and custom-text
/// slots offer nothing.
pub fn offered_options(
    profession: &ProfessionDefinition,
    inputs: &SlotInputs,
    index: usize,
) -> Result<Vec<String>, DomainError> {
    let offered = match profession.slot(index)? {
        SkillSlot::Literal { .. } | SkillSlot::CustomText { .. } => Vec::new(),
        SkillSlot::ChooseOne { options } => options.iter().map(str::to_string).collect(),
        SkillSlot::Categorical { pool } => pool
            .options
            .iter()
            .filter(|option| holder_of(profession, inputs, pool, option, index).is_none())
            .cloned()
            .collect(),
    };
    Ok(offered)
}

/// Check an edit against the slot's kind and its siblings.
///
/// Returns the value to store, or `None` when the slot's input is cleared.
pub fn validate_input(
    profession: &ProfessionDefinition,
    inputs: &SlotInputs,
    index: usize,
    input: SlotInput,
) -> Result<Option<String>, DomainError> {
    let slot = profession.slot(index)?;
    match (slot, input) {
        (SkillSlot::Literal { .. }, _) => Err(DomainError::invalid_slot_input(
            index,
            "literal skills take no input",
        )),
        (_, SlotInput::Clear) => Ok(None),
        (SkillSlot::CustomText { .. }, SlotInput::Text(text)) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        (SkillSlot::ChooseOne { options }, SlotInput::Choice(choice)) => {
            if options.contains(&choice) {
                Ok(Some(choice))
            } else {
                Err(DomainError::invalid_slot_input(
                    index,
                    format!("'{}' is not one of the listed options", choice),
                ))
            }
        }
        (SkillSlot::Categorical { pool }, SlotInput::Choice(choice)) => {
            if !pool.contains(&choice) {
                return Err(DomainError::invalid_slot_input(
                    index,
                    format!("'{}' is not in the {} pool", choice, pool.label),
                ));
            }
            if let Some(held_by) = holder_of(profession, inputs, pool, &choice, index) {
                return Err(DomainError::OptionUnavailable {
                    slot: index,
                    option: choice,
                    held_by,
                });
            }
            Ok(Some(choice))
        }
        (slot, SlotInput::Text(_)) => Err(DomainError::invalid_slot_input(
            index,
            format!("{} slots take a choice, not free text", slot.kind()),
        )),
        (slot, SlotInput::Choice(_)) => Err(DomainError::invalid_slot_input(
            index,
            format!("{} slots take free text, not a choice", slot.kind()),
        )),
    }
}
