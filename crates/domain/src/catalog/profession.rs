//! Profession definitions: a skill-point budget formula plus an ordered
//! list of skill slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::slot::SkillSlot;
use crate::error::DomainError;
use crate::value_objects::{AttributeSet, Characteristic};

/// Maximum length for profession identifiers
const MAX_PROFESSION_ID_LENGTH: usize = 100;

// ============================================================================
// ProfessionId
// ============================================================================

/// A validated profession identifier (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfessionId(pub(super) String);

impl ProfessionId {
    /// Create a new validated profession id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is empty after trimming
    /// or longer than 100 characters.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Profession id cannot be empty"));
        }
        if trimmed.chars().count() > MAX_PROFESSION_ID_LENGTH {
            return Err(DomainError::validation(format!(
                "Profession id cannot exceed {} characters",
                MAX_PROFESSION_ID_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProfessionId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ProfessionId> for String {
    fn from(id: ProfessionId) -> String {
        id.0
    }
}

// ============================================================================
// Budget formula
// ============================================================================

/// `max(attributes) × multiplier`; a single attribute is the common case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTerm {
    pub attributes: Vec<Characteristic>,
    pub multiplier: u32,
}

impl BudgetTerm {
    pub fn single(attribute: Characteristic, multiplier: u32) -> Self {
        Self {
            attributes: vec![attribute],
            multiplier,
        }
    }

    /// Term that uses whichever of the attributes is highest.
    pub fn best_of(attributes: impl IntoIterator<Item = Characteristic>, multiplier: u32) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
            multiplier,
        }
    }

    pub fn evaluate(&self, attributes: &AttributeSet) -> u32 {
        self.attributes
            .iter()
            .map(|c| attributes.get(*c))
            .max()
            .unwrap_or(0)
            .saturating_mul(self.multiplier)
    }
}

impl fmt::Display for BudgetTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.attributes.iter().map(|c| c.code()).collect();
        if codes.len() == 1 {
            write!(f, "{}×{}", codes[0], self.multiplier)
        } else {
            write!(f, "({})×{}", codes.join("|"), self.multiplier)
        }
    }
}

/// Sum of budget terms. Total over every attribute set: only integer
/// multiply, add and max are involved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetFormula {
    terms: Vec<BudgetTerm>,
}

impl BudgetFormula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plus(mut self, term: BudgetTerm) -> Self {
        self.terms.push(term);
        self
    }

    pub fn terms(&self) -> &[BudgetTerm] {
        &self.terms
    }

    /// Characteristics the formula reads.
    pub fn inputs(&self) -> BTreeSet<Characteristic> {
        self.terms
            .iter()
            .flat_map(|t| t.attributes.iter().copied())
            .collect()
    }

    pub fn evaluate(&self, attributes: &AttributeSet) -> u32 {
        self.terms
            .iter()
            .fold(0u32, |acc, term| acc.saturating_add(term.evaluate(attributes)))
    }
}

impl fmt::Display for BudgetFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self.terms.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", terms.join(" + "))
    }
}

// ============================================================================
// ProfessionDefinition
// ============================================================================

/// Immutable profession data, shared read-only across all drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionDefinition {
    id: ProfessionId,
    budget: BudgetFormula,
    slots: Vec<SkillSlot>,
}

impl ProfessionDefinition {
    pub fn new(id: ProfessionId, budget: BudgetFormula, slots: Vec<SkillSlot>) -> Self {
        Self { id, budget, slots }
    }

    pub fn id(&self) -> &ProfessionId {
        &self.id
    }

    pub fn budget_formula(&self) -> &BudgetFormula {
        &self.budget
    }

    pub fn slots(&self) -> &[SkillSlot] {
        &self.slots
    }

    /// Skill-point budget for a freshly generated attribute set.
    pub fn budget_for(&self, attributes: &AttributeSet) -> u32 {
        self.budget.evaluate(attributes)
    }

    pub fn slot(&self, index: usize) -> Result<&SkillSlot, DomainError> {
        self.slots.get(index).ok_or(DomainError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes(edu: u32, dex: u32, str_val: u32) -> AttributeSet {
        AttributeSet::from_primaries(
            [
                (Characteristic::Edu, edu),
                (Characteristic::Dex, dex),
                (Characteristic::Str, str_val),
            ],
            50,
        )
    }

    #[test]
    fn profession_id_is_trimmed_and_validated() {
        assert_eq!(ProfessionId::new("  會計師 ").expect("valid").as_str(), "會計師");
        assert!(ProfessionId::new("   ").is_err());
        assert!(ProfessionId::new("x".repeat(101)).is_err());
    }

    #[test]
    fn education_only_formula() {
        let formula = BudgetFormula::new().plus(BudgetTerm::single(Characteristic::Edu, 4));
        assert_eq!(formula.evaluate(&attributes(70, 40, 40)), 280);
        assert_eq!(formula.to_string(), "EDU×4");
        assert_eq!(formula.inputs().into_iter().collect::<Vec<_>>(), vec![Characteristic::Edu]);
    }

    #[test]
    fn education_and_dexterity_formula() {
        let formula = BudgetFormula::new()
            .plus(BudgetTerm::single(Characteristic::Edu, 2))
            .plus(BudgetTerm::single(Characteristic::Dex, 2));
        assert_eq!(formula.evaluate(&attributes(60, 55, 90)), 230);
        assert_eq!(formula.to_string(), "EDU×2 + DEX×2");
    }

    #[test]
    fn best_of_term_takes_highest_attribute() {
        let formula = BudgetFormula::new()
            .plus(BudgetTerm::single(Characteristic::Edu, 2))
            .plus(BudgetTerm::best_of([Characteristic::Dex, Characteristic::Str], 2));
        assert_eq!(formula.evaluate(&attributes(50, 40, 75)), 100 + 150);
        assert_eq!(formula.evaluate(&attributes(50, 80, 75)), 100 + 160);
        assert_eq!(formula.to_string(), "EDU×2 + (DEX|STR)×2");
    }

    #[test]
    fn formula_is_total_over_extreme_values() {
        let formula = BudgetFormula::new()
            .plus(BudgetTerm::single(Characteristic::Edu, u32::MAX))
            .plus(BudgetTerm::best_of(Vec::<Characteristic>::new(), 3));
        assert_eq!(formula.evaluate(&attributes(0, 0, 0)), 0);
        assert_eq!(formula.evaluate(&attributes(90, 0, 0)), u32::MAX);
    }

    #[test]
    fn slot_lookup_reports_range() {
        let profession = ProfessionDefinition::new(
            ProfessionId::new("測試").expect("valid"),
            BudgetFormula::new(),
            vec![SkillSlot::literal("法律")],
        );
        assert!(profession.slot(0).is_ok());
        assert_eq!(
            profession.slot(3),
            Err(DomainError::SlotOutOfRange { index: 3, len: 1 })
        );
    }
}
