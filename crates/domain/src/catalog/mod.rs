//! Profession catalog.
//!
//! Static, read-only profession data: each profession carries a skill-point
//! budget formula over a documented subset of characteristics and an ordered
//! list of skill slots. Lookups perform no computation.

mod builtin;
mod profession;
mod slot;

pub use builtin::{
    interpersonal_pool, ACADEMIC_SPECIALTY, FIELD_OF_STUDY, INTERPERSONAL, PERSONAL_SPECIALTY,
};
pub use profession::{BudgetFormula, BudgetTerm, ProfessionDefinition, ProfessionId};
pub use slot::{ChoiceOptions, SkillPool, SkillSlot};

use std::sync::Arc;

use crate::error::DomainError;

/// Registry of available professions, in presentation order.
#[derive(Debug, Clone)]
pub struct ProfessionCatalog {
    professions: Vec<Arc<ProfessionDefinition>>,
}

impl Default for ProfessionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfessionCatalog {
    /// Create a catalog with all built-in professions.
    pub fn builtin() -> Self {
        Self {
            professions: builtin::professions().into_iter().map(Arc::new).collect(),
        }
    }

    /// Create an empty catalog without built-in professions.
    pub fn empty() -> Self {
        Self {
            professions: Vec::new(),
        }
    }

    /// Register a profession. Ids must be unique.
    pub fn register(&mut self, profession: ProfessionDefinition) -> Result<(), DomainError> {
        if self.professions.iter().any(|p| p.id() == profession.id()) {
            return Err(DomainError::validation(format!(
                "Profession '{}' is already registered",
                profession.id()
            )));
        }
        self.professions.push(Arc::new(profession));
        Ok(())
    }

    /// Get a profession by its id.
    pub fn lookup(&self, id: &str) -> Result<Arc<ProfessionDefinition>, DomainError> {
        let id = id.trim();
        self.professions
            .iter()
            .find(|p| p.id().as_str() == id)
            .cloned()
            .ok_or_else(|| DomainError::unknown_profession(id))
    }

    /// List all profession ids, in presentation order.
    pub fn list_ids(&self) -> Vec<&ProfessionId> {
        self.professions.iter().map(|p| p.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProfessionDefinition>> {
        self.professions.iter()
    }
}
