//! Skill slots: one position in a profession's skill list.
//!
//! The slot kind is assigned once when the profession is authored and is
//! never inferred from the shape of a skill name.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A fixed pool of options for categorical slots ("人際技能" and the like).
///
/// Sibling slots drawing from the same pool in one profession may not hold
/// the same option at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPool {
    pub label: String,
    pub options: Vec<String>,
}

impl SkillPool {
    pub fn new(label: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Non-empty, ordered alternatives for a choose-one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ChoiceOptions {
    first: String,
    rest: Vec<String>,
}

impl ChoiceOptions {
    pub fn new(first: impl Into<String>, rest: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            first: first.into(),
            rest: rest.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolution used while the user has made no selection.
    pub fn default_option(&self) -> &str {
        &self.first
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first.as_str()).chain(self.rest.iter().map(String::as_str))
    }

    pub fn contains(&self, option: &str) -> bool {
        self.iter().any(|o| o == option)
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<String>> for ChoiceOptions {
    type Error = DomainError;

    fn try_from(options: Vec<String>) -> Result<Self, Self::Error> {
        let mut options = options.into_iter();
        let first = options
            .next()
            .ok_or_else(|| DomainError::validation("Choice slot needs at least one option"))?;
        Ok(Self {
            first,
            rest: options.collect(),
        })
    }
}

impl From<ChoiceOptions> for Vec<String> {
    fn from(options: ChoiceOptions) -> Vec<String> {
        std::iter::once(options.first).chain(options.rest).collect()
    }
}

/// One position in a profession's skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillSlot {
    /// Fixed skill name
    Literal { name: String },
    /// User supplies the name; the category label stands in until then
    CustomText { category: String },
    /// User picks exactly one of the listed options
    ChooseOne { options: ChoiceOptions },
    /// User picks from a pool shared with sibling slots, without duplicates
    Categorical { pool: SkillPool },
}

impl SkillSlot {
    pub fn literal(name: impl Into<String>) -> Self {
        Self::Literal { name: name.into() }
    }

    pub fn custom_text(category: impl Into<String>) -> Self {
        Self::CustomText {
            category: category.into(),
        }
    }

    pub fn choose_one(
        first: impl Into<String>,
        rest: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::ChooseOne {
            options: ChoiceOptions::new(first, rest),
        }
    }

    pub fn categorical(pool: SkillPool) -> Self {
        Self::Categorical { pool }
    }

    /// Short name of the slot kind, for logs and wire payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::CustomText { .. } => "custom_text",
            Self::ChooseOne { .. } => "choose_one",
            Self::Categorical { .. } => "categorical",
        }
    }

    /// Label shown next to the slot before it is resolved.
    pub fn label(&self) -> &str {
        match self {
            Self::Literal { name } => name,
            Self::CustomText { category } => category,
            Self::ChooseOne { options } => options.default_option(),
            Self::Categorical { pool } => &pool.label,
        }
    }

    /// Pool this slot shares with its siblings, if categorical.
    pub fn pool(&self) -> Option<&SkillPool> {
        match self {
            Self::Categorical { pool } => Some(pool),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_options_keep_order_and_default() {
        let options = ChoiceOptions::new("開車", ["騎術"]);
        assert_eq!(options.default_option(), "開車");
        assert_eq!(options.iter().collect::<Vec<_>>(), vec!["開車", "騎術"]);
        assert_eq!(options.len(), 2);
        assert!(options.contains("騎術"));
        assert!(!options.contains("游泳"));
    }

    #[test]
    fn choice_options_reject_empty_list_on_deserialize() {
        let result: Result<ChoiceOptions, _> = serde_json::from_str("[]");
        assert!(result.is_err());

        let options: ChoiceOptions =
            serde_json::from_str(r#"["開車","騎術"]"#).expect("non-empty list");
        assert_eq!(options.default_option(), "開車");
    }

    #[test]
    fn slot_serializes_with_kind_tag() {
        let slot = SkillSlot::custom_text("個人專長");
        let json = serde_json::to_value(&slot).expect("serializable");
        assert_eq!(json["kind"], "custom_text");
        assert_eq!(json["category"], "個人專長");
    }

    #[test]
    fn slot_labels() {
        let pool = SkillPool::new("人際技能", ["魅力", "威脅"]);
        assert_eq!(SkillSlot::literal("法律").label(), "法律");
        assert_eq!(SkillSlot::custom_text("個人專長").label(), "個人專長");
        assert_eq!(SkillSlot::choose_one("開車", ["騎術"]).label(), "開車");
        assert_eq!(SkillSlot::categorical(pool.clone()).label(), "人際技能");
        assert_eq!(SkillSlot::categorical(pool.clone()).pool(), Some(&pool));
        assert_eq!(SkillSlot::literal("法律").pool(), None);
    }
}
