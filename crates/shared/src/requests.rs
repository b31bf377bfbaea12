//! Request bodies accepted by the engine's HTTP API.

use serde::{Deserialize, Serialize};

use sheetforge_domain::{SkillRef, SlotInput};

/// `POST /api/characters`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    /// When present, the new draft is generated right away
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}

/// `POST /api/characters/{id}/generate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Profession to generate for; defaults to the draft's current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}

/// `PUT /api/characters/{id}/slots/{index}`
///
/// ```json
/// { "type": "text", "value": "神秘學" }
/// { "type": "choice", "value": "魅力" }
/// { "type": "clear" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SlotInputRequest {
    Text(String),
    Choice(String),
    Clear,
}

impl From<SlotInputRequest> for SlotInput {
    fn from(request: SlotInputRequest) -> Self {
        match request {
            SlotInputRequest::Text(text) => SlotInput::Text(text),
            SlotInputRequest::Choice(choice) => SlotInput::Choice(choice),
            SlotInputRequest::Clear => SlotInput::Clear,
        }
    }
}

/// Skill addressed either by slot position or by resolved display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillTarget {
    Slot { slot: usize },
    Skill { skill: String },
}

impl From<SkillTarget> for SkillRef {
    fn from(target: SkillTarget) -> Self {
        match target {
            SkillTarget::Slot { slot } => SkillRef::Slot(slot),
            SkillTarget::Skill { skill } => SkillRef::Name(skill),
        }
    }
}

/// `PUT /api/characters/{id}/allocations`
///
/// ```json
/// { "skill": "會計", "points": 40 }
/// { "slot": 6, "points": 12.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    #[serde(flatten)]
    pub target: SkillTarget,
    /// Raw numeric input; fractions are floored
    pub points: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_input_request_wire_format() {
        let text: SlotInputRequest =
            serde_json::from_str(r#"{"type":"text","value":"神秘學"}"#).expect("valid json");
        assert_eq!(SlotInput::from(text), SlotInput::Text("神秘學".to_string()));

        let clear: SlotInputRequest = serde_json::from_str(r#"{"type":"clear"}"#).expect("valid json");
        assert_eq!(clear, SlotInputRequest::Clear);
    }

    #[test]
    fn allocation_request_accepts_slot_or_skill() {
        let by_slot: AllocationRequest =
            serde_json::from_str(r#"{"slot":6,"points":12.5}"#).expect("valid json");
        assert_eq!(SkillRef::from(by_slot.target), SkillRef::Slot(6));
        assert_eq!(by_slot.points, 12.5);

        let by_name: AllocationRequest =
            serde_json::from_str(r#"{"skill":"會計","points":40}"#).expect("valid json");
        assert_eq!(
            SkillRef::from(by_name.target),
            SkillRef::Name("會計".to_string())
        );
    }

    #[test]
    fn create_request_profession_is_optional() {
        let empty: CreateCharacterRequest = serde_json::from_str("{}").expect("valid json");
        assert!(empty.profession.is_none());
    }
}
