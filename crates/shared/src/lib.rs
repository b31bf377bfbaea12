//! Sheetforge Shared - Wire types for the engine's HTTP API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, uuid and the domain
//! 2. **No business logic** - Pure data types and conversions from domain state
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod requests;
pub mod responses;

pub use requests::{
    AllocationRequest, CreateCharacterRequest, GenerateRequest, SkillTarget, SlotInputRequest,
};
pub use responses::{
    AllocationResponse, AttributeSetData, AttributeValue, CharacterSheetResponse,
    CompletenessResponse, ErrorCode, ErrorResponse, ProfessionDetail, ProfessionSummary,
    SkillEntryData, SkillNameState, SkillSlotData, SlotUpdateResponse, TotalsData,
};
