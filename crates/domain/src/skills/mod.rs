//! Skill list resolution and point allocation.

mod allocation;
mod materializer;

pub use allocation::{AllocationLedger, AllocationTotals, PointInput};
pub use materializer::{
    holder_of, materialize, offered_options, resolve_name, validate_input, ResolvedName,
    ResolvedSkillEntry, SlotInput, SlotInputs,
};
