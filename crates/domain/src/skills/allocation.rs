//! Skill point allocation against a fixed budget.
//!
//! Allocations are keyed by slot position. The committed total never exceeds
//! the budget: an update that would overshoot is refused and leaves every
//! existing allocation as it was.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AllocationRejection, DomainError};

/// A validated point value, converted from user-facing numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PointInput(u64);

impl PointInput {
    /// Convert a raw number. Fractions are floored; negative values and
    /// non-finite values are refused.
    pub fn from_f64(value: f64) -> Result<Self, AllocationRejection> {
        if !value.is_finite() {
            return Err(AllocationRejection::NotANumber);
        }
        let floored = value.floor();
        if floored < 0.0 {
            return Err(AllocationRejection::Negative);
        }
        // `as` saturates for values past u64::MAX, which are over any budget anyway
        Ok(Self(floored as u64))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u32> for PointInput {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

/// Budget bookkeeping snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTotals {
    pub budget: u32,
    pub allocated: u64,
    pub remaining: i64,
}

/// Per-slot point assignments for one generated character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLedger", into = "RawLedger")]
pub struct AllocationLedger {
    budget: u32,
    points: BTreeMap<usize, u32>,
}

/// Wire form of a ledger, checked against the budget on the way in.
#[derive(Serialize, Deserialize)]
struct RawLedger {
    budget: u32,
    #[serde(default)]
    points: BTreeMap<usize, u32>,
}

impl TryFrom<RawLedger> for AllocationLedger {
    type Error = DomainError;

    fn try_from(raw: RawLedger) -> Result<Self, Self::Error> {
        let mut ledger = AllocationLedger::new(raw.budget);
        for (slot, points) in raw.points {
            ledger
                .set_points(slot, points)
                .map_err(DomainError::InvalidAllocation)?;
        }
        Ok(ledger)
    }
}

impl From<AllocationLedger> for RawLedger {
    fn from(ledger: AllocationLedger) -> Self {
        Self {
            budget: ledger.budget,
            points: ledger.points,
        }
    }
}

impl AllocationLedger {
    /// Empty ledger for a freshly computed budget.
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            points: BTreeMap::new(),
        }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Commit `value` for `slot` if the resulting total stays within budget.
    pub fn set_points(
        &mut self,
        slot: usize,
        value: u32,
    ) -> Result<AllocationTotals, AllocationRejection> {
        self.commit(slot, PointInput::from(value))
    }

    /// Same as [`set_points`](Self::set_points) for already validated input.
    pub fn commit(
        &mut self,
        slot: usize,
        value: PointInput,
    ) -> Result<AllocationTotals, AllocationRejection> {
        let value = value.value();
        let others = self.total_allocated() - u64::from(self.points_for(slot));
        let requested_total = others.saturating_add(value);
        if requested_total > u64::from(self.budget) {
            return Err(AllocationRejection::OverBudget {
                requested_total,
                budget: self.budget,
            });
        }

        // value <= budget <= u32::MAX here
        let value = u32::try_from(value).unwrap_or(u32::MAX);
        if value == 0 {
            self.points.remove(&slot);
        } else {
            self.points.insert(slot, value);
        }
        Ok(self.totals())
    }

    /// Drop a slot's allocation, returning the points it held.
    pub fn release(&mut self, slot: usize) -> Option<u32> {
        self.points.remove(&slot)
    }

    pub fn points_for(&self, slot: usize) -> u32 {
        self.points.get(&slot).copied().unwrap_or(0)
    }

    pub fn total_allocated(&self) -> u64 {
        self.points.values().map(|p| u64::from(*p)).sum()
    }

    pub fn remaining(&self) -> i64 {
        i64::from(self.budget) - i64::try_from(self.total_allocated()).unwrap_or(i64::MAX)
    }

    pub fn totals(&self) -> AllocationTotals {
        AllocationTotals {
            budget: self.budget,
            allocated: self.total_allocated(),
            remaining: self.remaining(),
        }
    }

    /// Non-zero allocations in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.points.iter().map(|(slot, points)| (*slot, *points))
    }
}
