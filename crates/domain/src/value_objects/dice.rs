//! Dice rolling value objects
//!
//! Characteristic formulas are fixed sums of six-sided dice, optionally
//! offset and then scaled ("3D6×5", "(2D6+6)×5"). The random source is
//! injected as a closure `FnMut(min, max) -> i32` returning an inclusive
//! uniform draw, so tests can swap in a seeded or scripted source.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error when building a dice formula or roll
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
    /// Multiplier must be at least 1
    #[error("Multiplier must be at least 1")]
    InvalidMultiplier,
    /// Modifier and multiplier push the result outside `i32`
    #[error("Dice formula result is out of range")]
    OutOfRange,
}

/// Sum `count` independent draws from `1..=sides`.
///
/// A source returning values outside `1..=sides` is clamped per die, so the
/// result always lies in `[count, count * sides]`.
pub fn roll_sum(
    sides: u8,
    count: u8,
    mut rng: impl FnMut(i32, i32) -> i32,
) -> Result<i32, DiceError> {
    if count == 0 {
        return Err(DiceError::InvalidDiceCount);
    }
    if sides < 2 {
        return Err(DiceError::InvalidDieSize);
    }

    let sides = i32::from(sides);
    Ok((0..count).map(|_| rng(1, sides).clamp(1, sides)).sum())
}

/// A formula of the form `(XdY + Z) × M`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Added to the dice sum before scaling
    pub modifier: i32,
    /// Applied to the modified sum
    pub multiplier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(
        dice_count: u8,
        die_size: u8,
        modifier: i32,
        multiplier: i32,
    ) -> Result<Self, DiceError> {
        if dice_count == 0 {
            return Err(DiceError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceError::InvalidDieSize);
        }
        if multiplier < 1 {
            return Err(DiceError::InvalidMultiplier);
        }
        let formula = Self {
            dice_count,
            die_size,
            modifier,
            multiplier,
        };
        let max_sum = i32::from(dice_count) * i32::from(die_size);
        formula.scale(i32::from(dice_count))?;
        formula.scale(max_sum)?;
        Ok(formula)
    }

    fn scale(&self, sum: i32) -> Result<i32, DiceError> {
        sum.checked_add(self.modifier)
            .and_then(|modified| modified.checked_mul(self.multiplier))
            .ok_or(DiceError::OutOfRange)
    }

    /// 3D6×5: STR, CON, DEX, APP, POW and Luck
    pub const fn three_d6_times_five() -> Self {
        Self {
            dice_count: 3,
            die_size: 6,
            modifier: 0,
            multiplier: 5,
        }
    }

    /// (2D6+6)×5: SIZ, INT and EDU
    pub const fn two_d6_plus_six_times_five() -> Self {
        Self {
            dice_count: 2,
            die_size: 6,
            modifier: 6,
            multiplier: 5,
        }
    }

    /// Roll the formula against the injected source.
    pub fn roll(&self, rng: impl FnMut(i32, i32) -> i32) -> Result<i32, DiceError> {
        let sum = roll_sum(self.die_size, self.dice_count, rng)?;
        self.scale(sum)
    }

    /// Get the minimum possible roll, saturating at the `i32` bounds
    pub fn min_roll(&self) -> i32 {
        i32::from(self.dice_count)
            .saturating_add(self.modifier)
            .saturating_mul(self.multiplier)
    }

    /// Get the maximum possible roll, saturating at the `i32` bounds
    pub fn max_roll(&self) -> i32 {
        (i32::from(self.dice_count) * i32::from(self.die_size))
            .saturating_add(self.modifier)
            .saturating_mul(self.multiplier)
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dice = format!("{}D{}", self.dice_count, self.die_size);
        let base = match self.modifier {
            0 => dice,
            m if m > 0 => format!("({}+{})", dice, m),
            m => format!("({}{})", dice, m),
        };
        if self.multiplier == 1 {
            write!(f, "{}", base)
        } else {
            write!(f, "{}×{}", base, self.multiplier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_roll_sum_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for sides in 2..=20u8 {
            for count in 1..=5u8 {
                for _ in 0..50 {
                    let total = roll_sum(sides, count, |min, max| rng.gen_range(min..=max))
                        .expect("valid dice");
                    let count = i32::from(count);
                    assert!(total >= count && total <= count * i32::from(sides));
                }
            }
        }
    }

    #[test]
    fn test_roll_sum_uses_one_draw_per_die() {
        let mut calls = 0;
        let total = roll_sum(6, 3, |_, _| {
            calls += 1;
            calls
        })
        .expect("valid dice");
        assert_eq!(calls, 3);
        assert_eq!(total, 1 + 2 + 3);
    }

    #[test]
    fn test_roll_sum_clamps_misbehaving_source() {
        assert_eq!(roll_sum(6, 2, |_, _| 99), Ok(12));
        assert_eq!(roll_sum(6, 2, |_, _| -4), Ok(2));
    }

    #[test]
    fn test_roll_sum_rejects_invalid_input() {
        assert_eq!(roll_sum(6, 0, |_, _| 1), Err(DiceError::InvalidDiceCount));
        assert_eq!(roll_sum(1, 3, |_, _| 1), Err(DiceError::InvalidDieSize));
    }

    #[test]
    fn test_formula_bounds() {
        let strength = DiceFormula::three_d6_times_five();
        assert_eq!(strength.min_roll(), 15);
        assert_eq!(strength.max_roll(), 90);

        let size = DiceFormula::two_d6_plus_six_times_five();
        assert_eq!(size.min_roll(), 40);
        assert_eq!(size.max_roll(), 90);
    }

    #[test]
    fn test_formula_roll_applies_modifier_then_multiplier() {
        let size = DiceFormula::two_d6_plus_six_times_five();
        assert_eq!(size.roll(|_, _| 4), Ok((4 + 4 + 6) * 5));
    }

    #[test]
    fn test_formula_display() {
        assert_eq!(DiceFormula::three_d6_times_five().to_string(), "3D6×5");
        assert_eq!(
            DiceFormula::two_d6_plus_six_times_five().to_string(),
            "(2D6+6)×5"
        );
        assert_eq!(
            DiceFormula::new(1, 100, 0, 1).expect("valid").to_string(),
            "1D100"
        );
    }

    #[test]
    fn test_new_rejects_overflowing_formulas() {
        assert_eq!(
            DiceFormula::new(3, 6, i32::MAX, 5),
            Err(DiceError::OutOfRange)
        );
        assert_eq!(
            DiceFormula::new(3, 6, 0, i32::MAX),
            Err(DiceError::OutOfRange)
        );
        assert_eq!(
            DiceFormula::new(1, 6, i32::MIN, 2),
            Err(DiceError::OutOfRange)
        );
        assert!(DiceFormula::new(1, 2, i32::MAX - 2, 1).is_ok());
    }

    #[test]
    fn test_unchecked_formula_does_not_panic() {
        let formula = DiceFormula {
            dice_count: 3,
            die_size: 6,
            modifier: i32::MAX,
            multiplier: 5,
        };
        assert_eq!(formula.roll(|_, _| 1), Err(DiceError::OutOfRange));
        assert_eq!(formula.min_roll(), i32::MAX);
        assert_eq!(formula.max_roll(), i32::MAX);
    }

    #[test]
    fn test_new_validates() {
        assert_eq!(DiceFormula::new(0, 6, 0, 1), Err(DiceError::InvalidDiceCount));
        assert_eq!(DiceFormula::new(1, 1, 0, 1), Err(DiceError::InvalidDieSize));
        assert_eq!(DiceFormula::new(1, 6, 0, 0), Err(DiceError::InvalidMultiplier));
    }
}
