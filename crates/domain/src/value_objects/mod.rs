//! Value objects - Immutable objects defined by their attributes

mod attributes;
mod dice;

pub use attributes::{
    calculate_hit_points, calculate_magic_points, calculate_starting_sanity, AttributeSet,
    Characteristic,
};
pub use dice::{roll_sum, DiceError, DiceFormula};
