//! Characteristics and the derived attributes computed from them.
//!
//! An `AttributeSet` is created atomically by one generation call and is
//! immutable afterwards; regeneration replaces the whole set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dice::{DiceError, DiceFormula};
use crate::error::DomainError;

/// The eight rolled primary characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Characteristic {
    Str,
    Con,
    Siz,
    Dex,
    App,
    Int,
    Pow,
    Edu,
}

impl Characteristic {
    /// Generation order; one independent roll each, in this order.
    pub const ALL: [Characteristic; 8] = [
        Characteristic::Str,
        Characteristic::Con,
        Characteristic::Siz,
        Characteristic::Dex,
        Characteristic::App,
        Characteristic::Int,
        Characteristic::Pow,
        Characteristic::Edu,
    ];

    /// Short code used on the sheet ("STR", "EDU", ...)
    pub fn code(&self) -> &'static str {
        match self {
            Characteristic::Str => "STR",
            Characteristic::Con => "CON",
            Characteristic::Siz => "SIZ",
            Characteristic::Dex => "DEX",
            Characteristic::App => "APP",
            Characteristic::Int => "INT",
            Characteristic::Pow => "POW",
            Characteristic::Edu => "EDU",
        }
    }

    /// Sheet label
    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::Str => "力量",
            Characteristic::Con => "體質",
            Characteristic::Siz => "體型",
            Characteristic::Dex => "敏捷",
            Characteristic::App => "外貌",
            Characteristic::Int => "智力",
            Characteristic::Pow => "意志",
            Characteristic::Edu => "教育",
        }
    }

    /// Rolling formula for this characteristic.
    pub fn formula(&self) -> DiceFormula {
        match self {
            Characteristic::Siz | Characteristic::Int | Characteristic::Edu => {
                DiceFormula::two_d6_plus_six_times_five()
            }
            _ => DiceFormula::three_d6_times_five(),
        }
    }

    fn index(&self) -> usize {
        match self {
            Characteristic::Str => 0,
            Characteristic::Con => 1,
            Characteristic::Siz => 2,
            Characteristic::Dex => 3,
            Characteristic::App => 4,
            Characteristic::Int => 5,
            Characteristic::Pow => 6,
            Characteristic::Edu => 7,
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Characteristic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Characteristic::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown characteristic: {}", s)))
    }
}

/// Calculate HP = floor((SIZ + CON) / 10).
pub fn calculate_hit_points(siz: u32, con: u32) -> u32 {
    siz.saturating_add(con) / 10
}

/// Calculate starting sanity from POW.
pub fn calculate_starting_sanity(pow: u32) -> u32 {
    pow
}

/// Calculate magic points = floor(POW / 5).
pub fn calculate_magic_points(pow: u32) -> u32 {
    pow / 5
}

/// Full primary and derived attribute set for one generated character.
///
/// Only primaries and Luck are read back when deserializing; derived values
/// are always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAttributes")]
pub struct AttributeSet {
    primaries: [u32; 8],
    luck: u32,
    sanity: u32,
    magic_points: u32,
    hit_points: u32,
}

impl AttributeSet {
    /// Roll every characteristic and Luck with fresh draws.
    pub fn roll(mut rng: impl FnMut(i32, i32) -> i32) -> Result<Self, DiceError> {
        let mut primaries = [0u32; 8];
        for characteristic in Characteristic::ALL {
            primaries[characteristic.index()] = to_score(characteristic.formula().roll(&mut rng)?);
        }
        let luck = to_score(DiceFormula::three_d6_times_five().roll(&mut rng)?);

        Ok(Self::from_array(primaries, luck))
    }

    /// Build a set from explicit primary values; derived values are computed.
    pub fn from_primaries(
        values: impl IntoIterator<Item = (Characteristic, u32)>,
        luck: u32,
    ) -> Self {
        let mut primaries = [0u32; 8];
        for (characteristic, value) in values {
            primaries[characteristic.index()] = value;
        }
        Self::from_array(primaries, luck)
    }

    fn from_array(primaries: [u32; 8], luck: u32) -> Self {
        let pow = primaries[Characteristic::Pow.index()];
        let siz = primaries[Characteristic::Siz.index()];
        let con = primaries[Characteristic::Con.index()];
        Self {
            primaries,
            luck,
            sanity: calculate_starting_sanity(pow),
            magic_points: calculate_magic_points(pow),
            hit_points: calculate_hit_points(siz, con),
        }
    }

    pub fn get(&self, characteristic: Characteristic) -> u32 {
        self.primaries[characteristic.index()]
    }

    /// Primary values in generation order.
    pub fn primaries(&self) -> impl Iterator<Item = (Characteristic, u32)> + '_ {
        Characteristic::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn luck(&self) -> u32 {
        self.luck
    }

    pub fn sanity(&self) -> u32 {
        self.sanity
    }

    pub fn magic_points(&self) -> u32 {
        self.magic_points
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }
}

#[derive(Deserialize)]
struct RawAttributes {
    primaries: [u32; 8],
    luck: u32,
}

impl From<RawAttributes> for AttributeSet {
    fn from(raw: RawAttributes) -> Self {
        Self::from_array(raw.primaries, raw.luck)
    }
}

fn to_score(rolled: i32) -> u32 {
    u32::try_from(rolled).unwrap_or(0)
}
