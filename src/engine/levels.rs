use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// --- Skill ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Add,
    Sub,
    Mul,
    Div,
}

impl Skill {
    pub fn to_key(self) -> &'static str {
        match self {
            Skill::Add => "add",
            Skill::Sub => "sub",
            Skill::Mul => "mul",
            Skill::Div => "div",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "add" => Some(Skill::Add),
            "sub" => Some(Skill::Sub),
            "mul" => Some(Skill::Mul),
            "div" => Some(Skill::Div),
            _ => None,
        }
    }

    /// Fixed drill order. Selection ties and weighted draws resolve in this
    /// order, so it must stay stable.
    pub fn all() -> &'static [Skill] {
        &[Skill::Add, Skill::Sub, Skill::Mul, Skill::Div]
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown skill key: {0}")]
pub struct ParseSkillError(pub String);

impl FromStr for Skill {
    type Err = ParseSkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::from_key(s).ok_or_else(|| ParseSkillError(s.to_string()))
    }
}

// --- Level table ---

pub const MAX_LEVEL: u32 = 12;

/// Operand ranges for one (skill, level) cell. Bounds are inclusive and
/// hand-verified to satisfy `min <= max`; the lookup path does not re-check.
#[derive(Clone, Copy, Debug)]
pub struct LevelSpec {
    pub min_a: i64,
    pub max_a: i64,
    pub min_b: i64,
    pub max_b: i64,
    pub allow_negative_result: bool,
}

const fn spec(min_a: i64, max_a: i64, min_b: i64, max_b: i64) -> LevelSpec {
    LevelSpec {
        min_a,
        max_a,
        min_b,
        max_b,
        allow_negative_result: false,
    }
}

const fn signed(min_a: i64, max_a: i64, min_b: i64, max_b: i64) -> LevelSpec {
    LevelSpec {
        min_a,
        max_a,
        min_b,
        max_b,
        allow_negative_result: true,
    }
}

const ADD_LEVELS: [LevelSpec; MAX_LEVEL as usize] = [
    spec(0, 10, 0, 10),
    spec(0, 20, 0, 10),
    spec(0, 20, 0, 20),
    spec(0, 50, 0, 20),
    spec(0, 50, 0, 50),
    spec(0, 100, 0, 50),
    spec(0, 100, 0, 100),
    spec(10, 200, 10, 100),
    spec(10, 500, 10, 200),
    spec(100, 999, 10, 500),
    spec(100, 999, 100, 999),
    spec(1000, 9999, 100, 999),
];

// Upper levels introduce negative answers; below that operands are reordered
// at generation time so answers stay non-negative.
const SUB_LEVELS: [LevelSpec; MAX_LEVEL as usize] = [
    spec(0, 10, 0, 10),
    spec(0, 20, 0, 10),
    spec(0, 20, 0, 20),
    spec(0, 50, 0, 20),
    spec(0, 50, 0, 50),
    spec(0, 100, 0, 50),
    spec(0, 100, 0, 100),
    spec(10, 200, 10, 100),
    signed(0, 100, 0, 100),
    signed(10, 200, 10, 200),
    signed(100, 999, 100, 999),
    signed(100, 9999, 100, 999),
];

const MUL_LEVELS: [LevelSpec; MAX_LEVEL as usize] = [
    spec(0, 5, 0, 5),
    spec(0, 10, 0, 5),
    spec(0, 10, 0, 10),
    spec(2, 12, 2, 12),
    spec(2, 20, 2, 12),
    spec(2, 20, 2, 20),
    spec(2, 50, 2, 20),
    spec(5, 50, 5, 50),
    spec(5, 100, 5, 50),
    spec(10, 100, 10, 100),
    spec(10, 200, 10, 100),
    spec(10, 999, 10, 99),
];

// For division, operand A is the divisor and operand B the quotient; the
// dividend is derived, so ranges here stay small enough to keep dividends
// mental-arithmetic sized.
const DIV_LEVELS: [LevelSpec; MAX_LEVEL as usize] = [
    spec(1, 5, 1, 5),
    spec(1, 10, 1, 5),
    spec(1, 10, 1, 10),
    spec(2, 12, 2, 12),
    spec(2, 20, 2, 12),
    spec(2, 20, 2, 20),
    spec(2, 50, 2, 20),
    spec(5, 50, 5, 20),
    spec(5, 50, 5, 50),
    spec(5, 100, 5, 50),
    spec(10, 100, 10, 100),
    spec(10, 200, 10, 100),
];

pub fn levels_for(skill: Skill) -> &'static [LevelSpec] {
    match skill {
        Skill::Add => &ADD_LEVELS,
        Skill::Sub => &SUB_LEVELS,
        Skill::Mul => &MUL_LEVELS,
        Skill::Div => &DIV_LEVELS,
    }
}

/// Look up the spec for a level, silently clamping out-of-range levels into
/// `[1, MAX_LEVEL]`. Misconfigured callers get the nearest real level rather
/// than a panic.
pub fn level_spec(skill: Skill, level: u32) -> LevelSpec {
    let index = (level.clamp(1, MAX_LEVEL) - 1) as usize;
    levels_for(skill)[index]
}

/// Response-time budget for a level: 6s at the easy end shrinking by 300ms
/// per level down to a 2.4s floor. Beating this alongside a streak is what
/// earns a promotion.
pub fn target_ms(level: u32) -> f64 {
    (6000.0 - level as f64 * 300.0).clamp(2400.0, 6000.0)
}
