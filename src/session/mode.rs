use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::levels::Skill;

/// What to drill: a single skill, or `Mix`, which hands the choice to the
/// weighted selector. Persisted as its string key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Add,
    Sub,
    Mul,
    Div,
    Mix,
}

impl Mode {
    pub fn to_key(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Sub => "sub",
            Mode::Mul => "mul",
            Mode::Div => "div",
            Mode::Mix => "mix",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "add" => Some(Mode::Add),
            "sub" => Some(Mode::Sub),
            "mul" => Some(Mode::Mul),
            "div" => Some(Mode::Div),
            "mix" => Some(Mode::Mix),
            _ => None,
        }
    }

    pub fn all() -> &'static [Mode] {
        &[Mode::Add, Mode::Sub, Mode::Mul, Mode::Div, Mode::Mix]
    }

    /// The fixed skill behind this mode, or `None` for `Mix`.
    pub fn skill(self) -> Option<Skill> {
        match self {
            Mode::Add => Some(Skill::Add),
            Mode::Sub => Some(Skill::Sub),
            Mode::Mul => Some(Skill::Mul),
            Mode::Div => Some(Skill::Div),
            Mode::Mix => None,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown mode key: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_key(s).ok_or_else(|| ParseModeError(s.to_string()))
    }
}
