use serde::{Deserialize, Serialize};

use crate::engine::levels::MAX_LEVEL;
use crate::engine::mistakes::{LEDGER_CAP, MistakeItem};
use crate::engine::stats::{HISTORY_CAP, Stats};
use crate::session::mode::Mode;

const SCHEMA_VERSION: u32 = 1;

/// Persisted learner progress. Stats, mode and mistakes are kept in separate
/// files so a corrupt blob only resets its own slice of state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsData {
    pub schema_version: u32,
    #[serde(default)]
    pub stats: Stats,
}

impl Default for StatsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            stats: Stats::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeData {
    pub schema_version: u32,
    #[serde(default)]
    pub mode: Mode,
}

impl Default for ModeData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            mode: Mode::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MistakesData {
    pub schema_version: u32,
    #[serde(default)]
    pub items: Vec<MistakeItem>,
}

impl Default for MistakesData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            items: Vec::new(),
        }
    }
}

impl StatsData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Boundary repair for loaded blobs: clamp levels into range, drop
    /// attempts with non-finite or negative times, and re-cap histories.
    /// The pure engine assumes all of this already holds.
    pub fn normalize(&mut self) {
        for skill in [
            &mut self.stats.add,
            &mut self.stats.sub,
            &mut self.stats.mul,
            &mut self.stats.div,
        ] {
            skill.level = skill.level.clamp(1, MAX_LEVEL);
            skill.history.retain(|a| a.ms.is_finite() && a.ms >= 0.0);
            if skill.history.len() > HISTORY_CAP {
                let excess = skill.history.len() - HISTORY_CAP;
                skill.history.drain(..excess);
            }
        }
    }
}

impl ModeData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

impl MistakesData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn normalize(&mut self) {
        self.items.retain(|item| item.misses >= 1);
        for item in &mut self.items {
            item.level = item.level.clamp(1, MAX_LEVEL);
        }
        self.items.truncate(LEDGER_CAP);
    }
}
