use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::levels::{MAX_LEVEL, Skill, target_ms};

/// Rolling-history window per skill. Accuracy and pacing are judged over at
/// most this many recent attempts.
pub const HISTORY_CAP: usize = 12;

const PROMOTE_STREAK: u32 = 3;
const DEMOTE_STREAK: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub correct: bool,
    pub ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub mistake_streak: u32,
    /// Newest last; at most one of `streak` / `mistake_streak` is nonzero.
    #[serde(default)]
    pub history: Vec<Attempt>,
}

fn default_level() -> u32 {
    1
}

impl Default for SkillStats {
    fn default() -> Self {
        Self {
            level: default_level(),
            streak: 0,
            mistake_streak: 0,
            history: Vec::new(),
        }
    }
}

impl SkillStats {
    /// Fraction of recent attempts answered correctly; 0 with no history.
    pub fn accuracy(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let correct = self.history.iter().filter(|a| a.correct).count();
        correct as f64 / self.history.len() as f64
    }

    /// Mean response time over recent attempts; 0 with no history.
    pub fn average_ms(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().map(|a| a.ms).sum::<f64>() / self.history.len() as f64
    }
}

/// The entire per-learner progress state: one `SkillStats` per skill. Fresh
/// state starts every skill at level 1 with empty history; the only mutation
/// path is `update_stats`, which returns a new value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub add: SkillStats,
    #[serde(default)]
    pub sub: SkillStats,
    #[serde(default)]
    pub mul: SkillStats,
    #[serde(default)]
    pub div: SkillStats,
}

impl Stats {
    pub fn skill(&self, skill: Skill) -> &SkillStats {
        match skill {
            Skill::Add => &self.add,
            Skill::Sub => &self.sub,
            Skill::Mul => &self.mul,
            Skill::Div => &self.div,
        }
    }

    pub fn skill_mut(&mut self, skill: Skill) -> &mut SkillStats {
        match skill {
            Skill::Add => &mut self.add,
            Skill::Sub => &mut self.sub,
            Skill::Mul => &mut self.mul,
            Skill::Div => &mut self.div,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsUpdate {
    pub stats: Stats,
    pub leveled_up: bool,
    pub leveled_down: bool,
}

/// Apply one result to the leveling state machine.
///
/// Three consecutive correct answers, the last of which beats the level's
/// time budget, raise the level; two consecutive misses lower it. Levels
/// clamp to `[1, MAX_LEVEL]`, and a level change resets its own streak
/// counter so the next change needs a fresh run. Demotion (2 misses) is
/// deliberately quicker than promotion (3 hits).
pub fn update_stats(stats: &Stats, skill: Skill, correct: bool, ms: f64) -> StatsUpdate {
    let mut next = stats.clone();
    let entry = next.skill_mut(skill);

    entry.history.push(Attempt { correct, ms });
    if entry.history.len() > HISTORY_CAP {
        entry.history.remove(0);
    }

    let next_streak = if correct { entry.streak + 1 } else { 0 };
    let next_mistake_streak = if correct { 0 } else { entry.mistake_streak + 1 };

    let mut leveled_up = false;
    let mut leveled_down = false;

    if correct && next_streak >= PROMOTE_STREAK && ms <= target_ms(entry.level) {
        let raised = (entry.level + 1).min(MAX_LEVEL);
        leveled_up = raised != entry.level;
        entry.level = raised;
    }
    if !correct && next_mistake_streak >= DEMOTE_STREAK {
        let lowered = entry.level.saturating_sub(1).max(1);
        leveled_down = lowered != entry.level;
        entry.level = lowered;
    }

    entry.streak = if correct && !leveled_up { next_streak } else { 0 };
    entry.mistake_streak = if !correct && !leveled_down {
        next_mistake_streak
    } else {
        0
    };

    if leveled_up || leveled_down {
        debug!(
            skill = skill.to_key(),
            level = entry.level,
            leveled_up,
            leveled_down,
            "level changed"
        );
    }

    StatsUpdate {
        stats: next,
        leveled_up,
        leveled_down,
    }
}
