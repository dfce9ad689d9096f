use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::levels::MAX_LEVEL;

/// Learner-tunable settings. Loaded from `config.toml`; every field has a
/// serde default so older or hand-edited files deserialize field-by-field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Questions per drill session.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Per-question countdown budget, enforced by the session driver.
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: u32,
    /// Level at which subtraction may produce negative answers; 0 keeps
    /// negatives locked at every level.
    #[serde(default = "default_negative_level")]
    pub negative_level: u32,
}

fn default_question_count() -> usize {
    10
}
fn default_time_limit_seconds() -> u32 {
    20
}
fn default_negative_level() -> u32 {
    0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            time_limit_seconds: default_time_limit_seconds(),
            negative_level: default_negative_level(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut settings: Settings = toml::from_str(&content)?;
            settings.validate();
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mathdr")
            .join("config.toml")
    }

    /// Clamp every field into its documented range. Runs after
    /// deserialization so out-of-range values from edited files never reach
    /// the engine.
    pub fn validate(&mut self) {
        self.question_count = self.question_count.clamp(5, 50);
        self.time_limit_seconds = self.time_limit_seconds.clamp(5, 60);
        self.negative_level = self.negative_level.min(MAX_LEVEL);
    }

    pub fn time_limit_ms(&self) -> f64 {
        self.time_limit_seconds as f64 * 1000.0
    }

    /// Whether subtraction at `level` may produce negative answers under the
    /// current unlock threshold.
    pub fn allows_negative_at(&self, level: u32) -> bool {
        self.negative_level > 0 && level >= self.negative_level
    }
}
