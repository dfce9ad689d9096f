use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::store::schema::{MistakesData, ModeData, StatsData};

const STATS_FILE: &str = "stats.json";
const MODE_FILE: &str = "mode.json";
const MISTAKES_FILE: &str = "mistakes.json";

/// JSON persistence for learner state. Each blob lives in its own file;
/// unreadable or stale blobs fall back to fresh defaults instead of failing,
/// so a damaged file costs at most its own slice of progress.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mathdr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(err) => {
                    warn!(file = name, %err, "unreadable state file, using defaults");
                    T::default()
                }
            },
            Err(err) => {
                warn!(file = name, %err, "failed to read state file, using defaults");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_stats(&self) -> StatsData {
        let mut data: StatsData = self.load(STATS_FILE);
        if data.needs_reset() {
            warn!(version = data.schema_version, "stale stats schema, resetting");
            data = StatsData::default();
        }
        data.normalize();
        data
    }

    pub fn save_stats(&self, data: &StatsData) -> Result<()> {
        self.save(STATS_FILE, data)
    }

    pub fn load_mode(&self) -> ModeData {
        let data: ModeData = self.load(MODE_FILE);
        if data.needs_reset() {
            warn!(version = data.schema_version, "stale mode schema, resetting");
            return ModeData::default();
        }
        data
    }

    pub fn save_mode(&self, data: &ModeData) -> Result<()> {
        self.save(MODE_FILE, data)
    }

    pub fn load_mistakes(&self) -> MistakesData {
        let mut data: MistakesData = self.load(MISTAKES_FILE);
        if data.needs_reset() {
            warn!(version = data.schema_version, "stale mistakes schema, resetting");
            data = MistakesData::default();
        }
        data.normalize();
        data
    }

    pub fn save_mistakes(&self, data: &MistakesData) -> Result<()> {
        self.save(MISTAKES_FILE, data)
    }

    /// Recreate fresh state across all blobs. This is the only way learner
    /// progress is ever destroyed.
    pub fn reset(&self) -> Result<()> {
        self.save_stats(&StatsData::default())?;
        self.save_mode(&ModeData::default())?;
        self.save_mistakes(&MistakesData::default())?;
        Ok(())
    }
}
