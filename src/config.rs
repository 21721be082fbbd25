use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::battle::{PassRule, DEFAULT_PASS_ACCURACY, DEFAULT_PASS_WPM};
use crate::error::{Error, Result};
use crate::practice::DEFAULT_PRACTICE_SECS;
use crate::ui::theme::ThemeMode;
use crate::words::{WordCountRange, DEFAULT_MAX_WORDS, DEFAULT_MIN_WORDS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub practice_secs: u64,
    pub min_words: usize,
    pub max_words: usize,
    pub pass_wpm: i64,
    pub pass_accuracy: u8,
    /// 1-based knight id
    pub knight: u8,
    pub theme: ThemeMode,
    pub words_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            practice_secs: DEFAULT_PRACTICE_SECS,
            min_words: DEFAULT_MIN_WORDS,
            max_words: DEFAULT_MAX_WORDS,
            pass_wpm: DEFAULT_PASS_WPM,
            pass_accuracy: DEFAULT_PASS_ACCURACY,
            knight: 1,
            theme: ThemeMode::Dark,
            words_file: None,
        }
    }
}

/// Knights offered by the battle campaign
pub const KNIGHT_COUNT: u8 = 3;

impl Config {
    pub fn practice_secs(&self) -> Result<u64> {
        if self.practice_secs == 0 {
            return Err(Error::ZeroPracticeTime);
        }
        Ok(self.practice_secs)
    }

    pub fn word_range(&self) -> Result<WordCountRange> {
        WordCountRange::new(self.min_words, self.max_words)
    }

    pub fn pass_rule(&self) -> PassRule {
        PassRule {
            min_wpm: self.pass_wpm,
            min_accuracy: self.pass_accuracy.min(100),
        }
    }

    pub fn knight_index(&self) -> usize {
        usize::from(self.knight.clamp(1, KNIGHT_COUNT)) - 1
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("typecraft_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
