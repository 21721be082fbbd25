use itertools::Itertools;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::words::DATA_DIR;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Knight {
    pub id: u8,
    pub name: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Level {
    pub id: u8,
    pub title: String,
    pub time_secs: u64,
    pub villain: String,
    pub script: Vec<String>,
}

impl Level {
    /// The script as one line: Enter is not a typing key, so the lines
    /// are joined with single spaces.
    pub fn target_text(&self) -> String {
        self.script
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .join(" ")
    }
}

/// Knights and levels of the battle campaign
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Campaign {
    pub knights: Vec<Knight>,
    pub levels: Vec<Level>,
}

impl Campaign {
    pub fn builtin() -> Result<Self> {
        let file = DATA_DIR
            .get_file("levels.json")
            .ok_or_else(|| Error::MissingData(PathBuf::from("levels.json")))?;
        let campaign: Campaign = serde_json::from_slice(file.contents())?;
        campaign.validate()?;
        Ok(campaign)
    }

    fn validate(&self) -> Result<()> {
        if self.knights.is_empty() {
            return Err(Error::InvalidLevel("no knights".into()));
        }
        if self.levels.is_empty() {
            return Err(Error::InvalidLevel("no levels".into()));
        }
        if let Some(level) = self.levels.iter().find(|l| l.target_text().is_empty()) {
            return Err(Error::InvalidLevel(format!("level {} has no script", level.id)));
        }
        Ok(())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
