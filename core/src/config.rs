use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::time::ClockTime;

const DEFAULT_DIR_NAME: &str = ".planner";
const SETTINGS_FILE_NAME: &str = "config.toml";

/// `base_dir` when given, otherwise `~/.planner`. The directory is created.
pub fn resolve_data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir =
                dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DEFAULT_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)?;
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// When set, clock input must land on a multiple of this many minutes.
    pub minute_step: Option<u32>,
    pub media_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            minute_step: None,
            media_extensions: ["png", "jpg", "jpeg", "mp4", "mov"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Settings {
    /// Reads `config.toml` from the data directory; a missing file means defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(SETTINGS_FILE_NAME);
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn check_minute(&self, time: ClockTime) -> Result<(), PlannerError> {
        match self.minute_step {
            Some(step) if step > 0 && time.minute() % step != 0 => Err(PlannerError::MinuteStep {
                minute: time.minute(),
                step,
            }),
            _ => Ok(()),
        }
    }

    pub fn is_media_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.media_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
