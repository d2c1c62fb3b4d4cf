//! Configuration types for log fan-out

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Timestamp layout prefixed to logged messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampForm {
    /// `2014-03-10 15:00:02 :`
    Long,
    /// `0310-1500`
    Short,
}

/// Where `print_and_log` sends a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Plain log files, appended to verbatim
    #[serde(default)]
    pub log_files: Vec<PathBuf>,

    /// Files watched by rsyslog or similar; interior newlines become `\r`
    #[serde(default)]
    pub syslog_files: Vec<PathBuf>,

    /// Timestamp prefix, `None` for no stamp
    #[serde(default = "default_stamp")]
    pub stamp: Option<StampForm>,

    /// Skip stdout
    #[serde(default)]
    pub quiet: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_files: vec![],
            syslog_files: vec![],
            stamp: default_stamp(),
            quiet: false,
        }
    }
}

fn default_stamp() -> Option<StampForm> {
    Some(StampForm::Long)
}

impl LogConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| Error::from_io(e, path))?;
        Ok(())
    }
}
