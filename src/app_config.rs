use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading and validating the configuration settings.
/// Everything has a default, so a missing or partial file is fine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// File handling settings
    #[serde(default)]
    pub files: FileConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for reading, writing and backing up subtitle files
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    // @field: Size above which a warning is printed
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    // @field: Appended to the input path for the backup copy
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,

    // @field: Suffix of the temp file used for atomic writes
    #[serde(default = "default_temp_file_suffix")]
    pub temp_file_suffix: String,

    // @field: Extensions that do not trigger a warning (case-insensitive)
    #[serde(default = "default_valid_extensions")]
    pub valid_extensions: Vec<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            backup_suffix: default_backup_suffix(),
            temp_file_suffix: default_temp_file_suffix(),
            valid_extensions: default_valid_extensions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024 // 10MB warning threshold
}

fn default_backup_suffix() -> String {
    ".backup".to_string()
}

fn default_temp_file_suffix() -> String {
    ".srt.tmp".to_string()
}

fn default_valid_extensions() -> Vec<String> {
    vec!["srt".to_string()]
}

impl Config {
    /// Load a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.files.max_file_size_bytes == 0 {
            return Err(anyhow!("max_file_size_bytes must be greater than zero"));
        }
        if self.files.backup_suffix.is_empty() {
            return Err(anyhow!("backup_suffix must not be empty"));
        }
        if self.files.temp_file_suffix.is_empty() {
            return Err(anyhow!("temp_file_suffix must not be empty"));
        }
        if self.files.valid_extensions.is_empty() {
            return Err(anyhow!("valid_extensions must list at least one extension"));
        }

        Ok(())
    }
}
