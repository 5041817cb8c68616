//! Harness configuration file parsing.

use std::fs;
use std::path::Path;

use super::registry::PluginError;
use crate::runner::ds::storage::{StorageConfig, StoragePolicy};

/// Settings for running scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Storage settings used for every array a script creates.
    pub storage: StorageConfig,
}

impl HarnessConfig {
    pub fn new() -> Self {
        HarnessConfig {
            storage: StorageConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [storage]
    /// policy = "adaptive"      # or "packed", "sparse"
    /// max_gap = 1024
    /// sparse_min_length = 128
    /// ```
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = fs::read_to_string(path)
            .map_err(|e| PluginError::ConfigError(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Only the flat `key = value`
    /// form is understood; unknown sections are skipped.
    pub fn parse(content: &str) -> Result<Self, PluginError> {
        let mut config = HarnessConfig::new();
        let mut current_section = String::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = strip_comment(line).trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let (key, value) = Self::parse_entry(line).ok_or_else(|| {
                PluginError::ConfigError(format!("line {}: expected key = value", line_no + 1))
            })?;

            if current_section == "storage" {
                Self::apply_storage_entry(&mut config.storage, key, value)
                    .map_err(|msg| PluginError::ConfigError(format!("line {}: {}", line_no + 1, msg)))?;
            }
        }

        Ok(config)
    }

    fn parse_entry(line: &str) -> Option<(&str, &str)> {
        let parts: Vec<&str> = line.splitn(2, '=').collect();
        if parts.len() != 2 {
            return None;
        }
        let key = parts[0].trim().trim_matches('"');
        let value = parts[1].trim().trim_matches('"');
        if key.is_empty() {
            None
        } else {
            Some((key, value))
        }
    }

    fn apply_storage_entry(
        storage: &mut StorageConfig,
        key: &str,
        value: &str,
    ) -> Result<(), String> {
        match key {
            "policy" => storage.policy = value.parse::<StoragePolicy>()?,
            "max_gap" => storage.max_gap = parse_u32(key, value)?,
            "sparse_min_length" => storage.sparse_min_length = parse_u32(key, value)?,
            _ => return Err(format!("unknown storage key '{}'", key)),
        }
        Ok(())
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, String> {
    value
        .replace('_', "")
        .parse::<u32>()
        .map_err(|e| format!("{} must be an unsigned integer: {}", key, e))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new()
    }
}
