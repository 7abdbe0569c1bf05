//! Runner configuration
//!
//! This module provides runtime configuration loading from JSON files so
//! suite runs can be tuned without recompilation. The knobs cover body
//! buffering limits and the failure-reporting policy of the exercise
//! runner.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Exercise runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Upper bound for buffered response bodies, in bytes
    pub max_body_bytes: usize,
    /// Stop a case at its first recorded failure instead of reporting all of them
    pub fail_fast: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            // Mock payloads are tiny; 1 MiB leaves generous headroom while
            // still catching a handler that streams unbounded data.
            max_body_bytes: 1024 * 1024,
            fail_fast: false,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from JSON file
    ///
    /// Falls back to defaults if the file doesn't exist or the JSON is
    /// invalid, logging a warning either way.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded runner config from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}
