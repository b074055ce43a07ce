//! Persisted preferences.
//!
//! A flat JSON key-value file. Typed accessors fall back to a default when
//! the key is absent or holds the wrong type, so a stale or hand-edited
//! file can never break startup. Writes rewrite the whole file; the store
//! is tiny and this keeps it trivially consistent.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const KEY_STEP_GOAL: &str = "stepGoal";
pub const KEY_BREATHING_PATTERN: &str = "breathingPattern";

pub const DEFAULT_STEP_GOAL: u64 = 10_000;
pub const DEFAULT_BREATHING_PATTERN: &str = "box";

pub struct Preferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Preferences {
    /// Load from `path`. A missing or unparseable file yields an empty
    /// store (every accessor returns its default) rather than an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str::<Value>(&text).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(self.values.clone()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.values.get(key).and_then(Value::as_u64).unwrap_or(default)
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    pub fn set_u64(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), Value::from(value));
    }

    pub fn step_goal(&self) -> u64 {
        self.get_u64(KEY_STEP_GOAL, DEFAULT_STEP_GOAL)
    }

    pub fn breathing_pattern(&self) -> &str {
        self.get_str(KEY_BREATHING_PATTERN, DEFAULT_BREATHING_PATTERN)
    }
}
