//! Feed configuration.
//!
//! Loaded from a YAML file, every field optional:
//!
//! ```yaml
//! building_id: d76afdbb-caa8-ed11-8e6a-c150c5c7a01a
//! district_id: 9fd1237e-53a6-ed11-8e69-985645bc2745
//! meal_session: Lunch
//! days_to_show: 5
//! max_items_per_day: 3
//! exclude:
//!   - Ranch Dressing
//! ignore_patterns: [PBJ, corndog, soup]
//! ```
//!
//! Environment variables (`MENUFEED_*`, usually from `.env`) override the
//! file, and CLI flags override both.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};
use crate::normalize::NormalizationPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.linqconnect.com/api/FamilyMenu";

pub const ENV_BUILDING_ID: &str = "MENUFEED_BUILDING_ID";
pub const ENV_DISTRICT_ID: &str = "MENUFEED_DISTRICT_ID";
pub const ENV_BASE_URL: &str = "MENUFEED_BASE_URL";
pub const ENV_MEAL: &str = "MENUFEED_MEAL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub building_id: Option<String>,
    pub district_id: Option<String>,
    /// Serving session to keep, e.g. "Lunch"
    pub meal_session: String,
    pub days_to_show: usize,
    pub skip_weekends: bool,
    /// Display cap; the rest is summarized as "+N more"
    pub max_items_per_day: usize,
    pub bullet: String,
    /// Case-insensitive exact names to hide
    pub exclude: Vec<String>,
    /// Case-insensitive substrings to hide
    pub ignore_patterns: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            building_id: None,
            district_id: None,
            meal_session: "Lunch".to_string(),
            days_to_show: 5,
            skip_weekends: true,
            max_items_per_day: 3,
            bullet: "•".to_string(),
            exclude: Vec::new(),
            ignore_patterns: ["PBJ", "corndog", "Yogurt", "Chicken Shawarma WG", "Tikka", "soup"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 30,
        }
    }
}

impl FeedConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't valid YAML
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            FeedError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // An empty file deserializes to null, which serde(default) won't take
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Override fields from `MENUFEED_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty(ENV_BUILDING_ID) {
            self.building_id = Some(v);
        }
        if let Some(v) = non_empty(ENV_DISTRICT_ID) {
            self.district_id = Some(v);
        }
        if let Some(v) = non_empty(ENV_BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = non_empty(ENV_MEAL) {
            self.meal_session = v;
        }
    }

    pub fn policy(&self) -> NormalizationPolicy {
        NormalizationPolicy::new(&self.exclude, &self.ignore_patterns)
    }
}
