//! Per-day entree cleanup: dedup, exclude list, ignore patterns.
//!
//! Steps run in a fixed order on each day independently:
//! 1. drop exact duplicates (after trimming, case-sensitive)
//! 2. drop names whose lowercase form is in the exclude set
//! 3. drop names whose lowercase form contains an ignore pattern
//!
//! Survivors keep their original relative order. Nothing is ever added.

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Serialize;

/// Exclude set and ignore patterns, both stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationPolicy {
    exclude: HashSet<String>,
    ignore_patterns: Vec<String>,
}

/// Why an entree was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    ExcludeList,
    IgnorePattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedEntree {
    pub name: String,
    pub reason: ExclusionReason,
}

/// Result of normalizing one day, with the filtered-out names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDay {
    pub kept: Vec<String>,
    pub excluded: Vec<ExcludedEntree>,
}

impl NormalizationPolicy {
    /// Build a policy. Exclude entries are trimmed; empty ignore patterns
    /// are dropped since they would match every name.
    pub fn new<E, P, S, T>(exclude: E, ignore_patterns: P) -> Self
    where
        E: IntoIterator<Item = S>,
        P: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            exclude: exclude
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
            ignore_patterns: ignore_patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore_patterns
    }

    /// Reason `name` would be dropped, if any. Exclude list wins over
    /// patterns; the first matching pattern is reported.
    pub fn exclusion_reason(&self, name: &str) -> Option<ExclusionReason> {
        let lower = name.to_lowercase();

        if self.exclude.contains(&lower) {
            return Some(ExclusionReason::ExcludeList);
        }

        self.ignore_patterns
            .iter()
            .find(|pattern| lower.contains(pattern.as_str()))
            .map(|pattern| ExclusionReason::IgnorePattern(pattern.clone()))
    }
}

/// Normalize one day's raw entree list.
///
/// # Example
/// ```
/// use menufeed::normalize::{normalize_day, NormalizationPolicy};
///
/// let policy = NormalizationPolicy::new(Vec::<&str>::new(), ["corndog"]);
/// let raw = ["Cheese Pizza", "Veggie Corndog", "Turkey Sandwich"];
/// assert_eq!(normalize_day(&raw, &policy), vec!["Cheese Pizza", "Turkey Sandwich"]);
/// ```
pub fn normalize_day<S: AsRef<str>>(raw: &[S], policy: &NormalizationPolicy) -> Vec<String> {
    normalize_day_report(raw, policy).kept
}

/// Same as [`normalize_day`], also returning what the exclude set and
/// ignore patterns removed. Duplicates dropped in step 1 are not reported.
pub fn normalize_day_report<S: AsRef<str>>(raw: &[S], policy: &NormalizationPolicy) -> NormalizedDay {
    // Exact-match dedup: "Pizza" and "pizza" are distinct here
    let unique: IndexSet<String> = raw.iter().map(|s| s.as_ref().trim().to_string()).collect();

    let mut day = NormalizedDay::default();
    for name in unique {
        match policy.exclusion_reason(&name) {
            Some(reason) => day.excluded.push(ExcludedEntree { name, reason }),
            None => day.kept.push(name),
        }
    }
    day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_policy() -> NormalizationPolicy {
        NormalizationPolicy::default()
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let raw = ["Pizza", "pizza", "Pizza"];
        assert_eq!(normalize_day(&raw, &no_policy()), vec!["Pizza", "pizza"]);
    }

    #[test]
    fn test_dedup_after_trim() {
        let raw = [" Tacos", "Tacos ", "Nachos"];
        assert_eq!(normalize_day(&raw, &no_policy()), vec!["Tacos", "Nachos"]);
    }

    #[test]
    fn test_ignore_pattern_substring() {
        let policy = NormalizationPolicy::new(Vec::<String>::new(), vec!["corndog"]);
        let raw = ["Cheese Pizza", "Veggie Corndog", "Turkey Sandwich"];
        assert_eq!(normalize_day(&raw, &policy), vec!["Cheese Pizza", "Turkey Sandwich"]);
    }

    #[test]
    fn test_exclude_is_exact_case_insensitive() {
        let policy = NormalizationPolicy::new(vec!["Ranch Dressing ", "SALSA"], Vec::<String>::new());
        let raw = ["ranch dressing", "Salsa", "Salsa Verde", "Ranch Dressing Cup"];

        assert_eq!(normalize_day(&raw, &policy), vec!["Salsa Verde", "Ranch Dressing Cup"]);
    }

    #[test]
    fn test_report_reasons() {
        let policy = NormalizationPolicy::new(vec!["Tomato Soup"], vec!["PBJ", "soup"]);
        let raw = ["Tomato Soup", "Chicken Noodle Soup", "PBJ Plate w/Mozz Stick", "Pizza"];

        let day = normalize_day_report(&raw, &policy);
        assert_eq!(day.kept, vec!["Pizza"]);
        assert_eq!(
            day.excluded,
            vec![
                ExcludedEntree { name: "Tomato Soup".into(), reason: ExclusionReason::ExcludeList },
                ExcludedEntree {
                    name: "Chicken Noodle Soup".into(),
                    reason: ExclusionReason::IgnorePattern("soup".into()),
                },
                ExcludedEntree {
                    name: "PBJ Plate w/Mozz Stick".into(),
                    reason: ExclusionReason::IgnorePattern("pbj".into()),
                },
            ]
        );
    }

    #[test]
    fn test_empty_pattern_is_dropped() {
        let policy = NormalizationPolicy::new(Vec::<String>::new(), vec!["", "soup"]);
        assert_eq!(policy.ignore_patterns(), ["soup".to_string()]);
        assert_eq!(normalize_day(&["Pizza"], &policy), vec!["Pizza"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let policy = NormalizationPolicy::new(vec!["Ketchup"], vec!["yogurt", "tikka"]);
        let raw = [
            "Chicken Tikka", "Pizza", " Pizza", "ketchup", "Burger", "pizza", "Yogurt Plate", "Burger",
        ];

        let once = normalize_day(&raw, &policy);
        let twice = normalize_day(&once, &policy);
        assert_eq!(once, vec!["Pizza", "Burger", "pizza"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_never_introduces_entries() {
        let policy = NormalizationPolicy::new(vec!["x"], vec!["y"]);
        let raw = ["a", "b", "xy", "c"];

        for name in normalize_day(&raw, &policy) {
            assert!(raw.contains(&name.as_str()));
        }
    }
}
