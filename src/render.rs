//! Human-readable menu output.

use std::fmt::Write;

use clap::ValueEnum;

use crate::pipeline::{DayMenu, WeekMenu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_items_per_day: usize,
    pub bullet: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_items_per_day: 3,
            bullet: "•".to_string(),
        }
    }
}

/// `Mon, Oct 6 (2025-10-06)`
pub fn day_heading(day: &DayMenu) -> String {
    format!("{} ({})", day.date.format("%a, %b %-d"), day.key())
}

/// Render a week as plain text, capping items per day.
///
/// ```text
/// Lunch • Next 2 school days
///
/// Mon, Oct 6 (2025-10-06)
///   • Cheese Pizza
///   +2 more
///
/// Tue, Oct 7 (2025-10-07)
///   (no lunch items)
/// ```
pub fn render_text(week: &WeekMenu, options: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} • Next {} school days", week.meal, week.days.len());

    for day in &week.days {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", day_heading(day));

        if day.entrees.is_empty() {
            let _ = writeln!(out, "  (no {} items)", week.meal.to_lowercase());
            continue;
        }

        let shown = day.entrees.len().min(options.max_items_per_day);
        for name in &day.entrees[..shown] {
            let _ = writeln!(out, "  {} {}", options.bullet, name);
        }

        let more = day.entrees.len() - shown;
        if more > 0 {
            let _ = writeln!(out, "  +{} more", more);
        }
    }

    out
}
