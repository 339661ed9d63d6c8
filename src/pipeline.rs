//! Extract → normalize over a whole date window.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dates::{date_key, WantedDates};
use crate::document::RawDocument;
use crate::normalize::{normalize_day_report, ExcludedEntree, NormalizationPolicy};

/// Cleaned entrees for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayMenu {
    pub date: NaiveDate,
    pub weekday: String,
    pub entrees: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<ExcludedEntree>,
}

impl DayMenu {
    pub fn key(&self) -> String {
        date_key(self.date)
    }
}

/// One `DayMenu` per requested date, in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekMenu {
    pub meal: String,
    pub days: Vec<DayMenu>,
}

impl WeekMenu {
    pub fn total_entrees(&self) -> usize {
        self.days.iter().map(|d| d.entrees.len()).sum()
    }
}

/// Build the menu for `dates` from a fetched document.
///
/// Dates with nothing published still get an (empty) `DayMenu`.
pub fn build_week(
    document: &RawDocument,
    meal_session: &str,
    dates: &[NaiveDate],
    policy: &NormalizationPolicy,
) -> WeekMenu {
    let wanted = WantedDates::from_dates(dates.iter().copied());
    let raw = document.extract(meal_session, &wanted);

    let days: Vec<DayMenu> = wanted
        .dates()
        .map(|date| {
            let key = date_key(date);
            let entries = raw.get(&key).map(Vec::as_slice).unwrap_or_default();
            let normalized = normalize_day_report(entries, policy);

            debug!(
                "{}: {} raw, {} kept, {} excluded",
                key,
                entries.len(),
                normalized.kept.len(),
                normalized.excluded.len()
            );

            DayMenu {
                date,
                weekday: date.format("%A").to_string(),
                entrees: normalized.kept,
                excluded: normalized.excluded,
            }
        })
        .collect();

    let week = WeekMenu {
        meal: meal_session.to_string(),
        days,
    };

    info!(
        "Built {} menu from {}: {} entrees over {} days",
        meal_session,
        document.format(),
        week.total_entrees(),
        week.days.len()
    );
    if week.total_entrees() == 0 {
        warn!("No {} main entrees found for {} requested days", meal_session, week.days.len());
    }

    week
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_week_includes_empty_days() {
        let document = RawDocument::Json(json!({
            "FamilyMenuSessions": [{
                "ServingSession": "Lunch",
                "MenuPlans": [{
                    "Days": [{
                        "Date": "2025-10-07",
                        "MenuMeals": [{
                            "RecipeCategories": [{
                                "RecipeCategoryName": "Main Entree",
                                "Recipes": [
                                    { "RecipeName": "Pizza" },
                                    { "RecipeName": "Tomato Soup" },
                                    { "RecipeName": "Pizza" }
                                ]
                            }]
                        }]
                    }]
                }]
            }]
        }));
        let policy = NormalizationPolicy::new(Vec::<String>::new(), vec!["soup"]);

        let week = build_week(&document, "Lunch", &[ymd(2025, 10, 7), ymd(2025, 10, 6)], &policy);

        assert_eq!(week.days.len(), 2);
        assert_eq!(week.days[0].key(), "2025-10-06");
        assert!(week.days[0].entrees.is_empty());
        assert_eq!(week.days[1].weekday, "Tuesday");
        assert_eq!(week.days[1].entrees, vec!["Pizza"]);
        assert_eq!(week.days[1].excluded.len(), 1);
        assert_eq!(week.total_entrees(), 1);
    }

    #[test]
    fn test_day_menu_serializes_date_key() {
        let day = DayMenu {
            date: ymd(2025, 10, 6),
            weekday: "Monday".to_string(),
            entrees: vec!["Pizza".to_string()],
            excluded: Vec::new(),
        };

        let value = serde_json::to_value(&day).unwrap();
        assert_eq!(value["date"], "2025-10-06");
        assert!(value.get("excluded").is_none());
    }
}
