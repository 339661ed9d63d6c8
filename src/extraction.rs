//! Format-agnostic entree extraction.
//!
//! A FamilyMenu feed nests sessions → plans → days → meals → recipe
//! categories → recipes. The JSON and XML variants of the feed spell that
//! nesting differently, so the walk below is written once against the
//! [`MenuTree`] trait and each format supplies an adapter (see
//! [`crate::tree`]).
//!
//! Field names are inconsistent across districts, so every logical field is
//! an ordered [`FieldAliases`] list probed until one alias yields a value.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::dates::{date_key, parse_menu_date, WantedDates};
use crate::tree::XmlNode;

/// Date key → entree names, in document traversal order.
///
/// Names are trimmed; duplicates are kept until normalization.
pub type EntreesByDate = BTreeMap<String, Vec<String>>;

/// Only recipes under a category whose name contains this are kept.
pub const MAIN_ENTREE: &str = "main entree";

/// A repeated group: a container field holding items.
///
/// In JSON the container is an array-valued key; in XML it is a wrapper
/// element whose children are the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub container: &'static str,
    pub item: &'static str,
}

pub const SESSIONS: Group = Group { container: "FamilyMenuSessions", item: "FamilyMenuSession" };
pub const PLANS: Group = Group { container: "MenuPlans", item: "MenuPlan" };
pub const DAYS: Group = Group { container: "Days", item: "Day" };
pub const MEALS: Group = Group { container: "MenuMeals", item: "MenuMeal" };
pub const CATEGORIES: Group = Group { container: "RecipeCategories", item: "RecipeCategory" };
pub const RECIPES: Group = Group { container: "Recipes", item: "Recipe" };

pub const SERVING_SESSION: &str = "ServingSession";
pub const MENU_PLAN_NAME: &str = "MenuPlanName";

/// Ordered alternative names for one logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases(pub &'static [&'static str]);

impl FieldAliases {
    /// First alias holding a non-empty value.
    pub fn probe<T: MenuTree>(&self, node: &T) -> Option<String> {
        self.0.iter().find_map(|name| node.field(name))
    }
}

pub const DAY_DATE: FieldAliases = FieldAliases(&["Date", "ServiceDate", "MenuDate"]);

pub const CATEGORY_NAME: FieldAliases =
    FieldAliases(&["RecipeCategoryName", "CategoryName", "Name", "DisplayName"]);

pub const ENTREE_NAME: FieldAliases =
    FieldAliases(&["RecipeName", "DisplayName", "ItemName", "Name"]);

/// Navigation primitives a feed format must provide.
pub trait MenuTree: Sized {
    /// Items of a repeated group under this node. Empty when absent.
    fn items(&self, group: Group) -> Vec<&Self>;

    /// Trimmed text of a scalar field, `None` when absent or blank.
    fn field(&self, name: &str) -> Option<String>;

    /// Top-level serving sessions of a document.
    fn sessions(&self) -> Vec<&Self> {
        self.items(SESSIONS)
    }
}

/// Whether a session's days belong to the configured meal.
///
/// `ServingSession` must equal the meal name (case-insensitive). Failing
/// that, any plan whose `MenuPlanName` contains the meal name still selects
/// the session; some feeds leave the session field empty or generic.
pub fn session_matches<T: MenuTree>(session: &T, meal_session: &str) -> bool {
    let meal = meal_session.to_lowercase();
    let serving = session.field(SERVING_SESSION).unwrap_or_default().to_lowercase();

    if serving == meal {
        return true;
    }

    session.items(PLANS).iter().any(|plan| {
        plan.field(MENU_PLAN_NAME)
            .map(|name| name.to_lowercase().contains(&meal))
            .unwrap_or(false)
    })
}

/// Resolved category name contains "main entree".
pub fn is_main_entree<T: MenuTree>(category: &T) -> bool {
    CATEGORY_NAME
        .probe(category)
        .map(|name| name.to_lowercase().contains(MAIN_ENTREE))
        .unwrap_or(false)
}

/// Date key of a day, from the first date alias present.
///
/// A present but unparseable date yields `None`; later aliases are not tried.
pub fn day_key<T: MenuTree>(day: &T) -> Option<String> {
    let raw = DAY_DATE.probe(day)?;
    match parse_menu_date(&raw) {
        Some(date) => Some(date_key(date)),
        None => {
            debug!("Skipping day with unparseable date '{}'", raw);
            None
        }
    }
}

/// Walk a feed document and collect main entree names per wanted date.
///
/// An entree is kept iff its session matches `meal_session`, its day's
/// date key is in `wanted`, and its category is a main entree category.
/// Missing levels contribute nothing; this never fails.
pub fn extract_entrees<T: MenuTree>(
    root: &T,
    meal_session: &str,
    wanted: &WantedDates,
) -> EntreesByDate {
    let mut out = EntreesByDate::new();

    for session in root.sessions() {
        if !session_matches(session, meal_session) {
            debug!(
                "Skipping session '{}' (wanted '{}')",
                session.field(SERVING_SESSION).unwrap_or_default(),
                meal_session
            );
            continue;
        }

        for plan in session.items(PLANS) {
            for day in plan.items(DAYS) {
                let Some(key) = day_key(day) else { continue };
                if !wanted.contains(&key) {
                    continue;
                }

                for meal in day.items(MEALS) {
                    for category in meal.items(CATEGORIES) {
                        if !is_main_entree(category) {
                            continue;
                        }

                        for recipe in category.items(RECIPES) {
                            if let Some(name) = ENTREE_NAME.probe(recipe) {
                                out.entry(key.clone()).or_default().push(name);
                            }
                        }
                    }
                }
            }
        }
    }

    out
}

/// Extract from a parsed JSON FamilyMenu document.
pub fn extract_from_json(
    document: &JsonValue,
    meal_session: &str,
    wanted: &WantedDates,
) -> EntreesByDate {
    extract_entrees(document, meal_session, wanted)
}

/// Extract from a parsed XML FamilyMenu document.
pub fn extract_from_xml(root: &XmlNode, meal_session: &str, wanted: &WantedDates) -> EntreesByDate {
    extract_entrees(root, meal_session, wanted)
}
