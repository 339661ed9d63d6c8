//! # menufeed: school meal calendar extraction
//!
//! menufeed reads a district's FamilyMenu feed and reduces it to the main
//! entrees served on each of the next few school days.
//!
//! The feed comes in two shapes describing the same schedule, a nested JSON
//! document and a nested XML document, with field names that vary between
//! districts. Both are walked by one extraction algorithm through a small
//! tree-adapter trait, then each day's list is cleaned by a normalization
//! policy.
//!
//! ## Pipeline
//!
//! 1. [`dates::school_days`] picks the date window
//! 2. [`fetch::FamilyMenuClient`] downloads the feed
//! 3. [`document::RawDocument::parse`] detects JSON or XML
//! 4. [`extraction`] collects main entree names per wanted date
//! 5. [`normalize`] dedups and filters each day
//! 6. [`render`] / [`serialization`] present the result
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use menufeed::{build_week, NormalizationPolicy, RawDocument};
//!
//! let body = r#"{"FamilyMenuSessions": [{
//!     "ServingSession": "Lunch",
//!     "MenuPlans": [{"Days": [{
//!         "Date": "2025-10-06",
//!         "MenuMeals": [{"RecipeCategories": [{
//!             "RecipeCategoryName": "Main Entree",
//!             "Recipes": [{"RecipeName": "Cheese Pizza"}, {"RecipeName": "Tomato Soup"}]
//!         }]}]
//!     }]}]
//! }]}"#;
//!
//! let document = RawDocument::parse(body).unwrap();
//! let policy = NormalizationPolicy::new(Vec::<&str>::new(), ["soup"]);
//! let monday = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
//!
//! let week = build_week(&document, "Lunch", &[monday], &policy);
//! assert_eq!(week.days[0].entrees, vec!["Cheese Pizza"]);
//! ```

// Core modules
pub mod error;
pub mod dates;
pub mod extraction;
pub mod tree;
pub mod normalize;
pub mod document;

// Around the core
pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod render;
pub mod serialization;

// Re-export key types
pub use error::{FeedError, Result};
pub use dates::{date_key, parse_menu_date, school_days, WantedDates};
pub use extraction::{extract_from_json, extract_from_xml, EntreesByDate, MenuTree};
pub use tree::XmlNode;
pub use normalize::{normalize_day, normalize_day_report, NormalizationPolicy};
pub use document::RawDocument;
pub use config::FeedConfig;
pub use fetch::{FamilyMenuClient, FetchedMenu};
pub use pipeline::{build_week, DayMenu, WeekMenu};
pub use render::{render_text, OutputFormat, RenderOptions};
