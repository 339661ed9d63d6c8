//! Tree adapters for the two FamilyMenu wire formats.
//!
//! - [`json`]: `serde_json::Value` objects, navigated by exact key
//! - [`xml`]: a name/text/children element tree, navigated by
//!   case-insensitive suffix match on element names

pub mod json;
pub mod xml;

pub use xml::{child_by_name, children_by_name, text, XmlNode};
