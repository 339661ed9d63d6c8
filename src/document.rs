//! Raw FamilyMenu responses and format detection.
//!
//! The endpoint is asked for JSON but frequently answers with XML, so the
//! body is tried as JSON first and parsed as XML when that fails.

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::dates::WantedDates;
use crate::error::{FeedError, Result};
use crate::extraction::{extract_from_json, extract_from_xml, EntreesByDate};
use crate::tree::XmlNode;

/// A parsed feed document in whichever format the server sent.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    Json(JsonValue),
    Xml(XmlNode),
}

impl RawDocument {
    /// Detect and parse a response body.
    ///
    /// JSON is accepted only when it is a non-empty object; anything else
    /// falls through to XML.
    ///
    /// # Errors
    /// `FeedError::MalformedDocument` when the body is neither.
    pub fn parse(raw: &str) -> Result<Self> {
        let body = raw.trim_start_matches('\u{feff}').trim();

        match serde_json::from_str::<JsonValue>(body) {
            Ok(JsonValue::Object(map)) if !map.is_empty() => {
                return Ok(RawDocument::Json(JsonValue::Object(map)));
            }
            Ok(_) => debug!("JSON body is not a non-empty object, trying XML"),
            Err(e) => debug!("Body is not JSON ({}), trying XML", e),
        }

        XmlNode::parse(body)
            .map(RawDocument::Xml)
            .map_err(|e| FeedError::MalformedDocument(e.to_string()))
    }

    pub fn format(&self) -> &'static str {
        match self {
            RawDocument::Json(_) => "json",
            RawDocument::Xml(_) => "xml",
        }
    }

    /// Format-dispatched extraction.
    pub fn extract(&self, meal_session: &str, wanted: &WantedDates) -> EntreesByDate {
        match self {
            RawDocument::Json(value) => extract_from_json(value, meal_session, wanted),
            RawDocument::Xml(root) => extract_from_xml(root, meal_session, wanted),
        }
    }
}
