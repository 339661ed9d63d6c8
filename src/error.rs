//! Error type shared by the fetch, document and configuration layers.
//!
//! The extraction and normalization core is total: missing fields and
//! unparseable dates skip a branch instead of producing an error. Everything
//! here happens before extraction (reading config, fetching, detecting the
//! document format) or after it (writing output).

use std::fmt;

/// Error type for feed operations
#[derive(Debug)]
pub enum FeedError {
    Config(String),
    Yaml(String),
    Http(String),
    MalformedDocument(String),
    Xml(String),
    Serialization(String),
    Io(std::io::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Config(msg) => write!(f, "Configuration error: {}", msg),
            FeedError::Yaml(msg) => write!(f, "Failed to parse YAML: {}", msg),
            FeedError::Http(msg) => write!(f, "FamilyMenu request failed: {}", msg),
            FeedError::MalformedDocument(msg) => {
                write!(f, "Unexpected response format (not JSON/XML): {}", msg)
            }
            FeedError::Xml(msg) => write!(f, "XML parse error: {}", msg),
            FeedError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            FeedError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for FeedError {
    fn from(err: serde_yaml::Error) -> Self {
        FeedError::Yaml(err.to_string())
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
