//! HTTP client for the FamilyMenu endpoint.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use reqwest::Url;

use crate::config::FeedConfig;
use crate::dates::api_date;
use crate::document::RawDocument;
use crate::error::{FeedError, Result};

/// The endpoint often ignores the JSON preference, hence the XML entries.
pub const ACCEPT_HEADER: &str = "application/json, text/xml, application/xml;q=0.9, */*;q=0.8";

/// Response body plus its parsed form.
#[derive(Debug, Clone)]
pub struct FetchedMenu {
    pub raw: String,
    pub document: RawDocument,
}

#[derive(Debug, Clone)]
pub struct FamilyMenuClient {
    http: reqwest::Client,
    base_url: String,
    building_id: String,
    district_id: String,
}

fn required(value: &Option<String>, field: &str, env: &str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FeedError::Config(format!("{} is not set (config file or {})", field, env)))
}

impl FamilyMenuClient {
    /// # Errors
    /// `FeedError::Config` when the building or district id is missing.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let building_id = required(&config.building_id, "building_id", crate::config::ENV_BUILDING_ID)?;
        let district_id = required(&config.district_id, "district_id", crate::config::ENV_DISTRICT_ID)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            building_id,
            district_id,
        })
    }

    fn query(&self, start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 4] {
        [
            ("buildingId", self.building_id.clone()),
            ("districtId", self.district_id.clone()),
            ("startDate", api_date(start)),
            ("endDate", api_date(end)),
        ]
    }

    /// Full request URL for a date range, also useful as a link to the menu.
    pub fn request_url(&self, start: NaiveDate, end: NaiveDate) -> Result<String> {
        Url::parse_with_params(&self.base_url, self.query(start, end))
            .map(String::from)
            .map_err(|e| FeedError::Config(format!("Invalid base_url '{}': {}", self.base_url, e)))
    }

    /// Fetch the menu for `start..=end` and detect its format.
    ///
    /// # Errors
    /// `FeedError::Http` on transport failures or non-success status,
    /// `FeedError::MalformedDocument` when the body is neither JSON nor XML.
    pub async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<FetchedMenu> {
        tracing::info!(
            "Fetching FamilyMenu {} to {} (building {})",
            api_date(start),
            api_date(end),
            self.building_id
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&self.query(start, end)[..])
            .header(ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Http(format!("{}\n{}", status, body)));
        }

        let raw = response.text().await?;
        let document = RawDocument::parse(&raw)?;

        tracing::info!("Received {} bytes of {}", raw.len(), document.format());

        Ok(FetchedMenu { raw, document })
    }
}
