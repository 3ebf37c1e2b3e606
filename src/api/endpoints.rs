//! Endpoint URL construction.
//!
//! The host configuration supplies URL templates keyed by operation, each
//! containing a `{lead}` placeholder segment substituted with the record
//! identifier before every call.

use crate::config::{Config, Endpoints, LEAD_PLACEHOLDER};

/// Append `lead=<id>` to a URL, honoring an existing query string.
pub fn append_lead_query(url: &str, lead_id: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}lead={lead_id}")
}

/// Resolves operation templates against a base URL.
#[derive(Debug, Clone)]
pub struct EndpointMap {
    base_url: String,
    urls: Endpoints,
}

impl EndpointMap {
    pub fn new(base_url: impl Into<String>, urls: Endpoints) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, urls }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.urls.clone())
    }

    pub fn update_stage(&self, lead_id: u64) -> String {
        self.fill(&self.urls.update_stage, lead_id)
    }

    pub fn update_status(&self, lead_id: u64) -> String {
        self.fill(&self.urls.update_status, lead_id)
    }

    pub fn lead_products(&self, lead_id: u64) -> String {
        self.fill(&self.urls.lead_products, lead_id)
    }

    /// Invoice-creation view URL without the lead query parameter.
    pub fn invoice_add_base(&self) -> String {
        self.absolute(&self.urls.invoice_add)
    }

    /// Invoice-creation view URL with the lead carried as a query
    /// parameter, honoring any query string already present.
    pub fn invoice_add(&self, lead_id: u64) -> String {
        append_lead_query(&self.invoice_add_base(), lead_id)
    }

    fn fill(&self, template: &str, lead_id: u64) -> String {
        self.absolute(&template.replace(LEAD_PLACEHOLDER, &lead_id.to_string()))
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
