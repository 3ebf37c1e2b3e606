use serde::{Deserialize, Serialize};

/// One product line attached to an enquiry.
///
/// Read-only fragment data: fetched from the products endpoint and rendered
/// verbatim. Every field is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadProduct {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl LeadProduct {
    /// Short label for list rendering: category/subcategory, or the
    /// description when no category is present.
    pub fn label(&self) -> String {
        match (&self.category, &self.subcategory) {
            (Some(cat), Some(sub)) => format!("{cat} / {sub}"),
            (Some(cat), None) => cat.clone(),
            (None, _) => self
                .description
                .clone()
                .unwrap_or_else(|| "(unspecified)".to_string()),
        }
    }
}
