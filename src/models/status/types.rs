use serde::{Deserialize, Serialize};

/// Fulfilment outcome of an enquiry.
///
/// `NotFulfilled` carries a reason server-side; selecting it in the UI
/// always routes through the reason prompt before any update is sent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// No outcome recorded yet.
    Open,

    /// Enquiry converted.
    Fulfilled,

    /// Enquiry closed without conversion; requires a reason.
    NotFulfilled,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::Open => write!(f, "Open"),
            LeadStatus::Fulfilled => write!(f, "Fulfilled"),
            LeadStatus::NotFulfilled => write!(f, "Not Fulfilled"),
        }
    }
}
