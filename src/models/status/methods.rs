use anyhow::{bail, Result};
use std::str::FromStr;

use super::types::LeadStatus;

/// All statuses, in display order.
pub const ALL_STATUSES: [LeadStatus; 3] = [
    LeadStatus::Open,
    LeadStatus::Fulfilled,
    LeadStatus::NotFulfilled,
];

impl LeadStatus {
    /// Wire value used in form bodies and JSON responses.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LeadStatus::Open => "open",
            LeadStatus::Fulfilled => "fulfilled",
            LeadStatus::NotFulfilled => "not_fulfilled",
        }
    }

    /// True when selecting this status must first collect a reason.
    pub fn requires_reason(&self) -> bool {
        matches!(self, LeadStatus::NotFulfilled)
    }
}

impl FromStr for LeadStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(LeadStatus::Open),
            "fulfilled" => Ok(LeadStatus::Fulfilled),
            "not_fulfilled" => Ok(LeadStatus::NotFulfilled),
            _ => bail!("Unknown lead status: {s}. Expected 'open', 'fulfilled' or 'not_fulfilled'"),
        }
    }
}
