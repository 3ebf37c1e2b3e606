//! Input validation for CLI arguments.
//!
//! Values are validated before any network call; a rejected value never
//! reaches the server.

use anyhow::{bail, Result};
use std::str::FromStr;

use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;

/// Maximum length for invoice/proforma numbers (matches the server field).
pub const MAX_NUMBER_LENGTH: usize = 100;

/// Validate an auxiliary invoice/proforma number.
///
/// A number is valid if its trimmed form is non-empty, within the server's
/// field length and free of control characters.
pub fn validate_number(number: &str) -> Result<()> {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        bail!("Number cannot be empty");
    }
    if trimmed.len() > MAX_NUMBER_LENGTH {
        bail!(
            "Number too long: {} characters (max {})",
            trimmed.len(),
            MAX_NUMBER_LENGTH
        );
    }
    if trimmed.chars().any(char::is_control) {
        bail!("Number contains control characters");
    }
    Ok(())
}

/// Clap value parser for lead identifiers.
///
/// # Example
///
/// ```ignore
/// #[arg(value_parser = clap_lead_id_validator)]
/// lead_id: u64,
/// ```
pub fn clap_lead_id_validator(s: &str) -> Result<u64, String> {
    let id: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid lead id (expected a positive integer)"))?;
    if id == 0 {
        return Err("Lead id must be positive".to_string());
    }
    Ok(id)
}

/// Clap value parser for invoice/proforma numbers.
pub fn clap_number_validator(s: &str) -> Result<String, String> {
    validate_number(s).map_err(|e| e.to_string())?;
    Ok(s.trim().to_string())
}

/// Clap value parser for enquiry stages (wire names).
pub fn clap_stage_validator(s: &str) -> Result<EnquiryStage, String> {
    EnquiryStage::from_str(s).map_err(|e| e.to_string())
}

/// Clap value parser for lead statuses (wire names).
pub fn clap_status_validator(s: &str) -> Result<LeadStatus, String> {
    LeadStatus::from_str(s).map_err(|e| e.to_string())
}
