use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;

/// Client-held mirror of a lead record.
///
/// The server owns the record; this struct is what the board snapshot
/// carries for each visible row. Stage and status are mirrored into the
/// row's control bindings when the board is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: u64,
    pub contact_name: String,
    #[serde(default)]
    pub company_name: String,
    pub enquiry_stage: EnquiryStage,
    pub lead_status: LeadStatus,
    #[serde(default)]
    pub proforma_invoice_number: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
