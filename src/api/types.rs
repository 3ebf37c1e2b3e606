use serde::Deserialize;

use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;
use crate::models::LeadProduct;

/// Body of a stage update response.
///
/// On success the server echoes the persisted stage along with derived
/// fields: the formatted reference numbers for the row's sibling cells,
/// a possibly auto-fulfilled status, and the lock flag.
#[derive(Debug, Clone, Deserialize)]
pub struct StageUpdate {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub enquiry_stage: Option<EnquiryStage>,
    #[serde(default)]
    pub lead_status: Option<LeadStatus>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub proforma_invoice_number: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
}

/// Body of a status update response.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

/// Body of the products-by-lead response. Only `lead_products` is consumed;
/// the endpoint also carries legacy fields this client ignores.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProductsPayload {
    #[serde(default)]
    pub lead_products: Vec<LeadProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_update_success_body() {
        let body = r#"{
            "success": true,
            "enquiry_stage": "proforma_invoice_sent",
            "stage_display": "Proforma Invoice Sent (PI Sent)",
            "lead_status": "open",
            "is_locked": false,
            "proforma_invoice_number": "PI-001",
            "invoice_number": "",
            "message": "Stage updated successfully"
        }"#;

        let update: StageUpdate = serde_json::from_str(body).unwrap();
        assert!(update.success);
        assert_eq!(update.enquiry_stage, Some(EnquiryStage::ProformaInvoiceSent));
        assert_eq!(update.proforma_invoice_number.as_deref(), Some("PI-001"));
        assert_eq!(update.invoice_number.as_deref(), Some(""));
        assert!(!update.is_locked);
    }

    #[test]
    fn test_stage_update_rejection_body() {
        let body = r#"{"success": false, "error": "Invalid stage"}"#;
        let update: StageUpdate = serde_json::from_str(body).unwrap();
        assert!(!update.success);
        assert_eq!(update.error.as_deref(), Some("Invalid stage"));
        assert!(update.enquiry_stage.is_none());
    }

    #[test]
    fn test_products_payload_ignores_legacy_fields() {
        let body = r#"{
            "products": [{"id": 1, "name": "Gloves"}],
            "categories": ["Safety"],
            "images": [],
            "lead_products": [
                {"category": "Safety", "subcategory": "Gloves", "quantity": 100, "price": 2.5}
            ]
        }"#;

        let payload: ProductsPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.lead_products.len(), 1);
        assert_eq!(payload.lead_products[0].category.as_deref(), Some("Safety"));
        assert_eq!(payload.lead_products[0].quantity, Some(100));
    }
}
