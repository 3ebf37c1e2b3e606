use anyhow::{bail, Result};
use std::str::FromStr;

use super::types::{EnquiryStage, NumberKind};

/// All stages in pipeline order. `Lost` comes last; it is reachable from
/// anywhere but never advanced through.
pub const ALL_STAGES: [EnquiryStage; 7] = [
    EnquiryStage::EnquiryReceived,
    EnquiryStage::QuotationSent,
    EnquiryStage::Negotiation,
    EnquiryStage::ProformaInvoiceSent,
    EnquiryStage::InvoiceMade,
    EnquiryStage::InvoiceSent,
    EnquiryStage::Lost,
];

impl EnquiryStage {
    /// Wire value used in form bodies and JSON responses.
    pub fn wire_name(&self) -> &'static str {
        match self {
            EnquiryStage::EnquiryReceived => "enquiry_received",
            EnquiryStage::QuotationSent => "quotation_sent",
            EnquiryStage::Negotiation => "negotiation",
            EnquiryStage::ProformaInvoiceSent => "proforma_invoice_sent",
            EnquiryStage::InvoiceMade => "invoice_made",
            EnquiryStage::InvoiceSent => "invoice_sent",
            EnquiryStage::Lost => "lost",
        }
    }

    /// Position in the pipeline ordering (Lost sorts after everything).
    pub fn position(&self) -> usize {
        ALL_STAGES
            .iter()
            .position(|s| s == self)
            .expect("stage present in ALL_STAGES")
    }

    /// True for the stage after which no further edits are permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EnquiryStage::InvoiceSent)
    }
}

impl FromStr for EnquiryStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enquiry_received" => Ok(EnquiryStage::EnquiryReceived),
            "quotation_sent" => Ok(EnquiryStage::QuotationSent),
            "negotiation" => Ok(EnquiryStage::Negotiation),
            "proforma_invoice_sent" => Ok(EnquiryStage::ProformaInvoiceSent),
            "invoice_made" => Ok(EnquiryStage::InvoiceMade),
            "invoice_sent" => Ok(EnquiryStage::InvoiceSent),
            "lost" => Ok(EnquiryStage::Lost),
            _ => bail!(
                "Unknown enquiry stage: {s}. Expected one of: {}",
                ALL_STAGES
                    .iter()
                    .map(|st| st.wire_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl NumberKind {
    /// Form field the captured number travels in.
    pub fn form_field(&self) -> &'static str {
        match self {
            NumberKind::Proforma => "proforma_invoice_number",
            NumberKind::Invoice => "invoice_number",
        }
    }

    /// Prompt chrome for the number-entry dialog.
    pub fn prompt_title(&self) -> &'static str {
        match self {
            NumberKind::Proforma => "Proforma Invoice",
            NumberKind::Invoice => "Invoice",
        }
    }

    pub fn prompt_label(&self) -> &'static str {
        match self {
            NumberKind::Proforma => "Enter Proforma Invoice Number",
            NumberKind::Invoice => "Enter Invoice Number",
        }
    }

    pub fn prompt_help(&self) -> &'static str {
        match self {
            NumberKind::Proforma => "Please enter the Proforma Invoice number",
            NumberKind::Invoice => "Please enter the Invoice number",
        }
    }
}
