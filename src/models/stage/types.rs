use serde::{Deserialize, Serialize};

/// Pipeline position of an enquiry.
///
/// Stages are ordered: an enquiry normally moves from `EnquiryReceived`
/// towards `InvoiceSent`. `InvoiceSent` is the terminal stage — once the
/// server reports it, the enquiry is locked and no further stage or status
/// edits are accepted from this client. `Lost` sits outside the ordering and
/// can be selected at any point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStage {
    /// Initial stage for a freshly captured enquiry.
    EnquiryReceived,

    /// A quotation has been sent to the contact.
    QuotationSent,

    /// Commercial terms are being negotiated.
    Negotiation,

    /// Proforma invoice issued; requires a proforma invoice number.
    ProformaInvoiceSent,

    /// Final invoice prepared; requires an invoice number.
    InvoiceMade,

    /// Invoice dispatched. Terminal: the enquiry is locked after this.
    /// Never set directly by this client — only ever observed from the
    /// server and then enforced.
    InvoiceSent,

    /// Enquiry was lost.
    Lost,
}

/// Kind of auxiliary number a gated stage change must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Proforma,
    Invoice,
}

/// How a user-requested stage change is gated before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageGate {
    /// Update immediately, no auxiliary input.
    Direct,

    /// Prompt for an auxiliary number first; no call until confirmed.
    NeedsNumber(NumberKind),

    /// Never updated directly: warn and redirect to invoice creation.
    InvoiceFirst,
}

impl std::fmt::Display for EnquiryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnquiryStage::EnquiryReceived => write!(f, "Enquiry Received"),
            EnquiryStage::QuotationSent => write!(f, "Quotation Sent"),
            EnquiryStage::Negotiation => write!(f, "Negotiation"),
            EnquiryStage::ProformaInvoiceSent => write!(f, "Proforma Invoice Sent"),
            EnquiryStage::InvoiceMade => write!(f, "Invoice Made"),
            EnquiryStage::InvoiceSent => write!(f, "Invoice Sent"),
            EnquiryStage::Lost => write!(f, "Lost"),
        }
    }
}
