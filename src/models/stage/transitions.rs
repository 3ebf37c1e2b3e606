use super::types::{EnquiryStage, NumberKind, StageGate};

impl EnquiryStage {
    /// Classify how a user-requested change to this stage is gated.
    ///
    /// Gates:
    /// - `ProformaInvoiceSent` -> number prompt (proforma invoice number)
    /// - `InvoiceMade` -> number prompt (invoice number)
    /// - `InvoiceSent` -> warning dialog; the update call is never issued
    ///   for this value, the user is redirected to invoice creation instead
    /// - everything else -> direct update, no auxiliary input
    pub fn gate(&self) -> StageGate {
        match self {
            EnquiryStage::ProformaInvoiceSent => StageGate::NeedsNumber(NumberKind::Proforma),
            EnquiryStage::InvoiceMade => StageGate::NeedsNumber(NumberKind::Invoice),
            EnquiryStage::InvoiceSent => StageGate::InvoiceFirst,
            EnquiryStage::EnquiryReceived
            | EnquiryStage::QuotationSent
            | EnquiryStage::Negotiation
            | EnquiryStage::Lost => StageGate::Direct,
        }
    }

    /// The auxiliary number kind this stage requires, if any.
    pub fn required_number(&self) -> Option<NumberKind> {
        match self.gate() {
            StageGate::NeedsNumber(kind) => Some(kind),
            StageGate::Direct | StageGate::InvoiceFirst => None,
        }
    }
}
