//! The lead board: one row per visible record, each with its stage and
//! status control bindings plus the sibling display cells the stage update
//! response writes into.

use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;
use crate::models::Reason;
use crate::snapshot::BoardSnapshot;

use super::binding::ControlBinding;

#[derive(Debug, Clone)]
pub struct LeadRow {
    pub lead_id: u64,
    pub contact_name: String,
    pub company_name: String,
    pub stage: ControlBinding<EnquiryStage>,
    pub status: ControlBinding<LeadStatus>,
    /// Sibling display cell for the proforma invoice number.
    pub pi_number: Option<String>,
    /// Sibling display cell for the invoice number.
    pub invoice_number: Option<String>,
    /// Row-level lock marker (dimmed card, accent border, badge).
    pub locked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LeadBoard {
    rows: Vec<LeadRow>,
    pub reasons: Vec<Reason>,
}

impl LeadBoard {
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        let rows = snapshot
            .leads
            .iter()
            .map(|lead| LeadRow {
                lead_id: lead.id,
                contact_name: lead.contact_name.clone(),
                company_name: lead.company_name.clone(),
                stage: ControlBinding::new(lead.enquiry_stage),
                status: ControlBinding::new(lead.lead_status),
                pi_number: lead.proforma_invoice_number.clone().filter(|s| !s.is_empty()),
                invoice_number: lead.invoice_number.clone().filter(|s| !s.is_empty()),
                locked: false,
            })
            .collect();

        Self {
            rows,
            reasons: snapshot.reasons.clone(),
        }
    }

    pub fn rows(&self) -> &[LeadRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [LeadRow] {
        &mut self.rows
    }

    pub fn row(&self, lead_id: u64) -> Option<&LeadRow> {
        self.rows.iter().find(|r| r.lead_id == lead_id)
    }

    pub fn row_mut(&mut self, lead_id: u64) -> Option<&mut LeadRow> {
        self.rows.iter_mut().find(|r| r.lead_id == lead_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn locked_count(&self) -> usize {
        self.rows.iter().filter(|r| r.locked).count()
    }
}
