//! Server interface: the `LeadApi` seam plus the blocking HTTP
//! implementation behind it.
//!
//! The transition controller talks to the server exclusively through
//! [`LeadApi`], so tests swap in a scripted implementation while the
//! application wires up [`HttpApi`].

mod client;
mod endpoints;
mod error;
mod types;

pub use client::HttpApi;
pub use endpoints::{append_lead_query, EndpointMap};
pub use error::ApiError;
pub use types::{ProductsPayload, StageUpdate, StatusUpdate};

use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;
use crate::models::LeadProduct;

/// Operations the transition controller performs against the server.
///
/// A `success: false` body is mapped to `ApiError::Rejected` by the
/// implementation, so `Ok` always carries a successful update.
pub trait LeadApi {
    /// Update an enquiry's stage, optionally carrying an auxiliary number
    /// for the gated stages.
    fn update_stage(
        &self,
        lead_id: u64,
        stage: EnquiryStage,
        number: Option<&str>,
    ) -> Result<StageUpdate, ApiError>;

    /// Update an enquiry's status, with a reason id for `not_fulfilled`.
    fn update_status(
        &self,
        lead_id: u64,
        status: LeadStatus,
        reason_id: Option<u64>,
    ) -> Result<StatusUpdate, ApiError>;

    /// Fetch the product lines attached to an enquiry.
    fn lead_products(&self, lead_id: u64) -> Result<Vec<LeadProduct>, ApiError>;
}
