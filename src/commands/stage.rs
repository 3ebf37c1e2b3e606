//! Non-interactive stage update.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::api::{HttpApi, LeadApi};
use crate::config;
use crate::controller::transition::INVOICE_FIRST_NOTICE;
use crate::models::stage::{EnquiryStage, StageGate};

/// Update a lead's stage from the command line, applying the same gating
/// rules as the board: gated stages require their number up front, and the
/// terminal stage is refused with the invoice-first guidance.
pub fn execute(
    lead_id: u64,
    stage: EnquiryStage,
    number: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match stage.gate() {
        StageGate::InvoiceFirst => {
            bail!("{INVOICE_FIRST_NOTICE}");
        }
        StageGate::NeedsNumber(kind) => {
            let has_number = number.as_deref().map(str::trim).is_some_and(|n| !n.is_empty());
            if !has_number {
                bail!(
                    "{} requires --number <{}>",
                    stage,
                    kind.form_field().replace('_', "-")
                );
            }
        }
        StageGate::Direct => {
            if number.is_some() {
                bail!("{stage} does not take a number");
            }
        }
    }

    let config = config::load_config(config_path.as_deref())?;
    let api = HttpApi::from_config(&config).context("Failed to build HTTP client")?;

    let update = api.update_stage(lead_id, stage, number.as_deref().map(str::trim))?;

    let message = update
        .message
        .unwrap_or_else(|| "Stage updated successfully".to_string());
    println!("{} {message}", "\u{2713}".green().bold());
    println!("Lead {lead_id} \u{2192} {stage}");
    if let Some(pi) = update.proforma_invoice_number.filter(|s| !s.is_empty()) {
        println!("  PI number:      {pi}");
    }
    if let Some(inv) = update.invoice_number.filter(|s| !s.is_empty()) {
        println!("  Invoice number: {inv}");
    }
    if update.is_locked {
        println!(
            "{}",
            "This enquiry is now locked; no further stage or status edits.".yellow()
        );
    }
    Ok(())
}
