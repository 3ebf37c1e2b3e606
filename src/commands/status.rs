//! Non-interactive status update.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::api::{HttpApi, LeadApi};
use crate::config;
use crate::models::status::LeadStatus;

/// Update a lead's status from the command line. `not_fulfilled` requires
/// a reason id, exactly like the board's reason prompt.
pub fn execute(
    lead_id: u64,
    status: LeadStatus,
    reason_id: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if status.requires_reason() && reason_id.is_none() {
        bail!("Please select a reason: {} requires --reason <id>", status);
    }
    if !status.requires_reason() && reason_id.is_some() {
        bail!("--reason only applies to not_fulfilled");
    }

    let config = config::load_config(config_path.as_deref())?;
    let api = HttpApi::from_config(&config).context("Failed to build HTTP client")?;

    let update = api.update_status(lead_id, status, reason_id)?;

    let message = update
        .message
        .unwrap_or_else(|| "Status updated successfully".to_string());
    println!("{} {message}", "\u{2713}".green().bold());
    println!("Lead {lead_id} \u{2192} {status}");
    Ok(())
}
