//! Print the product lines attached to a lead.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::api::{HttpApi, LeadApi};
use crate::config;
use crate::utils::truncate;

const DESCRIPTION_WIDTH: usize = 40;

pub fn execute(lead_id: u64, config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load_config(config_path.as_deref())?;
    let api = HttpApi::from_config(&config).context("Failed to build HTTP client")?;

    let products = api.lead_products(lead_id)?;

    if products.is_empty() {
        println!("No products recorded for lead {lead_id}");
        return Ok(());
    }

    println!("{}", format!("Products for lead {lead_id}").bold());
    for product in &products {
        let qty = product
            .quantity
            .map_or("-".to_string(), |q| q.to_string());
        let price = product.price.map_or("-".to_string(), |p| format!("{p:.2}"));
        println!(
            "  {} {}  qty {}  price {}",
            "\u{2022}".cyan(),
            product.label().bold(),
            qty,
            price
        );
        if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", truncate(description, DESCRIPTION_WIDTH).dimmed());
        }
    }
    Ok(())
}
