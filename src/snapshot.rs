//! Board snapshot loading.
//!
//! The web application renders the lead list into its pages; this client
//! reads the same data from a JSON snapshot file instead. A reload (the
//! "full page reload" after a status change) re-reads the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::{Lead, Reason};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub reasons: Vec<Reason>,
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<BoardSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))
}
