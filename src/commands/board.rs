//! Launch the interactive board.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::api::HttpApi;
use crate::config;
use crate::controller::{lock, LeadBoard, TransitionController};
use crate::snapshot;
use crate::ui::BoardApp;

/// Default snapshot path when neither the CLI nor the config names one.
const DEFAULT_SNAPSHOT: &str = "leads.json";

pub fn execute(snapshot_arg: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load_config(config_path.as_deref())?;

    let snapshot_path = snapshot_arg
        .or_else(|| config.snapshot.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT));
    if !snapshot_path.exists() {
        bail!(
            "Snapshot file not found: {}. Export the lead list from the web \
             application or pass --snapshot.",
            snapshot_path.display()
        );
    }

    let snap = snapshot::load_snapshot(&snapshot_path)?;
    let mut board = LeadBoard::from_snapshot(&snap);
    lock::scan_on_load(&mut board);

    let api = HttpApi::from_config(&config).context("Failed to build HTTP client")?;
    let invoice_add_url = api.endpoints().invoice_add_base();
    let controller = TransitionController::new(api, invoice_add_url);

    let mut app = BoardApp::new(board, controller, snapshot_path)?;
    app.run()
}
