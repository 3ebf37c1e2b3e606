use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use funnel::commands::{board, products, stage, status};
use funnel::completions::{generate_completions, Shell};
use funnel::models::stage::EnquiryStage;
use funnel::models::status::LeadStatus;
use funnel::validation::{
    clap_lead_id_validator, clap_number_validator, clap_stage_validator, clap_status_validator,
};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "funnel")]
#[command(about = "Terminal client for the CRM enquiry pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (default: funnel.toml, then the
    /// user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive enquiry board
    Board {
        /// Path to the board snapshot (leads + reasons JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Update an enquiry's stage
    Stage {
        /// Lead identifier
        #[arg(value_parser = clap_lead_id_validator)]
        lead_id: u64,

        /// Target stage wire name (e.g. quotation_sent)
        #[arg(value_parser = clap_stage_validator)]
        stage: EnquiryStage,

        /// Proforma/invoice number, required for the gated stages
        #[arg(short, long, value_parser = clap_number_validator)]
        number: Option<String>,
    },

    /// Update an enquiry's status
    Status {
        /// Lead identifier
        #[arg(value_parser = clap_lead_id_validator)]
        lead_id: u64,

        /// Target status wire name (open, fulfilled, not_fulfilled)
        #[arg(value_parser = clap_status_validator)]
        status: LeadStatus,

        /// Reason id, required for not_fulfilled
        #[arg(short, long)]
        reason: Option<u64>,
    },

    /// Show the products attached to an enquiry
    Products {
        /// Lead identifier
        #[arg(value_parser = clap_lead_id_validator)]
        lead_id: u64,
    },

    /// Generate shell completions (bash, zsh, fish)
    Completions {
        /// Target shell
        shell: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Board { snapshot } => board::execute(snapshot, cli.config),
        Commands::Stage {
            lead_id,
            stage,
            number,
        } => stage::execute(lead_id, stage, number, cli.config),
        Commands::Status {
            lead_id,
            status,
            reason,
        } => status::execute(lead_id, status, reason, cli.config),
        Commands::Products { lead_id } => products::execute(lead_id, cli.config),
        Commands::Completions { shell } => {
            let shell = Shell::from_str(&shell)?;
            generate_completions(&mut Cli::command(), shell);
            Ok(())
        }
    }
}
