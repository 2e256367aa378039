mod commands;
mod config;
mod dto;
mod errors;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use defold_market::{Address, DataId, SqliteLedger, Wei};
use log::{debug, info};
use serde::Serialize;

use crate::commands::{file, market};
use crate::config::AppConfig;
use crate::errors::CliError;

#[derive(Debug, Parser)]
#[command(version, about = "Parse FASTA uploads and trade genomic data on a local ledger", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ledger database file (overrides the configured one)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a FASTA file and print its records
    Parse { file: PathBuf },

    /// Print nucleotide statistics for each record of a FASTA file
    Stats { file: PathBuf },

    /// Submit every record of a FASTA file to the ledger
    Submit {
        file: PathBuf,
        /// Title shared by all submitted records
        #[arg(short, long)]
        title: String,
        /// Submitting account
        #[arg(long)]
        from: Address,
    },

    /// Buy access to a dataset
    Purchase {
        data_id: DataId,
        /// Payment in ether, e.g. 0.05
        #[arg(long, value_parser = Wei::from_ether)]
        payment: Wei,
        #[arg(long)]
        from: Address,
    },

    /// Nucleotide counts of a dataset you own or bought
    Counts {
        data_id: DataId,
        #[arg(long)]
        from: Address,
    },

    /// Number of G and C bases in a dataset you own or bought
    Gc {
        data_id: DataId,
        #[arg(long)]
        from: Address,
    },

    /// Number of matching aligned bases between two datasets
    Homology {
        first: DataId,
        second: DataId,
        #[arg(long)]
        from: Address,
    },

    /// Rate a researcher from 1 to 5
    Rate {
        researcher: Address,
        rating: u8,
        #[arg(long)]
        from: Address,
    },

    /// Average rating of a researcher
    Rating { researcher: Address },

    /// Listing information for a dataset
    Info { data_id: DataId },

    /// List all datasets
    List,

    /// Emitted events, oldest first
    Events,

    /// Add the mock datasets to the ledger
    Seed,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), CliError> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    debug!("using {:?}", config);

    // File-only commands never touch the ledger
    match &cli.command {
        Commands::Parse { file } => return print_json(&file::open_fasta_file(file)?),
        Commands::Stats { file } => return print_json(&file::record_stats(file)?),
        _ => {}
    }

    let db_path = cli.db.unwrap_or_else(|| config.database.clone());
    let mut ledger = SqliteLedger::open(&db_path)?;
    info!("ledger: {}", db_path.display());

    match cli.command {
        Commands::Parse { .. } | Commands::Stats { .. } => Ok(()),
        Commands::Submit { file, title, from } => {
            let outcome = market::submit_file(
                &mut ledger,
                from,
                config.submission_config()?,
                &file,
                &title,
            )?;
            print_json(&outcome)
        }
        Commands::Purchase {
            data_id,
            payment,
            from,
        } => print_json(&market::purchase(&mut ledger, &from, data_id, payment)?),
        Commands::Counts { data_id, from } => {
            print_json(&market::nucleotide_counts(&ledger, &from, data_id)?)
        }
        Commands::Gc { data_id, from } => {
            print_json(&market::gc_base_pairs(&ledger, &from, data_id)?)
        }
        Commands::Homology {
            first,
            second,
            from,
        } => print_json(&market::homologous_base_pairs(
            &ledger, &from, first, second,
        )?),
        Commands::Rate {
            researcher,
            rating,
            from,
        } => print_json(&market::rate(&mut ledger, &from, &researcher, rating)?),
        Commands::Rating { researcher } => {
            print_json(&market::researcher_rating(&ledger, &researcher)?)
        }
        Commands::Info { data_id } => print_json(&market::info(&ledger, data_id)?),
        Commands::List => print_json(&market::list(&ledger)?),
        Commands::Events => print_json(&market::events(&ledger)?),
        Commands::Seed => print_json(&ledger.seed_mock_data()?),
    }
}
