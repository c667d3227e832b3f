//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::reconcile::Mode;

#[derive(Parser)]
#[command(
    name = "jobmaster-cli",
    about = "Master-data management for organizational job records",
    version
)]
pub struct Cli {
    /// SQLite database path (default: JOBMASTER_DB or the platform data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered record types and their columns
    Types,

    /// Write an empty upload template for a record type
    Template {
        record_type: String,
        /// Output file
        #[arg(short, long, default_value = "template.xlsx")]
        out: String,
    },

    /// Export stored records of a type to a spreadsheet
    Export {
        record_type: String,
        /// Output file
        #[arg(short, long, default_value = "export.xlsx")]
        out: String,
    },

    /// Preview conflicts between an upload and stored records
    Check {
        record_type: String,
        /// Upload workbook (.xlsx); only the first sheet is read
        file: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import an upload, merging or replacing stored records
    Import {
        record_type: String,
        /// Upload workbook (.xlsx); only the first sheet is read
        file: PathBuf,
        /// Reconciliation policy
        #[arg(long, value_enum)]
        mode: Mode,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Remove the upload file when the run finishes
        #[arg(long)]
        temp: bool,
    },
}
