use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::SourceKind;
use crate::report::DATE_FORMAT;

/// Audit bank and payment-service exports against a Coda ledger, day by day.
#[derive(Parser, Debug)]
pub struct Args {
    /// Name of the configuration file, the extension is optional
    #[clap(long, global = true, default_value = "config")]
    pub config: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that every transaction of an export is recorded in the ledger
    Audit {
        /// Path to the CSV export
        #[clap(long)]
        filepath: PathBuf,

        /// Format of the CSV export
        #[clap(long, value_enum, ignore_case = true)]
        source: SourceKind,

        /// Name of the ledger account the export belongs to
        #[clap(long)]
        account: String,

        /// First audited date, as mm-dd-yy
        #[clap(long, value_parser = parse_date)]
        start_date: NaiveDate,

        /// Last audited date, as mm-dd-yy
        #[clap(long, value_parser = parse_date)]
        end_date: NaiveDate,
    },

    /// List all accounts of the ledger
    ListAccounts,

    /// Print the transactions of a CSV export without contacting the ledger
    ShowTransactions {
        /// Path to the CSV export
        #[clap(long)]
        filepath: PathBuf,

        /// Format of the CSV export
        #[clap(long, value_enum, ignore_case = true)]
        source: SourceKind,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| format!("expected a date like 03-31-21: {err}"))
}

pub fn parse() -> Args {
    Args::parse()
}
