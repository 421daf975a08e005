//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hearth - Family finance tracking and budget analysis
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Self-hosted family finance and budget analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Family member the command acts for
    #[arg(long, default_value = "local", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set HEARTH_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Import transactions from a statement CSV
    Import {
        /// CSV file to import (date,description,category,expense_type,kind,amount)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an API key from HEARTH_API_KEYS.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show database status (encryption, record counts)
    Status,

    /// Manage transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage scheduled bills
    Bills {
        #[command(subcommand)]
        action: Option<BillsAction>,
    },

    /// Manage loans
    Loans {
        #[command(subcommand)]
        action: Option<LoansAction>,
    },

    /// Budget plans and monthly analysis
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
    /// Record a transaction
    Add {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Description
        description: String,

        /// Amount
        amount: f64,

        /// Category (e.g. rent, groceries, dining out)
        #[arg(short, long)]
        category: Option<String>,

        /// Income instead of expense
        #[arg(long)]
        income: bool,
    },
    /// Delete a transaction
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum BillsAction {
    /// List scheduled bills
    List,
    /// Add a scheduled bill
    Add {
        /// Bill name
        name: String,

        /// Monthly amount
        amount: f64,

        /// Day of month the bill is due (1-31)
        #[arg(long, default_value = "1")]
        due_day: u32,

        /// Category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Deactivate a bill (kept, but excluded from analysis)
    Deactivate { id: i64 },
    /// Reactivate a bill
    Activate { id: i64 },
    /// Delete a bill
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum LoansAction {
    /// List loans
    List,
    /// Record a loan
    Add {
        /// Loan name
        name: String,

        /// Outstanding principal
        principal: f64,

        /// Monthly installment (EMI)
        emi: f64,

        /// Day of month the EMI is due (1-31)
        #[arg(long, default_value = "1")]
        due_day: u32,

        /// Lender name
        #[arg(short, long)]
        lender: Option<String>,
    },
    /// Mark a loan fully repaid
    Close { id: i64 },
    /// Delete a loan
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// List the available allocation plans
    Plans,
    /// Select a plan for the current user
    Select {
        /// Plan identifier (bare_minimum, most_popular, standard, stable, good)
        plan: String,

        /// Monthly income the percentages apply to
        income: f64,
    },
    /// Show the current user's selected plan
    Show,
    /// Delete the current user's plan
    Delete,
    /// Run the monthly budget analysis
    Analyze {
        /// Emit the full report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}
