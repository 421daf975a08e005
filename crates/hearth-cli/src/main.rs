//! Hearth CLI - Family finance tracking and budget analysis
//!
//! Usage:
//!   hearth init                      Initialize database
//!   hearth import --file CSV         Import a transaction statement
//!   hearth budget select most_popular 4000
//!   hearth budget analyze            Run the monthly analysis
//!   hearth serve --port 3000         Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db_path = commands::resolve_db_path(cli.db.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path, cli.no_encrypt),
        Commands::Import { file } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_import(&db, &cli.user, &file)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                &db_path,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
            )
            .await
        }
        Commands::Status => commands::cmd_status(&db_path, &cli.user, cli.no_encrypt),
        Commands::Transactions { action } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, &cli.user, 20),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, &cli.user, limit)
                }
                Some(TransactionsAction::Add {
                    date,
                    description,
                    amount,
                    category,
                    income,
                }) => commands::cmd_transactions_add(
                    &db,
                    &cli.user,
                    date.as_deref(),
                    &description,
                    amount,
                    category.as_deref(),
                    income,
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Bills { action } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            match action {
                None | Some(BillsAction::List) => commands::cmd_bills_list(&db, &cli.user),
                Some(BillsAction::Add {
                    name,
                    amount,
                    due_day,
                    category,
                }) => commands::cmd_bills_add(
                    &db,
                    &cli.user,
                    &name,
                    amount,
                    due_day,
                    category.as_deref(),
                ),
                Some(BillsAction::Deactivate { id }) => commands::cmd_bills_set_active(&db, id, false),
                Some(BillsAction::Activate { id }) => commands::cmd_bills_set_active(&db, id, true),
                Some(BillsAction::Delete { id }) => commands::cmd_bills_delete(&db, id),
            }
        }
        Commands::Loans { action } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            match action {
                None | Some(LoansAction::List) => commands::cmd_loans_list(&db, &cli.user),
                Some(LoansAction::Add {
                    name,
                    principal,
                    emi,
                    due_day,
                    lender,
                }) => commands::cmd_loans_add(
                    &db,
                    &cli.user,
                    &name,
                    principal,
                    emi,
                    due_day,
                    lender.as_deref(),
                ),
                Some(LoansAction::Close { id }) => commands::cmd_loans_close(&db, id),
                Some(LoansAction::Delete { id }) => commands::cmd_loans_delete(&db, id),
            }
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            match action {
                BudgetAction::Plans => commands::cmd_budget_plans(),
                BudgetAction::Select { plan, income } => {
                    commands::cmd_budget_select(&db, &cli.user, &plan, income)
                }
                BudgetAction::Show => commands::cmd_budget_show(&db, &cli.user),
                BudgetAction::Delete => commands::cmd_budget_delete(&db, &cli.user),
                BudgetAction::Analyze { json } => {
                    commands::cmd_budget_analyze(&db, &cli.user, json)
                }
            }
        }
    }
}
