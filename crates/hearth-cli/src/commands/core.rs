//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `resolve_db_path` / `open_db` - Shared utilities to locate and open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hearth_core::db::Database;

/// Resolve the database path: explicit flag, else the platform data directory
pub fn resolve_db_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    let data_dir = dirs::data_local_dir()
        .context("Could not determine the platform data directory; pass --db")?
        .join("hearth");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    Ok(data_dir.join("hearth.db"))
}

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_str().context("Database path must be UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Pick a budget plan: hearth budget select most_popular 4000");
    println!("  2. Import transactions: hearth import --file statement.csv");
    println!("  3. Start web UI: hearth serve");

    Ok(())
}

pub fn cmd_status(db_path: &Path, user: &str, no_encrypt: bool) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;

    println!("📋 Hearth Status");
    println!("   ─────────────────────────────");
    println!("   Database: {}", db_path.display());
    println!(
        "   Encryption: {}",
        if db.is_encrypted()? {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("   User: {}", user);
    println!("   Transactions: {}", db.count_transactions(user)?);
    println!("   Scheduled bills: {}", db.count_bills(user)?);
    println!("   Loans: {}", db.count_loans(user)?);

    match db.get_budget_plan(user)? {
        Some(plan) => println!(
            "   Budget plan: {} (income {:.2})",
            plan.plan_name, plan.monthly_income
        ),
        None => println!("   Budget plan: none (run 'hearth budget select')"),
    }

    Ok(())
}
