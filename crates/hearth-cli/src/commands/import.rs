//! Statement import command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use hearth_core::db::Database;

pub fn cmd_import(db: &Database, user: &str, file: &Path) -> Result<()> {
    println!("📥 Importing {}...", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let summary = hearth_core::import::import_statement(db, user, reader)?;

    println!("✅ Imported {} transaction(s)", summary.imported);
    if summary.skipped > 0 {
        println!("   ⚠️  Skipped {} unparseable row(s)", summary.skipped);
    }
    println!();
    println!("Run 'hearth budget analyze' to see the monthly picture.");

    Ok(())
}
