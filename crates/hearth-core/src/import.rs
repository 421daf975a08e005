//! CSV import for transaction statements
//!
//! One generic format: date,description,category,expense_type,kind,amount
//! with a header row. Rows that fail to parse are skipped and counted, so a
//! partially damaged statement still imports cleanly.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::warn;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionKind};

/// Result of an import operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    Err(Error::Import(format!("Unrecognized date: {}", s)))
}

fn optional_field(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_row(record: &StringRecord) -> Result<NewTransaction> {
    let date_str = record
        .get(0)
        .ok_or_else(|| Error::Import("Missing date".into()))?;
    let date = parse_date(date_str)?;

    let description = record
        .get(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Import("Missing description".into()))?
        .to_string();

    let category = optional_field(record, 2);
    let expense_type = optional_field(record, 3);

    // An empty kind column defaults to expense, the common case for
    // bank statements.
    let kind = match record.get(4).map(str::trim) {
        Some("") | None => TransactionKind::Expense,
        Some(s) => s.parse().map_err(Error::Import)?,
    };

    let amount: f64 = record
        .get(5)
        .map(str::trim)
        .ok_or_else(|| Error::Import("Missing amount".into()))?
        .parse()
        .map_err(|_| Error::Import(format!("Bad amount: {:?}", record.get(5))))?;

    Ok(NewTransaction {
        date,
        description,
        category,
        expense_type,
        kind,
        amount,
    })
}

/// Parse a statement CSV into transactions, failing on the first bad row
pub fn parse_statement_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result?;
        transactions.push(parse_row(&record)?);
    }

    Ok(transactions)
}

/// Import a statement CSV for a user, skipping rows that fail to parse
pub fn import_statement<R: Read>(db: &Database, user_id: &str, reader: R) -> Result<ImportSummary> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut summary = ImportSummary {
        imported: 0,
        skipped: 0,
    };

    for result in rdr.records() {
        let record = result?;
        match parse_row(&record) {
            Ok(tx) => {
                db.insert_transaction(user_id, &tx)?;
                summary.imported += 1;
            }
            Err(e) => {
                warn!(error = %e, "Skipping unparseable statement row");
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}
