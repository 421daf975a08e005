//! Transaction, bill, and loan management commands

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use hearth_core::db::Database;
use hearth_core::models::{NewLoan, NewScheduledBill, NewTransaction, TransactionKind};

/// Truncate a string for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

fn parse_date_arg(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// ========== Transactions ==========

pub fn cmd_transactions_list(db: &Database, user: &str, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(user, limit)?;

    if transactions.is_empty() {
        println!("No transactions yet. Add one with 'hearth transactions add'.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<30} {:<16} {:>12}",
        "ID", "DATE", "DESCRIPTION", "CATEGORY", "AMOUNT"
    );
    for tx in &transactions {
        let sign = match tx.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        println!(
            "{:<6} {:<12} {:<30} {:<16} {:>12}",
            tx.id,
            tx.date,
            truncate(&tx.description, 30),
            truncate(tx.category.as_deref().unwrap_or("-"), 16),
            format!("{}{:.2}", sign, tx.amount.abs()),
        );
    }
    println!();
    println!("{} transaction(s)", transactions.len());

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    user: &str,
    date: Option<&str>,
    description: &str,
    amount: f64,
    category: Option<&str>,
    income: bool,
) -> Result<()> {
    if description.trim().is_empty() {
        bail!("Description must not be empty");
    }

    let tx = NewTransaction {
        date: parse_date_arg(date)?,
        description: description.to_string(),
        category: category.map(|s| s.to_string()),
        expense_type: None,
        kind: if income {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        },
        amount,
    };
    let id = db.insert_transaction(user, &tx)?;

    println!("✅ Recorded {} ({:.2}) as #{}", description, amount, id);
    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    if db.delete_transaction(id)? {
        println!("✅ Deleted transaction #{}", id);
        Ok(())
    } else {
        bail!("Transaction {} not found", id)
    }
}

// ========== Bills ==========

pub fn cmd_bills_list(db: &Database, user: &str) -> Result<()> {
    let bills = db.list_bills(user)?;

    if bills.is_empty() {
        println!("No scheduled bills. Add one with 'hearth bills add'.");
        return Ok(());
    }

    println!(
        "{:<6} {:<24} {:<14} {:>10} {:>8} {:<8}",
        "ID", "NAME", "CATEGORY", "AMOUNT", "DUE DAY", "STATUS"
    );
    for bill in &bills {
        println!(
            "{:<6} {:<24} {:<14} {:>10.2} {:>8} {:<8}",
            bill.id,
            truncate(&bill.name, 24),
            truncate(bill.category.as_deref().unwrap_or("-"), 14),
            bill.amount,
            bill.due_day,
            if bill.active { "active" } else { "paused" },
        );
    }

    Ok(())
}

pub fn cmd_bills_add(
    db: &Database,
    user: &str,
    name: &str,
    amount: f64,
    due_day: u32,
    category: Option<&str>,
) -> Result<()> {
    if amount < 0.0 {
        bail!("Bill amount must not be negative");
    }
    if !(1..=31).contains(&due_day) {
        bail!("Due day must be between 1 and 31");
    }

    let bill = NewScheduledBill {
        name: name.to_string(),
        category: category.map(|s| s.to_string()),
        amount,
        due_day,
    };
    let id = db.insert_bill(user, &bill)?;

    println!("✅ Added bill {} ({:.2}, due day {}) as #{}", name, amount, due_day, id);
    Ok(())
}

pub fn cmd_bills_set_active(db: &Database, id: i64, active: bool) -> Result<()> {
    if db.set_bill_active(id, active)? {
        println!(
            "✅ Bill #{} is now {}",
            id,
            if active { "active" } else { "paused" }
        );
        Ok(())
    } else {
        bail!("Bill {} not found", id)
    }
}

pub fn cmd_bills_delete(db: &Database, id: i64) -> Result<()> {
    if db.delete_bill(id)? {
        println!("✅ Deleted bill #{}", id);
        Ok(())
    } else {
        bail!("Bill {} not found", id)
    }
}

// ========== Loans ==========

pub fn cmd_loans_list(db: &Database, user: &str) -> Result<()> {
    let loans = db.list_loans(user)?;

    if loans.is_empty() {
        println!("No loans recorded. Add one with 'hearth loans add'.");
        return Ok(());
    }

    println!(
        "{:<6} {:<24} {:<16} {:>12} {:>10} {:<8}",
        "ID", "NAME", "LENDER", "PRINCIPAL", "EMI", "STATUS"
    );
    for loan in &loans {
        println!(
            "{:<6} {:<24} {:<16} {:>12.2} {:>10.2} {:<8}",
            loan.id,
            truncate(&loan.name, 24),
            truncate(loan.lender.as_deref().unwrap_or("-"), 16),
            loan.principal,
            loan.emi_amount,
            loan.status,
        );
    }

    Ok(())
}

pub fn cmd_loans_add(
    db: &Database,
    user: &str,
    name: &str,
    principal: f64,
    emi: f64,
    due_day: u32,
    lender: Option<&str>,
) -> Result<()> {
    if principal < 0.0 || emi < 0.0 {
        bail!("Principal and EMI must not be negative");
    }
    if !(1..=31).contains(&due_day) {
        bail!("Due day must be between 1 and 31");
    }

    let loan = NewLoan {
        name: name.to_string(),
        lender: lender.map(|s| s.to_string()),
        principal,
        emi_amount: emi,
        due_day,
    };
    let id = db.insert_loan(user, &loan)?;

    println!("✅ Recorded loan {} (EMI {:.2}) as #{}", name, emi, id);
    Ok(())
}

pub fn cmd_loans_close(db: &Database, id: i64) -> Result<()> {
    if db.close_loan(id)? {
        println!("✅ Loan #{} marked closed", id);
        Ok(())
    } else {
        bail!("Loan {} not found", id)
    }
}

pub fn cmd_loans_delete(db: &Database, id: i64) -> Result<()> {
    if db.delete_loan(id)? {
        println!("✅ Deleted loan #{}", id);
        Ok(())
    } else {
        bail!("Loan {} not found", id)
    }
}
