//! Budget plan and analysis commands

use anyhow::Result;

use hearth_core::budget::{AllocationPlan, BudgetService, SuggestionKind};
use hearth_core::db::Database;
use hearth_core::models::Bucket;

pub fn cmd_budget_plans() -> Result<()> {
    println!("📊 Allocation Plans");
    println!("   ─────────────────────────────");

    for plan in AllocationPlan::all() {
        println!("   {} ({})", plan.name, plan.id);
        for bucket in Bucket::ALL {
            let pct = plan.allocations.get(bucket);
            if pct > 0.0 {
                println!("      {:<16} {:>5.0}%", bucket.to_string(), pct);
            }
        }
        println!();
    }

    println!("Select one with: hearth budget select <plan> <monthly income>");
    Ok(())
}

pub fn cmd_budget_select(db: &Database, user: &str, plan: &str, income: f64) -> Result<()> {
    let service = BudgetService::new(db);
    let selected = service.select_plan(user, plan, income)?;

    println!(
        "✅ Selected {} with monthly income {:.2}",
        selected.plan_name, selected.monthly_income
    );
    for bucket in Bucket::ALL {
        let pct = selected.allocations.get(bucket);
        if pct > 0.0 {
            println!(
                "   {:<16} {:>5.0}%  ({:.2})",
                bucket.to_string(),
                pct,
                income * pct / 100.0
            );
        }
    }

    Ok(())
}

pub fn cmd_budget_show(db: &Database, user: &str) -> Result<()> {
    let plan = BudgetService::new(db).plan(user)?;

    println!("📊 {} (selected {})", plan.plan_name, plan.selected_at.date_naive());
    println!("   Monthly income: {:.2}", plan.monthly_income);
    for bucket in Bucket::ALL {
        let pct = plan.allocations.get(bucket);
        if pct > 0.0 {
            println!(
                "   {:<16} {:>5.0}%  ({:.2})",
                bucket.to_string(),
                pct,
                plan.monthly_income * pct / 100.0
            );
        }
    }

    Ok(())
}

pub fn cmd_budget_delete(db: &Database, user: &str) -> Result<()> {
    BudgetService::new(db).delete_plan(user)?;
    println!("✅ Budget plan deleted");
    Ok(())
}

pub fn cmd_budget_analyze(db: &Database, user: &str, json: bool) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let report = BudgetService::new(db).analyze(user, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "📊 Budget Analysis - {} ({:.2}/month)",
        report.budget_plan.plan_name, report.budget_plan.monthly_income
    );
    println!("   ─────────────────────────────");
    println!(
        "   {:<16} {:>10} {:>10} {:>10} {:>7}  STATUS",
        "BUCKET", "BUDGETED", "ACTUAL", "LEFT", "USED"
    );
    for variance in &report.analysis.buckets {
        println!(
            "   {:<16} {:>10.2} {:>10.2} {:>10.2} {:>6.1}%  {}",
            variance.bucket.to_string(),
            variance.budgeted,
            variance.actual,
            variance.difference,
            variance.percentage_used,
            variance.status,
        );
    }
    println!();
    println!(
        "   Total: {:.2} spent of {:.2} budgeted ({:.1}%)",
        report.analysis.total_actual,
        report.analysis.total_budget,
        report.summary.budget_utilization
    );
    println!(
        "   Inputs: {} transaction(s), {} bill(s), {} EMI(s)",
        report.summary.total_transactions, report.summary.total_bills, report.summary.total_emis
    );

    if !report.suggestions.is_empty() {
        println!();
        println!("💡 Suggestions");
        for suggestion in &report.suggestions {
            let icon = match suggestion.kind {
                SuggestionKind::Alert => "🚨",
                SuggestionKind::Warning => "⚠️ ",
                SuggestionKind::Caution => "👀",
                SuggestionKind::Success => "✅",
            };
            println!("   {} {}", icon, suggestion.message);
            println!("      {}", suggestion.recommendation);
        }
    }

    Ok(())
}
