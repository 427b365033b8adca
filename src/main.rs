use chrono::Local;
use log::info;
use paycheck::budget::BudgetResult;
use paycheck::config::BudgetConfig;
use paycheck::error::Result;
use paycheck::schedule::days_until;
use paycheck::store::BudgetStore;
use simple_logger::SimpleLogger;
use std::{env, path::PathBuf};

const DEFAULT_CACHE: &str = "budget.json";
const DEFAULT_TREND_POINTS: usize = 6;
const HIDDEN_AMOUNT: &str = "$••••••";

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let mut args = env::args().skip(1);
    let cache = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE));
    let points = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_TREND_POINTS);

    let store = BudgetStore::load(&cache)?;
    let now = Local::now().naive_local();
    let result = store.result(&now);
    info!("loaded budget from {}", cache.display());

    if store.hide_numbers {
        show_hidden(&result);
    } else {
        println!("{}", result);
    }
    show_schedule(&store.config, &result, days_until(&result.next_paycheck_date, &now));
    for (cycle, remaining) in store.trend(points, &now).iter().enumerate() {
        println!(
            "cycle {}, debt remaining {}",
            cycle + 1,
            money(*remaining, store.hide_numbers)
        );
    }
    Ok(())
}

fn money(value: f64, hidden: bool) -> String {
    if hidden {
        HIDDEN_AMOUNT.to_string()
    } else {
        format!("${:.2}", value)
    }
}

// dashboard figures only, with every amount masked
fn show_hidden(result: &BudgetResult) {
    let mode = if result.debt_mode { "DEBT MODE" } else { "WEALTH MODE" };
    println!(
        "{}, debt remaining {}, progress {:.2}%",
        mode,
        money(result.debt_remaining, true),
        result.debt_progress_pct
    );
    println!("paycheck A safe to spend {}", money(result.a.safe_to_spend, true));
    println!(
        "paycheck B debt payment {}, safe to spend {}",
        money(result.b.debt_payment, true),
        money(result.b.safe_to_spend, true)
    );
    if result.payoff_date.is_some() {
        println!(
            "payoff in {} weeks ({} paycheck B cycles)",
            result.payoff_weeks, result.payoff_b_paychecks
        );
    }
}

fn show_schedule(config: &BudgetConfig, result: &BudgetResult, days: i64) {
    println!(
        "last paid {}, next paycheck {} ({} days)",
        config.last_paycheck_date,
        result.next_paycheck_date.date(),
        days
    );
    for (i, date) in result.upcoming_paycheck_dates.iter().enumerate() {
        println!("paycheck {}: {}", i + 1, date.format("%a %b %-d %Y"));
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn masked_money() {
    assert_eq!(money(250., false), "$250.00");
    assert_eq!(money(1484.3299999, false), "$1484.33");
    assert_eq!(money(250., true), HIDDEN_AMOUNT);
}

#[test]
fn normal_types() {
    is_normal::<BudgetResult>();
    is_normal::<BudgetConfig>();
    is_normal::<BudgetStore>();
}
