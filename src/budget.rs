use crate::config::{BudgetConfig, HeavyPaycheck};
use crate::schedule::{add_cycles, next_paycheck_date, upcoming_paycheck_dates};
use chrono::NaiveDateTime;
use log::debug;
use std::fmt;

/// Balances at or below this are payoff residue, not debt.
pub const DEBT_EPSILON: f64 = 0.009;

pub const SAVINGS_CAP: f64 = 400.;
pub const INVESTING_CAP: f64 = 200.;
pub const FUN_CAP: f64 = 150.;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct PaycheckA {
    pub fixed: f64,
    /// negative when fixed costs exceed the paycheck
    pub leftover: f64,
    pub safe_to_spend: f64,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct PaycheckB {
    pub fixed: f64,
    pub after_fixed: f64,
    pub after_groceries: f64,
    pub debt_payment: f64,
    pub savings: f64,
    pub investing: f64,
    pub fun: f64,
    pub buffer: f64,
    pub safe_to_spend: f64,
}

#[derive(Clone, PartialEq, Debug)]
pub struct BudgetResult {
    pub gas_per_paycheck: f64,
    pub debt_remaining: f64,
    pub debt_mode: bool,
    pub a: PaycheckA,
    pub b: PaycheckB,
    pub payoff_b_paychecks: u64,
    pub payoff_weeks: u64,
    pub payoff_date: Option<NaiveDateTime>,
    pub debt_progress_pct: f64,
    pub next_paycheck_date: NaiveDateTime,
    pub upcoming_paycheck_dates: Vec<NaiveDateTime>,
}

/// Derive the full allocation for both paychecks from `config`.
///
/// `debt_baseline` only feeds `debt_progress_pct`; a non-positive baseline
/// reports 100%. `now` anchors the paycheck schedule and payoff date.
pub fn evaluate(config: &BudgetConfig, debt_baseline: f64, now: &NaiveDateTime) -> BudgetResult {
    let next = next_paycheck_date(&config.last_paycheck_date, now);
    let upcoming = upcoming_paycheck_dates(&next);

    let gas_per_paycheck = config.gas_weekly_avg * 2.;
    let debt_remaining = config.debt_total();
    let debt_mode = debt_remaining > DEBT_EPSILON;

    let a = paycheck_a(config, gas_per_paycheck);
    let b = paycheck_b(config, gas_per_paycheck, debt_remaining, debt_mode);

    let (payoff_b_paychecks, payoff_date) =
        payoff_estimate(config, &b, debt_remaining, debt_mode, &next);

    let result = BudgetResult {
        gas_per_paycheck,
        debt_remaining,
        debt_mode,
        a,
        b,
        payoff_b_paychecks,
        payoff_weeks: payoff_b_paychecks.saturating_mul(2),
        payoff_date,
        debt_progress_pct: debt_progress_pct(debt_baseline, debt_remaining),
        next_paycheck_date: next,
        upcoming_paycheck_dates: upcoming,
    };
    debug!(
        "evaluated budget: debt mode {}, debt remaining {:.2}, B safe to spend {:.2}",
        result.debt_mode, result.debt_remaining, result.b.safe_to_spend
    );
    result
}

fn paycheck_a(config: &BudgetConfig, gas_per_paycheck: f64) -> PaycheckA {
    let fixed = config.car_payment_biweekly
        + config.gym_biweekly
        + gas_per_paycheck
        + config.heavy_bills_for(HeavyPaycheck::A);
    let leftover = config.paycheck_amount - fixed;
    PaycheckA {
        fixed,
        leftover,
        safe_to_spend: leftover.max(0.),
    }
}

fn paycheck_b(
    config: &BudgetConfig,
    gas_per_paycheck: f64,
    debt_remaining: f64,
    debt_mode: bool,
) -> PaycheckB {
    let fixed = config.car_payment_biweekly
        + config.gym_biweekly
        + config.mobile_monthly
        + config.wifi_monthly_half
        + config.hydro_monthly_half
        + config.gas_utility_monthly_half
        + gas_per_paycheck
        + config.heavy_bills_for(HeavyPaycheck::B);
    let after_fixed = config.paycheck_amount - fixed;
    let after_groceries = after_fixed - config.groceries_per_paycheck_b;

    let mut b = PaycheckB {
        fixed,
        after_fixed,
        after_groceries,
        ..PaycheckB::default()
    };
    let mut remaining = after_groceries;

    if debt_mode {
        b.debt_payment = config
            .debt_pay_per_paycheck_b
            .min(debt_remaining)
            .min(after_groceries.max(0.));
        remaining -= b.debt_payment;
        b.buffer = remaining;
        b.safe_to_spend = remaining.max(0.);
    } else {
        b.savings = take_capped(&mut remaining, SAVINGS_CAP);
        if config.investing_enabled {
            b.investing = take_capped(&mut remaining, INVESTING_CAP);
        }
        b.fun = take_capped(&mut remaining, FUN_CAP);
        b.buffer = remaining;
        // savings and investing are locked transfers, fun money is spendable
        b.safe_to_spend = (b.fun + remaining).max(0.);
    }
    b
}

fn take_capped(remaining: &mut f64, cap: f64) -> f64 {
    let amount = cap.min(remaining.max(0.));
    *remaining -= amount;
    amount
}

// Average pace per cycle: unlike the actual payment, not capped at debt_remaining.
fn payoff_estimate(
    config: &BudgetConfig,
    b: &PaycheckB,
    debt_remaining: f64,
    debt_mode: bool,
    next: &NaiveDateTime,
) -> (u64, Option<NaiveDateTime>) {
    let per_cycle = config
        .debt_pay_per_paycheck_b
        .min(b.after_groceries.max(0.));
    if !debt_mode || per_cycle <= 0. {
        return (0, None);
    }
    let cycles = (debt_remaining / per_cycle).ceil() as u64;
    match add_cycles(next, cycles.saturating_sub(1)) {
        Some(date) => (cycles, Some(date)),
        // a payoff past the calendar's end is treated as never
        None => (0, None),
    }
}

pub fn debt_progress_pct(debt_baseline: f64, debt_remaining: f64) -> f64 {
    if debt_baseline > 0. {
        (((debt_baseline - debt_remaining) / debt_baseline) * 100.).clamp(0., 100.)
    } else {
        100.
    }
}

impl fmt::Display for PaycheckA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paycheck A: fixed ${:.2}, leftover ${:.2}, safe to spend ${:.2}",
            self.fixed, self.leftover, self.safe_to_spend
        )
    }
}

impl fmt::Display for PaycheckB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paycheck B: fixed ${:.2}, after fixed ${:.2}, after groceries ${:.2}, debt payment ${:.2}, savings ${:.2}, investing ${:.2}, fun ${:.2}, buffer ${:.2}, safe to spend ${:.2}",
            self.fixed,
            self.after_fixed,
            self.after_groceries,
            self.debt_payment,
            self.savings,
            self.investing,
            self.fun,
            self.buffer,
            self.safe_to_spend
        )
    }
}

impl fmt::Display for BudgetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.debt_mode { "DEBT MODE" } else { "WEALTH MODE" };
        writeln!(
            f,
            "{}, debt remaining ${:.2}, progress {:.2}%",
            mode, self.debt_remaining, self.debt_progress_pct
        )?;
        writeln!(f, "{}", self.a)?;
        writeln!(f, "{}", self.b)?;
        match self.payoff_date {
            Some(date) => write!(
                f,
                "payoff in {} weeks ({} paycheck B cycles), by {}",
                self.payoff_weeks,
                self.payoff_b_paychecks,
                date.date()
            ),
            None if self.debt_mode => write!(f, "payoff not reachable at the current payment"),
            None => write!(f, "debt is fully paid off"),
        }
    }
}
