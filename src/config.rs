#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which paycheck of the biweekly pair carries rent and car insurance.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeavyPaycheck {
    #[default]
    A,
    B,
}

/// Which debt account absorbs a payment first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DebtPriority {
    #[default]
    ScotiaFirst,
    AmexFirst,
}

impl fmt::Display for DebtPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtPriority::ScotiaFirst => write!(f, "scotia-first"),
            DebtPriority::AmexFirst => write!(f, "amex-first"),
        }
    }
}

/// Everything the user enters. Monthly bills that are split across the two
/// paychecks are stored as the half that lands on paycheck B.
///
/// A cached config may be missing any field; missing fields take the default.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BudgetConfig {
    pub paycheck_amount: f64,
    pub gas_weekly_avg: f64,
    pub groceries_per_paycheck_b: f64,
    pub debt_pay_per_paycheck_b: f64,
    pub heavy_paycheck: HeavyPaycheck,
    pub investing_enabled: bool,
    pub debt_priority: DebtPriority,
    pub rent_monthly: f64,
    pub car_insurance_monthly: f64,
    pub car_payment_biweekly: f64,
    pub gym_biweekly: f64,
    pub mobile_monthly: f64,
    pub wifi_monthly_half: f64,
    pub hydro_monthly_half: f64,
    pub gas_utility_monthly_half: f64,
    pub debt_scotia: f64,
    pub debt_amex: f64,
    /// `%Y-%m-%d` anchor for the biweekly schedule
    pub last_paycheck_date: String,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            paycheck_amount: 1690.47,
            gas_weekly_avg: 90.,
            groceries_per_paycheck_b: 300.,
            debt_pay_per_paycheck_b: 524.42,
            heavy_paycheck: HeavyPaycheck::A,
            investing_enabled: true,
            debt_priority: DebtPriority::ScotiaFirst,
            rent_monthly: 952.,
            car_insurance_monthly: 290.,
            car_payment_biweekly: 221.,
            gym_biweekly: 33.29,
            mobile_monthly: 96.3,
            wifi_monthly_half: 46.67,
            hydro_monthly_half: 11.89,
            gas_utility_monthly_half: 26.9,
            debt_scotia: 1001.57,
            debt_amex: 1007.18,
            last_paycheck_date: "2026-02-13".to_string(),
        }
    }
}

impl BudgetConfig {
    pub fn debt_total(&self) -> f64 {
        self.debt_scotia + self.debt_amex
    }

    /// Rent plus insurance if `paycheck` is the heavy one, otherwise zero.
    pub fn heavy_bills_for(&self, paycheck: HeavyPaycheck) -> f64 {
        if self.heavy_paycheck == paycheck {
            self.rent_monthly + self.car_insurance_monthly
        } else {
            0.
        }
    }
}

/// Baseline used for progress when nothing has been cached yet.
pub fn default_debt_baseline() -> f64 {
    BudgetConfig::default().debt_total()
}

pub fn round(amt: f64, dec: f64) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 10_f64.powf(dec)).round() / 10_f64.powf(dec)
    }
}
