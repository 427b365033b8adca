use crate::budget::evaluate;
use crate::config::{BudgetConfig, DebtPriority};
use chrono::NaiveDateTime;
use log::trace;

/// Pay `amount` down across the two debt accounts in priority order.
///
/// The first account absorbs up to its full balance, the rest goes to the
/// second, and anything beyond both balances is dropped. Only the balances
/// differ in the returned config.
pub fn apply_payment(config: &BudgetConfig, amount: f64) -> BudgetConfig {
    if amount <= 0. {
        return config.clone();
    }

    let (debt_scotia, debt_amex) = match config.debt_priority {
        DebtPriority::ScotiaFirst => {
            let (scotia, rest) = pay_down(config.debt_scotia, amount);
            let (amex, _) = pay_down(config.debt_amex, rest);
            (scotia, amex)
        }
        DebtPriority::AmexFirst => {
            let (amex, rest) = pay_down(config.debt_amex, amount);
            let (scotia, _) = pay_down(config.debt_scotia, rest);
            (scotia, amex)
        }
    };

    BudgetConfig {
        debt_scotia: debt_scotia.max(0.),
        debt_amex: debt_amex.max(0.),
        ..config.clone()
    }
}

// returns (new balance, unspent payment)
fn pay_down(balance: f64, payment: f64) -> (f64, f64) {
    let paid = payment.min(balance.max(0.));
    (balance - paid, payment - paid)
}

/// Remaining debt at the start of each of the next `points` paycheck B cycles.
///
/// Each cycle pays that cycle's computed debt payment; once a cycle cannot pay
/// anything the series repeats its last value.
pub fn project_trend(config: &BudgetConfig, points: usize, now: &NaiveDateTime) -> Vec<f64> {
    let mut trend = Vec::with_capacity(points);
    let mut sim = config.clone();

    for cycle in 0..points {
        let result = evaluate(&sim, sim.debt_total(), now);
        trend.push(result.debt_remaining);
        trace!(
            "cycle {}, debt remaining {:.2}, payment {:.2}",
            cycle,
            result.debt_remaining,
            result.b.debt_payment
        );

        if !result.debt_mode || result.b.debt_payment <= 0. {
            continue;
        }
        sim = apply_payment(&sim, result.b.debt_payment);
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::{apply_payment, project_trend};
    use crate::config::{round, BudgetConfig, DebtPriority};
    use chrono::{NaiveDate, NaiveDateTime};
    use test_log::test;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn with_balances(
        debt_scotia: f64,
        debt_amex: f64,
        debt_priority: DebtPriority,
    ) -> BudgetConfig {
        BudgetConfig {
            debt_scotia,
            debt_amex,
            debt_priority,
            ..BudgetConfig::default()
        }
    }

    #[test]
    fn test_scotia_first() {
        let config = BudgetConfig::default();
        let paid = apply_payment(&config, 600.);
        assert_eq!(round(paid.debt_scotia, 2.), 401.57);
        assert_eq!(paid.debt_amex, 1007.18);

        let paid = apply_payment(&config, 1500.);
        assert_eq!(paid.debt_scotia, 0.);
        assert_eq!(round(paid.debt_amex, 2.), 508.75);
    }

    #[test]
    fn test_amex_first() {
        let config = with_balances(1001.57, 1007.18, DebtPriority::AmexFirst);
        let paid = apply_payment(&config, 600.);
        assert_eq!(paid.debt_scotia, 1001.57);
        assert_eq!(round(paid.debt_amex, 2.), 407.18);

        let paid = apply_payment(&config, 1500.);
        assert_eq!(round(paid.debt_scotia, 2.), 508.75);
        assert_eq!(paid.debt_amex, 0.);
    }

    #[test]
    fn test_overpayment_is_dropped() {
        let paid = apply_payment(&BudgetConfig::default(), 5000.);
        assert_eq!(paid.debt_scotia, 0.);
        assert_eq!(paid.debt_amex, 0.);
    }

    #[test]
    fn test_non_positive_payment_is_noop() {
        let config = BudgetConfig::default();
        assert_eq!(apply_payment(&config, 0.), config);
        assert_eq!(apply_payment(&config, -25.), config);
    }

    #[test]
    fn test_only_balances_change() {
        let config = BudgetConfig {
            paycheck_amount: 2100.,
            investing_enabled: false,
            last_paycheck_date: "2026-03-06".to_string(),
            ..BudgetConfig::default()
        };
        let paid = apply_payment(&config, 100.);
        assert_eq!(
            paid,
            BudgetConfig {
                debt_scotia: paid.debt_scotia,
                debt_amex: paid.debt_amex,
                ..config.clone()
            }
        );
        assert_eq!(config.debt_scotia, 1001.57);
    }

    #[test]
    fn test_payment_conserves_debt() {
        for priority in [DebtPriority::ScotiaFirst, DebtPriority::AmexFirst] {
            for (s, a) in [(1001.57, 1007.18), (0., 250.), (80., 0.), (0., 0.)] {
                for p in [0., 10., 80., 300., 1001.57, 2500.] {
                    let paid = apply_payment(&with_balances(s, a, priority), p);
                    assert!(paid.debt_scotia >= 0.);
                    assert!(paid.debt_amex >= 0.);
                    let expected: f64 = (s + a - p).max(0.);
                    assert!((paid.debt_total() - expected).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_first_priority_covers_payment() {
        let paid = apply_payment(&with_balances(500., 700., DebtPriority::ScotiaFirst), 500.);
        assert_eq!(paid.debt_scotia, 0.);
        assert_eq!(paid.debt_amex, 700.);
    }

    #[test]
    fn test_project_trend() {
        let trend: Vec<f64> = project_trend(&BudgetConfig::default(), 6, &now())
            .into_iter()
            .map(|v| round(v, 2.))
            .collect();
        assert_eq!(trend, vec![2008.75, 1484.33, 959.91, 435.49, 0., 0.]);
    }

    #[test]
    fn test_project_trend_is_non_increasing() {
        let trend = project_trend(&BudgetConfig::default(), 12, &now());
        assert_eq!(trend.len(), 12);
        for pair in trend.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        let first_repeat = trend.windows(2).position(|w| w[0] == w[1]).unwrap();
        assert!(trend[first_repeat..].iter().all(|&v| v == trend[first_repeat]));
    }

    #[test]
    fn test_project_trend_flatlines_without_payment() {
        let config = BudgetConfig {
            debt_pay_per_paycheck_b: 0.,
            ..BudgetConfig::default()
        };
        let trend = project_trend(&config, 4, &now());
        assert_eq!(trend, vec![config.debt_total(); 4]);

        assert!(project_trend(&config, 0, &now()).is_empty());
    }
}
