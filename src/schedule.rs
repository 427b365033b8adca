use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use log::{trace, warn};

pub const PAYCHECK_INTERVAL_DAYS: u64 = 14;
pub const UPCOMING_PAYCHECKS: usize = 4;

const ANCHOR_FORMAT: &str = "%Y-%m-%d";

/// Parse a `%Y-%m-%d` anchor and pin it to midday so timezone shifts never
/// move it across a date boundary.
pub fn parse_anchor(anchor: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(anchor.trim(), ANCHOR_FORMAT).ok()?;
    let midday = NaiveTime::from_hms_opt(12, 0, 0)?;
    Some(date.and_time(midday))
}

/// `None` once the offset leaves chrono's representable range.
pub fn add_cycles(&start: &NaiveDateTime, cycles: u64) -> Option<NaiveDateTime> {
    let days = PAYCHECK_INTERVAL_DAYS.checked_mul(cycles)?;
    start.checked_add_days(Days::new(days))
}

/// First paycheck strictly after `now`, stepping from the anchor in 14 day
/// increments. An anchor that fails to parse falls back to `now`.
pub fn next_paycheck_date(anchor: &str, &now: &NaiveDateTime) -> NaiveDateTime {
    let Some(mut cursor) = parse_anchor(anchor) else {
        warn!("paycheck anchor {:?} is not a valid date, using now", anchor);
        return now;
    };

    while cursor <= now {
        match add_cycles(&cursor, 1) {
            Some(next) => cursor = next,
            None => {
                warn!("paycheck schedule overflowed past {}, using now", cursor);
                return now;
            }
        }
    }
    trace!("next paycheck after {} is {}", now, cursor);
    cursor
}

/// The next paycheck followed by the three after it.
pub fn upcoming_paycheck_dates(&next: &NaiveDateTime) -> Vec<NaiveDateTime> {
    (0..UPCOMING_PAYCHECKS as u64)
        .map_while(|i| add_cycles(&next, i))
        .collect()
}

/// Whole days until `next`, rounded up and never negative.
pub fn days_until(&next: &NaiveDateTime, &now: &NaiveDateTime) -> i64 {
    let secs = next.signed_duration_since(now).num_seconds();
    if secs <= 0 {
        0
    } else {
        (secs + 86_399) / 86_400
    }
}

#[cfg(test)]
mod tests {
    use super::{add_cycles, days_until, next_paycheck_date, parse_anchor, upcoming_paycheck_dates};
    use chrono::{NaiveDate, NaiveDateTime};
    use test_log::test;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_anchor() {
        assert_eq!(parse_anchor("2026-02-13"), Some(at(2026, 2, 13, 12)));
        assert_eq!(parse_anchor(" 2026-02-13 "), Some(at(2026, 2, 13, 12)));
        assert_eq!(parse_anchor("2026-02-30"), None);
        assert_eq!(parse_anchor("last friday"), None);
        assert_eq!(parse_anchor(""), None);
    }

    #[test]
    fn test_next_paycheck_date() {
        let now = at(2026, 10, 19, 10);
        assert_eq!(next_paycheck_date("2026-02-13", &now), at(2026, 10, 23, 12));

        // a payday is only "next" until its midday instant has passed
        assert_eq!(
            next_paycheck_date("2026-02-13", &at(2026, 10, 9, 11)),
            at(2026, 10, 9, 12)
        );
        assert_eq!(
            next_paycheck_date("2026-02-13", &at(2026, 10, 9, 12)),
            at(2026, 10, 23, 12)
        );

        // an anchor already in the future is the next paycheck
        assert_eq!(next_paycheck_date("2027-01-01", &now), at(2027, 1, 1, 12));
    }

    #[test]
    fn test_next_paycheck_is_after_now_and_on_cycle() {
        let anchor = at(2026, 2, 13, 12);
        let mut now = at(2025, 12, 30, 0);
        for _ in 0..90 {
            let next = next_paycheck_date("2026-02-13", &now);
            assert!(next > now);
            assert_eq!(next.signed_duration_since(anchor).num_days().rem_euclid(14), 0);
            now += chrono::Duration::hours(61);
        }
    }

    #[test]
    fn test_invalid_anchor_falls_back_to_now() {
        let now = at(2026, 10, 19, 10);
        assert_eq!(next_paycheck_date("not a date", &now), now);
    }

    #[test]
    fn test_add_cycles_past_calendar_end() {
        let start = at(2026, 10, 23, 12);
        assert_eq!(add_cycles(&start, 3), Some(at(2026, 12, 4, 12)));
        assert_eq!(add_cycles(&start, u64::MAX), None);
        assert_eq!(add_cycles(&start, u64::MAX / 14), None);
        assert_eq!(add_cycles(&NaiveDateTime::MAX, 1), None);
    }

    #[test]
    fn test_schedule_overflow_falls_back_to_now() {
        let now = NaiveDateTime::MAX;
        assert_eq!(next_paycheck_date("2026-02-13", &now), now);
    }

    #[test]
    fn test_upcoming_paycheck_dates() {
        let dates = upcoming_paycheck_dates(&at(2026, 10, 23, 12));
        assert_eq!(
            dates,
            vec![
                at(2026, 10, 23, 12),
                at(2026, 11, 6, 12),
                at(2026, 11, 20, 12),
                at(2026, 12, 4, 12),
            ]
        );
    }

    #[test]
    fn test_days_until() {
        let now = at(2026, 10, 19, 10);
        assert_eq!(days_until(&at(2026, 10, 23, 12), &now), 5);
        assert_eq!(days_until(&at(2026, 10, 23, 10), &now), 4);
        assert_eq!(days_until(&now, &now), 0);
        assert_eq!(days_until(&at(2026, 10, 1, 12), &now), 0);
    }
}
