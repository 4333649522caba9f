use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static RE_DAY_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(\d{2})(\d{2})").expect("invalid regex: day stamp"));

static RE_MONTH_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(\d{2})").expect("invalid regex: month stamp"));

/// How much of a release date a detail link encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    /// `YYYYMMDD` somewhere in the link.
    Day,
    /// `YYYYMM`; the day is pinned to the first of the month.
    Month,
}

/// Reads the release date stamped into a detail-page link.
///
/// The first digit run of the right width wins, so `monetary20120125a.htm`
/// and `/fomc/minutes/20000202.htm` both resolve. Returns `None` when no
/// stamp is present or it is not a calendar date.
pub fn date_from_link(link: &str, precision: DatePrecision) -> Option<NaiveDate> {
    match precision {
        DatePrecision::Day => {
            let caps = RE_DAY_STAMP.captures(link)?;
            NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            )
        }
        DatePrecision::Month => {
            let caps = RE_MONTH_STAMP.captures(link)?;
            NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_stamp_from_press_release_link() {
        assert_eq!(
            date_from_link("/newsevents/pressreleases/monetary20210317a.htm", DatePrecision::Day),
            Some(ymd(2021, 3, 17))
        );
        assert_eq!(
            date_from_link("https://www.federalreserve.gov/fomc/minutes/20000202.htm", DatePrecision::Day),
            Some(ymd(2000, 2, 2))
        );
    }

    #[test]
    fn month_stamp_pins_first_day() {
        assert_eq!(
            date_from_link("/monetarypolicy/beigebook202310.htm", DatePrecision::Month),
            Some(ymd(2023, 10, 1))
        );
        assert_eq!(
            date_from_link("/monetarypolicy/beigebook20240117.htm", DatePrecision::Month),
            Some(ymd(2024, 1, 1))
        );
    }

    #[test]
    fn invalid_or_missing_stamp_is_none() {
        assert_eq!(date_from_link("/monetarypolicy/monetary20231345a.htm", DatePrecision::Day), None);
        assert_eq!(date_from_link("/monetarypolicy/fomccalendars.htm", DatePrecision::Day), None);
        assert_eq!(date_from_link("/beigebook2023.htm", DatePrecision::Month), None);
    }
}
