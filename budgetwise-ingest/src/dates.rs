//! Numeric date recognition for receipt text.
//!
//! Recognized forms:
//!   05/15/2023   5/15/23   05-15-2023   2023-05-15
//!
//! Two-digit years are read as 20YY. Matches that are not real calendar
//! dates are skipped.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\b(?:",
            r"(?P<iso_y>\d{4})-(?P<iso_m>\d{1,2})-(?P<iso_d>\d{1,2})",
            r"|",
            r"(?P<m>\d{1,2})[/-](?P<d>\d{1,2})[/-](?P<y>\d{4}|\d{2})",
            r")\b"
        ))
        .expect("date pattern compiles")
    })
}

/// First valid date appearing in `s`, scanning left to right.
pub fn find_date(s: &str) -> Option<NaiveDate> {
    date_re().captures_iter(s).find_map(|caps| {
        if let Some(y) = caps.name("iso_y") {
            ymd(y.as_str(), &caps["iso_m"], &caps["iso_d"])
        } else {
            let year = expand_year(&caps["y"]);
            ymd(&year, &caps["m"], &caps["d"])
        }
    })
}

fn expand_year(y: &str) -> String {
    if y.len() == 2 { format!("20{}", y) } else { y.to_string() }
}

fn ymd(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_us_slash_date() {
        assert_eq!(find_date("05/15/2023"), date(2023, 5, 15));
        assert_eq!(find_date("Date: 12/04/2025     Time: 14:30"), date(2025, 12, 4));
    }

    #[test]
    fn test_short_year_and_single_digits() {
        assert_eq!(find_date("1/4/25"), date(2025, 1, 4));
    }

    #[test]
    fn test_dash_and_iso() {
        assert_eq!(find_date("05-15-2023"), date(2023, 5, 15));
        assert_eq!(find_date("Printed 2023-05-15 09:12"), date(2023, 5, 15));
    }

    #[test]
    fn test_invalid_dates_skipped() {
        assert_eq!(find_date("13/45/2023"), None);
        assert_eq!(find_date("13/45/2023 then 02/03/2024"), date(2024, 2, 3));
    }

    #[test]
    fn test_non_dates_ignored() {
        assert_eq!(find_date("(555) 123-4567"), None);
        assert_eq!(find_date("Anytown, ST 12345"), None);
        assert_eq!(find_date("TOTAL $19.60"), None);
    }
}
