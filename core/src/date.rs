//! Parsing of the dataset's review dates, written as `"Jun 5th, 2024"`.
//!
//! Only this one English convention is understood. Anything else is a
//! [`DateFormatError`] rather than a silently misplaced row.

use std::fmt;
use thiserror::Error;
use time::{Date, Month};

const MONTHS: [(&str, Month); 12] = [
    ("Jan", Month::January),
    ("Feb", Month::February),
    ("Mar", Month::March),
    ("Apr", Month::April),
    ("May", Month::May),
    ("Jun", Month::June),
    ("Jul", Month::July),
    ("Aug", Month::August),
    ("Sep", Month::September),
    ("Oct", Month::October),
    ("Nov", Month::November),
    ("Dec", Month::December),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised date {input:?}: {reason}")]
pub struct DateFormatError {
    pub input: String,
    pub reason: &'static str,
}

/// Chronologically ordered calendar date; displays as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComparableDate(Date);

impl fmt::Display for ComparableDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), self.0.month() as u8, self.0.day())
    }
}

pub fn parse_date(input: &str) -> Result<ComparableDate, DateFormatError> {
    let fail = |reason| DateFormatError { input: input.to_string(), reason };

    let cleaned = input.replace(',', "");
    let mut parts = cleaned.split_whitespace();
    let (month, day, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(d), Some(y), None) => (m, d, y),
        _ => return Err(fail("expected <month> <day> <year>")),
    };

    let month = MONTHS
        .iter()
        .find(|(abbrev, _)| *abbrev == month)
        .map(|(_, m)| *m)
        .ok_or_else(|| fail("unknown month abbreviation"))?;

    // "5th" -> "5"
    let suffix_at = day
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .filter(|&i| i > 0)
        .ok_or_else(|| fail("day is missing its ordinal suffix"))?;
    let day: u8 = day[..suffix_at].parse().map_err(|_| fail("day is not a number"))?;
    let year: i32 = year.parse().map_err(|_| fail("year is not a number"))?;

    Date::from_calendar_date(year, month, day)
        .map(ComparableDate)
        .map_err(|_| fail("no such calendar day"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_dataset_convention() {
        let d = parse_date("Jun 5th, 2024").unwrap();
        assert_eq!(d.to_string(), "2024-06-05");
        assert_eq!(parse_date("Dec 31st, 1999").unwrap().to_string(), "1999-12-31");
        assert_eq!(parse_date("Feb 22nd, 2021").unwrap().to_string(), "2021-02-22");
        assert_eq!(parse_date("Mar 3rd, 2023").unwrap().to_string(), "2023-03-03");
    }

    #[test]
    fn ordering_is_chronological() {
        let dates = [
            "Dec 31st, 2019",
            "Jan 1st, 2020",
            "Jan 2nd, 2020",
            "Feb 1st, 2020",
            "Sep 30th, 2020",
            "Oct 1st, 2020",
            "Jan 1st, 2021",
        ];
        let parsed: Vec<_> = dates.iter().map(|s| parse_date(s).unwrap()).collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_date("Sept 5th, 2024").is_err());
        assert!(parse_date("Jun 5th").is_err());
        assert!(parse_date("Jun 5th, 2024 extra").is_err());
        assert!(parse_date("Jun th, 2024").is_err());
        assert!(parse_date("Jun 5, 2024").is_err());
        assert!(parse_date("Feb 30th, 2024").is_err());
        assert!(parse_date("").is_err());
    }
}
