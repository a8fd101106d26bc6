//! Calendar month key.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, ordered chronologically and rendered as `YYYY-MM`.
///
/// Years before 1 CE render with a leading sign (`-0005-03`) and parse back
/// to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a key; `month` must be in `1..=12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if matches!(month, 1..=12) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Truncates a date to its month.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month in `1..=12`.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}", self.year.unsigned_abs(), self.month)
        } else {
            write!(f, "{:04}-{:02}", self.year, self.month)
        }
    }
}

impl std::str::FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month key: {s}");
        let (year, month) = s.rsplit_once('-').ok_or_else(invalid)?;
        if month.is_empty() || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_truncates_day() {
        let key = MonthKey::of(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        assert_eq!(key, MonthKey::new(2025, 1).unwrap());
        assert_eq!(key.to_string(), "2025-01");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec = MonthKey::new(2024, 12).unwrap();
        let jan = MonthKey::new(2025, 1).unwrap();
        let feb = MonthKey::new(2025, 2).unwrap();
        assert!(dec < jan && jan < feb);
    }

    #[test]
    fn test_parse() {
        assert_eq!("2025-02".parse::<MonthKey>(), Ok(MonthKey::new(2025, 2).unwrap()));
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("2025".parse::<MonthKey>().is_err());
        assert!(MonthKey::new(2025, 0).is_none());
    }

    #[test]
    fn test_negative_year_round_trips() {
        let key = MonthKey::new(-5, 3).unwrap();
        assert_eq!(key.to_string(), "-0005-03");
        assert_eq!("-0005-03".parse::<MonthKey>(), Ok(key));

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"-0005-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);

        let bc = MonthKey::of(NaiveDate::from_ymd_opt(-44, 3, 15).unwrap());
        assert_eq!(bc.to_string().parse::<MonthKey>(), Ok(bc));
        assert!(bc < MonthKey::new(1, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_signed_month() {
        assert!("2025-+3".parse::<MonthKey>().is_err());
        assert!("2025-".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2025, 3).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-03\"");
        let back: MonthKey = serde_json::from_str("\"2025-03\"").unwrap();
        assert_eq!(back, key);
    }
}
