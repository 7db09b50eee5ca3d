//! Month keys for the monthly leaderboard.
//!
//! Input is lenient: every non-digit is dropped and the first six digits are
//! read as `YYYYMM`, so `2024-03`, `202403`, `20240315` and `2024/03/01` all
//! name March 2024. Input with fewer than six digits names the current month.
//! The canonical storage form is `YYYYMM01`; the display form is `YYYY-MM`.

use std::fmt;

use serde::{Serialize, Serializer};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: u16,
    month: u8,
}

impl MonthKey {
    pub fn new(year: u16, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parse a loosely formatted year-month. `None` when fewer than six
    /// digits are present or the month is not 01-12.
    pub fn parse(input: &str) -> Option<Self> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 6 {
            return None;
        }
        let year = digits[0..4].parse().ok()?;
        let month = digits[4..6].parse().ok()?;
        Self::new(year, month)
    }

    /// Resolve request input against `now`: blank or short input means the
    /// month containing `now`. `None` only when the month digits are not 01-12.
    pub fn resolve(input: Option<&str>, now: OffsetDateTime) -> Option<Self> {
        let digits = input.map_or(0, |raw| raw.chars().filter(char::is_ascii_digit).count());
        match input {
            Some(raw) if digits >= 6 => Self::parse(raw),
            _ => Some(Self::containing(now)),
        }
    }

    /// Inverse of [`MonthKey::canonical`].
    pub fn from_canonical(key: &str) -> Option<Self> {
        if key.len() != 8 || !key.ends_with("01") {
            return None;
        }
        Self::parse(key)
    }

    pub fn containing(at: OffsetDateTime) -> Self {
        Self {
            year: at.year().clamp(0, i32::from(u16::MAX)) as u16,
            month: u8::from(at.month()),
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// Storage form, `YYYYMM01`.
    pub fn canonical(&self) -> String {
        format!("{:04}{:02}01", self.year, self.month)
    }

    /// Display form, `YYYY-MM`.
    pub fn display(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
