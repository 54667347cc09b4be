use std::{fmt::Display, ops::Deref, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0:?} is not a valid YYYY-MM-DD date")]
pub struct ParseDateError(String);

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Date {
    date: NaiveDate,
}

impl Default for Date {
    fn default() -> Self {
        Self::today()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.date.year(),
            self.date.month(),
            self.date.day()
        )
    }
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        Some(Self {
            date: NaiveDate::from_ymd_opt(year, month, day)?,
        })
    }

    pub fn today() -> Self {
        Self {
            date: chrono::Local::now().date_naive(),
        }
    }

    /// `YYYYMMDD`
    pub fn compact(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// e.g. `Oktober 2026`
    pub fn german_month_year(&self) -> String {
        format!(
            "{} {}",
            GERMAN_MONTHS[self.date.month0() as usize],
            self.date.year()
        )
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Deref for Date {
    type Target = NaiveDate;

    fn deref(&self) -> &Self::Target {
        &self.date
    }
}

impl FromStr for Date {
    type Err = ParseDateError;

    /// Accepts `YYYY-MM-DD`, or any longer timestamp starting with one
    /// (`2024-01-15T00:00:00.000Z`, `2024-01-15 00:00:00`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let day_part = s.get(..10).unwrap_or(s);
        if s.len() > 10 && !matches!(s.as_bytes()[10], b'T' | b' ') {
            return Err(ParseDateError(s.to_string()));
        }
        NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
            .map(Date::from)
            .map_err(|_| ParseDateError(s.to_string()))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
