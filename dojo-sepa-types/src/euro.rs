use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseEuroError {
    #[error("empty amount")]
    Empty,
    #[error("amount {0:?} is not a decimal number")]
    NotANumber(String),
    #[error("amount is not finite")]
    NotFinite,
    #[error("amount {0} exceeds 999999999.99")]
    TooLarge(String),
}

/// An amount in euros, always held rounded to whole cents.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct Euro(Decimal);

impl Euro {
    pub const ZERO: Euro = Euro(Decimal::ZERO);
    /// 999999999.99, the largest single amount a pain.008 `InstdAmt` can carry.
    pub const MAX: Euro = Euro(Decimal::from_parts(1_215_752_191, 23, 0, false, 2));

    pub fn new(euros: i64, cents: i64) -> Self {
        Euro(Decimal::from(euros) + Decimal::new(cents, 2)).round()
    }

    /// Two fraction digits, `.` as separator, no currency sign.
    pub fn xml_string(&self) -> String {
        let mut value = self.0;
        value.rescale(2);
        value.to_string()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Parses decimal text and reports whether rounding to cents changed the value.
    pub fn parse_lossy(s: &str) -> Result<(Self, bool), ParseEuroError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseEuroError::Empty);
        }
        let exact =
            Decimal::from_str(s).map_err(|_| ParseEuroError::NotANumber(s.to_string()))?;
        let euro = Euro(exact).round();
        if euro.0.abs() > Self::MAX.0 {
            return Err(ParseEuroError::TooLarge(s.to_string()));
        }
        Ok((euro, euro.0 != exact))
    }

    /// Like [`Euro::parse_lossy`], reading the float through its shortest
    /// round-trip representation so `10.005` is the decimal `10.005`.
    pub fn from_f64_lossy(value: f64) -> Result<(Self, bool), ParseEuroError> {
        if !value.is_finite() {
            return Err(ParseEuroError::NotFinite);
        }
        Self::parse_lossy(&value.to_string())
    }

    /// rounds to the nearest cent, halves away from zero
    fn round(mut self) -> Self {
        self.0 = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        self
    }
}

impl FromStr for Euro {
    type Err = ParseEuroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lossy(s).map(|(euro, _)| euro)
    }
}

impl TryFrom<f64> for Euro {
    type Error = ParseEuroError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64_lossy(value).map(|(euro, _)| euro)
    }
}

impl From<i64> for Euro {
    fn from(value: i64) -> Self {
        Euro::new(value, 0)
    }
}

impl Sum for Euro {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Add for Euro {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Euro(self.0 + rhs.0).round()
    }
}

impl AddAssign for Euro {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Debug for Euro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Euro").field(&self.xml_string()).finish()
    }
}

impl Display for Euro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "€{}", self.xml_string())
    }
}
