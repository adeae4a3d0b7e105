//! Calendar periods accepted by the scheduler export.
//!
//! Format: `Y<yyyy>M<mm>` for a month, `Y<yyyy>W<ww>` for a week. The portal
//! only exports present or future periods; that is not checked here.

use std::fmt;
use std::str::FromStr;

use crate::error::StineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPeriod {
    Month { year: u16, month: u8 },
    Week { year: u16, week: u8 },
}

impl ExportPeriod {
    pub fn month(year: u16, month: u8) -> Result<Self, StineError> {
        if !(1..=12).contains(&month) {
            return Err(StineError::InvalidPeriod(format!("month {month} out of range")));
        }
        Ok(Self::Month { year, month })
    }

    pub fn week(year: u16, week: u8) -> Result<Self, StineError> {
        if !(1..=53).contains(&week) {
            return Err(StineError::InvalidPeriod(format!("week {week} out of range")));
        }
        Ok(Self::Week { year, week })
    }
}

impl fmt::Display for ExportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "Y{year:04}M{month:02}"),
            Self::Week { year, week } => write!(f, "Y{year:04}W{week:02}"),
        }
    }
}

impl FromStr for ExportPeriod {
    type Err = StineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            StineError::InvalidPeriod(format!(
                "'{s}' (expected Y<yyyy>M<mm> or Y<yyyy>W<ww>)"
            ))
        };

        let rest = s.strip_prefix('Y').ok_or_else(invalid)?;
        if rest.len() != 7 || !rest.is_ascii() {
            return Err(invalid());
        }
        let (year, rest) = rest.split_at(4);
        let (kind, number) = rest.split_at(1);

        let all_digits = |v: &str| v.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year) || !all_digits(number) {
            return Err(invalid());
        }
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let number: u8 = number.parse().map_err(|_| invalid())?;

        match kind {
            "M" => Self::month(year, number),
            "W" => Self::week(year, number),
            _ => Err(invalid()),
        }
    }
}
