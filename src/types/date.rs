use crate::types::errors::FormatError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar date as written in the ledger: `MM/DD/YYYY`.
///
/// Only the ranges of the individual fields are checked, so `02/30/2021` is
/// accepted. Months are never matched against their real length.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Copy of this date with the day replaced.
    pub fn with_day(self, day: u32) -> Self {
        Self { day, ..self }
    }

    pub fn first_of_month(self) -> Self {
        self.with_day(1)
    }

    pub fn same_month(&self, other: &Date) -> bool {
        self.month == other.month && self.year == other.year
    }
}

impl Display for Date {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:02}/{:02}/{}", self.month, self.day, self.year)
    }
}

impl FromStr for Date {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split('/').collect();

        let [month, day, year] = parts[..] else {
            return Err(FormatError::invalid_date(value));
        };

        let field = |part: &str| part.trim().parse::<i64>().map_err(|_| FormatError::invalid_date(value));
        let (month, day, year) = (field(month)?, field(day)?, field(year)?);

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(1000..=9999).contains(&year) {
            return Err(FormatError::invalid_date(value));
        }

        Ok(Date {
            year: year as i32,
            month: month as u32,
            day: day as u32
        })
    }
}
