use crate::types::errors::FormatError;
use regex::Regex;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

const SCALE: i64 = 100;

static MONEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$(\d{1,3}(?:,\d{3})+|\d+)\.(\d{2})$").expect("money pattern is a valid regex")
});

/// A currency amount in whole cents.
///
/// The text form is `$#,###.##`. Zero is written as the empty string and the
/// empty string reads back as zero, so zero has no other spelling.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl Display for Money {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return Ok(());
        }

        //NOTE: The text format has no sign. Negative amounts are rendered with a leading '-' and will not parse back.
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let dollars = group_thousands(&(abs / SCALE as u64).to_string());
        let cents = abs % SCALE as u64;

        write!(formatter, "{sign}${dollars}.{cents:02}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

impl FromStr for Money {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Ok(Money::ZERO);
        }

        let captures = MONEY_PATTERN.captures(value)
            .ok_or_else(|| FormatError::invalid_money(value))?;

        let dollars: i64 = captures[1].replace(',', "").parse()
            .map_err(|_| FormatError::Overflow(value.to_string()))?;
        let cents: i64 = captures[2].parse()
            .map_err(|_| FormatError::invalid_money(value))?;

        dollars.checked_mul(SCALE)
            .and_then(|v| v.checked_add(cents))
            .map(Money)
            .ok_or_else(|| FormatError::Overflow(value.to_string()))
    }
}
