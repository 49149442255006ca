use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid money: {0}")]
    InvalidMoney(String),
    #[error("invalid money: {0} (overflow)")]
    Overflow(String)
}

impl FormatError {
    pub fn invalid_date(value: &str) -> Self {
        Self::InvalidDate(value.to_string())
    }

    pub fn invalid_money(value: &str) -> Self {
        Self::InvalidMoney(value.to_string())
    }
}
