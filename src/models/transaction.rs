use std::str::FromStr;

use crate::storage::{Row, Sheet};
use crate::types::{Date, FormatError, Money};

/// Number of sheet columns a transaction occupies, starting at column A.
pub const TRANSACTION_COLUMNS: usize = 6;

/// Sheet row holding the transaction at index 0. Row 1 is the header.
const FIRST_DATA_ROW: usize = 2;

/// One bank transaction as stored in a ledger or staging sheet.
///
/// Columns, in order: date, description, withdrawn, deposited, category, balance.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub date: Date,
    pub description: String,
    pub withdrawn: Money,
    pub deposited: Money,
    /// Free text the user maintains by hand. Not part of a transaction's identity.
    pub category: String,
    pub balance: Money
}

impl Transaction {
    /// Decodes the first six cells of a sheet row. Missing cells read as empty.
    pub fn parse(row: &[String]) -> Result<Self, FormatError> {
        let cell = |index: usize| row.get(index).map_or("", String::as_str);

        Ok(Transaction {
            date: Date::from_str(cell(0))?,
            description: cell(1).to_string(),
            withdrawn: Money::from_str(cell(2))?,
            deposited: Money::from_str(cell(3))?,
            category: cell(4).to_string(),
            balance: Money::from_str(cell(5))?
        })
    }

    pub fn unparse(&self) -> Row {
        vec![
            self.date.to_string(),
            self.description.clone(),
            self.withdrawn.to_string(),
            self.deposited.to_string(),
            self.category.clone(),
            self.balance.to_string()
        ]
    }

    /// Sheet row of the transaction at `index`.
    pub fn row_of(index: usize) -> usize {
        FIRST_DATA_ROW + index
    }

    pub fn load_one<S: Sheet + ?Sized>(sheet: &S, index: usize) -> Result<Self, FormatError> {
        let rows = sheet.read_rows(Self::row_of(index), 1, 1, TRANSACTION_COLUMNS);

        Transaction::parse(rows.first().map_or(&[][..], Vec::as_slice))
    }

    /// Loads `count` consecutive transactions starting at `index`, in sheet order.
    pub fn load_many<S: Sheet + ?Sized>(sheet: &S, index: usize, count: usize) -> Result<Vec<Self>, FormatError> {
        sheet.read_rows(Self::row_of(index), 1, count, TRANSACTION_COLUMNS)
            .iter()
            .map(|row| Transaction::parse(row))
            .collect()
    }

    /// Overwrites consecutive rows starting at `index` with `transactions`.
    pub fn save<S: Sheet + ?Sized>(sheet: &mut S, index: usize, transactions: &[Transaction]) {
        let rows: Vec<Row> = transactions.iter().map(Transaction::unparse).collect();

        sheet.write_rows(Self::row_of(index), 1, &rows);
    }
}

// Two transactions are the same bank record regardless of how they were categorised.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.description == other.description
            && self.withdrawn == other.withdrawn
            && self.deposited == other.deposited
            && self.balance == other.balance
    }
}

impl Eq for Transaction {}
