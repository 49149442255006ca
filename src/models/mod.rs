mod transaction;

pub use transaction::{Transaction, TRANSACTION_COLUMNS};
