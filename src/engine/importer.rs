use tracing::{debug, info};

use crate::engine::config::EngineConfig;
use crate::engine::errors::EngineError;
use crate::engine::functions::TRANSACTION_DESCRIPTION;
use crate::models::Transaction;
use crate::storage::{Row, Sheet};
use crate::types::Date;

/// First ledger column after the transaction itself: net, a spare column, and the display description.
const DERIVED_COLUMN: usize = 7;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub newest: Option<Date>
}

/// The staged transactions newer than `recent`, in staging order.
///
/// `staged` is newest first. Everything before the first transaction equal to
/// `recent` is new; an empty slice means the ledger is already up to date.
///
/// # Errors
/// Returns `EngineError::NoRecent` when `recent` is not staged at all, since the
/// staging window no longer overlaps the ledger.
pub fn new_transactions<'a>(staged: &'a [Transaction], recent: &Transaction) -> Result<&'a [Transaction], EngineError> {
    let index = staged.iter()
        .position(|transaction| transaction == recent)
        .ok_or(EngineError::NoRecent)?;

    Ok(&staged[..index])
}

/// Copies the staged transactions that are newer than the ledger's newest row
/// to the top of the ledger and marks them as imported in the staging sheet.
pub fn import_transactions<S, L>(staging: &mut S, ledger: &mut L, config: &EngineConfig) -> Result<ImportSummary, EngineError>
where
    S: Sheet + ?Sized,
    L: Sheet + ?Sized,
{
    let count = staging.last_row().saturating_sub(1);
    let staged = Transaction::load_many(&*staging, 0, count)?;

    let recent = if ledger.last_row() < Transaction::row_of(0) {
        None
    } else {
        Some(Transaction::load_one(&*ledger, 0)?)
    };

    debug!("Most recent ledger transaction: {recent:?}");
    for transaction in &staged {
        debug!("Staged transaction: {transaction:?}");
    }

    let fresh = match &recent {
        Some(recent) => new_transactions(&staged, recent)?,
        None => {
            info!("Ledger [{}] is empty, importing every staged transaction", config.ledger_sheet);
            &staged[..]
        }
    };

    if fresh.is_empty() {
        info!("Nothing to import, ledger [{}] is up to date", config.ledger_sheet);
        return Ok(ImportSummary::default());
    }

    let first_row = Transaction::row_of(0);
    ledger.insert_rows_before(first_row, fresh.len());
    Transaction::save(ledger, 0, fresh);

    let derived: Vec<Row> = (0..fresh.len())
        .map(Transaction::row_of)
        .map(|row| vec![
            format!("=D{row} - C{row}"),
            String::new(),
            format!("={TRANSACTION_DESCRIPTION}(B{row})")
        ])
        .collect();
    ledger.write_rows(first_row, DERIVED_COLUMN, &derived);

    info!("import successful: {}", fresh.len());

    staging.set_background(first_row, fresh.len(), &config.imported_background);

    Ok(ImportSummary {
        imported: fresh.len(),
        newest: fresh.first().map(|transaction| transaction.date)
    })
}
