use tracing::{debug, info};

use crate::engine::config::EngineConfig;
use crate::engine::errors::EngineError;
use crate::models::Transaction;
use crate::storage::{Alignment, Row, Sheet};

/// Summary row that receives every newly written month group.
const TOP_ROW: usize = 2;

/// Ledger columns shown per transaction: date, net, balance, display description, spare.
const LEDGER_COLUMNS: [char; 5] = ['A', 'G', 'F', 'H', 'I'];

const BODY_ALIGNMENTS: [Alignment; 5] = [
    Alignment::Left,
    Alignment::Right,
    Alignment::Right,
    Alignment::Left,
    Alignment::Left
];

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DisplaySummary {
    pub months: usize,
    pub transactions: usize
}

/// Where an existing summary stops.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ResumePoint {
    /// Ledger index of the newest summarised transaction.
    pub previous_index: usize,
    /// Summary rows of the newest month group, header included.
    pub group_rows: usize,
    /// Transactions in the newest month group.
    pub group_transactions: usize
}

impl ResumePoint {
    /// Ledger transactions to reload: everything newer than the newest group, plus the group itself.
    pub fn ledger_rows(&self) -> usize {
        self.previous_index + self.group_transactions
    }
}

/// Splits `transactions` into maximal runs sharing a calendar month.
///
/// Runs keep the input order; a month that appears twice with another month in
/// between yields two groups.
pub fn month_groups(transactions: &[Transaction]) -> Vec<&[Transaction]> {
    let mut groups = Vec::new();
    let mut rest = transactions;

    while let Some(first) = rest.first() {
        let end = rest.iter()
            .position(|transaction| !transaction.date.same_month(&first.date))
            .unwrap_or(rest.len());

        let (group, tail) = rest.split_at(end);
        groups.push(group);
        rest = tail;
    }

    groups
}

/// Ledger index referenced by a summary marker of the form `=<ledger>!A<row>`.
///
/// # Errors
/// Returns `EngineError::InvalidState` for anything else, including references above the first ledger row.
pub fn parse_resume_marker(marker: &str, ledger_reference: &str) -> Result<usize, EngineError> {
    let invalid = || EngineError::invalid_state(format!("unrecognised summary marker {marker:?}"));

    let digits = marker.strip_prefix('=')
        .and_then(|rest| rest.strip_prefix(ledger_reference))
        .and_then(|rest| rest.strip_prefix("!A"))
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(invalid)?;

    let row: usize = digits.parse().map_err(|_| invalid())?;

    row.checked_sub(Transaction::row_of(0)).ok_or_else(invalid)
}

/// Locates the newest month group of an existing summary from its first ledger reference.
pub fn find_resume_point<D: Sheet + ?Sized>(display: &D, ledger_reference: &str) -> Result<ResumePoint, EngineError> {
    let rows = display.last_row().saturating_sub(1);
    let formulas = display.read_formulas(TOP_ROW, 1, rows);

    let offset = formulas.iter()
        .position(|formula| !formula.is_empty())
        .ok_or_else(|| EngineError::invalid_state("summary holds no ledger reference"))?;

    let previous_index = parse_resume_marker(&formulas[offset], ledger_reference)?;
    let group_transactions = formulas[offset..].iter()
        .take_while(|formula| !formula.is_empty())
        .count();

    Ok(ResumePoint {
        previous_index,
        group_rows: offset + group_transactions,
        group_transactions
    })
}

/// Rebuilds the monthly summary from the ledger.
///
/// A summary with no month rows is built from the whole ledger. Otherwise only
/// the ledger rows newer than the summary are added, after the newest month
/// group is discarded so that it is rebuilt together with them.
pub fn display_transactions<L, D>(ledger: &L, display: &mut D, config: &EngineConfig) -> Result<DisplaySummary, EngineError>
where
    L: Sheet + ?Sized,
    D: Sheet + ?Sized,
{
    let ledger_reference = config.ledger_reference();

    let mut transactions = if display.last_row() <= TOP_ROW {
        let total = ledger.last_row().saturating_sub(1);
        info!("Building summary from all {total} ledger transactions");
        Transaction::load_many(ledger, 0, total)?
    } else {
        let resume = find_resume_point(&*display, &ledger_reference)?;
        debug!("Resuming summary from {resume:?}");
        let transactions = Transaction::load_many(ledger, 0, resume.ledger_rows())?;
        display.delete_rows(TOP_ROW, resume.group_rows);
        transactions
    };

    transactions.reverse();

    let groups = month_groups(&transactions);
    let mut remaining = transactions.len();

    for group in &groups {
        remaining -= group.len();
        write_month_group(display, group, remaining, &ledger_reference, config);
    }

    info!("Summary updated with {} transactions in {} months", transactions.len(), groups.len());

    Ok(DisplaySummary {
        months: groups.len(),
        transactions: transactions.len()
    })
}

// `newer` is the number of loaded ledger rows above this group.
fn write_month_group<D: Sheet + ?Sized>(display: &mut D, group: &[Transaction], newer: usize, ledger_reference: &str, config: &EngineConfig) {
    let Some(first) = group.first() else {
        return;
    };

    let body: Vec<Row> = (newer..newer + group.len())
        .map(Transaction::row_of)
        .map(|row| LEDGER_COLUMNS.iter().map(|column| format!("={ledger_reference}!{column}{row}")).collect())
        .collect();

    display.insert_rows_before(TOP_ROW, body.len());
    let depth = display.group_depth(TOP_ROW);
    display.set_bold(TOP_ROW, body.len(), false);
    display.write_rows(TOP_ROW, 1, &body);
    display.shift_group_depth(TOP_ROW, body.len(), 1 - depth as i32);
    display.set_alignments(TOP_ROW, body.len(), &BODY_ALIGNMENTS);
    display.collapse_group(TOP_ROW);

    let header = vec![
        first.date.first_of_month().to_string(),
        format!("=SUM(B{}:B{})", TOP_ROW + 1, TOP_ROW + body.len()),
        format!("=C{}", TOP_ROW + 1),
        String::new()
    ];

    display.insert_rows_before(TOP_ROW, 1);
    display.set_bold(TOP_ROW, 1, true);
    display.shift_group_depth(TOP_ROW, 1, -1);
    display.write_rows(TOP_ROW, 1, &[header]);
    display.set_number_format(TOP_ROW, 1, &config.month_format);

    debug!("Wrote month {} with {} transactions", first.date.first_of_month(), group.len());
}
