/// Name under which [`transaction_description`] is called from ledger formulas.
pub const TRANSACTION_DESCRIPTION: &str = "TRANSACTION_DESCRIPTION";

/// Cell function producing the display description of a ledger row.
pub fn transaction_description(raw: &str) -> &str {
    raw
}
