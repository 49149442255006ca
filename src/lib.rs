//! Bank transaction ledger kept in spreadsheet tables.
//!
//! New rows downloaded into a staging sheet are merged into a newest-first
//! ledger sheet, and the ledger is rendered as a collapsible month-by-month
//! summary whose cells are formulas referencing the ledger.

pub mod engine;
pub mod models;
pub mod storage;
pub mod types;
