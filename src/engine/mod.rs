mod config;
mod display;
mod errors;
mod functions;
mod importer;

use std::sync::Arc;

use tracing::error;

pub use config::EngineConfig;
pub use display::{display_transactions, find_resume_point, month_groups, parse_resume_marker, DisplaySummary, ResumePoint};
pub use errors::EngineError;
pub use functions::{transaction_description, TRANSACTION_DESCRIPTION};
pub use importer::{import_transactions, new_transactions, ImportSummary};

use crate::storage::{SheetGuard, Workbook};

/// Runs the import and display procedures against the sheets of a workbook.
///
/// Each call checks the sheets it needs out of the workbook and returns them
/// when it finishes, including on failure. Writes made before a failure are
/// kept.
pub struct LedgerEngine<W: Workbook> {
    workbook: Arc<W>,
    config: EngineConfig
}

impl<W: Workbook> LedgerEngine<W> {
    pub fn new(workbook: Arc<W>) -> Self {
        Self {
            workbook,
            config: EngineConfig::default()
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Appends the new rows of the staging sheet to the ledger.
    pub fn import_data(&self) -> Result<ImportSummary, EngineError> {
        self.run_import().inspect_err(|error| error!("{error}"))
    }

    /// Brings the monthly summary up to date with the ledger.
    pub fn display_data(&self) -> Result<DisplaySummary, EngineError> {
        self.run_display().inspect_err(|error| error!("{error}"))
    }

    fn run_import(&self) -> Result<ImportSummary, EngineError> {
        let mut staging = self.checkout(&self.config.import_sheet)?;
        let mut ledger = self.checkout(&self.config.ledger_sheet)?;

        import_transactions(&mut *staging, &mut *ledger, &self.config)
    }

    fn run_display(&self) -> Result<DisplaySummary, EngineError> {
        let ledger = self.checkout(&self.config.ledger_sheet)?;
        let mut display = self.checkout(&self.config.display_sheet)?;

        if !self.workbook.contains(&self.config.categories_sheet) {
            return Err(EngineError::missing_sheet(&self.config.categories_sheet));
        }

        display_transactions(&*ledger, &mut *display, &self.config)
    }

    fn checkout(&self, name: &str) -> Result<SheetGuard<'_, W>, EngineError> {
        self.workbook.checkout(name).ok_or_else(|| EngineError::missing_sheet(name))
    }
}
