/// Sheet names and presentation settings shared by the import and display procedures.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineConfig {
    /// Staging sheet holding freshly downloaded bank rows, newest first.
    pub import_sheet: String,
    /// Ledger sheet, newest first.
    pub ledger_sheet: String,
    /// Generated monthly summary.
    pub display_sheet: String,
    /// Only checked for existence.
    pub categories_sheet: String,
    pub imported_background: String,
    pub month_format: String
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            import_sheet: "import".to_string(),
            ledger_sheet: "raw".to_string(),
            display_sheet: "display".to_string(),
            categories_sheet: "categories".to_string(),
            imported_background: "#d9ead3".to_string(),
            month_format: "mmmm yyy".to_string()
        }
    }
}

impl EngineConfig {
    /// The ledger sheet name as written in a formula, quoted when it is not a plain identifier.
    pub fn ledger_reference(&self) -> String {
        let name = &self.ledger_sheet;
        let plain = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

        if plain {
            name.clone()
        } else {
            format!("'{}'", name.replace('\'', "''"))
        }
    }
}
