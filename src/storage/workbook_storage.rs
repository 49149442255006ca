use crate::storage::{MemorySheet, Workbook};
use dashmap::iter::Iter;
use dashmap::DashMap;
use std::sync::Arc;

/// Workbook whose sheets live in memory, keyed by sheet name.
///
/// Saving a sheet replays its row insertions and deletions against the
/// references held by the other sheets currently in the workbook. A sheet
/// that is checked out at that moment keeps its references unchanged.
pub struct MemoryWorkbook {
    sheets: Arc<DashMap<String, MemorySheet>>
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self {
            sheets: Arc::new(DashMap::new())
        }
    }

    pub fn with_sheet(self, name: &str, sheet: MemorySheet) -> Self {
        self.sheets.insert(name.to_string(), sheet);
        self
    }

    pub fn iter(&self) -> Iter<'_, String, MemorySheet> {
        self.sheets.iter()
    }
}

impl Default for MemoryWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook for MemoryWorkbook {
    type Sheet = MemorySheet;

    fn load(&self, name: &str) -> Option<MemorySheet> {
        self.sheets.remove(name).map(|(_, sheet)| sheet)
    }

    fn save(&self, name: &str, mut sheet: MemorySheet) {
        let shifts = sheet.take_shifts();

        if !shifts.is_empty() {
            for mut other in self.sheets.iter_mut() {
                if other.key() == name {
                    continue;
                }
                for shift in &shifts {
                    other.value_mut().shift_references_to(name, *shift);
                }
            }
        }

        self.sheets.insert(name.to_string(), sheet);
    }

    fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }
}
