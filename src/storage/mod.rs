mod csv_workbook;
mod errors;
mod memory_sheet;
mod references;
#[cfg(test)]
mod tests;
mod workbook_storage;

use std::ops::{Deref, DerefMut};

pub use csv_workbook::{load_workbook, save_workbook};
pub use errors::StorageError;
pub use memory_sheet::{MemorySheet, RowFormat};
pub use references::RowShift;
pub use workbook_storage::MemoryWorkbook;

pub type Cell = String;
pub type Row = Vec<Cell>;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right
}

impl Alignment {
    pub fn code(self) -> char {
        match self {
            Alignment::Left => 'L',
            Alignment::Center => 'C',
            Alignment::Right => 'R'
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Alignment::Left),
            'C' => Some(Alignment::Center),
            'R' => Some(Alignment::Right),
            _ => None
        }
    }
}

/// A single table of the host workbook.
///
/// Rows and columns are 1-based, as in A1 notation. A cell whose text starts
/// with `=` holds a formula.
pub trait Sheet {
    /// Row number of the last row holding a non-empty cell, or 0 for an empty sheet.
    fn last_row(&self) -> usize;
    fn read_rows(&self, row: usize, column: usize, count: usize, width: usize) -> Vec<Row>;
    fn write_rows(&mut self, row: usize, column: usize, values: &[Row]);
    fn insert_rows_before(&mut self, row: usize, count: usize);
    fn delete_rows(&mut self, row: usize, count: usize);
    /// Formula text of `count` cells in one column; cells holding plain values read as `""`.
    fn read_formulas(&self, row: usize, column: usize, count: usize) -> Vec<String>;
    fn group_depth(&self, row: usize) -> u32;

    fn set_background(&mut self, row: usize, count: usize, color: &str);
    fn set_bold(&mut self, row: usize, count: usize, bold: bool);
    fn set_alignments(&mut self, row: usize, count: usize, alignments: &[Alignment]);
    fn shift_group_depth(&mut self, row: usize, count: usize, delta: i32);
    /// Collapses the row group containing `row`.
    fn collapse_group(&mut self, row: usize);
    fn set_number_format(&mut self, row: usize, column: usize, format: &str);
}

/// Named sheets of a workbook, checked out one at a time.
pub trait Workbook {
    type Sheet: Sheet + Default;

    fn load(&self, name: &str) -> Option<Self::Sheet>;
    fn save(&self, name: &str, sheet: Self::Sheet);
    fn contains(&self, name: &str) -> bool;

    /// Checks a sheet out of the workbook. The sheet is saved back when the guard drops.
    fn checkout(&self, name: &str) -> Option<SheetGuard<'_, Self>>
    where
        Self: Sized,
    {
        let sheet = self.load(name)?;

        Some(SheetGuard {
            workbook: self,
            name: name.to_string(),
            sheet
        })
    }
}

pub struct SheetGuard<'a, W: Workbook> {
    workbook: &'a W,
    name: String,
    sheet: W::Sheet
}

impl<W: Workbook> SheetGuard<'_, W> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Workbook> Deref for SheetGuard<'_, W> {
    type Target = W::Sheet;

    fn deref(&self) -> &Self::Target {
        &self.sheet
    }
}

impl<W: Workbook> DerefMut for SheetGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.sheet
    }
}

impl<W: Workbook> Drop for SheetGuard<'_, W> {
    fn drop(&mut self) {
        let sheet = std::mem::take(&mut self.sheet);
        self.workbook.save(&self.name, sheet);
    }
}
