use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::storage::references::{shift_references, RowShift};
use crate::storage::{Alignment, Row, Sheet};

/// Presentation state of one sheet row.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RowFormat {
    pub background: Option<String>,
    pub bold: bool,
    pub depth: u32,
    pub collapsed: bool,
    /// One alignment per column, starting at column A.
    #[serde(with = "alignment_codes")]
    pub alignments: Vec<Alignment>,
    /// One number format per column, starting at column A. Empty means the default format.
    #[serde(with = "number_format_list")]
    pub number_formats: Vec<String>
}

impl RowFormat {
    fn inheriting(depth: u32) -> Self {
        Self { depth, ..Self::default() }
    }
}

mod alignment_codes {
    use super::*;

    pub fn serialize<S: Serializer>(alignments: &[Alignment], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&alignments.iter().map(|alignment| alignment.code()).collect::<String>())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Alignment>, D::Error> {
        let codes = String::deserialize(deserializer)?;

        codes.chars()
            .map(|code| Alignment::from_code(code).ok_or_else(|| de::Error::custom(format!("unknown alignment '{code}'"))))
            .collect()
    }
}

mod number_format_list {
    use super::*;

    const SEPARATOR: char = '\t';

    pub fn serialize<S: Serializer>(formats: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&formats.join(&SEPARATOR.to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let joined = String::deserialize(deserializer)?;

        if joined.is_empty() {
            return Ok(Vec::new());
        }

        Ok(joined.split(SEPARATOR).map(str::to_string).collect())
    }
}

/// In-memory sheet: text cells plus row formatting.
///
/// Inserting or deleting rows rewrites the unqualified references of this
/// sheet's formulas, and records the edit so the owning workbook can rewrite
/// references held by other sheets.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rows: Vec<Row>,
    formats: Vec<RowFormat>,
    shifts: Vec<RowShift>
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        let formats = vec![RowFormat::default(); rows.len()];

        Self {
            rows,
            formats,
            shifts: Vec::new()
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn formats(&self) -> &[RowFormat] {
        &self.formats
    }

    pub fn set_formats(&mut self, mut formats: Vec<RowFormat>) {
        if formats.len() > self.rows.len() {
            self.ensure_rows(formats.len());
        }
        formats.resize(self.rows.len(), RowFormat::default());
        self.formats = formats;
    }

    pub fn format(&self, row: usize) -> Option<&RowFormat> {
        self.formats.get(row.checked_sub(1)?)
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        row.checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .and_then(|cells| cells.get(column.checked_sub(1)?))
            .map_or("", String::as_str)
    }

    /// Structural edits made since the last call, oldest first.
    pub fn take_shifts(&mut self) -> Vec<RowShift> {
        std::mem::take(&mut self.shifts)
    }

    /// Rewrites references into the sheet called `name` after it was edited by `shift`.
    pub fn shift_references_to(&mut self, name: &str, shift: RowShift) {
        self.rewrite_formulas(shift, |sheet| sheet == Some(name));
    }

    fn rewrite_formulas(&mut self, shift: RowShift, targets: impl Fn(Option<&str>) -> bool) {
        for cell in self.rows.iter_mut().flatten() {
            if cell.starts_with('=') {
                *cell = shift_references(cell, shift, &targets);
            }
        }
    }

    fn ensure_rows(&mut self, count: usize) {
        if self.rows.len() < count {
            self.rows.resize_with(count, Vec::new);
            self.formats.resize_with(count, RowFormat::default);
        }
    }

    fn formats_mut(&mut self, row: usize, count: usize) -> &mut [RowFormat] {
        let start = row.saturating_sub(1);
        self.ensure_rows(start + count);
        &mut self.formats[start..start + count]
    }
}

impl Sheet for MemorySheet {
    fn last_row(&self) -> usize {
        self.rows.iter()
            .rposition(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |index| index + 1)
    }

    fn read_rows(&self, row: usize, column: usize, count: usize, width: usize) -> Vec<Row> {
        (row..row + count)
            .map(|row| (column..column + width).map(|column| self.cell(row, column).to_string()).collect())
            .collect()
    }

    fn write_rows(&mut self, row: usize, column: usize, values: &[Row]) {
        let start = row.saturating_sub(1);
        let offset = column.saturating_sub(1);
        self.ensure_rows(start + values.len());

        for (cells, values) in self.rows[start..].iter_mut().zip(values) {
            if cells.len() < offset + values.len() {
                cells.resize(offset + values.len(), String::new());
            }
            cells[offset..offset + values.len()].clone_from_slice(values);
        }
    }

    fn insert_rows_before(&mut self, row: usize, count: usize) {
        let index = row.saturating_sub(1);
        self.ensure_rows(index);

        let depth = self.formats.get(index).map_or(0, |format| format.depth);
        let shift = RowShift::Inserted { at: row, count };
        self.rewrite_formulas(shift, |sheet| sheet.is_none());

        self.rows.splice(index..index, (0..count).map(|_| Vec::new()));
        self.formats.splice(index..index, (0..count).map(|_| RowFormat::inheriting(depth)));
        self.shifts.push(shift);
    }

    fn delete_rows(&mut self, row: usize, count: usize) {
        let index = row.saturating_sub(1);
        let end = (index + count).min(self.rows.len());

        if index < end {
            self.rows.drain(index..end);
            self.formats.drain(index..end);
        }

        let shift = RowShift::Deleted { at: row, count };
        self.rewrite_formulas(shift, |sheet| sheet.is_none());
        self.shifts.push(shift);
    }

    fn read_formulas(&self, row: usize, column: usize, count: usize) -> Vec<String> {
        (row..row + count)
            .map(|row| self.cell(row, column))
            .map(|cell| if cell.starts_with('=') { cell.to_string() } else { String::new() })
            .collect()
    }

    fn group_depth(&self, row: usize) -> u32 {
        self.format(row).map_or(0, |format| format.depth)
    }

    fn set_background(&mut self, row: usize, count: usize, color: &str) {
        for format in self.formats_mut(row, count) {
            format.background = Some(color.to_string());
        }
    }

    fn set_bold(&mut self, row: usize, count: usize, bold: bool) {
        for format in self.formats_mut(row, count) {
            format.bold = bold;
        }
    }

    fn set_alignments(&mut self, row: usize, count: usize, alignments: &[Alignment]) {
        for format in self.formats_mut(row, count) {
            format.alignments = alignments.to_vec();
        }
    }

    fn shift_group_depth(&mut self, row: usize, count: usize, delta: i32) {
        for format in self.formats_mut(row, count) {
            format.depth = format.depth.saturating_add_signed(delta);
        }
    }

    fn collapse_group(&mut self, row: usize) {
        let depth = self.group_depth(row);
        if depth == 0 {
            return;
        }

        let index = row - 1;
        let start = self.formats[..index].iter()
            .rposition(|format| format.depth < depth)
            .map_or(0, |before| before + 1);
        let end = self.formats[index..].iter()
            .position(|format| format.depth < depth)
            .map_or(self.formats.len(), |after| index + after);

        for format in &mut self.formats[start..end] {
            format.collapsed = true;
        }
    }

    fn set_number_format(&mut self, row: usize, column: usize, format: &str) {
        let offset = column.saturating_sub(1);
        let row_format = &mut self.formats_mut(row, 1)[0];

        if row_format.number_formats.len() <= offset {
            row_format.number_formats.resize(offset + 1, String::new());
        }
        row_format.number_formats[offset] = format.to_string();
    }
}
