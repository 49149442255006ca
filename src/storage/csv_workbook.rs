use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::storage::{MemorySheet, MemoryWorkbook, Row, RowFormat, StorageError, Workbook};

const SHEET_EXTENSION: &str = "csv";
const FORMAT_SUFFIX: &str = ".format.csv";

/// Reads every `<name>.csv` in `directory` into a workbook sheet called `<name>`,
/// along with its `<name>.format.csv` row formatting when present.
pub fn load_workbook(directory: &Path) -> Result<MemoryWorkbook, StorageError> {
    if !directory.is_dir() {
        return Err(StorageError::MissingDirectory(directory.to_path_buf()));
    }

    let workbook = MemoryWorkbook::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();

        let Some(name) = sheet_name(&path) else {
            continue;
        };

        let mut sheet = read_sheet(&path)?;

        let format_path = format_path(directory, &name);
        if format_path.is_file() {
            sheet.set_formats(read_formats(&format_path)?);
        }

        debug!("Loaded sheet [{name}] with {} rows", sheet.rows().len());
        workbook.save(&name, sheet);
    }

    Ok(workbook)
}

/// Writes every sheet of `workbook` back into `directory`.
pub fn save_workbook(workbook: &MemoryWorkbook, directory: &Path) -> Result<(), StorageError> {
    for entry in workbook.iter() {
        let (name, sheet) = entry.pair();

        write_sheet(&directory.join(format!("{name}.{SHEET_EXTENSION}")), sheet)?;

        let format_path = format_path(directory, name);
        if sheet.formats().iter().any(|format| *format != RowFormat::default()) {
            write_formats(&format_path, sheet.formats())?;
        } else {
            match fs::remove_file(&format_path) {
                Err(error) if error.kind() != ErrorKind::NotFound => return Err(error.into()),
                _ => {}
            }
        }

        debug!("Saved sheet [{name}] with {} rows", sheet.rows().len());
    }

    Ok(())
}

fn sheet_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;

    if !path.is_file() || file_name.ends_with(FORMAT_SUFFIX) {
        return None;
    }

    if path.extension()? != SHEET_EXTENSION {
        return None;
    }

    path.file_stem()?.to_str().map(str::to_string)
}

fn format_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{name}{FORMAT_SUFFIX}"))
}

fn read_sheet(path: &Path) -> Result<MemorySheet, StorageError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let rows = reader.records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Row>, _>>()?;

    Ok(MemorySheet::from_rows(rows))
}

fn write_sheet(path: &Path, sheet: &MemorySheet) -> Result<(), StorageError> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;

    for row in sheet.rows() {
        writer.write_record(row)?;
    }

    writer.flush()?;

    Ok(())
}

fn read_formats(path: &Path) -> Result<Vec<RowFormat>, StorageError> {
    let mut reader = ReaderBuilder::new().from_path(path)?;

    let formats = reader.deserialize::<RowFormat>().collect::<Result<Vec<_>, _>>()?;

    Ok(formats)
}

fn write_formats(path: &Path, formats: &[RowFormat]) -> Result<(), StorageError> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    for format in formats {
        writer.serialize(format)?;
    }

    writer.flush()?;

    Ok(())
}
