use super::references::shift_references;
use super::{load_workbook, save_workbook, Alignment, MemorySheet, MemoryWorkbook, RowFormat, RowShift, Sheet, Workbook};
use anyhow::{anyhow, Result};
use tempfile::tempdir;

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

#[test]
fn test_sheet_last_row_ignores_trailing_blank_rows() {
    let mut sheet = MemorySheet::from_rows(vec![row(&["header"]), row(&["a"]), row(&["", ""])]);

    assert_eq!(sheet.last_row(), 2);

    sheet.write_rows(6, 2, &[row(&["x"])]);

    assert_eq!(sheet.last_row(), 6);
    assert_eq!(MemorySheet::new().last_row(), 0);
}

#[test]
fn test_sheet_reads_blank_cells_past_the_data() {
    let sheet = MemorySheet::from_rows(vec![row(&["a", "b"])]);

    assert_eq!(sheet.read_rows(1, 1, 2, 3), vec![row(&["a", "b", ""]), row(&["", "", ""])]);
    assert_eq!(sheet.read_rows(1, 2, 1, 1), vec![row(&["b"])]);
}

#[test]
fn test_sheet_write_rows_overwrites_in_place() {
    let mut sheet = MemorySheet::from_rows(vec![row(&["h"]), row(&["1", "2", "3"])]);

    sheet.write_rows(2, 2, &[row(&["x"]), row(&["y", "z"])]);

    assert_eq!(sheet.rows(), &[row(&["h"]), row(&["1", "x", "3"]), row(&["", "y", "z"])]);
}

#[test]
fn test_sheet_insert_and_delete_shift_own_references() {
    let mut sheet = MemorySheet::from_rows(vec![
        row(&["header"]),
        row(&["=SUM(B3:B4)", "=C3"]),
        row(&["=D3 - C3"]),
    ]);

    sheet.insert_rows_before(2, 2);

    assert_eq!(sheet.cell(4, 1), "=SUM(B5:B6)");
    assert_eq!(sheet.cell(4, 2), "=C5");
    assert_eq!(sheet.cell(5, 1), "=D5 - C5");
    assert_eq!(sheet.cell(2, 1), "");

    sheet.delete_rows(2, 2);

    assert_eq!(sheet.cell(2, 1), "=SUM(B3:B4)");
    assert_eq!(sheet.cell(3, 1), "=D3 - C3");
    assert_eq!(
        sheet.take_shifts(),
        vec![RowShift::Inserted { at: 2, count: 2 }, RowShift::Deleted { at: 2, count: 2 }]
    );
    assert!(sheet.take_shifts().is_empty());
}

#[test]
fn test_sheet_inserted_rows_inherit_group_depth() {
    let mut sheet = MemorySheet::from_rows(vec![row(&["header"]), row(&["a"])]);
    sheet.shift_group_depth(2, 1, 1);

    sheet.insert_rows_before(2, 1);
    sheet.insert_rows_before(5, 1);

    assert_eq!(sheet.group_depth(2), 1);
    assert_eq!(sheet.group_depth(3), 1);
    assert_eq!(sheet.group_depth(5), 0);
}

#[test]
fn test_sheet_read_formulas_skips_plain_values() {
    let sheet = MemorySheet::from_rows(vec![row(&["01/01/2021"]), row(&["=raw!A2"]), row(&["text"])]);

    assert_eq!(sheet.read_formulas(1, 1, 4), vec!["", "=raw!A2", "", ""]);
}

#[test]
fn test_sheet_presentation_state() {
    let mut sheet = MemorySheet::from_rows(vec![row(&["h"]), row(&["a"]), row(&["b"]), row(&["c"]), row(&["d"])]);

    sheet.set_background(2, 2, "#d9ead3");
    sheet.set_bold(2, 1, true);
    sheet.set_alignments(3, 1, &[Alignment::Left, Alignment::Right]);
    sheet.set_number_format(2, 1, "mmmm yyy");
    sheet.shift_group_depth(3, 2, 1);
    sheet.shift_group_depth(2, 1, -1);
    sheet.collapse_group(4);

    let format = |row| sheet.format(row).cloned().unwrap_or_default();

    assert_eq!(format(2).background.as_deref(), Some("#d9ead3"));
    assert_eq!(format(3).background.as_deref(), Some("#d9ead3"));
    assert!(format(2).bold);
    assert_eq!(format(2).depth, 0);
    assert_eq!(format(3).alignments, vec![Alignment::Left, Alignment::Right]);
    assert_eq!(format(2).number_formats, vec!["mmmm yyy".to_string()]);
    assert!(!format(2).collapsed);
    assert!(format(3).collapsed);
    assert!(format(4).collapsed);
    assert!(!format(5).collapsed);
}

#[test]
fn test_references_shift_only_matching_sheets() {
    let inserted = RowShift::Inserted { at: 2, count: 3 };

    assert_eq!(shift_references("=raw!A2", inserted, |sheet| sheet == Some("raw")), "=raw!A5");
    assert_eq!(shift_references("=raw!A1", inserted, |sheet| sheet == Some("raw")), "=raw!A1");
    assert_eq!(shift_references("=other!A2", inserted, |sheet| sheet == Some("raw")), "=other!A2");
    assert_eq!(shift_references("=B2 + raw!B2", inserted, |sheet| sheet.is_none()), "=B5 + raw!B2");
    assert_eq!(shift_references("='my raw'!$A$2", inserted, |sheet| sheet == Some("my raw")), "='my raw'!$A$5");
    assert_eq!(shift_references("=TRANSACTION_DESCRIPTION(B2)", inserted, |sheet| sheet.is_none()), "=TRANSACTION_DESCRIPTION(B5)");
    assert_eq!(shift_references("=LOG10(A2)", inserted, |sheet| sheet.is_none()), "=LOG10(A5)");
}

#[test]
fn test_references_into_deleted_rows_break() {
    let deleted = RowShift::Deleted { at: 2, count: 2 };

    assert_eq!(shift_references("=C3", deleted, |sheet| sheet.is_none()), "=#REF!");
    assert_eq!(shift_references("=C4 + C1", deleted, |sheet| sheet.is_none()), "=C2 + C1");
}

#[test]
fn test_workbook_checkout_returns_the_sheet_on_drop() -> Result<()> {
    let workbook = MemoryWorkbook::new().with_sheet("raw", MemorySheet::from_rows(vec![row(&["header"])]));

    {
        let mut sheet = workbook.checkout("raw").ok_or_else(|| anyhow!("raw missing"))?;
        assert!(!workbook.contains("raw"));
        sheet.write_rows(2, 1, &[row(&["value"])]);
    }

    assert!(workbook.contains("raw"));
    assert!(workbook.checkout("missing").is_none());

    let sheet = workbook.load("raw").ok_or_else(|| anyhow!("raw missing after checkout"))?;

    assert_eq!(sheet.cell(2, 1), "value");

    Ok(())
}

#[test]
fn test_workbook_save_shifts_references_held_by_other_sheets() -> Result<()> {
    let workbook = MemoryWorkbook::new()
        .with_sheet("raw", MemorySheet::from_rows(vec![row(&["header"]), row(&["a"])]))
        .with_sheet("display", MemorySheet::from_rows(vec![row(&["header"]), row(&["=raw!A2", "=B2"])]));

    {
        let mut raw = workbook.checkout("raw").ok_or_else(|| anyhow!("raw missing"))?;
        raw.insert_rows_before(2, 2);
    }

    let display = workbook.load("display").ok_or_else(|| anyhow!("display missing"))?;

    assert_eq!(display.cell(2, 1), "=raw!A4");
    assert_eq!(display.cell(2, 2), "=B2");

    Ok(())
}

#[test]
fn test_csv_workbook_round_trips_cells_and_formats() -> Result<()> {
    let directory = tempdir()?;

    let mut display = MemorySheet::from_rows(vec![row(&["date", "net"]), row(&["02/01/2021", "=SUM(B3:B3)", "=C3", ""])]);
    display.set_bold(2, 1, true);
    display.set_alignments(2, 1, &[Alignment::Left, Alignment::Right]);
    display.set_number_format(2, 1, "mmmm yyy");
    display.shift_group_depth(3, 1, 1);

    let workbook = MemoryWorkbook::new()
        .with_sheet("raw", MemorySheet::from_rows(vec![row(&["date", "description, with comma"])]))
        .with_sheet("display", display);

    save_workbook(&workbook, directory.path())?;

    assert!(directory.path().join("raw.csv").is_file());
    assert!(directory.path().join("display.format.csv").is_file());
    assert!(!directory.path().join("raw.format.csv").exists());

    let loaded = load_workbook(directory.path())?;

    let raw = loaded.load("raw").ok_or_else(|| anyhow!("raw missing"))?;
    assert_eq!(raw.cell(1, 2), "description, with comma");

    let display = loaded.load("display").ok_or_else(|| anyhow!("display missing"))?;
    assert_eq!(display.cell(2, 2), "=SUM(B3:B3)");
    assert_eq!(display.last_row(), 2);

    let header = display.format(2).cloned().unwrap_or_default();
    assert!(header.bold);
    assert_eq!(header.alignments, vec![Alignment::Left, Alignment::Right]);
    assert_eq!(header.number_formats, vec!["mmmm yyy".to_string()]);
    assert_eq!(display.group_depth(3), 1);
    assert_eq!(display.format(1), Some(&RowFormat::default()));

    Ok(())
}

#[test]
fn test_csv_workbook_rejects_missing_directory() -> Result<()> {
    let directory = tempdir()?;

    assert!(load_workbook(&directory.path().join("missing")).is_err());

    Ok(())
}
