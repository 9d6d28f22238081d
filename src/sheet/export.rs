//! Renders the record list into a new ASULATINA template workbook.

use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use super::{COLUMNS, HEADER_ROW};
use crate::error::AppResult;
use crate::models::{HeaderConfig, InventoryRecord};

const ORGANIZATION: &str = "ASULATINA";
const SECTION_TITLE: &str = "Existencias del Inventario";
const FILE_PREFIX: &str = "INV_PEREZ_ZELEDON_";
const SHEET_NAME: &str = "Hoja1";

/// Export file name with the date embedded: `INV_PEREZ_ZELEDON_2026-08-31.xlsx`.
pub fn file_name(today: NaiveDate) -> String {
    format!("{FILE_PREFIX}{}.xlsx", today.format("%Y-%m-%d"))
}

/// Builds the workbook in memory: five blank rows, the cosmetic block, the
/// column header at row 14 and one data row per record below it. The full
/// store is written — the active search filter never affects the export.
pub fn build_workbook(
    records: &[InventoryRecord],
    header: &HeaderConfig,
    today: NaiveDate,
) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let short_date = today.format("%d/%m/%Y").to_string();
    sheet.write_string(5, 1, ORGANIZATION)?;
    sheet.write_string(6, 0, &format!("al :{short_date}"))?;
    sheet.write_string(7, 0, "Preparado por: ")?;
    sheet.write_string(7, 1, header.prepared_by.as_str())?;
    sheet.write_string(8, 0, "Fecha: ")?;
    sheet.write_string(8, 1, short_date.as_str())?;
    sheet.write_string(10, 1, SECTION_TITLE)?;
    sheet.write_string(12, 0, "Bodega")?;
    sheet.write_string(12, 1, header.warehouse_label.as_str())?;

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string(HEADER_ROW, col as u16, *title)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = HEADER_ROW + 1 + i as u32;
        sheet.write_string(row, 0, record.code.as_str())?;
        sheet.write_string(row, 1, record.description.as_str())?;
        sheet.write_number(row, 2, record.book_qty)?;
        sheet.write_number(row, 3, record.counted_qty)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Builds the workbook and writes it to `path` in one step; on failure no
/// partial file is left behind by the builder (the buffer either completes
/// or the write is never attempted).
pub fn write_inventory(
    path: &Path,
    records: &[InventoryRecord],
    header: &HeaderConfig,
    today: NaiveDate,
) -> AppResult<()> {
    let bytes = build_workbook(records, header, today)?;
    std::fs::write(path, bytes)?;
    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
