//! Reads inventory records out of an ASULATINA template workbook.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use super::{COLUMNS, HEADER_ROW};
use crate::error::{AppError, AppResult};
use crate::models::InventoryRecord;
use crate::numeric::{cell_text, normalize_cell};

/// Parses raw workbook bytes into inventory records.
///
/// Only the first sheet is consulted. Columns are located by their header
/// text on row 14; a missing header leaves that column empty/zero for every
/// row. Rows with neither code nor description are dropped. Parse failures
/// leave the caller's store untouched — import is all-or-nothing.
pub fn read_inventory(bytes: &[u8]) -> AppResult<Vec<InventoryRecord>> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(AppError::MissingSheet)??;

    let Some(end) = range.end() else {
        return Ok(Vec::new());
    };

    let columns = locate_columns(&range);
    let mut records = Vec::new();
    for row in (HEADER_ROW + 1)..=end.0 {
        let code = columns[0].map(|c| cell_text(cell(&range, row, c)));
        let description = columns[1].map(|c| cell_text(cell(&range, row, c)));
        let book_qty = columns[2].map_or(0.0, |c| normalize_cell(cell(&range, row, c)));
        let counted_qty = columns[3].map_or(0.0, |c| normalize_cell(cell(&range, row, c)));

        let record = InventoryRecord::new(
            code.as_deref().unwrap_or(""),
            description.as_deref().unwrap_or(""),
            book_qty,
            counted_qty,
        );
        if !record.is_blank() {
            records.push(record);
        }
    }

    log::info!("Imported {} records from spreadsheet", records.len());
    Ok(records)
}

/// Maps each template column title to its column index on the header row.
fn locate_columns(range: &Range<Data>) -> [Option<u32>; 4] {
    let mut found = [None; 4];
    let Some(end) = range.end() else {
        return found;
    };
    for col in 0..=end.1 {
        if let Some(Data::String(title)) = range.get_value((HEADER_ROW, col)) {
            let title = title.trim();
            for (slot, name) in found.iter_mut().zip(COLUMNS) {
                if slot.is_none() && title == name {
                    *slot = Some(col);
                }
            }
        }
    }
    found
}

fn cell<'a>(range: &'a Range<Data>, row: u32, col: u32) -> &'a Data {
    range.get_value((row, col)).unwrap_or(&Data::Empty)
}
