use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use inventario_asulatina::models::{HeaderConfig, InventoryRecord};
use inventario_asulatina::sheet::{build_workbook, file_name, read_inventory, write_inventory};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

fn record(code: &str, description: &str, book: f64, counted: f64) -> InventoryRecord {
    InventoryRecord::new(code, description, book, counted)
}

fn sample_records() -> Vec<InventoryRecord> {
    vec![
        record("A-001", "Tornillo 1/4", 100.0, 98.0),
        record("B-002", "Tuerca 1/4", 50.5, 50.0),
        record("C-003", "Arandela plana", 200.0, 180.0),
    ]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

/// Builds a workbook with the template header at row 14 (0-based 13) and
/// arbitrary cell content below, for exercising the import side alone.
fn template_workbook(rows: &[[&str; 4]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in ["Codigo", "Producto", "Existencia", "Físico"]
        .iter()
        .enumerate()
    {
        sheet.write_string(13, col as u16, *title).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string(14 + i as u32, col as u16, *value)
                    .unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

#[test]
fn export_then_import_reproduces_the_rows_in_order() {
    let records = sample_records();
    let bytes = build_workbook(&records, &HeaderConfig::default(), today()).unwrap();
    let reloaded = read_inventory(&bytes).unwrap();
    assert_eq!(reloaded, records);
}

#[test]
fn export_places_the_template_blocks() {
    let bytes = build_workbook(&sample_records(), &HeaderConfig::default(), today()).unwrap();

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    assert_eq!(
        workbook.sheet_names().first().map(|s| s.as_str()),
        Some("Hoja1")
    );
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();

    let text = |row: u32, col: u32| match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected text at ({row},{col}), got {other:?}"),
    };

    assert_eq!(text(5, 1), "ASULATINA");
    assert_eq!(text(6, 0), "al :31/08/2026");
    assert_eq!(text(7, 0), "Preparado por: ");
    assert_eq!(text(7, 1), "DANIEL FLORES");
    assert_eq!(text(8, 1), "31/08/2026");
    assert_eq!(text(10, 1), "Existencias del Inventario");
    assert_eq!(text(12, 0), "Bodega");
    assert_eq!(text(12, 1), "0018  BODEGA PEREZ ZELEDON");
    assert_eq!(text(13, 0), "Codigo");
    assert_eq!(text(13, 3), "Físico");

    // First data row sits immediately below the header.
    assert_eq!(text(14, 0), "A-001");
    assert_eq!(range.get_value((14, 2)), Some(&Data::Float(100.0)));
}

#[test]
fn export_uses_the_configured_header_values() {
    let header = HeaderConfig {
        prepared_by: "ANA MORA".to_string(),
        warehouse_label: "0021  BODEGA CENTRAL".to_string(),
    };
    let bytes = build_workbook(&sample_records(), &header, today()).unwrap();

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    assert_eq!(
        range.get_value((7, 1)),
        Some(&Data::String("ANA MORA".to_string()))
    );
    assert_eq!(
        range.get_value((12, 1)),
        Some(&Data::String("0021  BODEGA CENTRAL".to_string()))
    );
}

#[test]
fn file_name_embeds_the_date() {
    assert_eq!(file_name(today()), "INV_PEREZ_ZELEDON_2026-08-31.xlsx");
}

#[test]
fn import_drops_rows_with_neither_code_nor_description() {
    let bytes = template_workbook(&[
        ["A-001", "Tornillo", "10", "9"],
        ["", "", "5", "5"],
        ["", "Suelto sin código", "1", "1"],
    ]);
    let records = read_inventory(&bytes).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].code, "A-001");
    assert_eq!(records[1].code, "");
    assert_eq!(records[1].description, "Suelto sin código");
}

#[test]
fn import_normalizes_latin_formatted_quantities() {
    let bytes = template_workbook(&[["A-001", "Tornillo", "1.234,5", "no aplica"]]);
    let records = read_inventory(&bytes).unwrap();
    assert_eq!(records[0].book_qty, 1234.5);
    assert_eq!(records[0].counted_qty, 0.0);
}

#[test]
fn import_trims_code_and_description() {
    let bytes = template_workbook(&[["  A-001  ", "  Tornillo  ", "1", "1"]]);
    let records = read_inventory(&bytes).unwrap();
    assert_eq!(records[0].code, "A-001");
    assert_eq!(records[0].description, "Tornillo");
}

#[test]
fn import_tolerates_a_missing_column() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // No "Físico" header: that column stays zero.
    sheet.write_string(13, 0, "Codigo").unwrap();
    sheet.write_string(13, 1, "Producto").unwrap();
    sheet.write_string(13, 2, "Existencia").unwrap();
    sheet.write_string(14, 0, "A-001").unwrap();
    sheet.write_string(14, 1, "Tornillo").unwrap();
    sheet.write_number(14, 2, 10.0).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let records = read_inventory(&bytes).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].book_qty, 10.0);
    assert_eq!(records[0].counted_qty, 0.0);
}

#[test]
fn import_ignores_a_header_at_the_wrong_row() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Codigo").unwrap();
    sheet.write_string(0, 1, "Producto").unwrap();
    sheet.write_string(1, 0, "A-001").unwrap();
    sheet.write_string(1, 1, "Tornillo").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    // Nothing sits at the template's header row, so no columns resolve and
    // every data row comes out blank.
    let records = read_inventory(&bytes).unwrap();
    assert!(records.is_empty());
}

#[test]
fn import_rejects_garbage_bytes() {
    assert!(read_inventory(b"this is not a workbook").is_err());
    assert!(read_inventory(&[]).is_err());
}

#[test]
fn write_inventory_creates_a_readable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name(today()));
    let records = sample_records();

    write_inventory(&path, &records, &HeaderConfig::default(), today()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(read_inventory(&bytes).unwrap(), records);
}
