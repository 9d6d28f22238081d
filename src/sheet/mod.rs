//! Spreadsheet adapters for the ASULATINA count template.
//!
//! The template carries a cosmetic block in the first rows; the real column
//! header sits at physical row 14 and data starts on the row below. Import
//! and export share these layout constants.

pub mod export;
pub mod import;

pub use export::{build_workbook, file_name, write_inventory};
pub use import::read_inventory;

/// Absolute row (0-based) of the `Codigo / Producto / Existencia / Físico`
/// header.
pub(crate) const HEADER_ROW: u32 = 13;

/// Column titles, in sheet order.
pub(crate) const COLUMNS: [&str; 4] = ["Codigo", "Producto", "Existencia", "Físico"];
