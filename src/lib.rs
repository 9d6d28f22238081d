pub mod error;
pub mod models;
pub mod numeric;
pub mod sheet;
pub mod storage;
pub mod store;
pub mod ui;

// Re-export commonly used items
pub use error::{AppError, AppResult};
pub use models::{HeaderConfig, InventoryRecord, Theme};
pub use numeric::{format_quantity, normalize_str};
pub use sheet::{build_workbook, file_name, read_inventory, write_inventory};
pub use storage::Storage;
pub use store::{matches_filter, FilterSummary, RecordStore, SavePlan, ValidationError};
