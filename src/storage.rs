//! File-backed persistence for records, theme and header configuration.
//!
//! Each key is one JSON file under the user's data directory. Writes go to
//! a temp file first and are renamed into place, so a crash never leaves a
//! half-written list. Persistence is best-effort: write failures are logged
//! and the session keeps running on its in-memory state.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{HeaderConfig, InventoryRecord, Theme};

const RECORDS_FILE: &str = "inventario.json";
const THEME_FILE: &str = "tema.json";
const HEADER_FILE: &str = "encabezado.json";

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Storage rooted at the platform data directory.
    pub fn open_default() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inventario_asulatina");
        log::info!("Storage directory: {}", dir.display());
        Self::open(dir)
    }

    /// Storage rooted at an explicit directory — used in tests.
    pub fn open(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Loads the persisted record list. Missing or unreadable state yields
    /// an empty list; loaded records are re-normalized (trimmed strings,
    /// finite quantities).
    pub fn load_records(&self) -> Vec<InventoryRecord> {
        match self.read_json::<Vec<InventoryRecord>>(RECORDS_FILE) {
            Ok(Some(records)) => records
                .into_iter()
                .map(InventoryRecord::normalized)
                .collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Could not load inventory state: {}", e);
                Vec::new()
            }
        }
    }

    pub fn save_records(&self, records: &[InventoryRecord]) {
        self.write_json(RECORDS_FILE, &records);
    }

    pub fn load_theme(&self) -> Theme {
        match self.read_json::<Theme>(THEME_FILE) {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                log::error!("Could not load theme: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) {
        self.write_json(THEME_FILE, &theme);
    }

    pub fn load_header(&self) -> HeaderConfig {
        match self.read_json::<HeaderConfig>(HEADER_FILE) {
            Ok(Some(header)) => header,
            Ok(None) => HeaderConfig::default(),
            Err(e) => {
                log::error!("Could not load header configuration: {}", e);
                HeaderConfig::default()
            }
        }
    }

    pub fn save_header(&self, header: &HeaderConfig) {
        self.write_json(HEADER_FILE, header);
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> AppResult<Option<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) {
        if let Err(e) = self.try_write_json(file, value) {
            log::error!("Could not persist {}: {}", file, e);
        }
    }

    fn try_write_json<T: Serialize>(&self, file: &str, value: &T) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!("{file}.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, self.dir.join(file))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(code: &str, description: &str, book: f64, counted: f64) -> InventoryRecord {
        InventoryRecord::new(code, description, book, counted)
    }

    #[test]
    fn records_round_trip() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path().to_path_buf());

        let records = vec![
            record("A-001", "Tornillo", 100.0, 98.0),
            record("B-002", "Tuerca", 50.5, 50.0),
        ];
        storage.save_records(&records);
        assert_eq!(storage.load_records(), records);
    }

    #[test]
    fn missing_files_yield_defaults() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path().join("nested"));

        assert!(storage.load_records().is_empty());
        assert_eq!(storage.load_theme(), Theme::Light);
        assert_eq!(storage.load_header(), HeaderConfig::default());
    }

    #[test]
    fn corrupt_file_is_treated_as_absent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(RECORDS_FILE), "not json {").unwrap();
        let storage = Storage::open(dir.path().to_path_buf());
        assert!(storage.load_records().is_empty());
    }

    #[test]
    fn loads_legacy_payload_with_string_quantities() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(RECORDS_FILE),
            r#"[{"codigo":"  A-001 ","producto":"Tornillo","existencia":"1.234,5","fisico":7}]"#,
        )
        .unwrap();

        let storage = Storage::open(dir.path().to_path_buf());
        let records = storage.load_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "A-001");
        assert_eq!(records[0].book_qty, 1234.5);
        assert_eq!(records[0].counted_qty, 7.0);
    }

    #[test]
    fn keys_are_independent() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path().to_path_buf());

        storage.save_records(&[record("A-001", "Tornillo", 1.0, 1.0)]);
        storage.save_theme(Theme::Dark);
        storage.save_header(&HeaderConfig {
            prepared_by: "ANA".to_string(),
            warehouse_label: "0099".to_string(),
        });

        // Clearing the inventory must not touch the other keys.
        storage.save_records(&[]);

        assert!(storage.load_records().is_empty());
        assert_eq!(storage.load_theme(), Theme::Dark);
        assert_eq!(storage.load_header().prepared_by, "ANA");
    }

    #[test]
    fn theme_round_trips() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(dir.path().to_path_buf());
        storage.save_theme(Theme::Dark);
        assert_eq!(storage.load_theme(), Theme::Dark);
    }
}
