use std::time::{Duration, Instant};

use crate::models::InventoryRecord;
use crate::numeric::{format_quantity, normalize_str};
use crate::store::SavePlan;

/// Form state for the create/edit window. Quantities are kept as text and
/// normalized on save, like the original form inputs.
#[derive(Default)]
pub struct EditorState {
    pub open: bool,
    /// Store index of the record being edited; `None` for a new record.
    pub editing: Option<usize>,
    pub code: String,
    pub description: String,
    pub book_qty: String,
    pub counted_qty: String,
}

impl EditorState {
    pub fn open_new(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    pub fn open_edit(&mut self, index: usize, record: &InventoryRecord) {
        self.open = true;
        self.editing = Some(index);
        self.code = record.code.clone();
        self.description = record.description.clone();
        self.book_qty = format_quantity(record.book_qty);
        self.counted_qty = format_quantity(record.counted_qty);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Editar producto"
        } else {
            "Nuevo producto"
        }
    }

    pub fn save_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Actualizar"
        } else {
            "Guardar"
        }
    }

    pub fn to_record(&self) -> InventoryRecord {
        InventoryRecord::new(
            &self.code,
            &self.description,
            normalize_str(&self.book_qty),
            normalize_str(&self.counted_qty),
        )
    }
}

/// Form state for editing the export header block.
#[derive(Default)]
pub struct HeaderEditorState {
    pub open: bool,
    pub prepared_by: String,
    pub warehouse_label: String,
}

/// A decision the user must make before the operation proceeds. Cancelling
/// drops the pending operation with no mutation.
pub enum Confirmation {
    DuplicateCode(SavePlan),
    ClearAll,
}

impl Confirmation {
    pub fn message(&self) -> String {
        match self {
            Confirmation::DuplicateCode(SavePlan::ConfirmOverwrite { record, .. }) => format!(
                "Ya existe un producto con el código {}. ¿Desea sobrescribirlo?",
                record.code
            ),
            Confirmation::DuplicateCode(plan) => format!(
                "Otro producto ya usa el código {}. ¿Desea continuar de todos modos?",
                plan.record().code
            ),
            Confirmation::ClearAll => {
                "Se eliminarán todos los registros del inventario. ¿Desea continuar?".to_string()
            }
        }
    }
}

/// Transient notification shown in the corner of the window.
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl Toast {
    // Matches the 3500 ms auto-hide of the original notifications.
    const LIFETIME: Duration = Duration::from_millis(3500);

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() >= Self::LIFETIME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_round_trips_a_record() {
        let record = InventoryRecord::new("A-001", "Tornillo", 100.0, 98.5);
        let mut editor = EditorState::default();
        editor.open_edit(3, &record);

        assert_eq!(editor.editing, Some(3));
        assert_eq!(editor.book_qty, "100");
        assert_eq!(editor.counted_qty, "98.5");
        assert_eq!(editor.to_record(), record);
        assert_eq!(editor.title(), "Editar producto");
    }

    #[test]
    fn editor_normalizes_latin_quantities() {
        let editor = EditorState {
            open: true,
            editing: None,
            code: " A-002 ".to_string(),
            description: "Tuerca".to_string(),
            book_qty: "1.234,5".to_string(),
            counted_qty: "".to_string(),
        };
        let record = editor.to_record();
        assert_eq!(record.code, "A-002");
        assert_eq!(record.book_qty, 1234.5);
        assert_eq!(record.counted_qty, 0.0);
        assert_eq!(editor.title(), "Nuevo producto");
    }
}
