//! In-memory record store and the save-flow policy.
//!
//! The store is position-addressed: edit and delete operate on the index of
//! the record in the list, and captured indices become stale after a
//! removal. A save goes through [`RecordStore::plan_save`], which validates
//! the record and detects code collisions; plans that need a human decision
//! are returned to the caller instead of being applied, so the confirmation
//! policy is testable without a UI.

use std::fmt;

use crate::models::InventoryRecord;
use crate::numeric::format_quantity;

/// Rejection reasons for a manually entered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyCode,
    EmptyDescription,
    NegativeQuantity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyCode => write!(f, "El código es obligatorio"),
            ValidationError::EmptyDescription => {
                write!(f, "La descripción del producto es obligatoria")
            }
            ValidationError::NegativeQuantity => {
                write!(f, "Las cantidades no pueden ser negativas")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The decided outcome of a save request. `Confirm*` variants require an
/// explicit user decision before being applied; refusal means no mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SavePlan {
    /// New record, no code conflict: append at the end.
    Append(InventoryRecord),
    /// Edited record, no conflict: replace at its own index.
    Overwrite { index: usize, record: InventoryRecord },
    /// New record whose code already exists: on confirmation the existing
    /// record is overwritten in place, the store size does not change.
    ConfirmOverwrite { conflict: usize, record: InventoryRecord },
    /// Edited record whose code collides with a different record: on
    /// confirmation the edit proceeds and both records share the code.
    ConfirmDuplicate { index: usize, record: InventoryRecord },
}

impl SavePlan {
    pub fn needs_confirmation(&self) -> bool {
        matches!(
            self,
            SavePlan::ConfirmOverwrite { .. } | SavePlan::ConfirmDuplicate { .. }
        )
    }

    pub fn record(&self) -> &InventoryRecord {
        match self {
            SavePlan::Append(record)
            | SavePlan::Overwrite { record, .. }
            | SavePlan::ConfirmOverwrite { record, .. }
            | SavePlan::ConfirmDuplicate { record, .. } => record,
        }
    }

    /// True when the plan replaces an existing record instead of adding one.
    pub fn is_update(&self) -> bool {
        !matches!(self, SavePlan::Append(_))
    }
}

/// Totals over the rows the active filter lets through.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FilterSummary {
    pub visible: usize,
    pub book_total: f64,
}

/// Ordered, mutable list of inventory records; the single source of truth
/// for the running session.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<InventoryRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&InventoryRecord> {
        self.records.get(index)
    }

    pub fn append(&mut self, record: InventoryRecord) {
        self.records.push(record);
    }

    /// Replaces the record at `index`, returning the previous value.
    /// Out-of-range indices leave the store untouched.
    pub fn update(&mut self, index: usize, record: InventoryRecord) -> Option<InventoryRecord> {
        let slot = self.records.get_mut(index)?;
        Some(std::mem::replace(slot, record))
    }

    /// Removes the record at `index`, shifting later positions down.
    /// Indices captured before this call must not be reused.
    pub fn remove_at(&mut self, index: usize) -> Option<InventoryRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Wholesale replacement, used by import.
    pub fn replace_all(&mut self, records: Vec<InventoryRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Index of the first record with exactly this code, skipping
    /// `excluding` (the record currently being edited).
    pub fn find_index_by_code(&self, code: &str, excluding: Option<usize>) -> Option<usize> {
        self.records
            .iter()
            .enumerate()
            .find(|(i, record)| Some(*i) != excluding && record.code == code)
            .map(|(i, _)| i)
    }

    /// Validates the record and decides how the save should proceed.
    /// `editing` is the store index when an existing record is being edited,
    /// `None` for a new one. The store is not mutated here.
    pub fn plan_save(
        &self,
        record: InventoryRecord,
        editing: Option<usize>,
    ) -> Result<SavePlan, ValidationError> {
        validate(&record)?;
        match editing {
            None => match self.find_index_by_code(&record.code, None) {
                None => Ok(SavePlan::Append(record)),
                Some(conflict) => Ok(SavePlan::ConfirmOverwrite { conflict, record }),
            },
            Some(index) => match self.find_index_by_code(&record.code, Some(index)) {
                None => Ok(SavePlan::Overwrite { index, record }),
                Some(_) => Ok(SavePlan::ConfirmDuplicate { index, record }),
            },
        }
    }

    /// Applies a plan. For `Confirm*` variants the caller has already
    /// obtained the user's confirmation.
    pub fn apply(&mut self, plan: SavePlan) {
        match plan {
            SavePlan::Append(record) => self.append(record),
            SavePlan::Overwrite { index, record }
            | SavePlan::ConfirmDuplicate { index, record } => {
                self.update(index, record);
            }
            SavePlan::ConfirmOverwrite { conflict, record } => {
                self.update(conflict, record);
            }
        }
    }

    /// Store indices of the records the filter lets through, in order.
    /// Row actions in the view resolve back through these true indices.
    pub fn visible_indices(&self, query: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches_filter(record, query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn summary(&self, query: &str) -> FilterSummary {
        self.records
            .iter()
            .filter(|record| matches_filter(record, query))
            .fold(FilterSummary::default(), |mut acc, record| {
                acc.visible += 1;
                acc.book_total += record.book_qty;
                acc
            })
    }
}

fn validate(record: &InventoryRecord) -> Result<(), ValidationError> {
    if record.code.trim().is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    if record.description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if record.book_qty < 0.0 || record.counted_qty < 0.0 {
        return Err(ValidationError::NegativeQuantity);
    }
    Ok(())
}

/// Case-insensitive substring match against the four stringified fields.
/// An empty query matches everything.
pub fn matches_filter(record: &InventoryRecord, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.code.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
        || format_quantity(record.book_qty).contains(&needle)
        || format_quantity(record.counted_qty).contains(&needle)
}
