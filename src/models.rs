use serde::{Deserialize, Deserializer, Serialize};

use crate::numeric::normalize_str;

/// One inventory line item. The serialized field names mirror the ASULATINA
/// spreadsheet columns, so persisted JSON stays compatible with the data the
/// original web app kept in localStorage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "producto", default)]
    pub description: String,
    /// Book quantity ("Existencia")
    #[serde(rename = "existencia", default, deserialize_with = "lenient_qty")]
    pub book_qty: f64,
    /// Physically counted quantity ("Físico")
    #[serde(rename = "fisico", default, deserialize_with = "lenient_qty")]
    pub counted_qty: f64,
}

impl InventoryRecord {
    pub fn new(code: &str, description: &str, book_qty: f64, counted_qty: f64) -> Self {
        Self {
            code: code.trim().to_string(),
            description: description.trim().to_string(),
            book_qty: finite_or_zero(book_qty),
            counted_qty: finite_or_zero(counted_qty),
        }
    }

    /// Re-applies the field invariants after deserialization: trimmed
    /// strings, finite quantities.
    pub fn normalized(self) -> Self {
        Self::new(&self.code, &self.description, self.book_qty, self.counted_qty)
    }

    /// A record with neither code nor description carries no information
    /// and is dropped at import time.
    pub fn is_blank(&self) -> bool {
        self.code.is_empty() && self.description.is_empty()
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Accepts quantities stored either as numbers or as formatted text
/// ("1.234,5"); anything else collapses to 0.
fn lenient_qty<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
        serde_json::Value::String(s) => normalize_str(&s),
        _ => 0.0,
    })
}

/// User-editable values for the cosmetic block of the exported spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    #[serde(rename = "preparadoPor")]
    pub prepared_by: String,
    #[serde(rename = "bodega")]
    pub warehouse_label: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            prepared_by: "DANIEL FLORES".to_string(),
            warehouse_label: "0018  BODEGA PEREZ ZELEDON".to_string(),
        }
    }
}

/// Light or dark theme, applied to the whole window at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "claro")]
    Light,
    #[serde(rename = "oscuro")]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "claro",
            Theme::Dark => "oscuro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "claro" => Some(Theme::Light),
            "oscuro" => Some(Theme::Dark),
            _ => None,
        }
    }
}
