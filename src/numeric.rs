//! Numeric normalization for spreadsheet cells and form input.
//!
//! Quantities arrive as plain numbers, as Latin-formatted text ("1.234,5":
//! dot for thousands, comma for decimals) or empty. Everything funnels
//! through [`normalize_str`], which is total: bad input becomes 0.

use calamine::Data;

/// Converts a quantity string to a number.
///
/// Dots are treated as thousands separators and stripped; the first comma
/// becomes the decimal point. Empty or unparseable input yields 0.
pub fn normalize_str(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let standardized = trimmed.replace('.', "").replacen(',', ".", 1);
    standardized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Converts a spreadsheet cell to a quantity. Numbers pass through
/// unchanged, strings go through [`normalize_str`], anything else is 0.
pub fn normalize_cell(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) if f.is_finite() => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => normalize_str(s),
        _ => 0.0,
    }
}

/// Trimmed string form of a spreadsheet cell, for the code and
/// description columns. Missing or non-text cells stringify leniently.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_quantity(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Stringifies a quantity the way the table and the filter see it:
/// integral values without a trailing ".0".
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_latin_formatted_text() {
        assert_eq!(normalize_str("1.234,5"), 1234.5);
        assert_eq!(normalize_str("2.000"), 2000.0);
        assert_eq!(normalize_str("0,25"), 0.25);
    }

    #[test]
    fn normalizes_plain_numbers_and_whitespace() {
        assert_eq!(normalize_str("42"), 42.0);
        assert_eq!(normalize_str("  7  "), 7.0);
        assert_eq!(normalize_str("-3"), -3.0);
    }

    #[test]
    fn empty_and_garbage_become_zero() {
        assert_eq!(normalize_str(""), 0.0);
        assert_eq!(normalize_str("   "), 0.0);
        assert_eq!(normalize_str("abc"), 0.0);
        assert_eq!(normalize_str("1,2,3"), 0.0);
    }

    #[test]
    fn non_finite_input_becomes_zero() {
        assert_eq!(normalize_str("inf"), 0.0);
        assert_eq!(normalize_str("NaN"), 0.0);
    }

    #[test]
    fn cells_pass_numbers_through() {
        assert_eq!(normalize_cell(&Data::Float(5.5)), 5.5);
        assert_eq!(normalize_cell(&Data::Int(12)), 12.0);
        assert_eq!(normalize_cell(&Data::String("1.234,5".into())), 1234.5);
        assert_eq!(normalize_cell(&Data::Empty), 0.0);
        assert_eq!(normalize_cell(&Data::Bool(true)), 0.0);
    }

    #[test]
    fn cell_text_trims_and_stringifies() {
        assert_eq!(cell_text(&Data::String("  A-001  ".into())), "A-001");
        assert_eq!(cell_text(&Data::Int(1234)), "1234");
        assert_eq!(cell_text(&Data::Float(10.0)), "10");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn quantities_format_without_trailing_zero() {
        assert_eq!(format_quantity(5.0), "5");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(-0.0), "0");
        assert_eq!(format_quantity(1234.5), "1234.5");
        assert_eq!(format_quantity(-2.0), "-2");
    }
}
