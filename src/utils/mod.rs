//! Utility functions for formatting indicator values
//!
//! Centralizes number rendering for CSV cells and terminal tables.

/// Unit options for display formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Include "$" prefix (current US dollars)
    Usd,
    /// No symbol (plain counts)
    None,
}

/// Core display formatting with full control over output.
///
/// Formats a value with `,` thousands separators and two decimal places.
///
/// # Examples
/// ```
/// use country_indicators::utils::{format_number_with_width, Unit};
///
/// assert_eq!(format_number_with_width(1234.5, 0, Unit::Usd), "$1,234.50");
/// assert_eq!(format_number_with_width(1234.0, 12, Unit::None), "    1,234.00");
/// ```
pub fn format_number_with_width(value: f64, width: usize, unit: Unit) -> String {
    let is_negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let with_separators = group_thousands(integer_part);

    let sign = if is_negative { "-" } else { "" };
    let prefix = match unit {
        Unit::Usd => "$",
        Unit::None => "",
    };

    let result = format!("{}{}{}.{}", sign, prefix, with_separators, decimal_part);

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format as US dollars: "$65,020.35"
pub fn format_usd(value: f64) -> String {
    format_number_with_width(value, 0, Unit::Usd)
}

/// Format a head count in millions with one decimal: "331.9M"
pub fn format_millions(value: f64) -> String {
    format!("{:.1}M", value / 1_000_000.0)
}

/// Render a value for a CSV cell.
///
/// Whole numbers are written without a fractional part so population counts
/// stay integral; everything else uses the shortest round-trip representation.
pub fn format_csv_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
