//! Convert tool

use serde::Serialize;

use crate::format::{format_number, format_quantity};
use crate::units::{self, Unit};

/// Response for convert_value
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
    pub category: String,
    pub result: f64,
    pub result_formatted: String,
    pub display: String,
}

/// Convert a value between two unit strings
///
/// Unit strings accept canonical names, display labels and common aliases.
/// With `strict` set, units from different categories are rejected.
pub fn convert_value(
    value: f64,
    from: &str,
    to: &str,
    decimal_places: usize,
    strict: bool,
) -> Result<ConvertResponse, String> {
    let from_unit = units::parse_unit(from).map_err(|e| e.to_string())?;
    let to_unit = units::parse_unit(to).map_err(|e| e.to_string())?;

    let result = if strict {
        units::try_convert(value, from_unit, to_unit).map_err(|e| e.to_string())?
    } else {
        if !units::is_same_category(from_unit, to_unit) {
            tracing::warn!(
                "Cross-category conversion {} -> {} has no physical meaning",
                from_unit.as_str(),
                to_unit.as_str()
            );
        }
        units::convert(value, from_unit, to_unit)
    };

    let category = match units::shared_category(from_unit, to_unit) {
        Some(c) => c.as_str().to_string(),
        None => format!(
            "{}->{}",
            from_unit.category().as_str(),
            to_unit.category().as_str()
        ),
    };

    Ok(ConvertResponse {
        value,
        from: from_unit,
        to: to_unit,
        category,
        result,
        result_formatted: format_number(result, decimal_places),
        display: format_quantity(result, to_unit, decimal_places),
    })
}
