//! Unit conversion functions
//!
//! Conversions normalize the input to its category's base unit and then
//! project the base value onto the target unit.

use thiserror::Error;

use super::unit::{Unit, UnitCategory};

/// Conversion error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Incompatible units: {from} ({from_category}) cannot be converted to {to} ({to_category})")]
    IncompatibleUnits {
        from: Unit,
        to: Unit,
        from_category: &'static str,
        to_category: &'static str,
    },

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

/// Result type for checked conversions
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convert a value between two units
///
/// Never fails: mathematically undefined results come back as `NaN` or
/// `-inf`. No category check is made, so a cross-category pair applies the
/// target's inverse formula to whatever base value the source produced. Use
/// [`try_convert`] to reject such pairs.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }

    let base = from.to_base(value);
    let result = to.from_base(base);

    tracing::debug!(
        "convert {} {} -> {} {} (base {})",
        value,
        from.as_str(),
        result,
        to.as_str(),
        base
    );

    result
}

/// Convert a value between two units of the same category
pub fn try_convert(value: f64, from: Unit, to: Unit) -> ConversionResult<f64> {
    ensure_compatible(from, to)?;
    Ok(convert(value, from, to))
}

/// Check that two units share a category
pub fn ensure_compatible(from: Unit, to: Unit) -> ConversionResult<()> {
    if from.category() == to.category() {
        return Ok(());
    }

    tracing::warn!(
        "Rejected cross-category conversion: {} ({}) -> {} ({})",
        from.as_str(),
        from.category().as_str(),
        to.as_str(),
        to.category().as_str()
    );

    Err(ConversionError::IncompatibleUnits {
        from,
        to,
        from_category: from.category().as_str(),
        to_category: to.category().as_str(),
    })
}

/// Parse a unit string, failing with [`ConversionError::UnknownUnit`]
pub fn parse_unit(unit_str: &str) -> ConversionResult<Unit> {
    Unit::from_str(unit_str).ok_or_else(|| ConversionError::UnknownUnit(unit_str.trim().to_string()))
}

/// Whether a pair converts within a single category
pub fn is_same_category(from: Unit, to: Unit) -> bool {
    from.category() == to.category()
}

/// Category shared by two units, if any
pub fn shared_category(from: Unit, to: Unit) -> Option<UnitCategory> {
    is_same_category(from, to).then(|| from.category())
}
