//! Unit conversion module
//!
//! The closed unit table and the two-stage conversion through each
//! category's base unit.

pub mod converter;
pub mod unit;

pub use converter::{
    convert, ensure_compatible, is_same_category, parse_unit, shared_category, try_convert,
    ConversionError, ConversionResult,
};
pub use unit::{units_in_category, Scale, Unit, UnitCategory, UnitSpec, UNIT_TABLE};
