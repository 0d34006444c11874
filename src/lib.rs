//! medicion
//!
//! Converts scalar values between related RF and telecom measurement units
//! (power, data rate, packet rate, baud rate, voltage, frequency, gain)
//! through a per-category base unit.

pub mod build_info;
pub mod config;
pub mod format;
pub mod session;
pub mod tools;
pub mod units;

pub use units::{convert, try_convert, ConversionError, Unit, UnitCategory};
