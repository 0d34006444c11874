//! Conversion tools
//!
//! Serializable request/response functions behind the command-line front end.

pub mod convert;
pub mod units;
