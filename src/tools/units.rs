//! Unit listing tool

use serde::Serialize;

use crate::units::{Scale, UnitCategory, UNIT_TABLE};

/// Unit summary for listing
#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub base_unit: &'static str,
    pub scale: String,
    pub logarithmic: bool,
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub units: Vec<UnitSummary>,
    pub total: usize,
}

fn describe_scale(scale: Scale) -> String {
    match scale {
        Scale::Linear(factor) => format!("x{}", factor),
        Scale::Logarithmic { reference } => format!("10*log10(base/{})", reference),
    }
}

/// List the conversion table, optionally filtered by category name
pub fn list_units(category: Option<&str>) -> Result<ListUnitsResponse, String> {
    let filter = match category {
        Some(name) => Some(
            UnitCategory::from_str(name).ok_or_else(|| format!("Unknown category: {}", name))?,
        ),
        None => None,
    };

    let units: Vec<UnitSummary> = UNIT_TABLE
        .iter()
        .filter(|spec| filter.map_or(true, |c| spec.category == c))
        .map(|spec| UnitSummary {
            name: spec.name,
            label: spec.label,
            category: spec.category.as_str(),
            base_unit: spec.category.base_unit().as_str(),
            scale: describe_scale(spec.scale),
            logarithmic: spec.scale.is_logarithmic(),
        })
        .collect();

    let total = units.len();
    Ok(ListUnitsResponse { units, total })
}
