//! Unit types and conversion constants
//!
//! Every unit belongs to one category and carries its scale relative to that
//! category's base unit. Adding a unit is a table change, not new logic.

use serde::{Deserialize, Serialize};

// ============================================================================
// Scale Constants (to category base unit)
// ============================================================================

/// Microwatts per kilowatt
pub const UW_PER_KW: f64 = 1_000_000_000.0;
/// Microwatts per watt
pub const UW_PER_W: f64 = 1_000_000.0;
/// Microwatts per milliwatt
pub const UW_PER_MW: f64 = 1_000.0;

/// Millivolts per volt
pub const MV_PER_V: f64 = 1_000.0;

/// Reference of the dBm scale in microwatts (0 dBm = 1 mW)
pub const DBM_REFERENCE_UW: f64 = 1_000.0;

pub const KILO: f64 = 1e3;
pub const MEGA: f64 = 1e6;
pub const GIGA: f64 = 1e9;

// ============================================================================
// Categories
// ============================================================================

/// Physical category of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    /// Base unit: microwatts
    Power,
    /// Base unit: "times" (linear ratio)
    Ratio,
    /// Base unit: bits per second
    DataRate,
    /// Base unit: packets per second
    PacketRate,
    /// Base unit: baud
    BaudRate,
    /// Base unit: millivolts
    Voltage,
    /// Base unit: hertz
    Frequency,
    /// Base unit: input power P1
    Gain,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 8] = [
        UnitCategory::Power,
        UnitCategory::Ratio,
        UnitCategory::DataRate,
        UnitCategory::PacketRate,
        UnitCategory::BaudRate,
        UnitCategory::Voltage,
        UnitCategory::Frequency,
        UnitCategory::Gain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Power => "power",
            UnitCategory::Ratio => "ratio",
            UnitCategory::DataRate => "data_rate",
            UnitCategory::PacketRate => "packet_rate",
            UnitCategory::BaudRate => "baud_rate",
            UnitCategory::Voltage => "voltage",
            UnitCategory::Frequency => "frequency",
            UnitCategory::Gain => "gain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "power" => Some(UnitCategory::Power),
            "ratio" => Some(UnitCategory::Ratio),
            "data_rate" | "datarate" | "bitrate" => Some(UnitCategory::DataRate),
            "packet_rate" | "packetrate" => Some(UnitCategory::PacketRate),
            "baud_rate" | "baudrate" | "baud" => Some(UnitCategory::BaudRate),
            "voltage" => Some(UnitCategory::Voltage),
            "frequency" | "freq" => Some(UnitCategory::Frequency),
            "gain" => Some(UnitCategory::Gain),
            _ => None,
        }
    }

    /// The unit all conversions in this category are routed through
    pub fn base_unit(&self) -> Unit {
        match self {
            UnitCategory::Power => Unit::Microwatts,
            UnitCategory::Ratio => Unit::Times,
            UnitCategory::DataRate => Unit::Bps,
            UnitCategory::PacketRate => Unit::Pps,
            UnitCategory::BaudRate => Unit::Baudios,
            UnitCategory::Voltage => Unit::Millivolts,
            UnitCategory::Frequency => Unit::Hz,
            UnitCategory::Gain => Unit::P1,
        }
    }
}

// ============================================================================
// Scales
// ============================================================================

/// Relationship between a unit and its category's base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// `base = value * factor`
    Linear(f64),
    /// `base = reference * 10^(value / 10)`
    Logarithmic { reference: f64 },
}

impl Scale {
    /// Normalize a value expressed in this scale to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Scale::Linear(factor) => value * factor,
            Scale::Logarithmic { reference } => reference * 10f64.powf(value / 10.0),
        }
    }

    /// Project a base-unit value onto this scale
    ///
    /// Non-positive base values on a logarithmic scale yield `-inf` or `NaN`.
    pub fn from_base(&self, base: f64) -> f64 {
        match *self {
            Scale::Linear(factor) => base / factor,
            Scale::Logarithmic { reference } => 10.0 * (base / reference).log10(),
        }
    }

    pub fn is_logarithmic(&self) -> bool {
        matches!(self, Scale::Logarithmic { .. })
    }
}

// ============================================================================
// Units
// ============================================================================

/// A measurement unit from the closed conversion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Watts,
    Milliwatts,
    Microwatts,
    Kilowatts,
    Bps,
    Kbps,
    Mbps,
    Mpps,
    Kpps,
    Pps,
    Baudios,
    Mbaudios,
    Volts,
    Millivolts,
    Ghz,
    Hz,
    Mhz,
    Khz,
    Times,
    Db,
    Dbm,
    Mw,
    P1,
    P2,
}

/// Table row describing one unit
#[derive(Debug, Clone, Copy)]
pub struct UnitSpec {
    pub unit: Unit,
    pub name: &'static str,
    pub label: &'static str,
    pub category: UnitCategory,
    pub scale: Scale,
}

const fn row(
    unit: Unit,
    name: &'static str,
    label: &'static str,
    category: UnitCategory,
    scale: Scale,
) -> UnitSpec {
    UnitSpec {
        unit,
        name,
        label,
        category,
        scale,
    }
}

/// The conversion table, in picker order
pub static UNIT_TABLE: [UnitSpec; 24] = [
    row(Unit::Watts, "watts", "Watts", UnitCategory::Power, Scale::Linear(UW_PER_W)),
    row(Unit::Milliwatts, "milliwatts", "Milliwatts", UnitCategory::Power, Scale::Linear(UW_PER_MW)),
    row(Unit::Microwatts, "microwatts", "Microwatts", UnitCategory::Power, Scale::Linear(1.0)),
    row(Unit::Kilowatts, "kilowatts", "Kilowatts", UnitCategory::Power, Scale::Linear(UW_PER_KW)),
    row(Unit::Bps, "bps", "Bps", UnitCategory::DataRate, Scale::Linear(1.0)),
    row(Unit::Kbps, "kbps", "Kbps", UnitCategory::DataRate, Scale::Linear(KILO)),
    row(Unit::Mbps, "mbps", "Mbps", UnitCategory::DataRate, Scale::Linear(MEGA)),
    row(Unit::Mpps, "mpps", "MPPS", UnitCategory::PacketRate, Scale::Linear(MEGA)),
    row(Unit::Kpps, "kpps", "KPPS", UnitCategory::PacketRate, Scale::Linear(KILO)),
    row(Unit::Pps, "pps", "PPS", UnitCategory::PacketRate, Scale::Linear(1.0)),
    row(Unit::Baudios, "baudios", "Baudios", UnitCategory::BaudRate, Scale::Linear(1.0)),
    row(Unit::Mbaudios, "mbaudios", "MBaudios", UnitCategory::BaudRate, Scale::Linear(MEGA)),
    row(Unit::Volts, "volts", "Volts", UnitCategory::Voltage, Scale::Linear(MV_PER_V)),
    row(Unit::Millivolts, "millivolts", "Millivolts", UnitCategory::Voltage, Scale::Linear(1.0)),
    row(Unit::Ghz, "ghz", "GHz", UnitCategory::Frequency, Scale::Linear(GIGA)),
    row(Unit::Hz, "hz", "Hz", UnitCategory::Frequency, Scale::Linear(1.0)),
    row(Unit::Mhz, "mhz", "MHz", UnitCategory::Frequency, Scale::Linear(MEGA)),
    row(Unit::Khz, "khz", "kHz", UnitCategory::Frequency, Scale::Linear(KILO)),
    row(Unit::Times, "times", "Veces", UnitCategory::Ratio, Scale::Linear(1.0)),
    row(Unit::Db, "db", "dB", UnitCategory::Ratio, Scale::Logarithmic { reference: 1.0 }),
    row(Unit::Dbm, "dbm", "dBm", UnitCategory::Power, Scale::Logarithmic { reference: DBM_REFERENCE_UW }),
    row(Unit::Mw, "mw", "mW", UnitCategory::Power, Scale::Linear(1.0)),
    row(Unit::P1, "p1", "P1", UnitCategory::Gain, Scale::Linear(1.0)),
    row(Unit::P2, "p2", "P2", UnitCategory::Gain, Scale::Logarithmic { reference: 1.0 }),
];

impl Unit {
    /// All units in picker order
    pub fn all() -> impl Iterator<Item = Unit> {
        UNIT_TABLE.iter().map(|spec| spec.unit)
    }

    /// Table row for this unit
    pub fn spec(&self) -> &'static UnitSpec {
        // Rows are laid out in declaration order, so the discriminant indexes the table.
        &UNIT_TABLE[*self as usize]
    }

    /// Canonical lowercase name (e.g. "dbm")
    pub fn as_str(&self) -> &'static str {
        self.spec().name
    }

    /// Human-readable label (e.g. "dBm", "MBaudios")
    pub fn display_name(&self) -> &'static str {
        self.spec().label
    }

    pub fn category(&self) -> UnitCategory {
        self.spec().category
    }

    pub fn scale(&self) -> Scale {
        self.spec().scale
    }

    /// Normalize a value in this unit to the category base unit
    pub fn to_base(&self, value: f64) -> f64 {
        self.scale().to_base(value)
    }

    /// Project a category base value onto this unit
    pub fn from_base(&self, base: f64) -> f64 {
        self.scale().from_base(base)
    }

    /// Parse a unit from its name, label, or a common alias (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let trimmed = s.trim();

        // Exact labels first, then lowercase names
        if let Some(spec) = UNIT_TABLE.iter().find(|spec| spec.label == trimmed) {
            return Some(spec.unit);
        }

        let lower = trimmed.to_lowercase();
        if let Some(spec) = UNIT_TABLE.iter().find(|spec| spec.name == lower) {
            return Some(spec.unit);
        }

        match lower.as_str() {
            "w" | "watt" => Some(Unit::Watts),
            "milliwatt" => Some(Unit::Milliwatts),
            "uw" | "µw" | "microwatt" => Some(Unit::Microwatts),
            "kw" | "kilowatt" => Some(Unit::Kilowatts),
            "b/s" | "bit/s" => Some(Unit::Bps),
            "kb/s" | "kbit/s" => Some(Unit::Kbps),
            "mb/s" | "mbit/s" => Some(Unit::Mbps),
            "baud" | "bd" => Some(Unit::Baudios),
            "mbaud" | "mbd" => Some(Unit::Mbaudios),
            "v" | "volt" => Some(Unit::Volts),
            "mv" | "millivolt" => Some(Unit::Millivolts),
            "veces" | "x" => Some(Unit::Times),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Units belonging to a category, in picker order
pub fn units_in_category(category: UnitCategory) -> Vec<Unit> {
    UNIT_TABLE
        .iter()
        .filter(|spec| spec.category == category)
        .map(|spec| spec.unit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_declaration_order() {
        for (index, spec) in UNIT_TABLE.iter().enumerate() {
            assert_eq!(spec.unit as usize, index, "row {} out of order", spec.name);
        }
    }

    #[test]
    fn test_unit_count() {
        assert_eq!(Unit::all().count(), 24);
    }

    #[test]
    fn test_every_category_has_a_base_unit_with_unit_scale() {
        for category in UnitCategory::ALL {
            let base = category.base_unit();
            assert_eq!(base.category(), category);
            assert_eq!(base.scale(), Scale::Linear(1.0));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Unit::Watts.display_name(), "Watts");
        assert_eq!(Unit::Dbm.display_name(), "dBm");
        assert_eq!(Unit::Mbaudios.display_name(), "MBaudios");
        assert_eq!(Unit::Khz.display_name(), "kHz");
        assert_eq!(Unit::Times.display_name(), "Veces");
        assert_eq!(Unit::Mw.to_string(), "mW");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Unit::from_str("dbm"), Some(Unit::Dbm));
        assert_eq!(Unit::from_str("dBm"), Some(Unit::Dbm));
        assert_eq!(Unit::from_str("  GHz "), Some(Unit::Ghz));
        assert_eq!(Unit::from_str("MBaudios"), Some(Unit::Mbaudios));
        assert_eq!(Unit::from_str("mW"), Some(Unit::Mw));
        assert_eq!(Unit::from_str("kw"), Some(Unit::Kilowatts));
        assert_eq!(Unit::from_str("veces"), Some(Unit::Times));
        assert_eq!(Unit::from_str("furlongs"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for unit in Unit::all() {
            assert_eq!(Unit::from_str(unit.as_str()), Some(unit));
            assert_eq!(Unit::from_str(unit.display_name()), Some(unit));
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Unit::Mbaudios).unwrap();
        assert_eq!(json, "\"mbaudios\"");
        let unit: Unit = serde_json::from_str("\"p2\"").unwrap();
        assert_eq!(unit, Unit::P2);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Unit::Dbm.category(), UnitCategory::Power);
        assert_eq!(Unit::Db.category(), UnitCategory::Ratio);
        assert_eq!(Unit::Kpps.category(), UnitCategory::PacketRate);
        assert_eq!(Unit::P2.category(), UnitCategory::Gain);
        assert_eq!(
            units_in_category(UnitCategory::Frequency),
            vec![Unit::Ghz, Unit::Hz, Unit::Mhz, Unit::Khz]
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(UnitCategory::from_str("data-rate"), Some(UnitCategory::DataRate));
        assert_eq!(UnitCategory::from_str("Power"), Some(UnitCategory::Power));
        assert_eq!(UnitCategory::from_str("mass"), None);
    }
}
