//! Conversion session
//!
//! The caller side of the converter: a keypad input buffer, the selected
//! input/output units, the last result line and an in-memory history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::format::format_quantity;
use crate::units::{convert, try_convert, ConversionError, Unit};

/// Output shown when the input buffer is not a number
pub const INVALID_INPUT: &str = "Invalid input";

/// Session error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Invalid input: '{0}'")]
    InvalidInput(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A keypad key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Backspace,
}

impl Key {
    /// Keypad layout, row by row
    pub const LAYOUT: [[Key; 3]; 4] = [
        [Key::Digit(1), Key::Digit(2), Key::Digit(3)],
        [Key::Digit(4), Key::Digit(5), Key::Digit(6)],
        [Key::Digit(7), Key::Digit(8), Key::Digit(9)],
        [Key::Point, Key::Digit(0), Key::Backspace],
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Key::Digit(d as u8)),
            '.' => Some(Key::Point),
            '⌫' => Some(Key::Backspace),
            _ => None,
        }
    }
}

/// One recorded conversion
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub input: String,
    pub from: Unit,
    pub to: Unit,
    pub value: f64,
    pub result: f64,
    pub output: String,
    /// "<input> <from label> = <output>"
    pub line: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    input: String,
    output: String,
    from: Unit,
    to: Unit,
    decimal_places: usize,
    strict_categories: bool,
    history_limit: usize,
    history: VecDeque<HistoryEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            from: config.default_from,
            to: config.default_to,
            decimal_places: config.decimal_places,
            strict_categories: config.strict_categories,
            history_limit: config.history_limit,
            history: VecDeque::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn from_unit(&self) -> Unit {
        self.from
    }

    pub fn to_unit(&self) -> Unit {
        self.to
    }

    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    pub fn set_from(&mut self, unit: Unit) {
        self.from = unit;
    }

    pub fn set_to(&mut self, unit: Unit) {
        self.to = unit;
    }

    pub fn set_decimal_places(&mut self, places: usize) {
        self.decimal_places = places;
    }

    /// Replace the input buffer
    pub fn set_input(&mut self, input: &str) {
        self.input = input.trim().to_string();
    }

    /// Apply a keypad key to the input buffer
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.input.push(c);
                }
            }
            Key::Point => self.input.push('.'),
            Key::Backspace => {
                self.input.pop();
            }
        }
    }

    /// Clear input and output; history is kept
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    /// Convert the input buffer and record the result
    pub fn convert(&mut self) -> SessionResult<HistoryEntry> {
        let value: f64 = match self.input.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Invalid input '{}'", self.input);
                self.output = INVALID_INPUT.to_string();
                return Err(SessionError::InvalidInput(self.input.clone()));
            }
        };

        let result = if self.strict_categories {
            match try_convert(value, self.from, self.to) {
                Ok(r) => r,
                Err(e) => {
                    self.output = e.to_string();
                    return Err(e.into());
                }
            }
        } else {
            convert(value, self.from, self.to)
        };

        let output = format_quantity(result, self.to, self.decimal_places);
        let line = format!("{} {} = {}", self.input, self.from.display_name(), output);
        self.output = output.clone();

        let entry = HistoryEntry {
            input: self.input.clone(),
            from: self.from,
            to: self.to,
            value,
            result,
            output,
            line,
            timestamp: Utc::now(),
        };

        self.history.push_back(entry.clone());
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }

        Ok(entry)
    }

    /// Recorded conversions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(session: &mut Session, keys: &str) {
        for c in keys.chars() {
            session.press(Key::from_char(c).unwrap());
        }
    }

    #[test]
    fn test_starts_with_configured_units() {
        let session = Session::default();
        assert_eq!(session.from_unit(), Unit::Dbm);
        assert_eq!(session.to_unit(), Unit::Kilowatts);
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_keypad_layout_covers_every_digit() {
        let digits: Vec<u8> = Key::LAYOUT
            .iter()
            .flatten()
            .filter_map(|key| match key {
                Key::Digit(d) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(digits.len(), 10);
        for d in 0..10 {
            assert!(digits.contains(&d));
        }
    }

    #[test]
    fn test_keypad_editing() {
        let mut session = Session::default();
        type_keys(&mut session, "12.5");
        assert_eq!(session.input(), "12.5");
        session.press(Key::Backspace);
        assert_eq!(session.input(), "12.");
        session.press(Key::Backspace);
        session.press(Key::Backspace);
        session.press(Key::Backspace);
        session.press(Key::Backspace);
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_convert_records_history() {
        let mut session = Session::default();
        type_keys(&mut session, "50");
        let entry = session.convert().unwrap();
        assert_eq!(entry.output, "0.1 Kilowatts");
        assert_eq!(entry.line, "50 dBm = 0.1 Kilowatts");
        assert_eq!(session.output(), "0.1 Kilowatts");
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_invalid_input() {
        let mut session = Session::default();
        type_keys(&mut session, "1.2.3");
        let err = session.convert().unwrap_err();
        assert_eq!(err, SessionError::InvalidInput("1.2.3".to_string()));
        assert_eq!(session.output(), INVALID_INPUT);
        assert_eq!(session.history_len(), 0);

        session.clear();
        assert!(session.convert().is_err());
        assert_eq!(session.output(), INVALID_INPUT);
    }

    #[test]
    fn test_strict_session_rejects_cross_category() {
        let mut session = Session::default();
        session.set_input("1");
        session.set_from(Unit::Ghz);
        session.set_to(Unit::Watts);
        let err = session.convert().unwrap_err();
        assert!(matches!(err, SessionError::Conversion(_)));
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_lenient_session_allows_cross_category() {
        let config = Config {
            strict_categories: false,
            ..Config::default()
        };
        let mut session = Session::new(&config);
        session.set_input("1");
        session.set_from(Unit::Ghz);
        session.set_to(Unit::Watts);
        let entry = session.convert().unwrap();
        assert!((entry.result - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_result_is_recorded() {
        let mut session = Session::default();
        session.set_from(Unit::Times);
        session.set_to(Unit::Db);
        session.set_input("0");
        let entry = session.convert().unwrap();
        assert_eq!(entry.result, f64::NEG_INFINITY);
        assert_eq!(entry.output, "-∞ dB");
    }

    #[test]
    fn test_history_limit() {
        let config = Config {
            history_limit: 2,
            ..Config::default()
        };
        let mut session = Session::new(&config);
        session.set_from(Unit::Watts);
        session.set_to(Unit::Milliwatts);
        for value in ["1", "2", "3"] {
            session.set_input(value);
            session.convert().unwrap();
        }
        let inputs: Vec<&str> = session.history().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["2", "3"]);
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut session = Session::default();
        session.set_input("10");
        session.convert().unwrap();
        session.clear();
        assert_eq!(session.input(), "");
        assert_eq!(session.output(), "");
        assert_eq!(session.history_len(), 1);
    }
}
