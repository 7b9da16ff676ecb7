//! Declared valid ranges for every input field

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calculator::Field;
use crate::error::ConfigError;

/// Inclusive numeric range for a single field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Built-in ranges, one per field
const DEFAULT_RANGES: [(Field, FieldRange); 16] = [
    (Field::MonthlyInvestment, FieldRange::new(500.0, 1_000_000.0)),
    (Field::DurationYears, FieldRange::new(1.0, 30.0)),
    (Field::ExpectedReturn, FieldRange::new(1.0, 30.0)),
    (Field::StepUpPercent, FieldRange::new(0.0, 50.0)),
    (Field::Principal, FieldRange::new(1_000.0, 100_000_000.0)),
    (Field::InterestRate, FieldRange::new(1.0, 15.0)),
    (Field::CompoundingFrequency, FieldRange::new(1.0, 12.0)),
    (Field::Corpus, FieldRange::new(10_000.0, 1_000_000_000.0)),
    (Field::WithdrawalAmount, FieldRange::new(500.0, 10_000_000.0)),
    (Field::CurrentAge, FieldRange::new(18.0, 70.0)),
    (Field::RetirementAge, FieldRange::new(19.0, 80.0)),
    (Field::MonthlyExpenses, FieldRange::new(1_000.0, 10_000_000.0)),
    (Field::CurrentCorpus, FieldRange::new(0.0, 1_000_000_000.0)),
    (Field::MonthsCovered, FieldRange::new(1.0, 24.0)),
    (Field::LumpSumAvailable, FieldRange::new(0.0, 1_000_000_000.0)),
    (Field::RiskMultiplier, FieldRange::new(1.0, 3.0)),
];

/// Range lookup table keyed by field
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTable {
    ranges: HashMap<Field, FieldRange>,
}

impl RangeTable {
    /// Replace the range for one field, rejecting inverted or non-finite bounds
    pub fn set(&mut self, field: Field, range: FieldRange) -> Result<(), ConfigError> {
        if !range.min.is_finite() || !range.max.is_finite() {
            return Err(ConfigError::NonFiniteRange {
                field: field.key().to_string(),
            });
        }
        if range.min > range.max {
            return Err(ConfigError::InvertedRange {
                field: field.key().to_string(),
                min: range.min,
                max: range.max,
            });
        }
        self.ranges.insert(field, range);
        Ok(())
    }

    /// Range declared for a field
    pub fn get(&self, field: Field) -> FieldRange {
        self.ranges.get(&field).copied().unwrap_or_else(|| {
            // Every field is seeded in Default; this only guards hand-built tables
            FieldRange::new(f64::MIN, f64::MAX)
        })
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_default_range() {
        let table = RangeTable::default();
        for field in Field::ALL {
            let range = table.get(field);
            assert!(range.min <= range.max, "{} range inverted", field);
            assert!(range.min > f64::MIN, "{} missing from defaults", field);
        }
    }

    #[test]
    fn test_set_rejects_inverted_range() {
        let mut table = RangeTable::default();
        let err = table
            .set(Field::DurationYears, FieldRange::new(40.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
        assert_eq!(table.get(Field::DurationYears), FieldRange::new(1.0, 30.0));
    }

    #[test]
    fn test_set_rejects_nan_bound() {
        let mut table = RangeTable::default();
        assert!(table
            .set(Field::Corpus, FieldRange::new(f64::NAN, 1.0))
            .is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = FieldRange::new(1.0, 30.0);
        assert!(range.contains(1.0));
        assert!(range.contains(30.0));
        assert!(!range.contains(30.000001));
    }
}
