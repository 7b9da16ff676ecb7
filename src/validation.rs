//! Input validation
//!
//! Validation never blocks a projection. Messages are stored per field and
//! shown next to the input; the calculator keeps producing live numbers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::calculator::{Field, InputRecord};
use crate::config::{FieldRange, RangeTable};

/// A range check for one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub field: Field,
    pub range: FieldRange,
}

impl FieldRule {
    pub fn new(field: Field, range: FieldRange) -> Self {
        Self { field, range }
    }
}

/// Check a single value against an inclusive range
///
/// Returns `None` when `min <= value <= max`, otherwise a message naming the
/// field and both bounds. NaN is always out of range.
pub fn validate_range(value: f64, min: f64, max: f64, label: &str) -> Option<String> {
    if min <= value && value <= max {
        None
    } else {
        Some(format!("{} must be between {} and {}", label, min, max))
    }
}

/// Violation messages keyed by field; an absent field is valid
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    messages: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: String) {
        self.messages.insert(field, message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.messages.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Keep only messages for the given fields
    pub fn filtered(&self, keep: impl Fn(Field) -> bool) -> Self {
        Self {
            messages: self
                .messages
                .iter()
                .filter(|(field, _)| keep(**field))
                .map(|(field, message)| (*field, message.clone()))
                .collect(),
        }
    }
}

/// Validate every field of a record
///
/// Per-field ranges run first. Cross-field rules run afterwards and only
/// report on fields that passed their own range.
pub fn validate_record<I: InputRecord>(record: &I, ranges: &RangeTable) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for &field in record.fields() {
        let Some(value) = record.get(field) else {
            continue;
        };
        let range = ranges.get(field);
        if let Some(message) = validate_range(value, range.min, range.max, field.label()) {
            errors.insert(field, message);
        }
    }

    for rule in record.cross_field_rules(ranges) {
        if errors.contains(rule.field) {
            continue;
        }
        let Some(value) = record.get(rule.field) else {
            continue;
        };
        if let Some(message) =
            validate_range(value, rule.range.min, rule.range.max, rule.field.label())
        {
            errors.insert(rule.field, message);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{RetirementInputs, SipInputs};
    use proptest::prelude::*;

    #[test]
    fn test_message_names_field_and_bounds() {
        let message = validate_range(45.0, 1.0, 30.0, "Duration (years)").unwrap();
        assert_eq!(message, "Duration (years) must be between 1 and 30");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate_range(1.0, 1.0, 30.0, "x").is_none());
        assert!(validate_range(30.0, 1.0, 30.0, "x").is_none());
        assert!(validate_range(f64::NAN, 1.0, 30.0, "x").is_some());
    }

    #[test]
    fn test_default_records_are_valid() {
        let ranges = RangeTable::default();
        assert!(validate_record(&SipInputs::default(), &ranges).is_empty());
        assert!(validate_record(&RetirementInputs::default(), &ranges).is_empty());
    }

    #[test]
    fn test_fields_validated_independently() {
        let record = SipInputs {
            monthly_investment: 100.0,
            duration_years: 45,
            ..Default::default()
        };
        let errors = validate_record(&record, &RangeTable::default());

        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::MonthlyInvestment).unwrap().contains("Monthly investment"));
        assert!(errors.get(Field::DurationYears).is_some());
        assert!(errors.get(Field::ExpectedReturn).is_none());
    }

    #[test]
    fn test_cross_field_rule_after_per_field() {
        let ranges = RangeTable::default();

        let before_current = RetirementInputs {
            current_age: 40,
            retirement_age: 35,
            ..Default::default()
        };
        let errors = validate_record(&before_current, &ranges);
        assert_eq!(
            errors.get(Field::RetirementAge),
            Some("Retirement age must be between 41 and 80")
        );

        // Per-field message wins over the cross-field one
        let too_old = RetirementInputs {
            current_age: 40,
            retirement_age: 95,
            ..Default::default()
        };
        let errors = validate_record(&too_old, &ranges);
        assert_eq!(
            errors.get(Field::RetirementAge),
            Some("Retirement age must be between 19 and 80")
        );
    }

    #[test]
    fn test_filtered_keeps_requested_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Corpus, "a".to_string());
        errors.insert(Field::DurationYears, "b".to_string());

        let visible = errors.filtered(|field| field == Field::Corpus);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.get(Field::Corpus), Some("a"));
    }

    proptest! {
        #[test]
        fn prop_empty_exactly_when_in_range(
            value in -1e9f64..1e9,
            a in -1e9f64..1e9,
            b in -1e9f64..1e9,
        ) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let result = validate_range(value, min, max, "Corpus");
            if min <= value && value <= max {
                prop_assert!(result.is_none());
            } else {
                let message = result.unwrap();
                prop_assert!(message.contains("Corpus"));
            }
        }
    }
}
