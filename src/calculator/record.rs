//! Contracts shared by every product's input and result records

use std::fmt;

use super::{CalculatorKind, Field};
use crate::config::{Assumptions, RangeTable};
use crate::projection::Schedule;
use crate::validation::FieldRule;

/// A product's input record
///
/// The controller only talks to records through this trait, so a single
/// generic controller serves every calculator.
pub trait InputRecord: Clone + fmt::Debug {
    type Output: ProjectionOutput;

    fn kind(&self) -> CalculatorKind;

    /// Fields carried by this record, in display order
    fn fields(&self) -> &'static [Field];

    /// Current value of a field, `None` if the record has no such field
    fn get(&self, field: Field) -> Option<f64>;

    /// Write a field; returns `false` if the record has no such field
    ///
    /// Count fields are rounded and saturated at zero.
    fn set(&mut self, field: Field, value: f64) -> bool;

    /// Ranges that depend on sibling fields, checked after the per-field ranges
    fn cross_field_rules(&self, _ranges: &RangeTable) -> Vec<FieldRule> {
        Vec::new()
    }

    /// Fresh record of the same product with default values
    fn defaults(&self) -> Self;

    /// Run the product's projection
    fn project(&self, assumptions: &Assumptions) -> Self::Output;
}

/// A product's result record
pub trait ProjectionOutput: Clone + fmt::Debug {
    /// Advisory, non-blocking messages about the plan
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Labelled values for the summary ring chart, exact and un-nudged
    fn segments(&self) -> Vec<(&'static str, f64)>;

    /// Headline numbers shown in summary cards
    fn headline(&self) -> Vec<(&'static str, f64)>;

    /// Time-stepped schedule, for products that simulate one
    fn schedule(&self) -> Option<&Schedule> {
        None
    }

    /// True when every headline number is finite
    fn is_finite(&self) -> bool {
        self.headline().iter().all(|(_, value)| value.is_finite())
    }
}
