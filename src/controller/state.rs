//! Observable controller state

use std::collections::BTreeSet;

use serde::Serialize;

use crate::calculator::{Field, InputRecord, ProjectionOutput};
use crate::chart;
use crate::config::CalculatorConfig;
use crate::validation::{validate_record, ValidationErrors};

/// Everything the UI reads from a calculator
///
/// Only the owning controller mutates this; subscribers and accessors get
/// shared references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerState<I: InputRecord> {
    pub inputs: I,
    pub errors: ValidationErrors,
    pub touched: BTreeSet<Field>,
    pub results: I::Output,
    /// Advisory messages from the result record, separate from `errors`
    pub warnings: Vec<String>,
    /// True once the result is valid and has something to draw
    pub chart_ready: bool,
}

impl<I: InputRecord> ControllerState<I> {
    /// Validate and project `inputs` in one pass
    pub(crate) fn evaluate(inputs: I, touched: BTreeSet<Field>, config: &CalculatorConfig) -> Self {
        let errors = validate_record(&inputs, &config.ranges);
        let results = inputs.project(&config.assumptions);
        let warnings = results.warnings();
        let chart_ready = errors.is_empty() && !chart::is_degenerate(&results);

        Self {
            inputs,
            errors,
            touched,
            results,
            warnings,
            chart_ready,
        }
    }

    /// Errors for fields the user has interacted with
    pub fn visible_errors(&self) -> ValidationErrors {
        self.errors.filtered(|field| self.touched.contains(&field))
    }
}
