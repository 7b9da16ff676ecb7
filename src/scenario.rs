//! Scenario runner for batch projections
//!
//! Holds the assumptions once, then projects many variations of an input
//! record in parallel, e.g. to compare return rates or durations side by side.

use rayon::prelude::*;

use crate::calculator::{Field, InputRecord};
use crate::config::Assumptions;

/// One projected variation
#[derive(Debug, Clone)]
pub struct ScenarioOutcome<I: InputRecord> {
    /// Value written to the swept field
    pub value: f64,
    pub inputs: I,
    pub result: I::Output,
}

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let outcomes = runner.sweep(&SipInputs::default(), Field::ExpectedReturn, &[8.0, 10.0, 12.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with built-in assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Project a single record
    pub fn run<I: InputRecord>(&self, inputs: &I) -> I::Output {
        inputs.project(&self.assumptions)
    }

    /// Project many records in parallel, preserving order
    pub fn run_batch<I>(&self, records: &[I]) -> Vec<I::Output>
    where
        I: InputRecord + Sync,
        I::Output: Send,
    {
        records
            .par_iter()
            .map(|record| record.project(&self.assumptions))
            .collect()
    }

    /// Vary one field of `base` across `values` and project each variation
    ///
    /// Values the record cannot hold (foreign field, non-finite) are skipped.
    pub fn sweep<I>(&self, base: &I, field: Field, values: &[f64]) -> Vec<ScenarioOutcome<I>>
    where
        I: InputRecord + Send + Sync,
        I::Output: Send,
    {
        values
            .par_iter()
            .filter(|value| value.is_finite())
            .filter_map(|&value| {
                let mut inputs = base.clone();
                if !inputs.set(field, value) {
                    return None;
                }
                let result = inputs.project(&self.assumptions);
                Some(ScenarioOutcome {
                    value,
                    inputs,
                    result,
                })
            })
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }
}

/// Evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project_swp, RetirementInputs, SipInputs, SwpInputs};

    #[test]
    fn test_sweep_orders_by_input_and_grows_with_rate() {
        let runner = ScenarioRunner::new();
        let outcomes = runner.sweep(&SipInputs::default(), Field::ExpectedReturn, &[8.0, 10.0, 12.0]);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].value, 8.0);
        assert_eq!(outcomes[2].inputs.expected_return, 12.0);
        assert!(outcomes[2].result.corpus > outcomes[0].result.corpus);
    }

    #[test]
    fn test_sweep_skips_foreign_field() {
        let runner = ScenarioRunner::new();
        let outcomes = runner.sweep(&SipInputs::default(), Field::Principal, &[1.0, 2.0]);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let records: Vec<SwpInputs> = [5_000.0, 20_000.0, 80_000.0]
            .iter()
            .map(|&withdrawal| SwpInputs {
                withdrawal_amount: withdrawal,
                ..Default::default()
            })
            .collect();

        let results = runner.run_batch(&records);
        for (record, result) in records.iter().zip(&results) {
            assert_eq!(result, &project_swp(record));
        }
    }

    #[test]
    fn test_runner_uses_its_assumptions() {
        let mut runner = ScenarioRunner::new();
        runner.assumptions_mut().corpus_multiple = 20.0;
        let result = runner.run(&RetirementInputs::default());
        assert_eq!(result.required_corpus, 50_000.0 * 12.0 * 20.0);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(1.0, 3.0, 5), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(linspace(4.0, 9.0, 1), vec![4.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
