//! Calculator configuration: business assumptions and field ranges

mod ranges;
pub mod loader;

pub use ranges::{FieldRange, RangeTable};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Annual-expense multiple used for the retirement corpus target
///
/// A simplification ("25x rule"), kept overridable rather than replaced by
/// a present-value-of-annuity model.
pub const DEFAULT_CORPUS_MULTIPLE: f64 = 25.0;

/// Rendering-only nudge applied to degenerate chart segments
pub const DEFAULT_CHART_EPSILON: f64 = 0.01;

/// Business assumptions that are not user inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assumptions {
    /// Required corpus as a multiple of annual expenses
    pub corpus_multiple: f64,

    /// Epsilon used by the chart adapter for equal or all-zero segments
    pub chart_epsilon: f64,
}

impl Assumptions {
    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if !self.corpus_multiple.is_finite() || self.corpus_multiple <= 0.0 {
            return Err(ConfigError::InvalidAssumption {
                name: "corpusMultiple",
                requirement: "a positive number",
                value: self.corpus_multiple,
            });
        }
        if !self.chart_epsilon.is_finite() || self.chart_epsilon <= 0.0 {
            return Err(ConfigError::InvalidAssumption {
                name: "chartEpsilon",
                requirement: "a positive number",
                value: self.chart_epsilon,
            });
        }
        Ok(())
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            corpus_multiple: DEFAULT_CORPUS_MULTIPLE,
            chart_epsilon: DEFAULT_CHART_EPSILON,
        }
    }
}

/// Everything a controller needs besides the inputs themselves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorConfig {
    pub assumptions: Assumptions,
    pub ranges: RangeTable,
}

impl CalculatorConfig {
    /// Load from explicit files; `None` keeps the built-in values for that part
    pub fn load(
        assumptions_path: Option<&Path>,
        ranges_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let assumptions = match assumptions_path {
            Some(path) => loader::load_assumptions(path)?,
            None => Assumptions::default(),
        };
        let ranges = match ranges_path {
            Some(path) => loader::load_ranges(path)?,
            None => RangeTable::default(),
        };
        Ok(Self { assumptions, ranges })
    }

    /// Load from the default `config/` location, falling back to built-ins when
    /// a file is absent
    pub fn load_default() -> Result<Self, ConfigError> {
        let assumptions_path = Path::new(loader::DEFAULT_ASSUMPTIONS_PATH);
        let ranges_path = Path::new(loader::DEFAULT_RANGES_PATH);

        let assumptions_path = if assumptions_path.exists() {
            Some(assumptions_path)
        } else {
            log::warn!(
                "{} not found, using built-in assumptions",
                loader::DEFAULT_ASSUMPTIONS_PATH
            );
            None
        };
        let ranges_path = if ranges_path.exists() {
            Some(ranges_path)
        } else {
            log::warn!("{} not found, using built-in ranges", loader::DEFAULT_RANGES_PATH);
            None
        };

        Self::load(assumptions_path, ranges_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let assumptions: Assumptions = serde_json::from_str(r#"{"corpusMultiple": 30}"#).unwrap();
        assert_eq!(assumptions.corpus_multiple, 30.0);
        assert_eq!(assumptions.chart_epsilon, DEFAULT_CHART_EPSILON);
    }

    #[test]
    fn test_check_rejects_non_positive_multiple() {
        let assumptions = Assumptions {
            corpus_multiple: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            assumptions.check(),
            Err(ConfigError::InvalidAssumption { name: "corpusMultiple", .. })
        ));
    }

    #[test]
    fn test_load_without_paths_is_builtin() {
        let config = CalculatorConfig::load(None, None).unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }
}
