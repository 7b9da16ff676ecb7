//! Wealth Calculators - projection engine for consumer finance calculators
//!
//! This library provides:
//! - Projections for SIP, SWP, fixed deposit, retirement corpus and emergency fund
//! - Range validation with cross-field rules and non-blocking advisory warnings
//! - A reactive controller that recomputes on every input change
//! - Chart-ready series with rendering-only correction for degenerate rings
//! - Parallel scenario sweeps

pub mod error;
pub mod config;
pub mod calculator;
pub mod validation;
pub mod projection;
pub mod chart;
pub mod controller;
pub mod scenario;

// Re-export commonly used types
pub use error::ConfigError;
pub use config::{Assumptions, CalculatorConfig, RangeTable};
pub use calculator::{AnyInputs, AnyResult, CalculatorKind, Field, InputRecord, ProjectionOutput};
pub use validation::{validate_range, ValidationErrors};
pub use controller::{Controller, ControllerState, ListenerId};
pub use chart::{to_chart_series, ChartSegment};
pub use scenario::ScenarioRunner;
