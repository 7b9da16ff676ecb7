//! Calculation controller
//!
//! An observer/store that owns one calculator's inputs and derived output.
//! Every mutation runs validation and projection synchronously, then
//! notifies subscribers once. Invalid input never blocks the projection, so
//! the UI always has live numbers next to any error message.

mod state;

pub use state::ControllerState;

use std::collections::BTreeSet;

use crate::calculator::{AnyInputs, CalculatorKind, Field, InputRecord, ProjectionOutput};
use crate::chart::{self, ChartSegment, SeriesPoint};
use crate::config::CalculatorConfig;
use crate::validation::ValidationErrors;

/// Callback invoked after every state change
pub type Listener<I> = Box<dyn FnMut(&ControllerState<I>)>;

/// Handle returned by [`Controller::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct Controller<I: InputRecord> {
    state: ControllerState<I>,
    config: CalculatorConfig,
    listeners: Vec<(ListenerId, Listener<I>)>,
    next_listener_id: u64,
    /// Number of validate + project passes run so far
    revision: u64,
}

impl<I: InputRecord> Controller<I> {
    /// Create a controller and compute its first result
    pub fn new(inputs: I, config: CalculatorConfig) -> Self {
        log::debug!("mounting {} calculator", inputs.kind());
        let state = ControllerState::evaluate(inputs, BTreeSet::new(), &config);
        Self {
            state,
            config,
            listeners: Vec::new(),
            next_listener_id: 0,
            revision: 1,
        }
    }

    /// Merge a partial update, mark the fields touched and recompute once
    ///
    /// Non-finite values and fields the product does not have are skipped.
    pub fn set_inputs<P>(&mut self, patch: P)
    where
        P: IntoIterator<Item = (Field, f64)>,
    {
        let mut inputs = self.state.inputs.clone();
        let mut touched = std::mem::take(&mut self.state.touched);

        for (field, value) in patch {
            if inputs.get(field).is_none() {
                log::warn!("{} calculator has no field {}", inputs.kind(), field);
                continue;
            }
            touched.insert(field);
            if !value.is_finite() {
                log::warn!("ignoring non-finite value for {}", field);
                continue;
            }
            inputs.set(field, value);
        }

        self.recompute(inputs, touched);
        self.notify();
    }

    /// Convenience for a single-field update
    pub fn set_input(&mut self, field: Field, value: f64) {
        self.set_inputs([(field, value)]);
    }

    /// Mark a field as interacted with (on blur) without changing its value
    pub fn set_touched(&mut self, field: Field) {
        if self.state.inputs.get(field).is_none() {
            log::warn!("{} calculator has no field {}", self.state.inputs.kind(), field);
            return;
        }
        self.state.touched.insert(field);
        self.notify();
    }

    /// Mark every field of the product as touched, e.g. on submit
    pub fn touch_all(&mut self) {
        self.state
            .touched
            .extend(self.state.inputs.fields().iter().copied());
        self.notify();
    }

    /// Restore product defaults and forget interaction history
    pub fn reset(&mut self) {
        let defaults = self.state.inputs.defaults();
        self.recompute(defaults, BTreeSet::new());
        self.notify();
    }

    /// Register a listener; it runs after every subsequent change
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ControllerState<I>) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn state(&self) -> &ControllerState<I> {
        &self.state
    }

    pub fn inputs(&self) -> &I {
        &self.state.inputs
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.state.errors
    }

    /// Errors for touched fields only, so a pristine form shows none
    pub fn visible_errors(&self) -> ValidationErrors {
        self.state.visible_errors()
    }

    pub fn touched(&self) -> &BTreeSet<Field> {
        &self.state.touched
    }

    pub fn results(&self) -> &I::Output {
        &self.state.results
    }

    pub fn warnings(&self) -> &[String] {
        &self.state.warnings
    }

    pub fn chart_ready(&self) -> bool {
        self.state.chart_ready
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Ring-chart segments for the current result
    pub fn chart_series(&self) -> Vec<ChartSegment> {
        chart::to_chart_series(&self.state.results, self.config.assumptions.chart_epsilon)
    }

    /// Year-by-year series, for products that simulate a schedule
    pub fn growth_series(&self) -> Option<Vec<SeriesPoint>> {
        self.state.results.schedule().map(chart::growth_series)
    }

    fn recompute(&mut self, inputs: I, touched: BTreeSet<Field>) {
        self.state = ControllerState::evaluate(inputs, touched, &self.config);
        self.revision += 1;
        log::debug!(
            "{} recomputed (revision {}, {} errors, {} warnings)",
            self.state.inputs.kind(),
            self.revision,
            self.state.errors.len(),
            self.state.warnings.len()
        );
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

impl<I: InputRecord + Default> Controller<I> {
    /// Controller seeded with the product's defaults
    pub fn with_defaults(config: CalculatorConfig) -> Self {
        Self::new(I::default(), config)
    }
}

impl Controller<AnyInputs> {
    /// Controller for a calculator chosen at runtime
    pub fn for_kind(kind: CalculatorKind, config: CalculatorConfig) -> Self {
        Self::new(AnyInputs::defaults_for(kind), config)
    }
}
