//! Systematic withdrawal plan
//!
//! Interest accrues on the opening balance, then the fixed withdrawal is
//! taken. If the balance cannot cover it, whatever remains is paid out and
//! the simulation stops early.

use serde::{Deserialize, Serialize};

use super::schedule::{PeriodRow, Schedule};
use super::state::{horizon_months, PeriodClock};
use crate::calculator::field::to_count;
use crate::calculator::{CalculatorKind, Field, InputRecord, ProjectionOutput};
use crate::config::Assumptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpInputs {
    pub corpus: f64,
    pub withdrawal_amount: f64,
    pub duration_years: u32,
    /// Expected annual return, percent
    pub expected_return: f64,
}

impl Default for SwpInputs {
    fn default() -> Self {
        Self {
            corpus: 1_000_000.0,
            withdrawal_amount: 10_000.0,
            duration_years: 10,
            expected_return: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub maturity_corpus: f64,
    pub total_withdrawn: f64,
    /// Interest accrued over the simulated months
    pub returns: f64,
    /// Months in which a withdrawal was made
    pub months_sustained: u32,
    /// Set when the corpus is exhausted
    pub warning: Option<String>,
    pub schedule: Schedule,
}

/// Simulate the withdrawal plan month by month
///
/// A negative corpus opens at zero, so `returns == maturity_corpus +
/// total_withdrawn - corpus.max(0.0)` holds against the clamped opening
/// balance rather than the raw input.
pub fn project_swp(inputs: &SwpInputs) -> SwpResult {
    let months = horizon_months(inputs.duration_years);
    let monthly_rate = inputs.expected_return / 100.0 / 12.0;

    let mut clock = PeriodClock::new();
    let mut schedule = Schedule::with_capacity(months as usize);
    let mut balance = inputs.corpus.max(0.0);
    let mut total_withdrawn = 0.0;
    let mut total_returns = 0.0;

    for _ in 0..months {
        clock.advance();
        let mut row = PeriodRow::new(&clock, balance);

        let monthly_interest = balance * monthly_rate;
        balance += monthly_interest;
        total_returns += monthly_interest;
        row.interest = monthly_interest;

        let exhausted = balance < inputs.withdrawal_amount;
        let withdrawal = if exhausted {
            balance.max(0.0)
        } else {
            inputs.withdrawal_amount
        };
        balance = if exhausted { 0.0 } else { balance - withdrawal };
        total_withdrawn += withdrawal;

        row.withdrawal = withdrawal;
        row.closing_balance = balance;
        schedule.add_row(row);

        if exhausted {
            log::debug!("SWP corpus exhausted in month {}", clock.month);
            break;
        }
    }

    let months_sustained = schedule
        .rows
        .iter()
        .filter(|row| row.withdrawal > 0.0)
        .count() as u32;

    let warning = if balance <= 0.0 {
        Some(exhaustion_warning(months_sustained, months))
    } else {
        None
    };

    SwpResult {
        maturity_corpus: balance,
        total_withdrawn,
        returns: total_returns,
        months_sustained,
        warning,
        schedule,
    }
}

fn exhaustion_warning(months_sustained: u32, months_requested: u32) -> String {
    format!(
        "Corpus runs out after {} of {} months; this withdrawal plan is not sustainable. \
         Lower the withdrawal, shorten the duration or start with a larger corpus.",
        months_sustained, months_requested
    )
}

const FIELDS: [Field; 4] = [
    Field::Corpus,
    Field::WithdrawalAmount,
    Field::DurationYears,
    Field::ExpectedReturn,
];

impl InputRecord for SwpInputs {
    type Output = SwpResult;

    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Swp
    }

    fn fields(&self) -> &'static [Field] {
        &FIELDS
    }

    fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Corpus => Some(self.corpus),
            Field::WithdrawalAmount => Some(self.withdrawal_amount),
            Field::DurationYears => Some(self.duration_years as f64),
            Field::ExpectedReturn => Some(self.expected_return),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: f64) -> bool {
        match field {
            Field::Corpus => self.corpus = value,
            Field::WithdrawalAmount => self.withdrawal_amount = value,
            Field::DurationYears => self.duration_years = to_count(value),
            Field::ExpectedReturn => self.expected_return = value,
            _ => return false,
        }
        true
    }

    fn defaults(&self) -> Self {
        Self::default()
    }

    fn project(&self, _assumptions: &Assumptions) -> SwpResult {
        project_swp(self)
    }
}

impl ProjectionOutput for SwpResult {
    fn warnings(&self) -> Vec<String> {
        self.warning.iter().cloned().collect()
    }

    fn segments(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Total withdrawn", self.total_withdrawn),
            ("Final corpus", self.maturity_corpus),
        ]
    }

    fn headline(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Total withdrawn", self.total_withdrawn),
            ("Returns earned", self.returns),
            ("Final corpus", self.maturity_corpus),
        ]
    }

    fn schedule(&self) -> Option<&Schedule> {
        Some(&self.schedule)
    }
}
