//! Step-up systematic investment plan
//!
//! Deposit-then-grow (annuity-due): each month's contribution earns that
//! month's return. The step-up applies after the 12th contribution of a year,
//! so the raised amount is first invested in month 13.

use serde::{Deserialize, Serialize};

use super::schedule::{PeriodRow, Schedule};
use super::state::{horizon_months, PeriodClock};
use crate::calculator::field::to_count;
use crate::calculator::{CalculatorKind, Field, InputRecord, ProjectionOutput};
use crate::config::Assumptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInputs {
    pub monthly_investment: f64,
    pub duration_years: u32,
    /// Expected annual return, percent
    pub expected_return: f64,
    /// Annual raise applied to the contribution, percent
    pub step_up_percent: f64,
}

impl Default for SipInputs {
    fn default() -> Self {
        Self {
            monthly_investment: 10_000.0,
            duration_years: 10,
            expected_return: 12.0,
            step_up_percent: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub corpus: f64,
    pub invested: f64,
    pub returns: f64,
    pub schedule: Schedule,
}

pub fn project_sip(inputs: &SipInputs) -> SipResult {
    let months = horizon_months(inputs.duration_years);
    let monthly_rate = inputs.expected_return / 100.0 / 12.0;
    let step_up = 1.0 + inputs.step_up_percent / 100.0;

    let mut clock = PeriodClock::new();
    let mut schedule = Schedule::with_capacity(months as usize);
    let mut corpus = 0.0;
    let mut invested = 0.0;
    let mut contribution = inputs.monthly_investment;

    for _ in 0..months {
        clock.advance();
        let mut row = PeriodRow::new(&clock, corpus);

        let deposited = corpus + contribution;
        corpus = deposited * (1.0 + monthly_rate);
        invested += contribution;

        row.contribution = contribution;
        row.interest = corpus - deposited;
        row.closing_balance = corpus;
        schedule.add_row(row);

        if clock.is_year_end() {
            contribution *= step_up;
        }
    }

    SipResult {
        corpus,
        invested,
        returns: corpus - invested,
        schedule,
    }
}

const FIELDS: [Field; 4] = [
    Field::MonthlyInvestment,
    Field::DurationYears,
    Field::ExpectedReturn,
    Field::StepUpPercent,
];

impl InputRecord for SipInputs {
    type Output = SipResult;

    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Sip
    }

    fn fields(&self) -> &'static [Field] {
        &FIELDS
    }

    fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::MonthlyInvestment => Some(self.monthly_investment),
            Field::DurationYears => Some(self.duration_years as f64),
            Field::ExpectedReturn => Some(self.expected_return),
            Field::StepUpPercent => Some(self.step_up_percent),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: f64) -> bool {
        match field {
            Field::MonthlyInvestment => self.monthly_investment = value,
            Field::DurationYears => self.duration_years = to_count(value),
            Field::ExpectedReturn => self.expected_return = value,
            Field::StepUpPercent => self.step_up_percent = value,
            _ => return false,
        }
        true
    }

    fn defaults(&self) -> Self {
        Self::default()
    }

    fn project(&self, _assumptions: &Assumptions) -> SipResult {
        project_sip(self)
    }
}

impl ProjectionOutput for SipResult {
    fn segments(&self) -> Vec<(&'static str, f64)> {
        vec![("Invested", self.invested), ("Returns", self.returns)]
    }

    fn headline(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Invested amount", self.invested),
            ("Estimated returns", self.returns),
            ("Total value", self.corpus),
        ]
    }

    fn schedule(&self) -> Option<&Schedule> {
        Some(&self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn inputs(monthly: f64, years: u32, rate: f64, step_up: f64) -> SipInputs {
        SipInputs {
            monthly_investment: monthly,
            duration_years: years,
            expected_return: rate,
            step_up_percent: step_up,
        }
    }

    #[test]
    fn test_flat_sip_matches_annuity_due_formula() {
        let result = project_sip(&inputs(10_000.0, 10, 12.0, 0.0));

        let i: f64 = 0.01;
        let n = 120;
        let expected = 10_000.0 * ((1.0 + i).powi(n) - 1.0) / i * (1.0 + i);

        assert_eq!(result.invested, 1_200_000.0);
        assert!(result.corpus > result.invested);
        assert_relative_eq!(result.corpus, expected, max_relative = 1e-9);
        assert_eq!(result.returns, result.corpus - result.invested);
        assert_eq!(result.schedule.rows.len(), 120);
    }

    #[test]
    fn test_step_up_takes_effect_from_month_13() {
        let result = project_sip(&inputs(1_000.0, 2, 12.0, 10.0));
        let rows = &result.schedule.rows;

        assert_eq!(rows[11].contribution, 1_000.0);
        assert_relative_eq!(rows[12].contribution, 1_100.0, epsilon = 1e-9);
        assert_relative_eq!(result.invested, 12.0 * 1_000.0 + 12.0 * 1_100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_deposit_then_grow_ordering() {
        // One month at 12%: the deposit itself earns 1%
        let result = project_sip(&inputs(1_000.0, 1, 12.0, 0.0));
        assert_relative_eq!(result.schedule.rows[0].closing_balance, 1_010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_return_is_flat() {
        let result = project_sip(&inputs(5_000.0, 3, 0.0, 0.0));
        assert_eq!(result.corpus, 180_000.0);
        assert_eq!(result.returns, 0.0);
    }

    #[test]
    fn test_zero_duration_is_empty() {
        let result = project_sip(&inputs(5_000.0, 0, 12.0, 0.0));
        assert_eq!(result.corpus, 0.0);
        assert_eq!(result.invested, 0.0);
        assert!(result.schedule.rows.is_empty());
    }

    #[test]
    fn test_set_rounds_duration() {
        let mut record = SipInputs::default();
        assert!(record.set(Field::DurationYears, 14.7));
        assert_eq!(record.duration_years, 15);
        assert!(!record.set(Field::Principal, 1.0));
    }

    proptest! {
        #[test]
        fn prop_positive_return_beats_contributions(
            monthly in 1.0f64..1_000_000.0,
            years in 1u32..=30,
            rate in 0.1f64..30.0,
            step_up in 0.0f64..50.0,
        ) {
            let result = project_sip(&inputs(monthly, years, rate, step_up));
            prop_assert!(result.corpus > result.invested);
            prop_assert_eq!(result.returns, result.corpus - result.invested);
        }

        #[test]
        fn prop_projection_is_deterministic(
            monthly in 0.0f64..1_000_000.0,
            years in 0u32..=30,
            rate in -10.0f64..30.0,
        ) {
            let record = inputs(monthly, years, rate, 5.0);
            prop_assert_eq!(project_sip(&record), project_sip(&record));
        }
    }
}
