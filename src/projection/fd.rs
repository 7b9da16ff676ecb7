//! Compound fixed deposit

use serde::{Deserialize, Serialize};

use super::schedule::{PeriodRow, Schedule};
use super::state::{horizon_months, PeriodClock};
use crate::calculator::field::to_count;
use crate::calculator::{CalculatorKind, Field, InputRecord, ProjectionOutput};
use crate::config::Assumptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdInputs {
    pub principal: f64,
    /// Nominal annual rate, percent
    pub interest_rate: f64,
    pub duration_years: u32,
    /// Compounding periods per year
    pub compounding_frequency: u32,
}

impl Default for FdInputs {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            interest_rate: 7.0,
            duration_years: 5,
            compounding_frequency: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdResult {
    pub maturity: f64,
    pub interest: f64,
    /// Effective annual yield, percent
    pub annualized_rate: f64,
    /// One row per year
    pub schedule: Schedule,
}

/// Balance after `years` of compounding; zero frequency compounds annually
fn compound(principal: f64, interest_rate: f64, frequency: u32, years: f64) -> f64 {
    let n = frequency.max(1) as f64;
    principal * (1.0 + interest_rate / 100.0 / n).powf(n * years)
}

pub fn project_fd(inputs: &FdInputs) -> FdResult {
    let years = inputs.duration_years;
    let maturity = compound(
        inputs.principal,
        inputs.interest_rate,
        inputs.compounding_frequency,
        years as f64,
    );

    let growth = maturity / inputs.principal;
    let annualized_rate = if inputs.principal <= 0.0 || years == 0 {
        0.0
    } else if growth <= 0.0 {
        // Rate below -100% per period wipes out the deposit
        -100.0
    } else {
        (growth.powf(1.0 / years as f64) - 1.0) * 100.0
    };

    // Closed form above uses the full term; only the yearly rows are bounded
    let schedule_years = horizon_months(years) / 12;
    let mut clock = PeriodClock::new();
    let mut schedule = Schedule::with_capacity(schedule_years as usize);
    let mut balance = inputs.principal;
    for year in 1..=schedule_years {
        for _ in 0..12 {
            clock.advance();
        }
        let mut row = PeriodRow::new(&clock, balance);
        balance = if year == years {
            maturity
        } else {
            compound(
                inputs.principal,
                inputs.interest_rate,
                inputs.compounding_frequency,
                year as f64,
            )
        };
        if year == 1 {
            row.contribution = inputs.principal;
        }
        row.interest = balance - row.opening_balance;
        row.closing_balance = balance;
        schedule.add_row(row);
    }

    FdResult {
        maturity,
        interest: maturity - inputs.principal,
        annualized_rate,
        schedule,
    }
}

const FIELDS: [Field; 4] = [
    Field::Principal,
    Field::InterestRate,
    Field::DurationYears,
    Field::CompoundingFrequency,
];

impl InputRecord for FdInputs {
    type Output = FdResult;

    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Fd
    }

    fn fields(&self) -> &'static [Field] {
        &FIELDS
    }

    fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Principal => Some(self.principal),
            Field::InterestRate => Some(self.interest_rate),
            Field::DurationYears => Some(self.duration_years as f64),
            Field::CompoundingFrequency => Some(self.compounding_frequency as f64),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: f64) -> bool {
        match field {
            Field::Principal => self.principal = value,
            Field::InterestRate => self.interest_rate = value,
            Field::DurationYears => self.duration_years = to_count(value),
            Field::CompoundingFrequency => self.compounding_frequency = to_count(value),
            _ => return false,
        }
        true
    }

    fn defaults(&self) -> Self {
        Self::default()
    }

    fn project(&self, _assumptions: &Assumptions) -> FdResult {
        project_fd(self)
    }
}

impl ProjectionOutput for FdResult {
    fn segments(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Principal", self.maturity - self.interest),
            ("Interest", self.interest),
        ]
    }

    fn headline(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Maturity value", self.maturity),
            ("Interest earned", self.interest),
            ("Effective annual yield (%)", self.annualized_rate),
        ]
    }

    fn schedule(&self) -> Option<&Schedule> {
        Some(&self.schedule)
    }
}
