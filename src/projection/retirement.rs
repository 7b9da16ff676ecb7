//! Retirement corpus target and the monthly SIP needed to reach it

use serde::{Deserialize, Serialize};

use crate::calculator::field::to_count;
use crate::calculator::{CalculatorKind, Field, InputRecord, ProjectionOutput};
use crate::config::{Assumptions, FieldRange, RangeTable};
use crate::validation::FieldRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expenses: f64,
    pub current_corpus: f64,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 60,
            monthly_expenses: 50_000.0,
            current_corpus: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub required_corpus: f64,
    pub monthly_sip: f64,
    /// Years used for the SIP, never less than one
    pub years_to_retire: u32,
    pub warning: Option<String>,
}

pub fn project_retirement(inputs: &RetirementInputs, assumptions: &Assumptions) -> RetirementResult {
    let required_corpus = inputs.monthly_expenses * 12.0 * assumptions.corpus_multiple;
    let years_to_retire = inputs
        .retirement_age
        .saturating_sub(inputs.current_age)
        .max(1);
    let monthly_sip = (required_corpus - inputs.current_corpus) / (years_to_retire as f64 * 12.0);

    let warning = if monthly_sip <= 0.0 {
        Some(
            "Current corpus already meets the retirement target; no further monthly investment is needed."
                .to_string(),
        )
    } else {
        None
    };

    RetirementResult {
        required_corpus,
        monthly_sip,
        years_to_retire,
        warning,
    }
}

const FIELDS: [Field; 4] = [
    Field::CurrentAge,
    Field::RetirementAge,
    Field::MonthlyExpenses,
    Field::CurrentCorpus,
];

impl InputRecord for RetirementInputs {
    type Output = RetirementResult;

    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Retirement
    }

    fn fields(&self) -> &'static [Field] {
        &FIELDS
    }

    fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::CurrentAge => Some(self.current_age as f64),
            Field::RetirementAge => Some(self.retirement_age as f64),
            Field::MonthlyExpenses => Some(self.monthly_expenses),
            Field::CurrentCorpus => Some(self.current_corpus),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: f64) -> bool {
        match field {
            Field::CurrentAge => self.current_age = to_count(value),
            Field::RetirementAge => self.retirement_age = to_count(value),
            Field::MonthlyExpenses => self.monthly_expenses = value,
            Field::CurrentCorpus => self.current_corpus = value,
            _ => return false,
        }
        true
    }

    /// Retirement age must exceed the current age
    fn cross_field_rules(&self, ranges: &RangeTable) -> Vec<FieldRule> {
        let declared = ranges.get(Field::RetirementAge);
        let min = declared.min.max(self.current_age as f64 + 1.0);
        vec![FieldRule::new(
            Field::RetirementAge,
            FieldRange::new(min, declared.max.max(min)),
        )]
    }

    fn defaults(&self) -> Self {
        Self::default()
    }

    fn project(&self, assumptions: &Assumptions) -> RetirementResult {
        project_retirement(self, assumptions)
    }
}

impl ProjectionOutput for RetirementResult {
    fn warnings(&self) -> Vec<String> {
        self.warning.iter().cloned().collect()
    }

    fn segments(&self) -> Vec<(&'static str, f64)> {
        let funded = self.required_corpus - self.monthly_sip * self.years_to_retire as f64 * 12.0;
        let funded = funded.clamp(0.0, self.required_corpus.max(0.0));
        vec![
            ("Already saved", funded),
            ("Still to invest", self.required_corpus - funded),
        ]
    }

    fn headline(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Required corpus", self.required_corpus),
            ("Monthly SIP needed", self.monthly_sip),
        ]
    }
}
