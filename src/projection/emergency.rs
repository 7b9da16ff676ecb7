//! Emergency fund sizing

use serde::{Deserialize, Serialize};

use crate::calculator::field::to_count;
use crate::calculator::{CalculatorKind, Field, InputRecord, ProjectionOutput};
use crate::config::Assumptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundInputs {
    pub monthly_expenses: f64,
    pub months_covered: u32,
    pub lump_sum_available: f64,
    /// Scales the target for riskier income situations
    pub risk_multiplier: f64,
}

impl Default for EmergencyFundInputs {
    fn default() -> Self {
        Self {
            monthly_expenses: 40_000.0,
            months_covered: 6,
            lump_sum_available: 0.0,
            risk_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFundResult {
    pub recommended_fund: f64,
    pub shortfall: f64,
    /// Saving needed per month to close the shortfall within the covered months
    pub monthly_saving: f64,
    /// Months of risk-adjusted expenses the lump sum already covers
    pub months_funded: f64,
}

pub fn project_emergency_fund(inputs: &EmergencyFundInputs) -> EmergencyFundResult {
    let recommended_fund =
        inputs.monthly_expenses * inputs.months_covered as f64 * inputs.risk_multiplier;
    let shortfall = (recommended_fund - inputs.lump_sum_available).max(0.0);
    let monthly_saving = shortfall / inputs.months_covered.max(1) as f64;

    let monthly_need = inputs.monthly_expenses * inputs.risk_multiplier;
    let months_funded = if monthly_need > 0.0 {
        inputs.lump_sum_available.max(0.0) / monthly_need
    } else {
        0.0
    };

    EmergencyFundResult {
        recommended_fund,
        shortfall,
        monthly_saving,
        months_funded,
    }
}

const FIELDS: [Field; 4] = [
    Field::MonthlyExpenses,
    Field::MonthsCovered,
    Field::LumpSumAvailable,
    Field::RiskMultiplier,
];

impl InputRecord for EmergencyFundInputs {
    type Output = EmergencyFundResult;

    fn kind(&self) -> CalculatorKind {
        CalculatorKind::EmergencyFund
    }

    fn fields(&self) -> &'static [Field] {
        &FIELDS
    }

    fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::MonthlyExpenses => Some(self.monthly_expenses),
            Field::MonthsCovered => Some(self.months_covered as f64),
            Field::LumpSumAvailable => Some(self.lump_sum_available),
            Field::RiskMultiplier => Some(self.risk_multiplier),
            _ => None,
        }
    }

    fn set(&mut self, field: Field, value: f64) -> bool {
        match field {
            Field::MonthlyExpenses => self.monthly_expenses = value,
            Field::MonthsCovered => self.months_covered = to_count(value),
            Field::LumpSumAvailable => self.lump_sum_available = value,
            Field::RiskMultiplier => self.risk_multiplier = value,
            _ => return false,
        }
        true
    }

    fn defaults(&self) -> Self {
        Self::default()
    }

    fn project(&self, _assumptions: &Assumptions) -> EmergencyFundResult {
        project_emergency_fund(self)
    }
}

impl ProjectionOutput for EmergencyFundResult {
    fn segments(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Available", self.recommended_fund - self.shortfall),
            ("Shortfall", self.shortfall),
        ]
    }

    fn headline(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Recommended fund", self.recommended_fund),
            ("Shortfall", self.shortfall),
            ("Monthly saving", self.monthly_saving),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inputs(expenses: f64, months: u32, lump_sum: f64, risk: f64) -> EmergencyFundInputs {
        EmergencyFundInputs {
            monthly_expenses: expenses,
            months_covered: months,
            lump_sum_available: lump_sum,
            risk_multiplier: risk,
        }
    }

    #[test]
    fn test_risk_adjusted_target() {
        let result = project_emergency_fund(&inputs(40_000.0, 6, 0.0, 1.5));

        assert_eq!(result.recommended_fund, 360_000.0);
        assert_eq!(result.shortfall, 360_000.0);
        assert_eq!(result.monthly_saving, 60_000.0);
        assert_eq!(result.months_funded, 0.0);
    }

    #[test]
    fn test_lump_sum_reduces_shortfall() {
        let result = project_emergency_fund(&inputs(30_000.0, 6, 120_000.0, 1.0));

        assert_eq!(result.shortfall, 60_000.0);
        assert_eq!(result.monthly_saving, 10_000.0);
        assert_eq!(result.months_funded, 4.0);
    }

    #[test]
    fn test_surplus_has_no_shortfall() {
        let result = project_emergency_fund(&inputs(30_000.0, 6, 500_000.0, 1.0));
        assert_eq!(result.shortfall, 0.0);
        assert_eq!(result.monthly_saving, 0.0);
    }

    #[test]
    fn test_zero_months_is_guarded() {
        let result = project_emergency_fund(&inputs(30_000.0, 0, 0.0, 1.0));
        assert_eq!(result.recommended_fund, 0.0);
        assert_eq!(result.monthly_saving, 0.0);

        let no_expenses = project_emergency_fund(&inputs(0.0, 6, 10_000.0, 1.0));
        assert_eq!(no_expenses.months_funded, 0.0);
    }

    proptest! {
        #[test]
        fn prop_projection_is_deterministic(
            expenses in 0.0f64..10_000_000.0,
            months in 0u32..=24,
            lump_sum in 0.0f64..1_000_000_000.0,
            risk in 1.0f64..=3.0,
        ) {
            let record = inputs(expenses, months, lump_sum, risk);
            prop_assert_eq!(project_emergency_fund(&record), project_emergency_fund(&record));
        }
    }
}
