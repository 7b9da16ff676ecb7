//! Field identifiers shared by every calculator input record

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named numeric input field
///
/// One enum covers all products so validation messages, touched sets and
/// range tables can be keyed uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    MonthlyInvestment,
    DurationYears,
    ExpectedReturn,
    StepUpPercent,
    Principal,
    InterestRate,
    CompoundingFrequency,
    Corpus,
    WithdrawalAmount,
    CurrentAge,
    RetirementAge,
    MonthlyExpenses,
    CurrentCorpus,
    MonthsCovered,
    LumpSumAvailable,
    RiskMultiplier,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::MonthlyInvestment,
        Field::DurationYears,
        Field::ExpectedReturn,
        Field::StepUpPercent,
        Field::Principal,
        Field::InterestRate,
        Field::CompoundingFrequency,
        Field::Corpus,
        Field::WithdrawalAmount,
        Field::CurrentAge,
        Field::RetirementAge,
        Field::MonthlyExpenses,
        Field::CurrentCorpus,
        Field::MonthsCovered,
        Field::LumpSumAvailable,
        Field::RiskMultiplier,
    ];

    /// Stable camelCase key used in config files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Field::MonthlyInvestment => "monthlyInvestment",
            Field::DurationYears => "durationYears",
            Field::ExpectedReturn => "expectedReturn",
            Field::StepUpPercent => "stepUpPercent",
            Field::Principal => "principal",
            Field::InterestRate => "interestRate",
            Field::CompoundingFrequency => "compoundingFrequency",
            Field::Corpus => "corpus",
            Field::WithdrawalAmount => "withdrawalAmount",
            Field::CurrentAge => "currentAge",
            Field::RetirementAge => "retirementAge",
            Field::MonthlyExpenses => "monthlyExpenses",
            Field::CurrentCorpus => "currentCorpus",
            Field::MonthsCovered => "monthsCovered",
            Field::LumpSumAvailable => "lumpSumAvailable",
            Field::RiskMultiplier => "riskMultiplier",
        }
    }

    /// Human-readable label used in validation messages
    pub fn label(self) -> &'static str {
        match self {
            Field::MonthlyInvestment => "Monthly investment",
            Field::DurationYears => "Duration (years)",
            Field::ExpectedReturn => "Expected annual return (%)",
            Field::StepUpPercent => "Annual step-up (%)",
            Field::Principal => "Principal",
            Field::InterestRate => "Interest rate (%)",
            Field::CompoundingFrequency => "Compounding frequency",
            Field::Corpus => "Corpus",
            Field::WithdrawalAmount => "Monthly withdrawal",
            Field::CurrentAge => "Current age",
            Field::RetirementAge => "Retirement age",
            Field::MonthlyExpenses => "Monthly expenses",
            Field::CurrentCorpus => "Current corpus",
            Field::MonthsCovered => "Months covered",
            Field::LumpSumAvailable => "Lump sum available",
            Field::RiskMultiplier => "Risk multiplier",
        }
    }

    /// Whether the field holds a whole count (years, ages, months, periods)
    pub fn is_count(self) -> bool {
        matches!(
            self,
            Field::DurationYears
                | Field::CompoundingFrequency
                | Field::CurrentAge
                | Field::RetirementAge
                | Field::MonthsCovered
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownField(trimmed.to_string()))
    }
}

/// Convert a UI-supplied number into a whole count
///
/// Rounds to nearest and saturates at zero; `as` saturates at `u32::MAX`.
pub fn to_count(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("MONTHLYINVESTMENT".parse::<Field>().unwrap(), Field::MonthlyInvestment);
        assert!(matches!(
            "salary".parse::<Field>(),
            Err(ConfigError::UnknownField(name)) if name == "salary"
        ));
    }

    #[test]
    fn test_to_count_rounds_and_saturates() {
        assert_eq!(to_count(9.6), 10);
        assert_eq!(to_count(-3.0), 0);
        assert_eq!(to_count(0.4), 0);
        assert_eq!(to_count(1e20), u32::MAX);
    }

    #[test]
    fn test_serde_key_matches_key() {
        let json = serde_json::to_string(&Field::LumpSumAvailable).unwrap();
        assert_eq!(json, "\"lumpSumAvailable\"");
    }
}
