//! Calculator kinds and the tagged union over their records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Field, InputRecord, ProjectionOutput};
use crate::config::{Assumptions, RangeTable};
use crate::error::ConfigError;
use crate::projection::{
    EmergencyFundInputs, EmergencyFundResult, FdInputs, FdResult, RetirementInputs,
    RetirementResult, Schedule, SipInputs, SipResult, SwpInputs, SwpResult,
};
use crate::validation::FieldRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Sip,
    Fd,
    Swp,
    Retirement,
    EmergencyFund,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 5] = [
        CalculatorKind::Sip,
        CalculatorKind::Fd,
        CalculatorKind::Swp,
        CalculatorKind::Retirement,
        CalculatorKind::EmergencyFund,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CalculatorKind::Sip => "sip",
            CalculatorKind::Fd => "fd",
            CalculatorKind::Swp => "swp",
            CalculatorKind::Retirement => "retirement",
            CalculatorKind::EmergencyFund => "emergency-fund",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalculatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalculatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownCalculator(s.trim().to_string()))
    }
}

/// Input record of any calculator, chosen at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnyInputs {
    Sip(SipInputs),
    Fd(FdInputs),
    Swp(SwpInputs),
    Retirement(RetirementInputs),
    EmergencyFund(EmergencyFundInputs),
}

/// Result record of any calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnyResult {
    Sip(SipResult),
    Fd(FdResult),
    Swp(SwpResult),
    Retirement(RetirementResult),
    EmergencyFund(EmergencyFundResult),
}

impl AnyInputs {
    /// Product defaults for a kind
    pub fn defaults_for(kind: CalculatorKind) -> Self {
        match kind {
            CalculatorKind::Sip => AnyInputs::Sip(SipInputs::default()),
            CalculatorKind::Fd => AnyInputs::Fd(FdInputs::default()),
            CalculatorKind::Swp => AnyInputs::Swp(SwpInputs::default()),
            CalculatorKind::Retirement => AnyInputs::Retirement(RetirementInputs::default()),
            CalculatorKind::EmergencyFund => {
                AnyInputs::EmergencyFund(EmergencyFundInputs::default())
            }
        }
    }
}

/// Forward a method call to the record inside whichever variant is active
macro_rules! dispatch {
    ($value:expr, $record:ident => $body:expr) => {
        match $value {
            AnyInputs::Sip($record) => $body,
            AnyInputs::Fd($record) => $body,
            AnyInputs::Swp($record) => $body,
            AnyInputs::Retirement($record) => $body,
            AnyInputs::EmergencyFund($record) => $body,
        }
    };
}

macro_rules! dispatch_result {
    ($value:expr, $result:ident => $body:expr) => {
        match $value {
            AnyResult::Sip($result) => $body,
            AnyResult::Fd($result) => $body,
            AnyResult::Swp($result) => $body,
            AnyResult::Retirement($result) => $body,
            AnyResult::EmergencyFund($result) => $body,
        }
    };
}

impl InputRecord for AnyInputs {
    type Output = AnyResult;

    fn kind(&self) -> CalculatorKind {
        dispatch!(self, record => record.kind())
    }

    fn fields(&self) -> &'static [Field] {
        dispatch!(self, record => record.fields())
    }

    fn get(&self, field: Field) -> Option<f64> {
        dispatch!(self, record => record.get(field))
    }

    fn set(&mut self, field: Field, value: f64) -> bool {
        dispatch!(self, record => record.set(field, value))
    }

    fn cross_field_rules(&self, ranges: &RangeTable) -> Vec<FieldRule> {
        dispatch!(self, record => record.cross_field_rules(ranges))
    }

    fn defaults(&self) -> Self {
        AnyInputs::defaults_for(self.kind())
    }

    fn project(&self, assumptions: &Assumptions) -> AnyResult {
        match self {
            AnyInputs::Sip(record) => AnyResult::Sip(record.project(assumptions)),
            AnyInputs::Fd(record) => AnyResult::Fd(record.project(assumptions)),
            AnyInputs::Swp(record) => AnyResult::Swp(record.project(assumptions)),
            AnyInputs::Retirement(record) => AnyResult::Retirement(record.project(assumptions)),
            AnyInputs::EmergencyFund(record) => {
                AnyResult::EmergencyFund(record.project(assumptions))
            }
        }
    }
}

impl ProjectionOutput for AnyResult {
    fn warnings(&self) -> Vec<String> {
        dispatch_result!(self, result => result.warnings())
    }

    fn segments(&self) -> Vec<(&'static str, f64)> {
        dispatch_result!(self, result => result.segments())
    }

    fn headline(&self) -> Vec<(&'static str, f64)> {
        dispatch_result!(self, result => result.headline())
    }

    fn schedule(&self) -> Option<&Schedule> {
        dispatch_result!(self, result => result.schedule())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_kind() {
        for kind in CalculatorKind::ALL {
            let record = AnyInputs::defaults_for(kind);
            assert_eq!(record.kind(), kind);
            assert_eq!(record.fields().len(), 4);
            for &field in record.fields() {
                assert!(record.get(field).is_some(), "{} missing {}", kind, field);
            }
        }
    }

    #[test]
    fn test_kind_parses_from_name() {
        assert_eq!("emergency-fund".parse::<CalculatorKind>().unwrap(), CalculatorKind::EmergencyFund);
        assert_eq!("SIP".parse::<CalculatorKind>().unwrap(), CalculatorKind::Sip);
        assert!("loan".parse::<CalculatorKind>().is_err());
    }

    #[test]
    fn test_project_dispatches_to_product() {
        let record = AnyInputs::defaults_for(CalculatorKind::Swp);
        let result = record.project(&Assumptions::default());
        assert!(matches!(result, AnyResult::Swp(_)));
        assert!(result.schedule().is_some());

        let retirement = AnyInputs::defaults_for(CalculatorKind::Retirement);
        assert!(retirement.project(&Assumptions::default()).schedule().is_none());
    }

    #[test]
    fn test_any_inputs_serialize_with_kind_tag() {
        let json = serde_json::to_value(AnyInputs::defaults_for(CalculatorKind::Fd)).unwrap();
        assert_eq!(json["kind"], "fd");
        assert_eq!(json["compoundingFrequency"], 4);
    }
}
