//! Schedule output structures for time-stepped projections

use std::io;

use serde::{Deserialize, Serialize};

use super::state::PeriodClock;
use crate::error::ConfigError;

/// A single row of projection output for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRow {
    // Timing
    pub month: u32,
    pub year: u32,
    pub month_in_year: u32,

    // Balances
    pub opening_balance: f64,
    pub closing_balance: f64,

    // Flows
    pub contribution: f64,
    pub interest: f64,
    pub withdrawal: f64,
}

impl PeriodRow {
    /// Create a row at the clock's position with zero flows
    pub fn new(clock: &PeriodClock, opening_balance: f64) -> Self {
        Self {
            month: clock.month,
            year: clock.year,
            month_in_year: clock.month_in_year,
            opening_balance,
            closing_balance: opening_balance,
            contribution: 0.0,
            interest: 0.0,
            withdrawal: 0.0,
        }
    }
}

/// Year-end roll-up used for growth charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,

    /// Cumulative contributions up to the end of this year
    pub contributed: f64,

    /// Cumulative withdrawals up to the end of this year
    pub withdrawn: f64,

    /// Cumulative interest up to the end of this year
    pub interest: f64,

    /// Balance at the end of this year
    pub balance: f64,
}

/// Complete time-stepped projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<PeriodRow>,
}

impl Schedule {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_capacity(periods: usize) -> Self {
        Self {
            rows: Vec::with_capacity(periods),
        }
    }

    /// Add a period row
    pub fn add_row(&mut self, row: PeriodRow) {
        self.rows.push(row);
    }

    /// Cumulative position at the end of every year, including a partial final year
    pub fn yearly(&self) -> Vec<YearPoint> {
        let mut points: Vec<YearPoint> = Vec::new();
        let mut contributed = 0.0;
        let mut withdrawn = 0.0;
        let mut interest = 0.0;

        for row in &self.rows {
            contributed += row.contribution;
            withdrawn += row.withdrawal;
            interest += row.interest;

            let point = YearPoint {
                year: row.year,
                contributed,
                withdrawn,
                interest,
                balance: row.closing_balance,
            };
            match points.last_mut() {
                Some(last) if last.year == row.year => *last = point,
                _ => points.push(point),
            }
        }

        points
    }

    /// Write the yearly roll-up as CSV with a header row
    pub fn write_yearly_csv<W: io::Write>(&self, writer: W) -> Result<(), ConfigError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in self.yearly() {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_contributed: f64 = self.rows.iter().map(|r| r.contribution).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_withdrawn: f64 = self.rows.iter().map(|r| r.withdrawal).sum();
        let final_balance = self.rows.last().map(|r| r.closing_balance).unwrap_or(0.0);

        ScheduleSummary {
            total_periods: self.rows.len() as u32,
            total_contributed,
            total_interest,
            total_withdrawn,
            final_balance,
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub total_periods: u32,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub total_withdrawn: f64,
    pub final_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: u32, contribution: f64, interest: f64, closing: f64) -> PeriodRow {
        let mut clock = PeriodClock::new();
        for _ in 0..month {
            clock.advance();
        }
        PeriodRow {
            contribution,
            interest,
            closing_balance: closing,
            ..PeriodRow::new(&clock, 0.0)
        }
    }

    #[test]
    fn test_yearly_keeps_last_row_of_each_year() {
        let mut schedule = Schedule::new();
        for month in 1..=18 {
            schedule.add_row(row(month, 100.0, 1.0, month as f64 * 101.0));
        }

        let yearly = schedule.yearly();
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].year, 1);
        assert_eq!(yearly[0].contributed, 1_200.0);
        assert_eq!(yearly[0].balance, 12.0 * 101.0);
        // Partial second year still reported
        assert_eq!(yearly[1].year, 2);
        assert_eq!(yearly[1].contributed, 1_800.0);
        assert_eq!(yearly[1].interest, 18.0);
    }

    #[test]
    fn test_write_yearly_csv() {
        let mut schedule = Schedule::new();
        for month in 1..=12 {
            schedule.add_row(row(month, 100.0, 0.0, month as f64 * 100.0));
        }

        let mut buffer = Vec::new();
        schedule.write_yearly_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("year,contributed,withdrawn,interest,balance"));
        assert_eq!(lines.next(), Some("1,1200.0,0.0,0.0,1200.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Schedule::new().summary();
        assert_eq!(summary.total_periods, 0);
        assert_eq!(summary.final_balance, 0.0);
        assert!(Schedule::new().yearly().is_empty());
    }
}
