//! Period clock for month-by-month simulations

/// Maximum simulated horizon; longer durations saturate here
pub const MAX_PROJECTION_MONTHS: u32 = 1_200;

/// Position of a simulation in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodClock {
    /// Current month (1-indexed, 0 before the first advance)
    pub month: u32,

    /// Year of the current month (1-indexed)
    pub year: u32,

    /// Month within the year (1-12, 0 before the first advance)
    pub month_in_year: u32,
}

impl PeriodClock {
    pub fn new() -> Self {
        Self {
            month: 0,
            year: 1,
            month_in_year: 0,
        }
    }

    /// Advance to next month
    pub fn advance(&mut self) {
        self.month += 1;
        self.year = (self.month - 1) / 12 + 1;
        self.month_in_year = (self.month - 1) % 12 + 1;
    }

    /// Whether the current month closes a year
    pub fn is_year_end(&self) -> bool {
        self.month_in_year == 12
    }
}

impl Default for PeriodClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of months to simulate for a duration in years
pub fn horizon_months(duration_years: u32) -> u32 {
    duration_years
        .saturating_mul(12)
        .min(MAX_PROJECTION_MONTHS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_rolls_into_second_year() {
        let mut clock = PeriodClock::new();
        for _ in 0..12 {
            clock.advance();
        }
        assert_eq!((clock.month, clock.year, clock.month_in_year), (12, 1, 12));
        assert!(clock.is_year_end());

        clock.advance();
        assert_eq!((clock.month, clock.year, clock.month_in_year), (13, 2, 1));
        assert!(!clock.is_year_end());
    }

    #[test]
    fn test_horizon_saturates() {
        assert_eq!(horizon_months(10), 120);
        assert_eq!(horizon_months(0), 0);
        assert_eq!(horizon_months(u32::MAX), MAX_PROJECTION_MONTHS);
    }
}
