//! Projection functions, one per calculator
//!
//! Every function is pure and total: any input record yields finite numbers,
//! falling back to flat or single-period arithmetic where a division could
//! otherwise blow up.

mod state;
mod schedule;
mod sip;
mod fd;
mod swp;
mod retirement;
mod emergency;

pub use state::{horizon_months, PeriodClock, MAX_PROJECTION_MONTHS};
pub use schedule::{PeriodRow, Schedule, ScheduleSummary, YearPoint};
pub use sip::{project_sip, SipInputs, SipResult};
pub use fd::{project_fd, FdInputs, FdResult};
pub use swp::{project_swp, SwpInputs, SwpResult};
pub use retirement::{project_retirement, RetirementInputs, RetirementResult};
pub use emergency::{project_emergency_fund, EmergencyFundInputs, EmergencyFundResult};
