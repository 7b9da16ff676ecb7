//! Calculator identity: field names, record contracts and the product union

pub mod field;
mod kind;
mod record;

pub use field::Field;
pub use kind::{AnyInputs, AnyResult, CalculatorKind};
pub use record::{InputRecord, ProjectionOutput};
