pub mod error;
pub mod input;
pub mod projection;
pub mod report;
pub mod time_value;
pub mod types;

#[cfg(feature = "share")]
pub mod share;

#[cfg(feature = "store")]
pub mod store;

pub use error::SolarCalcError;
pub use projection::{project, run_projection, ParameterSet, ProjectionResult, YearRecord};
pub use types::*;

/// Standard result type for all solar-calc operations
pub type SolarCalcResult<T> = Result<T, SolarCalcError>;
