pub mod debt_service;
pub mod engine;
pub mod summary;

pub use engine::{project, run_projection, ParameterSet, ProjectionResult, YearRecord};
pub use summary::{InvestmentBasis, ProjectionSummary};
