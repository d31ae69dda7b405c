//! HTTP service for bigo.
//!
//! Times toy algorithms over growing input sizes, renders the timing curve,
//! and stores analysis reports on request.

pub mod analysis;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use analysis::{Analysis, AnalysisError, AnalysisReport};
pub use config::Config;
pub use error::ApiError;
pub use metrics::OperationMetrics;
pub use routes::{router, serve, AppState};
