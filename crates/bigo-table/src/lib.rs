//! # bigo-table
//!
//! Persistence gateway for analysis results, backed by SQLite.
//!
//! The request layer only sees the [`AnalysisStore`] trait; the SQLite
//! implementation stores records verbatim, and [`StrictStore`] can wrap any
//! store to reject records whose timing fields disagree.
//!
//! ## Quick start
//!
//! ```no_run
//! use bigo_table::{AnalysisStore, NewAnalysis, SqliteAnalysisStore};
//!
//! let store = SqliteAnalysisStore::open_memory().unwrap();
//!
//! let id = store.insert(&NewAnalysis {
//!     algorithm:        "linear".into(),
//!     items:            40,
//!     steps:            10,
//!     start_time:       1_700_000_000.0,
//!     end_time:         1_700_000_000.5,
//!     total_time_ms:    500.0,
//!     time_complexity:  "O(n)".into(),
//!     graph_image_path: "data:image/png;base64,".into(),
//! }).unwrap();
//!
//! assert!(store.get(id).unwrap().is_some());
//! ```

pub mod error;
pub mod gateway;
pub mod model;
pub mod schema;
pub mod store;

// Re-exports for convenience.
pub use error::TableError;
pub use gateway::{AnalysisStore, StrictStore};
pub use model::{AnalysisRecord, NewAnalysis};
pub use store::SqliteAnalysisStore;
