//! The narrow interface the request layer stores results through.

use tracing::warn;

use crate::error::TableError;
use crate::model::{AnalysisRecord, NewAnalysis};

/// Storage for analysis results, keyed by a store-assigned integer id.
///
/// Implementations must be shareable across request handlers.
pub trait AnalysisStore: Send + Sync {
    /// Stores `new` verbatim and returns its new id.
    fn insert(&self, new: &NewAnalysis) -> Result<i64, TableError>;

    /// Exact lookup. `Ok(None)` when no record has this id.
    fn get(&self, id: i64) -> Result<Option<AnalysisRecord>, TableError>;

    /// Every stored record, oldest first.
    fn list(&self) -> Result<Vec<AnalysisRecord>, TableError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, TableError>;
}

/// Wraps a store and refuses records whose timing fields are inconsistent:
/// `end_time < start_time`, a negative total, or a total that differs from
/// `(end_time - start_time) * 1000` by more than `tolerance_ms`.
pub struct StrictStore<S> {
    inner:        S,
    tolerance_ms: f64,
}

impl<S: AnalysisStore> StrictStore<S> {
    pub fn new(inner: S, tolerance_ms: f64) -> Self {
        Self { inner, tolerance_ms }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn check(&self, new: &NewAnalysis) -> Result<(), TableError> {
        if !(new.start_time.is_finite() && new.end_time.is_finite() && new.total_time_ms.is_finite()) {
            return Err(TableError::Rejected("timing fields must be finite".into()));
        }
        if new.end_time < new.start_time {
            return Err(TableError::Rejected(format!(
                "end_time {} precedes start_time {}",
                new.end_time, new.start_time
            )));
        }
        if new.total_time_ms < 0.0 {
            return Err(TableError::Rejected("total_time_ms must not be negative".into()));
        }
        let span = new.span_ms();
        if (span - new.total_time_ms).abs() > self.tolerance_ms {
            return Err(TableError::Rejected(format!(
                "total_time_ms {} disagrees with timestamps ({:.3} ms)",
                new.total_time_ms, span
            )));
        }
        Ok(())
    }
}

impl<S: AnalysisStore> AnalysisStore for StrictStore<S> {
    fn insert(&self, new: &NewAnalysis) -> Result<i64, TableError> {
        if let Err(e) = self.check(new) {
            warn!(algorithm = %new.algorithm, error = %e, "rejected inconsistent analysis");
            return Err(e);
        }
        self.inner.insert(new)
    }

    fn get(&self, id: i64) -> Result<Option<AnalysisRecord>, TableError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>, TableError> {
        self.inner.list()
    }

    fn count(&self) -> Result<usize, TableError> {
        self.inner.count()
    }
}
