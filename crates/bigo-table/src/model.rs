use serde::{Deserialize, Serialize};

/// An analysis result as submitted by a client, before it has an id.
///
/// Every field is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalysis {
    pub algorithm:        String,
    pub items:            i64,
    pub steps:            i64,
    /// Seconds since the Unix epoch.
    pub start_time:       f64,
    /// Seconds since the Unix epoch.
    pub end_time:         f64,
    pub total_time_ms:    f64,
    pub time_complexity:  String,
    /// A `data:image/png;base64,...` URI despite the name.
    pub graph_image_path: String,
}

impl NewAnalysis {
    /// `(end_time - start_time)` in milliseconds.
    pub fn span_ms(&self) -> f64 {
        (self.end_time - self.start_time) * 1000.0
    }
}

/// A stored analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id:               i64,
    pub algorithm:        String,
    pub items:            i64,
    pub steps:            i64,
    pub start_time:       f64,
    pub end_time:         f64,
    pub total_time_ms:    f64,
    pub time_complexity:  String,
    pub graph_image_path: String,
}

impl AnalysisRecord {
    pub fn from_new(id: i64, new: NewAnalysis) -> Self {
        Self {
            id,
            algorithm:        new.algorithm,
            items:            new.items,
            steps:            new.steps,
            start_time:       new.start_time,
            end_time:         new.end_time,
            total_time_ms:    new.total_time_ms,
            time_complexity:  new.time_complexity,
            graph_image_path: new.graph_image_path,
        }
    }
}
