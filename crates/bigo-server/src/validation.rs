//! Parsing and validation of request input.
//!
//! Handlers call these before touching the registry or the store, so every
//! malformed request is answered with a 400 and never reaches storage.

use serde::Deserialize;
use serde_json::Value;

use bigo_table::NewAnalysis;

use crate::error::ApiError;

pub const DEFAULT_ITEMS: usize = 1000;
pub const DEFAULT_STEPS: usize = 10;

/// Fields `/save_analysis` requires, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "algo",
    "items",
    "steps",
    "start_time",
    "end_time",
    "total_time_ms",
    "time_complexity",
    "graph_image_path",
];

// ── /analyze ──────────────────────────────────────────────────────────────────

/// Raw `/analyze` query string. Integers stay strings until validated so a
/// bad value produces our own message rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    pub algo:  Option<String>,
    pub n:     Option<String>,
    pub steps: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeParams {
    /// Trimmed and lowercased; not yet checked against the registry.
    pub algo:  String,
    pub items: usize,
    pub steps: usize,
}

/// `max_items == 0` disables the upper bound on `n`.
pub fn analyze_params(query: &AnalyzeQuery, max_items: usize) -> Result<AnalyzeParams, ApiError> {
    let items = parse_count("n", query.n.as_deref(), DEFAULT_ITEMS)?;
    let steps = parse_count("steps", query.steps.as_deref(), DEFAULT_STEPS)?;

    if steps == 0 {
        return Err(ApiError::BadRequest(
            "Invalid parameters: steps must be greater than zero".into(),
        ));
    }
    if max_items > 0 && items > max_items {
        return Err(ApiError::BadRequest(format!(
            "Invalid parameters: n={items} exceeds the limit of {max_items}"
        )));
    }

    let algo = query.algo.as_deref().unwrap_or_default().trim().to_lowercase();
    Ok(AnalyzeParams { algo, items, steps })
}

fn parse_count(name: &str, raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw {
        None => Ok(default),
        Some(s) => s.trim().parse::<usize>().map_err(|e| {
            ApiError::BadRequest(format!("Invalid parameters: {name}={s:?} ({e})"))
        }),
    }
}

// ── /save_analysis ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SaveAnalysisRequest {
    algo:             String,
    items:            i64,
    steps:            i64,
    start_time:       f64,
    end_time:         f64,
    total_time_ms:    f64,
    time_complexity:  String,
    graph_image_path: String,
}

impl From<SaveAnalysisRequest> for NewAnalysis {
    fn from(r: SaveAnalysisRequest) -> Self {
        NewAnalysis {
            algorithm:        r.algo,
            items:            r.items,
            steps:            r.steps,
            start_time:       r.start_time,
            end_time:         r.end_time,
            total_time_ms:    r.total_time_ms,
            time_complexity:  r.time_complexity,
            graph_image_path: r.graph_image_path,
        }
    }
}

/// Parses a `/save_analysis` body. Unknown fields are ignored; values are
/// not checked against each other or against the registry.
pub fn save_body(body: &[u8]) -> Result<NewAnalysis, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".into()))?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
        return Err(ApiError::BadRequest(format!("Missing required field: {missing}")));
    }

    let request: SaveAnalysisRequest = serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid field value: {e}")))?;
    Ok(request.into())
}

// ── /retrieve_analysis ────────────────────────────────────────────────────────

pub fn record_id(raw: Option<&str>) -> Result<i64, ApiError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::BadRequest("Missing 'id' query parameter".into()));
    }
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest("Invalid id format".into()))
}
