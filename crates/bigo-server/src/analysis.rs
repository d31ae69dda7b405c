//! One `/analyze` run: time the algorithm across its size sequence, render
//! the curve, and assemble the report.
//!
//! Everything here is synchronous and CPU-bound; callers run it on a
//! blocking worker.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use bigo_algo::{measure, Algorithm, HarnessError, Measurement};
use bigo_plot::{to_data_uri, CurveRenderer, PlotError};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// JSON body returned by `/analyze`. Posting it unchanged to
/// `/save_analysis` stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub algo:             String,
    pub items:            usize,
    pub steps:            usize,
    /// Unix seconds, captured before the first sample.
    pub start_time:       f64,
    /// Unix seconds, captured after the curve is encoded.
    pub end_time:         f64,
    /// `(end_time - start_time) * 1000`, rounded to 2 decimals.
    pub total_time_ms:    f64,
    pub time_complexity:  String,
    pub graph_image_path: String,
}

/// A finished run: the report plus the raw samples behind it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report:      AnalysisReport,
    pub measurement: Measurement,
}

/// Measures `algorithm` at sizes `steps, 2*steps, ...` up to `items` and
/// renders the resulting curve.
#[instrument(skip_all, fields(algo = algorithm.key, items = items, steps = steps))]
pub fn run(
    algorithm: &Algorithm,
    items: usize,
    steps: usize,
    renderer: &CurveRenderer,
) -> Result<Analysis, AnalysisError> {
    let start_time = unix_seconds();

    let measurement = measure(algorithm.run, steps, items, steps)?;
    let png = renderer.render(&measurement.sizes, &measurement.times)?;
    let graph_image_path = to_data_uri(&png);

    // Wall clock may step backwards; the report never shows a negative span.
    let end_time = unix_seconds().max(start_time);
    let total_time_ms = round2((end_time - start_time) * 1000.0);

    debug!(
        samples  = measurement.len(),
        png_size = png.len(),
        total_time_ms,
        "analysis complete"
    );

    Ok(Analysis {
        report: AnalysisReport {
            algo:            algorithm.key.to_string(),
            items,
            steps,
            start_time,
            end_time,
            total_time_ms,
            time_complexity: algorithm.complexity.as_str().to_string(),
            graph_image_path,
        },
        measurement,
    })
}

fn unix_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use bigo_algo::{Complexity, Registry};
    use bigo_plot::PNG_DATA_URI_PREFIX;

    use super::*;

    fn small_renderer() -> CurveRenderer {
        CurveRenderer::new(200, 120).unwrap()
    }

    #[test]
    fn linear_forty_by_ten() {
        let registry = Registry::builtin();
        let algo = registry.get("linear").unwrap();

        let analysis = run(algo, 40, 10, &small_renderer()).unwrap();
        assert_eq!(analysis.measurement.sizes, vec![10, 20, 30, 40]);
        assert_eq!(analysis.measurement.times.len(), 4);

        let report = analysis.report;
        assert_eq!(report.algo, "linear");
        assert_eq!(report.items, 40);
        assert_eq!(report.steps, 10);
        assert_eq!(report.time_complexity, "O(n)");
        assert!(report.end_time >= report.start_time);
        assert!(report.total_time_ms >= 0.0);
        assert!(report.graph_image_path.starts_with(PNG_DATA_URI_PREFIX));
    }

    #[test]
    fn non_multiple_overshoots_to_next_step() {
        let registry = Registry::builtin();
        let analysis = run(registry.get("nested").unwrap(), 45, 10, &small_renderer()).unwrap();
        assert_eq!(analysis.measurement.sizes, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn zero_items_measure_nothing_but_still_render() {
        let registry = Registry::builtin();
        let analysis = run(registry.get("linear").unwrap(), 0, 10, &small_renderer()).unwrap();
        assert!(analysis.measurement.is_empty());
        assert_eq!(analysis.report.items, 0);
        assert!(analysis.report.graph_image_path.starts_with(PNG_DATA_URI_PREFIX));
    }

    #[test]
    fn zero_step_is_a_harness_error() {
        let registry = Registry::builtin();
        let err = run(registry.get("bubble").unwrap(), 40, 0, &small_renderer()).unwrap_err();
        assert!(matches!(err, AnalysisError::Harness(HarnessError::InvalidStep)));
    }

    #[test]
    fn panicking_algorithm_yields_no_report() {
        let faulty = Algorithm {
            key:        "faulty",
            name:       "Faulty",
            complexity: Complexity::Linear,
            run:        |n| {
                if n > 10 {
                    panic!("refusing size {n}");
                }
            },
        };
        let err = run(&faulty, 30, 10, &small_renderer()).unwrap_err();
        match err {
            AnalysisError::Harness(HarnessError::AlgorithmPanicked { size, message }) => {
                assert_eq!(size, 20);
                assert!(message.contains("refusing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn total_time_is_rounded_to_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.004), 0.0);
        let report = run(Registry::builtin().get("binary").unwrap(), 20, 10, &small_renderer())
            .unwrap()
            .report;
        let scaled = report.total_time_ms * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
