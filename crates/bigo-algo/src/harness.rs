//! Single-sample timing harness.
//!
//! Each input size is run exactly once and timed with a monotonic clock.
//! There is no warm-up and no averaging, so individual samples are noisy.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::debug;

use crate::error::HarnessError;

/// Ordered timing samples: `times[i]` is the elapsed seconds for `sizes[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    pub sizes: Vec<usize>,
    pub times: Vec<f64>,
}

impl Measurement {
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sum of all samples in seconds.
    pub fn total_secs(&self) -> f64 {
        self.times.iter().sum()
    }

    pub fn samples(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.sizes.iter().copied().zip(self.times.iter().copied())
    }
}

/// `min, min+step, ...` up to and including the first value `>= max`.
///
/// Every size is below `max + step`, so `min >= max + step` (e.g. `max == 0`
/// with `min == step`) yields an empty sequence.
pub fn size_sequence(min: usize, max: usize, step: usize) -> Result<Vec<usize>, HarnessError> {
    if step == 0 {
        return Err(HarnessError::InvalidStep);
    }
    if min > max && min - max >= step {
        return Ok(Vec::new());
    }

    let mut sizes = Vec::with_capacity(max.saturating_sub(min) / step + 1);
    let mut size  = min;
    loop {
        sizes.push(size);
        if size >= max {
            break;
        }
        size = size
            .checked_add(step)
            .ok_or(HarnessError::SizeOverflow { last: size, step })?;
    }
    Ok(sizes)
}

/// Runs `run` once per size in [`size_sequence`]`(min, max, step)`.
///
/// A panic inside `run` aborts the whole measurement.
pub fn measure<F>(run: F, min: usize, max: usize, step: usize) -> Result<Measurement, HarnessError>
where
    F: Fn(usize),
{
    let sizes = size_sequence(min, max, step)?;
    let mut times = Vec::with_capacity(sizes.len());

    for &size in &sizes {
        let start   = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(size)));
        let elapsed = start.elapsed().as_secs_f64();

        if let Err(payload) = outcome {
            return Err(HarnessError::AlgorithmPanicked {
                size,
                message: panic_message(payload.as_ref()),
            });
        }

        debug!(size, elapsed_s = elapsed, "sample");
        times.push(elapsed);
    }

    let result = Measurement { sizes, times };
    debug!(
        samples = result.len(),
        total_s = result.total_secs(),
        "measurement complete"
    );
    Ok(result)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
