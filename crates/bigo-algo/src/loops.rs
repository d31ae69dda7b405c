//! Nested counting loops.

use std::hint::black_box;

/// Counts every iteration of an `n × n` double loop.
pub fn nested_loops(n: usize) -> u64 {
    let mut count = 0u64;
    for _ in 0..n {
        for _ in 0..n {
            count = black_box(count + 1);
        }
    }
    count
}
