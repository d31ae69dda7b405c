//! Toy algorithm library for bigo.
//!
//! Deliberately naive reference implementations whose running time grows
//! with a single size parameter, plus the harness that times them:
//!
//! - **Search**: Linear scan, Binary search over a sorted random array
//! - **Sort**: Bubble sort over random integers
//! - **Loops**: Nested counting loops
//! - **Registry**: lowercase key → (callable, complexity label)
//! - **Harness**: one wall-clock sample per input size

pub mod error;
pub mod harness;
pub mod loops;
pub mod registry;
pub mod search;
pub mod sort;

pub use error::{AlgoError, HarnessError};
pub use harness::{measure, size_sequence, Measurement};
pub use loops::nested_loops;
pub use registry::{Algorithm, Complexity, Registry, RunFn};
pub use search::{binary_search, linear_search};
pub use sort::bubble_sort;
