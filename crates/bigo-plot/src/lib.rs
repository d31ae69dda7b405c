//! Timing curve renderer for bigo.
//!
//! Turns `(sizes, times)` samples into a line-and-marker PNG held in memory,
//! and wraps encoded images as self-contained `data:` URIs.
//!
//! ## Quick start
//!
//! ```no_run
//! use bigo_plot::{to_data_uri, CurveRenderer};
//!
//! let png = CurveRenderer::default().render(&[10, 20, 30], &[0.001, 0.002, 0.004]).unwrap();
//! let uri = to_data_uri(&png);
//! assert!(uri.starts_with("data:image/png;base64,"));
//! ```

pub mod encode;
pub mod error;
pub mod font;
pub mod render;

pub use encode::{encode_png, to_data_uri, PNG_DATA_URI_PREFIX};
pub use error::PlotError;
pub use font::{default_font_candidates, register_first_available, register_font_file};
pub use render::{CurveRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
