//! qrseal-qr: sealed-artifact text → QR symbol → lossless PNG
//!
//! Two stages, both synchronous:
//! - [`encode`]: pick the smallest QR version that holds the payload at
//!   the requested error-correction level, or report a typed
//!   capacity-exceeded failure (never truncation).
//! - [`render_png`]: scale the module matrix to the target canvas with
//!   nearest-neighbor sampling only; any smoothing would blur module
//!   boundaries and make the code unscannable.

pub mod encode;
pub mod render;

pub use encode::{encode, max_byte_capacity, ErrorCorrection, SymbolMatrix};
pub use render::{render_png, write_png, RenderOptions};
