//! Nearest-neighbor bitmap rendering of a QR symbol to PNG
//!
//! Output pixels are pure black (dark module) or pure white, exactly
//! two values, no intermediate grays. A quiet-zone border of light
//! modules is added around the symbol before scaling.

use std::io::{Cursor, Write};

use image::{GrayImage, ImageFormat, Luma};
use tracing::debug;

use qrseal_core::{SealError, SealResult};

use crate::encode::SymbolMatrix;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Target canvas and quiet zone for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Quiet-zone border around the symbol, in module units. The QR
    /// standard calls for 4.
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            quiet_zone: 4,
        }
    }
}

/// Render a symbol matrix to PNG bytes at the requested canvas size.
pub fn render_png(matrix: &SymbolMatrix, opts: &RenderOptions) -> SealResult<Vec<u8>> {
    if opts.width == 0 || opts.height == 0 {
        return Err(SealError::Render(format!(
            "target canvas {}x{} has a zero dimension",
            opts.width, opts.height
        )));
    }

    let quiet = opts.quiet_zone as usize;
    let total_modules = matrix.width() + 2 * quiet;

    let img = GrayImage::from_fn(opts.width, opts.height, |px, py| {
        // Nearest-neighbor: floor-map each pixel to one module.
        let mx = (px as u64 * total_modules as u64 / opts.width as u64) as usize;
        let my = (py as u64 * total_modules as u64 / opts.height as u64) as usize;

        let in_symbol = (quiet..quiet + matrix.width()).contains(&mx)
            && (quiet..quiet + matrix.width()).contains(&my);
        if in_symbol && matrix.is_dark(mx - quiet, my - quiet) {
            DARK
        } else {
            LIGHT
        }
    });

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SealError::Render(format!("PNG encoding: {e}")))?;

    debug!(
        width = opts.width,
        height = opts.height,
        modules = total_modules,
        png_len = bytes.len(),
        "symbol rendered"
    );
    Ok(bytes)
}

/// Render and write to a caller-supplied sink. Sink I/O failures map to
/// [`SealError::SinkWrite`], distinct from rendering failures.
pub fn write_png(
    matrix: &SymbolMatrix,
    opts: &RenderOptions,
    sink: &mut dyn Write,
) -> SealResult<()> {
    let bytes = render_png(matrix, opts)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}
