//! QR symbol construction with typed capacity failures

use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use qrseal_core::{SealError, SealResult};

/// Error-correction level: more correction, less capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    /// ~7% recovery. The default: sealed artifacts are long, and the
    /// printed code is expected to be scanned in good conditions.
    #[default]
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl ErrorCorrection {
    fn ec_level(self) -> EcLevel {
        match self {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

impl std::fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            ErrorCorrection::Low => "L",
            ErrorCorrection::Medium => "M",
            ErrorCorrection::Quartile => "Q",
            ErrorCorrection::High => "H",
        };
        f.write_str(symbol)
    }
}

/// Byte-mode data capacity of the largest QR symbol (version 40) at the
/// given error-correction level. Payloads past this cannot be encoded
/// at any version.
pub fn max_byte_capacity(level: ErrorCorrection) -> usize {
    match level {
        ErrorCorrection::Low => 2953,
        ErrorCorrection::Medium => 2331,
        ErrorCorrection::Quartile => 1663,
        ErrorCorrection::High => 1273,
    }
}

/// A square QR module matrix. `true` = dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl SymbolMatrix {
    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

/// Encode a text payload into the smallest QR symbol that holds it.
///
/// Returns [`SealError::CapacityExceeded`] when even version 40 cannot
/// hold the payload at the requested level; the symbol is never
/// silently truncated.
pub fn encode(text: &str, level: ErrorCorrection) -> SealResult<SymbolMatrix> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), level.ec_level()).map_err(
        |e| match e {
            QrError::DataTooLong => SealError::CapacityExceeded {
                payload_len: text.len(),
                capacity: max_byte_capacity(level),
                level: level.to_string(),
            },
            other => SealError::Render(format!("QR symbol construction: {other:?}")),
        },
    )?;

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    debug!(payload_len = text.len(), symbol_width = width, %level, "QR symbol built");
    Ok(SymbolMatrix { width, modules })
}
