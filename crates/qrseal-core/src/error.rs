//! Failure taxonomy for the seal pipeline
//!
//! Every stage returns its own distinguishable error kind so the host
//! can render an accurate message. Failures are value-returned and
//! fail-fast: a failed stage aborts the pipeline, nothing is retried
//! internally, and no partial artifact is ever produced.

use thiserror::Error;

pub type SealResult<T> = Result<T, SealError>;

#[derive(Debug, Error)]
pub enum SealError {
    /// The OS entropy source reported an error, or produced an all-zero
    /// buffer (treated as a broken entropy path, never used as key material).
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// The PBKDF2 primitive rejected its inputs.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The AES-CBC primitive could not encrypt the payload.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The payload does not fit in any QR symbol version at the
    /// requested error-correction level.
    #[error(
        "payload of {payload_len} bytes exceeds the {capacity}-byte QR capacity \
         at error-correction level {level}"
    )]
    CapacityExceeded {
        payload_len: usize,
        capacity: usize,
        level: String,
    },

    /// The raster pipeline could not serialize the bitmap.
    #[error("bitmap rendering failed: {0}")]
    Render(String),

    /// Host-side sink I/O failed while writing the image.
    #[error("sink write failed: {0}")]
    SinkWrite(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_both_lengths() {
        let err = SealError::CapacityExceeded {
            payload_len: 3000,
            capacity: 2953,
            level: "L".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3000"));
        assert!(msg.contains("2953"));
        assert!(msg.contains("level L"));
    }

    #[test]
    fn test_sink_write_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SealError = io.into();
        assert!(matches!(err, SealError::SinkWrite(_)));
    }
}
