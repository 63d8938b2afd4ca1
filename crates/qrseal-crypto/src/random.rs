//! OS-entropy randomness for salts and IVs
//!
//! Always the platform CSPRNG, never a seeded generator. An RNG error is
//! surfaced, not degraded, and an all-zero fill is rejected: zero output
//! is astronomically unlikely from working entropy but historically a
//! symptom of a broken entropy path.

use rand::rngs::OsRng;
use rand::RngCore;

use qrseal_core::{SealError, SealResult};

/// Fill a fixed-size array from the OS entropy source.
pub fn random_array<const N: usize>() -> SealResult<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SealError::Entropy(format!("OS RNG: {e}")))?;

    if bytes.iter().all(|&b| b == 0) {
        return Err(SealError::Entropy(format!(
            "entropy source returned {N} zero bytes"
        )));
    }

    Ok(bytes)
}
