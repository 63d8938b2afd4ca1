//! Key derivation: PBKDF2-HMAC-SHA512 password → AES key
//!
//! Deterministic for fixed (password, salt, iterations); the salt is
//! stored alongside the ciphertext so the reversing machine re-derives
//! the same key.

use hmac::Hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use zeroize::Zeroize;

use qrseal_core::{SealError, SealResult};

use crate::{KEY_LEN, SALT_LEN};

/// A 256-bit AES key derived from a password via PBKDF2.
///
/// Exists only transiently during encryption; zeroized on drop so the
/// key material does not linger in freed memory.
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive a 256-bit key from a password and salt using PBKDF2-HMAC-SHA512.
///
/// `iterations` is [`crate::PBKDF2_ITERATIONS`] in production; tests pass
/// a reduced count because the real one takes seconds by design.
pub fn derive_key(
    password: &SecretString,
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> SealResult<DerivedKey> {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha512>>(
        password.expose_secret().as_bytes(),
        salt,
        iterations,
        &mut key,
    )
    .map_err(|e| SealError::KeyDerivation(format!("PBKDF2-HMAC-SHA512: {e}")))?;

    Ok(DerivedKey::from_bytes(key))
}
