//! The seal pipeline: plaintext + password → (ciphertext, iv, salt)
//!
//! Every call draws a fresh salt and a fresh IV, so a key+IV pair can
//! never encrypt two different plaintexts. A failed stage aborts the
//! call; the generated salt/IV are considered used and are never
//! recycled into a retry.

use secrecy::SecretString;
use tracing::debug;

use qrseal_core::SealResult;

use crate::cipher;
use crate::kdf;
use crate::random::random_array;
use crate::{IV_LEN, PBKDF2_ITERATIONS, SALT_LEN};

/// The result of one encryption call. Immutable; owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionOutput {
    /// AES-256-CBC ciphertext, a whole number of 16-byte blocks.
    pub cipher_text: Vec<u8>,
    /// CBC initialization vector. Not secret; required for reversal.
    pub iv: [u8; IV_LEN],
    /// PBKDF2 salt. Not secret; required to re-derive the key.
    pub salt: [u8; SALT_LEN],
}

/// Encrypt `plaintext` under a key derived from `password`.
///
/// Blocking and deliberately slow (the KDF runs 10 million iterations);
/// interactive hosts dispatch this onto a background execution context.
/// Empty plaintext is valid and yields one full padding block; hosts
/// that want to reject it do so before calling.
pub fn seal(plaintext: &str, password: &SecretString) -> SealResult<EncryptionOutput> {
    seal_with_iterations(plaintext, password, PBKDF2_ITERATIONS)
}

fn seal_with_iterations(
    plaintext: &str,
    password: &SecretString,
    iterations: u32,
) -> SealResult<EncryptionOutput> {
    let salt: [u8; SALT_LEN] = random_array()?;
    let iv: [u8; IV_LEN] = random_array()?;

    debug!(iterations, "deriving key");
    let key = kdf::derive_key(password, &salt, iterations)?;

    debug!(plaintext_len = plaintext.len(), "encrypting payload");
    let cipher_text = cipher::encrypt(plaintext.as_bytes(), &key, &iv)?;

    debug!(cipher_text_len = cipher_text.len(), "payload sealed");
    Ok(EncryptionOutput {
        cipher_text,
        iv,
        salt,
    })
}
