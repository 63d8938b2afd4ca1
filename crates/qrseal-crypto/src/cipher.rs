//! AES-256-CBC encryption with PKCS#7 padding
//!
//! Ciphertext layout: plaintext length rounded up to the next full
//! 16-byte block (an exact multiple gains one full padding block, so
//! even empty input produces one block). Padding removal is implicit on
//! the decrypt side, so the scheme must stay PKCS#7 to match the
//! documented reversing tooling.

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use zeroize::Zeroize;

use qrseal_core::{SealError, SealResult};

use crate::kdf::DerivedKey;
use crate::{BLOCK_LEN, IV_LEN};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

/// Encrypt a byte payload under a derived key and fresh IV.
///
/// The key+IV pair must never encrypt two different plaintexts; callers
/// obtain a fresh IV (and a fresh salt, hence key) per call.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey, iv: &[u8; IV_LEN]) -> SealResult<Vec<u8>> {
    let padded_len = (plaintext.len() / BLOCK_LEN + 1) * BLOCK_LEN;
    let mut buf = vec![0u8; padded_len];
    buf[..plaintext.len()].copy_from_slice(plaintext);

    let enc = Aes256CbcEnc::new(key.as_bytes().into(), iv.into());
    let ct_len = match enc.encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len()) {
        Ok(ct) => ct.len(),
        Err(e) => {
            // The staging buffer still holds plaintext on failure.
            buf.zeroize();
            return Err(SealError::Encryption(format!("AES-256-CBC padding: {e}")));
        }
    };
    buf.truncate(ct_len);

    Ok(buf)
}
