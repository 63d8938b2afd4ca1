//! Sealed artifact: structured fields + decryption-instruction rendering
//!
//! A [`SealedArtifact`] carries everything a reversing machine needs
//! except the password: the three standard-base64 blobs (ciphertext,
//! salt, iv) and the fixed algorithm identifiers. Field values are
//! contractual: the parameter set is the implicit format version, so
//! changing the cipher, hash, or iteration count silently orphans every
//! previously produced artifact.
//!
//! Rendering a concrete tool invocation is kept separate behind
//! [`InstructionFormatter`]; the one shipped formatter emits a php
//! one-liner that prompts for the password via python's getpass.

use serde::Serialize;

use crate::seal::EncryptionOutput;
use crate::{KEY_LEN, PBKDF2_ITERATIONS};

/// Cipher identifier as openssl spells it.
pub const CIPHER_ID: &str = "AES-256-CBC";

/// KDF hash identifier as php's hash_pbkdf2 spells it.
pub const KDF_HASH_ID: &str = "sha512";

/// The textual, shareable encoding of an encryption result.
#[derive(Debug, Clone, Serialize)]
pub struct SealedArtifact {
    pub cipher: &'static str,
    pub kdf_hash: &'static str,
    pub iterations: u32,
    pub key_len: usize,
    /// Ciphertext, standard padded base64.
    pub cipher_text_b64: String,
    /// PBKDF2 salt, standard padded base64.
    pub salt_b64: String,
    /// CBC IV, standard padded base64.
    pub iv_b64: String,
}

/// Encode an encryption result into its artifact form.
///
/// Total and deterministic: well-formed input cannot fail to encode.
pub fn encode(output: &EncryptionOutput) -> SealedArtifact {
    SealedArtifact {
        cipher: CIPHER_ID,
        kdf_hash: KDF_HASH_ID,
        iterations: PBKDF2_ITERATIONS,
        key_len: KEY_LEN,
        cipher_text_b64: base64_encode(&output.cipher_text),
        salt_b64: base64_encode(&output.salt),
        iv_b64: base64_encode(&output.iv),
    }
}

/// Renders a sealed artifact as instructions for one concrete
/// reversing tool.
pub trait InstructionFormatter {
    fn format(&self, artifact: &SealedArtifact) -> String;
}

/// The built-in formatter: a single-line php invocation that decrypts
/// the artifact with openssl, prompting for the password interactively.
///
/// Field order (ciphertext, cipher id, kdf(hash, password, salt,
/// iterations, key length), iv) and the standard base64 alphabet are a
/// compatibility contract with existing decrypt tooling; both are
/// pinned byte-for-byte by tests.
pub struct PhpOpensslFormatter;

impl InstructionFormatter for PhpOpensslFormatter {
    fn format(&self, artifact: &SealedArtifact) -> String {
        format!(
            r#"php -r "echo openssl_decrypt(base64_decode('{ct}'),'{cipher}',hash_pbkdf2('{hash}',exec(\"python -c 'import getpass;print getpass.getpass()'\"),base64_decode('{salt}'),{iters},{key_len},true),OPENSSL_RAW_DATA,base64_decode('{iv}')).\"\\n\";""#,
            ct = artifact.cipher_text_b64,
            cipher = artifact.cipher,
            hash = artifact.kdf_hash,
            salt = artifact.salt_b64,
            iters = php_iterations(artifact.iterations),
            key_len = artifact.key_len,
            iv = artifact.iv_b64,
        )
    }
}

// The reference tooling writes 10_000_000 in php scientific shorthand.
fn php_iterations(iterations: u32) -> String {
    if iterations == 10_000_000 {
        "1e7".to_string()
    } else {
        iterations.to_string()
    }
}

fn base64_encode(data: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IV_LEN, SALT_LEN};

    fn sample_output() -> EncryptionOutput {
        EncryptionOutput {
            cipher_text: vec![3u8; 16],
            iv: [2u8; IV_LEN],
            salt: [1u8; SALT_LEN],
        }
    }

    #[test]
    fn test_encode_base64_lengths() {
        // 16 bytes → 24 base64 chars (22 + "==" padding), for all three.
        let artifact = encode(&sample_output());
        assert_eq!(artifact.cipher_text_b64.len(), 24);
        assert_eq!(artifact.salt_b64.len(), 24);
        assert_eq!(artifact.iv_b64.len(), 24);
        assert!(artifact.cipher_text_b64.ends_with("=="));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let output = sample_output();
        let a = encode(&output);
        let b = encode(&output);
        assert_eq!(a.cipher_text_b64, b.cipher_text_b64);
        assert_eq!(a.salt_b64, b.salt_b64);
        assert_eq!(a.iv_b64, b.iv_b64);
    }

    #[test]
    fn test_encode_fixed_parameters() {
        let artifact = encode(&sample_output());
        assert_eq!(artifact.cipher, "AES-256-CBC");
        assert_eq!(artifact.kdf_hash, "sha512");
        assert_eq!(artifact.iterations, 10_000_000);
        assert_eq!(artifact.key_len, 32);
    }

    #[test]
    fn test_php_formatter_exact_template() {
        // Byte-for-byte compatibility contract with the decrypt tooling.
        let command = PhpOpensslFormatter.format(&encode(&sample_output()));
        assert_eq!(
            command,
            r#"php -r "echo openssl_decrypt(base64_decode('AwMDAwMDAwMDAwMDAwMDAw=='),'AES-256-CBC',hash_pbkdf2('sha512',exec(\"python -c 'import getpass;print getpass.getpass()'\"),base64_decode('AQEBAQEBAQEBAQEBAQEBAQ=='),1e7,32,true),OPENSSL_RAW_DATA,base64_decode('AgICAgICAgICAgICAgICAg==')).\"\\n\";""#
        );
    }

    #[test]
    fn test_php_formatter_field_order() {
        // Ciphertext first, salt inside hash_pbkdf2, iv last.
        let command = PhpOpensslFormatter.format(&encode(&sample_output()));
        let ct_pos = command.find("AwMD").unwrap();
        let salt_pos = command.find("AQEB").unwrap();
        let iv_pos = command.find("AgIC").unwrap();
        assert!(ct_pos < salt_pos && salt_pos < iv_pos);
    }

    #[test]
    fn test_artifact_serializes_to_json() {
        let artifact = encode(&sample_output());
        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains("\"cipher\":\"AES-256-CBC\""));
        assert!(json.contains("\"iterations\":10000000"));
    }
}
