//! Integration tests for the artifact → QR → PNG path.
//!
//! The expensive KDF is skipped: a fixed `EncryptionOutput` stands in
//! for a real seal, which exercises the exact command text the QR code
//! will carry without multi-second derivations in the test suite.

use qrseal_crypto::artifact;
use qrseal_crypto::{EncryptionOutput, InstructionFormatter, PhpOpensslFormatter};
use qrseal_qr::{encode, max_byte_capacity, render_png, ErrorCorrection, RenderOptions};

fn sealed_command(cipher_text_len: usize) -> String {
    let output = EncryptionOutput {
        cipher_text: vec![0x5A; cipher_text_len],
        iv: [0x21; 16],
        salt: [0x42; 16],
    };
    PhpOpensslFormatter.format(&artifact::encode(&output))
}

/// A one-block message seals into a command that comfortably fits a QR
/// code at every error-correction level.
#[test]
fn single_block_command_fits_all_levels() {
    let command = sealed_command(16);

    for level in [
        ErrorCorrection::Low,
        ErrorCorrection::Medium,
        ErrorCorrection::Quartile,
        ErrorCorrection::High,
    ] {
        assert!(command.len() <= max_byte_capacity(level));
        encode(&command, level).unwrap_or_else(|e| panic!("level {level}: {e}"));
    }
}

/// End to end: command → symbol → 1000x1000 PNG with pure black/white
/// pixels only.
#[test]
fn command_renders_to_reference_canvas() {
    let command = sealed_command(64);
    let matrix = encode(&command, ErrorCorrection::Low).unwrap();
    let png = render_png(&matrix, &RenderOptions::default()).unwrap();

    let img = image::load_from_memory(&png).unwrap().to_luma8();
    assert_eq!((img.width(), img.height()), (1000, 1000));
    assert!(img.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
}

/// Base64 inflates the ciphertext by 4/3 and the template adds fixed
/// overhead, so a ciphertext around 2.2 KiB already overflows level L.
#[test]
fn oversized_ciphertext_reports_capacity_exceeded() {
    let command = sealed_command(2256);
    assert!(command.len() > max_byte_capacity(ErrorCorrection::Low));

    let err = encode(&command, ErrorCorrection::Low).unwrap_err();
    assert!(matches!(
        err,
        qrseal_core::SealError::CapacityExceeded { .. }
    ));
}

/// The usable plaintext budget transitively follows from QR capacity:
/// template overhead + 4/3 ciphertext expansion. Pin the overhead so a
/// template change that shrinks the budget shows up in review.
#[test]
fn template_overhead_is_stable() {
    // Zero-byte ciphertext leaves the template plus the 24-char base64
    // salt and iv fields.
    let overhead = sealed_command(0).len();
    assert!(overhead < 300, "template overhead grew to {overhead} bytes");
}
