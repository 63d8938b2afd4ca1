//! qrseal-crypto: password-sealed payloads for out-of-band QR decryption
//!
//! Pipeline: plaintext + password → PBKDF2-HMAC-SHA512 key (fresh salt)
//! → AES-256-CBC (fresh IV) → shell-invocable decryption command.
//!
//! ```text
//! seal(plaintext, password)
//!   ├── random::random_array  (16-byte salt, 16-byte IV, OS entropy)
//!   ├── kdf::derive_key       (PBKDF2-SHA512, 10M iterations → 256-bit key)
//!   └── cipher::encrypt       (AES-256-CBC, PKCS#7)
//! artifact::encode(EncryptionOutput) → SealedArtifact
//! PhpOpensslFormatter        → the exact command a reversing machine runs
//! ```
//!
//! No decryption ships here: the artifact names the full reversing
//! procedure (minus the password, supplied interactively) so any machine
//! with php or python can recover the plaintext.

pub mod artifact;
pub mod cipher;
pub mod kdf;
pub mod random;
pub mod seal;

pub use artifact::{InstructionFormatter, PhpOpensslFormatter, SealedArtifact};
pub use kdf::{derive_key, DerivedKey};
pub use seal::{seal, EncryptionOutput};

/// Size of the derived AES key in bytes (256-bit)
pub const KEY_LEN: usize = 32;

/// Size of the PBKDF2 salt in bytes
pub const SALT_LEN: usize = 16;

/// Size of the CBC initialization vector in bytes (one AES block)
pub const IV_LEN: usize = 16;

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

/// PBKDF2 iteration count.
///
/// Deliberately extreme: a single derivation takes seconds on commodity
/// hardware, which is the accepted price of resistance to offline
/// password guessing. Contractual: artifacts produced with a different
/// count cannot be reversed by the documented tooling, and the format
/// carries no version field to signal a change.
pub const PBKDF2_ITERATIONS: u32 = 10_000_000;
