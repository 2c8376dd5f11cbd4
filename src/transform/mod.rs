//! Hashing and key-derivation transforms.
//!
//! Transforms map encoded seed bytes to a fixed-length digest. The table is a
//! closed set of tagged descriptors, each carrying its own parameters.

mod hash;
mod mac;
mod pbkdf2;
mod table;

pub use hash::{HashAlgorithm, ALL_HASHES};
pub use mac::hmac;
pub use pbkdf2::pbkdf2;
pub use table::{
    TransformConfig, DEFAULT_HMAC_ALGORITHMS, DEFAULT_HMAC_KEY_BYTES, DEFAULT_HMAC_KEY_LENGTHS,
    DEFAULT_KDF_ITERATIONS, DEFAULT_KDF_OUTPUT_LEN, DEFAULT_KDF_SALT_BYTES,
    DEFAULT_KDF_SALT_LENGTHS,
};

use std::fmt;

/// A transform failed on its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// MAC rejected the key
    InvalidKeyLength(usize),
    /// PBKDF2 needs at least one iteration
    InvalidIterations(u32),
    /// Requested output length cannot be produced
    InvalidOutputLength(usize),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidKeyLength(len) => write!(f, "Invalid MAC key length: {}", len),
            TransformError::InvalidIterations(n) => write!(f, "Invalid iteration count: {}", n),
            TransformError::InvalidOutputLength(len) => {
                write!(f, "Invalid output length: {}", len)
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// One entry of the transform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Plain hash of the input
    Hash(HashAlgorithm),
    /// HMAC keyed with `key_byte` repeated `key_len` times
    Hmac {
        algorithm: HashAlgorithm,
        key_byte: u8,
        key_len: usize,
    },
    /// PBKDF2 with the input as password and `salt_byte` repeated `salt_len` times as salt
    Pbkdf2 {
        prf: HashAlgorithm,
        iterations: u32,
        salt_byte: u8,
        salt_len: usize,
        output_len: usize,
    },
}

impl Transform {
    /// Unique, human-readable name (e.g. `sha256`, `hmac-md5:55x16`, `pbkdf2-sha1:32:00x8`).
    pub fn name(&self) -> String {
        match self {
            Transform::Hash(algorithm) => algorithm.name().to_string(),
            Transform::Hmac {
                algorithm,
                key_byte,
                key_len,
            } => format!("hmac-{}:{:02x}x{}", algorithm.name(), key_byte, key_len),
            Transform::Pbkdf2 {
                prf,
                iterations,
                salt_byte,
                salt_len,
                ..
            } => format!(
                "pbkdf2-{}:{}:{:02x}x{}",
                prf.name(),
                iterations,
                salt_byte,
                salt_len
            ),
        }
    }

    /// Family name: `hash`, `hmac` or `pbkdf2`.
    pub fn family(&self) -> &'static str {
        match self {
            Transform::Hash(_) => "hash",
            Transform::Hmac { .. } => "hmac",
            Transform::Pbkdf2 { .. } => "pbkdf2",
        }
    }

    /// Length of every digest this transform produces.
    pub fn digest_len(&self) -> usize {
        match self {
            Transform::Hash(algorithm) => algorithm.output_len(),
            Transform::Hmac { algorithm, .. } => algorithm.output_len(),
            Transform::Pbkdf2 { output_len, .. } => *output_len,
        }
    }

    pub fn apply(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        match self {
            Transform::Hash(algorithm) => Ok(algorithm.digest(input)),
            Transform::Hmac {
                algorithm,
                key_byte,
                key_len,
            } => hmac(*algorithm, &vec![*key_byte; *key_len], input),
            Transform::Pbkdf2 {
                prf,
                iterations,
                salt_byte,
                salt_len,
                output_len,
            } => pbkdf2(*prf, input, &vec![*salt_byte; *salt_len], *iterations, *output_len),
        }
    }

    /// Selector match: the full name, the family, or a `:`-bounded name prefix
    /// (`hmac-md5` selects every HMAC-MD5 entry, `pbkdf2-sha1:32` every
    /// 32-iteration PBKDF2 entry).
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim().to_lowercase();
        let name = self.name();
        name == selector
            || self.family() == selector
            || name
                .strip_prefix(selector.as_str())
                .is_some_and(|rest| rest.starts_with(':'))
    }
}
