//! Construction of the transform table.
//!
//! Parameterized entries are generated by nested enumeration and appended in
//! a fixed order: plain hashes, then HMAC (algorithm, key byte, key length),
//! then PBKDF2 (iterations, salt byte, salt length).

use super::{HashAlgorithm, Transform, ALL_HASHES};

pub const DEFAULT_HMAC_ALGORITHMS: [HashAlgorithm; 2] = [HashAlgorithm::Md5, HashAlgorithm::Sha1];
pub const DEFAULT_HMAC_KEY_BYTES: [u8; 3] = [0x55, 0xaa, 0xff];
pub const DEFAULT_HMAC_KEY_LENGTHS: [usize; 3] = [16, 32, 64];

pub const DEFAULT_KDF_ITERATIONS: [u32; 8] = [32, 64, 128, 512, 1024, 10, 100, 1000];
pub const DEFAULT_KDF_SALT_BYTES: [u8; 2] = [0x00, 0xff];
pub const DEFAULT_KDF_SALT_LENGTHS: [usize; 3] = [8, 16, 32];
pub const DEFAULT_KDF_OUTPUT_LEN: usize = 16;

/// Parameters of the transform table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub hashes: Vec<HashAlgorithm>,
    pub hmac_algorithms: Vec<HashAlgorithm>,
    pub hmac_key_bytes: Vec<u8>,
    pub hmac_key_lengths: Vec<usize>,
    pub kdf_prf: HashAlgorithm,
    pub kdf_iterations: Vec<u32>,
    pub kdf_salt_bytes: Vec<u8>,
    pub kdf_salt_lengths: Vec<usize>,
    pub kdf_output_len: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            hashes: ALL_HASHES.to_vec(),
            hmac_algorithms: DEFAULT_HMAC_ALGORITHMS.to_vec(),
            hmac_key_bytes: DEFAULT_HMAC_KEY_BYTES.to_vec(),
            hmac_key_lengths: DEFAULT_HMAC_KEY_LENGTHS.to_vec(),
            kdf_prf: HashAlgorithm::Sha1,
            kdf_iterations: DEFAULT_KDF_ITERATIONS.to_vec(),
            kdf_salt_bytes: DEFAULT_KDF_SALT_BYTES.to_vec(),
            kdf_salt_lengths: DEFAULT_KDF_SALT_LENGTHS.to_vec(),
            kdf_output_len: DEFAULT_KDF_OUTPUT_LEN,
        }
    }
}

impl TransformConfig {
    /// Build one immutable descriptor per parameter combination.
    pub fn build(&self) -> Vec<Transform> {
        let mut table: Vec<Transform> = self.hashes.iter().map(|&h| Transform::Hash(h)).collect();

        for &algorithm in &self.hmac_algorithms {
            for &key_byte in &self.hmac_key_bytes {
                for &key_len in &self.hmac_key_lengths {
                    table.push(Transform::Hmac {
                        algorithm,
                        key_byte,
                        key_len,
                    });
                }
            }
        }

        for &iterations in &self.kdf_iterations {
            for &salt_byte in &self.kdf_salt_bytes {
                for &salt_len in &self.kdf_salt_lengths {
                    table.push(Transform::Pbkdf2 {
                        prf: self.kdf_prf,
                        iterations,
                        salt_byte,
                        salt_len,
                        output_len: self.kdf_output_len,
                    });
                }
            }
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_size() {
        let table = TransformConfig::default().build();
        assert_eq!(table.len(), 8 + 2 * 3 * 3 + 8 * 2 * 3);
    }

    #[test]
    fn test_default_table_order() {
        let table = TransformConfig::default().build();
        let names: Vec<String> = table.iter().map(|t| t.name()).collect();

        assert_eq!(names[0], "md5");
        assert_eq!(names[7], "blake2s");
        assert_eq!(names[8], "hmac-md5:55x16");
        assert_eq!(names[9], "hmac-md5:55x32");
        assert_eq!(names[11], "hmac-md5:aax16");
        assert_eq!(names[17], "hmac-sha1:55x16");
        assert_eq!(names[26], "pbkdf2-sha1:32:00x8");
        assert_eq!(names[29], "pbkdf2-sha1:32:ffx8");
        assert_eq!(names[32], "pbkdf2-sha1:64:00x8");
        assert_eq!(names.last().unwrap(), "pbkdf2-sha1:1000:ffx32");
    }

    #[test]
    fn test_entries_are_distinct() {
        let table = TransformConfig::default().build();
        let mut names: Vec<String> = table.iter().map(|t| t.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), table.len());
    }

    #[test]
    fn test_digest_lengths_match_output() {
        for transform in TransformConfig::default().build() {
            let digest = transform.apply(b"31415").unwrap();
            assert_eq!(digest.len(), transform.digest_len(), "{}", transform.name());
            assert!(digest.len() >= 16, "{}", transform.name());
        }
    }

    #[test]
    fn test_empty_families() {
        let config = TransformConfig {
            hmac_key_lengths: vec![],
            kdf_iterations: vec![],
            ..TransformConfig::default()
        };
        assert_eq!(config.build().len(), 8);
    }
}
