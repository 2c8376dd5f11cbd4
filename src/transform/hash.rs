//! Plain hash primitives.

use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::str::FromStr;

use crate::config::ConfigError;

/// Underlying hash function, used directly or inside HMAC and PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Blake2b,
    Blake2s,
}

/// All hash algorithms, in table order.
pub const ALL_HASHES: [HashAlgorithm; 8] = [
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha224,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Blake2b,
    HashAlgorithm::Blake2s,
];

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Blake2s => "blake2s",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Blake2b => 64,
            HashAlgorithm::Blake2s => 32,
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Blake2b => Blake2b512::digest(data).to_vec(),
            HashAlgorithm::Blake2s => Blake2s256::digest(data).to_vec(),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ALL_HASHES
            .into_iter()
            .find(|h| h.name() == name)
            .ok_or_else(|| ConfigError::unknown("hash", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        let cases = [
            (HashAlgorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
            (HashAlgorithm::Sha1, "a9993e364706816aba3e25717850c26c"),
            (HashAlgorithm::Sha224, "23097d223405d8228642a477bda255b3"),
            (HashAlgorithm::Sha256, "ba7816bf8f01cfea414140de5dae2223"),
            (HashAlgorithm::Sha384, "cb00753f45a35e8bb5a03d699ac65007"),
            (HashAlgorithm::Sha512, "ddaf35a193617abacc417349ae204131"),
            (HashAlgorithm::Blake2b, "ba80a53f981c4d0d6a2797b69f12f6e9"),
            (HashAlgorithm::Blake2s, "508c5e8c327c14e2e1a72ba34eeb452f"),
        ];

        for (algorithm, prefix) in cases {
            let digest = algorithm.digest(b"abc");
            assert_eq!(digest.len(), algorithm.output_len(), "{}", algorithm.name());
            assert_eq!(&hex::encode(&digest)[..32], prefix, "{}", algorithm.name());
        }
    }

    #[test]
    fn test_md5_seed() {
        assert_eq!(
            hex::encode(HashAlgorithm::Md5.digest(b"31415")),
            "fd80c4b06025c38f9d6958ebe4f14532"
        );
    }

    #[test]
    fn test_names_round_trip() {
        for algorithm in ALL_HASHES {
            assert_eq!(algorithm.name().parse::<HashAlgorithm>().unwrap(), algorithm);
        }
        assert!("sha3".parse::<HashAlgorithm>().is_err());
    }
}
