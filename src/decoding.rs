//! Reading 32-bit words out of a digest.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Four unsigned 32-bit words read from a digest.
pub type Words = [u32; 4];

/// Bytes consumed from each digest.
pub const DIGEST_PREFIX_LEN: usize = 16;

/// Digest was too short to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    TooShort { len: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TooShort { len } => write!(
                f,
                "Digest too short: {} bytes (need at least {})",
                len, DIGEST_PREFIX_LEN
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Byte order used to read each word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoding {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Both decodings, in table order.
pub const ALL_DECODINGS: [Decoding; 2] = [Decoding::BigEndian, Decoding::LittleEndian];

impl Decoding {
    /// Short name for display.
    pub fn name(&self) -> &'static str {
        match self {
            Decoding::BigEndian => "be",
            Decoding::LittleEndian => "le",
        }
    }

    /// Read four words from the first 16 bytes of `digest`.
    pub fn decode(&self, digest: &[u8]) -> Result<Words, DecodeError> {
        let prefix = digest
            .get(..DIGEST_PREFIX_LEN)
            .ok_or(DecodeError::TooShort { len: digest.len() })?;

        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(prefix.chunks_exact(4)) {
            let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
            *word = match self {
                Decoding::BigEndian => u32::from_be_bytes(bytes),
                Decoding::LittleEndian => u32::from_le_bytes(bytes),
            };
        }

        Ok(words)
    }
}

impl FromStr for Decoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "be" | "big" => Ok(Decoding::BigEndian),
            "le" | "little" => Ok(Decoding::LittleEndian),
            _ => Err(ConfigError::unknown("decoding", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5_31415: [u8; 16] = [
        0xfd, 0x80, 0xc4, 0xb0, 0x60, 0x25, 0xc3, 0x8f, 0x9d, 0x69, 0x58, 0xeb, 0xe4, 0xf1, 0x45,
        0x32,
    ];

    #[test]
    fn test_big_endian() {
        assert_eq!(
            Decoding::BigEndian.decode(&MD5_31415).unwrap(),
            [0xfd80c4b0, 0x6025c38f, 0x9d6958eb, 0xe4f14532]
        );
    }

    #[test]
    fn test_little_endian() {
        assert_eq!(
            Decoding::LittleEndian.decode(&MD5_31415).unwrap(),
            [0xb0c480fd, 0x8fc32560, 0xeb58699d, 0x3245f1e4]
        );
    }

    #[test]
    fn test_only_prefix_consumed() {
        let mut long = MD5_31415.to_vec();
        long.extend_from_slice(&[0xaa; 48]);
        assert_eq!(
            Decoding::BigEndian.decode(&long).unwrap(),
            Decoding::BigEndian.decode(&MD5_31415).unwrap()
        );
    }

    #[test]
    fn test_byte_reversal() {
        let digest: Vec<u8> = (0u8..20).collect();
        let be = Decoding::BigEndian.decode(&digest).unwrap();
        let le = Decoding::LittleEndian.decode(&digest).unwrap();
        for (b, l) in be.iter().zip(le.iter()) {
            assert_eq!(b.swap_bytes(), *l);
        }
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            Decoding::LittleEndian.decode(&[0u8; 15]),
            Err(DecodeError::TooShort { len: 15 })
        );
        assert_eq!(
            DecodeError::TooShort { len: 8 }.to_string(),
            "Digest too short: 8 bytes (need at least 16)"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("be".parse::<Decoding>().unwrap(), Decoding::BigEndian);
        assert_eq!("Little".parse::<Decoding>().unwrap(), Decoding::LittleEndian);
        assert!("middle".parse::<Decoding>().is_err());
    }
}
