//! Textual and binary encodings of a seed's integer value.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use num_bigint::BigUint;
use std::str::FromStr;

use crate::config::ConfigError;

/// How a seed is turned into bytes before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Decimal ASCII
    Decimal,
    /// Binary ASCII with a "0b" prefix
    Binary,
    /// Binary ASCII without prefix
    BinaryNoPrefix,
    /// Lowercase hex ASCII, even length
    HexLower,
    /// Uppercase hex ASCII, even length
    HexUpper,
    /// Big-endian bytes (lowercase hex decoded)
    Raw,
    /// Base64 of the decimal ASCII
    Base64Decimal,
    /// Base64 of the raw bytes
    Base64Raw,
}

/// All encodings, in table order.
pub const ALL_ENCODINGS: [Encoding; 8] = [
    Encoding::Decimal,
    Encoding::Binary,
    Encoding::BinaryNoPrefix,
    Encoding::HexLower,
    Encoding::HexUpper,
    Encoding::Raw,
    Encoding::Base64Decimal,
    Encoding::Base64Raw,
];

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Decimal => "int10",
            Encoding::Binary => "int2",
            Encoding::BinaryNoPrefix => "int2_noprefix",
            Encoding::HexLower => "hex_lo",
            Encoding::HexUpper => "hex_hi",
            Encoding::Raw => "raw",
            Encoding::Base64Decimal => "base64_int",
            Encoding::Base64Raw => "base64_raw",
        }
    }

    /// Encode an integer value. Every transform accepts the result as-is.
    pub fn encode(&self, value: &BigUint) -> Vec<u8> {
        match self {
            Encoding::Decimal => value.to_string().into_bytes(),
            Encoding::Binary => format!("0b{}", value.to_str_radix(2)).into_bytes(),
            Encoding::BinaryNoPrefix => value.to_str_radix(2).into_bytes(),
            Encoding::HexLower => hex::encode(value.to_bytes_be()).into_bytes(),
            Encoding::HexUpper => hex::encode_upper(value.to_bytes_be()).into_bytes(),
            Encoding::Raw => value.to_bytes_be(),
            Encoding::Base64Decimal => BASE64.encode(value.to_string()).into_bytes(),
            Encoding::Base64Raw => BASE64.encode(value.to_bytes_be()).into_bytes(),
        }
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ALL_ENCODINGS
            .into_iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| ConfigError::unknown("encoding", s))
    }
}
