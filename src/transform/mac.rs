//! HMAC over any of the supported hash algorithms.

use blake2::{Blake2b512, Blake2s256};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac, SimpleHmac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use super::{HashAlgorithm, TransformError};

/// HMAC(key, data) under `algorithm`.
pub fn hmac(algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>, TransformError> {
    match algorithm {
        HashAlgorithm::Md5 => mac::<Hmac<Md5>>(key, data),
        HashAlgorithm::Sha1 => mac::<Hmac<Sha1>>(key, data),
        HashAlgorithm::Sha224 => mac::<Hmac<Sha224>>(key, data),
        HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(key, data),
        HashAlgorithm::Sha384 => mac::<Hmac<Sha384>>(key, data),
        HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(key, data),
        // BLAKE2 buffers lazily, which only the simple construction accepts
        HashAlgorithm::Blake2b => mac::<SimpleHmac<Blake2b512>>(key, data),
        HashAlgorithm::Blake2s => mac::<SimpleHmac<Blake2s256>>(key, data),
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TransformError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| TransformError::InvalidKeyLength(key.len()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
