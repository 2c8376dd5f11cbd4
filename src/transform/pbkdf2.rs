//! PBKDF2 (RFC 8018) with HMAC as the pseudo-random function.

use super::mac::hmac;
use super::{HashAlgorithm, TransformError};

/// Derive `output_len` bytes from `password` and `salt`.
pub fn pbkdf2(
    prf: HashAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Vec<u8>, TransformError> {
    if iterations == 0 {
        return Err(TransformError::InvalidIterations(iterations));
    }
    if output_len == 0 {
        return Err(TransformError::InvalidOutputLength(output_len));
    }

    let mut output = Vec::with_capacity(output_len);
    let mut block_index = 1u32;

    while output.len() < output_len {
        // U1 = PRF(Password, Salt || INT(i))
        let mut salted = Vec::with_capacity(salt.len() + 4);
        salted.extend_from_slice(salt);
        salted.extend_from_slice(&block_index.to_be_bytes());

        let mut u = hmac(prf, password, &salted)?;
        let mut block = u.clone();

        // U2 through U_iterations, XORed into the block
        for _ in 1..iterations {
            u = hmac(prf, password, &u)?;
            for (b, ui) in block.iter_mut().zip(u.iter()) {
                *b ^= ui;
            }
        }

        let take = (output_len - output.len()).min(block.len());
        output.extend_from_slice(&block[..take]);
        block_index = block_index
            .checked_add(1)
            .ok_or(TransformError::InvalidOutputLength(output_len))?;
    }

    Ok(output)
}
