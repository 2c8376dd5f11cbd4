//! numsgen - Nothing-up-my-sleeve constant generator.
//!
//! Derives seed digit strings from well-known irrational numbers, pushes them
//! through every combination of encoding, hash/KDF transform and byte-order
//! decoding, and emits the resulting 128-bit constants as four 32-bit words in
//! a fixed, reproducible order.

pub mod config;
pub mod decoding;
pub mod encoding;
pub mod generator;
pub mod output;
pub mod precision;
pub mod seed;
pub mod transform;

pub use config::{ConfigError, GeneratorConfig};
pub use decoding::Words;
pub use generator::{Constant, GenerateError, Generator, Tables};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} {elapsed_precise} {wide_bar:.cyan/blue} {human_pos}/{human_len} constants ({per_sec}, eta {eta})";

/// Progress bar style for constant generation, drawn on stderr.
pub fn default_progress_style() -> indicatif::ProgressStyle {
    match indicatif::ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        Ok(style) => style.progress_chars("=> "),
        Err(_) => indicatif::ProgressStyle::default_bar(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_template_parses() {
        assert!(indicatif::ProgressStyle::with_template(PROGRESS_TEMPLATE).is_ok());
    }
}
