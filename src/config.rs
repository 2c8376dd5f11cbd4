//! Generator configuration.
//!
//! All table contents are decided here, once, before anything is generated.

use std::fmt;

use crate::decoding::{Decoding, ALL_DECODINGS, DIGEST_PREFIX_LEN};
use crate::encoding::{Encoding, ALL_ENCODINGS};
use crate::seed::{Function, NamedConstant, SeedConfig};
use crate::transform::{Transform, TransformConfig};

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Name not recognized for this kind of table entry
    UnknownName { kind: &'static str, name: String },
    /// A table ended up with no entries
    EmptyTable(&'static str),
    /// Precisions must be at least one digit
    ZeroPrecision,
    /// Precision beyond what the math context supports
    PrecisionTooLarge(usize),
    /// Seed is not a non-empty string of decimal digits
    InvalidSeed(String),
    /// Transform output is shorter than the decoded prefix
    DigestTooShort { transform: String, len: usize },
}

impl ConfigError {
    pub fn unknown(kind: &'static str, name: &str) -> Self {
        ConfigError::UnknownName {
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownName { kind, name } => write!(f, "Unknown {}: {}", kind, name),
            ConfigError::EmptyTable(table) => write!(f, "No {} configured", table),
            ConfigError::ZeroPrecision => write!(f, "Precision must be at least 1 digit"),
            ConfigError::PrecisionTooLarge(digits) => {
                write!(f, "Precision too large: {} digits", digits)
            }
            ConfigError::InvalidSeed(seed) => write!(f, "Invalid seed digits: {:?}", seed),
            ConfigError::DigestTooShort { transform, len } => write!(
                f,
                "Transform {} yields {} bytes (need at least {})",
                transform, len, DIGEST_PREFIX_LEN
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything needed to materialize the four tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub seeds: SeedConfig,
    pub encodings: Vec<Encoding>,
    pub transforms: TransformConfig,
    /// Keep only transforms matching one of these selectors (all when empty)
    pub transform_selectors: Vec<String>,
    pub decodings: Vec<Decoding>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seeds: SeedConfig::default(),
            encodings: ALL_ENCODINGS.to_vec(),
            transforms: TransformConfig::default(),
            transform_selectors: Vec::new(),
            decodings: ALL_DECODINGS.to_vec(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primes(mut self, primes: Vec<u64>) -> Self {
        self.seeds.primes = primes;
        self
    }

    pub fn with_functions(mut self, functions: Vec<Function>) -> Self {
        self.seeds.functions = functions;
        self
    }

    pub fn with_constants(mut self, constants: Vec<NamedConstant>) -> Self {
        self.seeds.constants = constants;
        self
    }

    pub fn with_precisions(mut self, precisions: Vec<usize>) -> Self {
        self.seeds.precisions = precisions;
        self
    }

    pub fn with_reciprocals(mut self, reciprocals: bool) -> Self {
        self.seeds.reciprocals = reciprocals;
        self
    }

    pub fn with_encodings(mut self, encodings: Vec<Encoding>) -> Self {
        self.encodings = encodings;
        self
    }

    pub fn with_transforms(mut self, transforms: TransformConfig) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_transform_selectors(mut self, selectors: Vec<String>) -> Self {
        self.transform_selectors = selectors;
        self
    }

    pub fn with_decodings(mut self, decodings: Vec<Decoding>) -> Self {
        self.decodings = decodings;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.seeds.validate()?;
        if self.encodings.is_empty() {
            return Err(ConfigError::EmptyTable("encodings"));
        }
        if self.decodings.is_empty() {
            return Err(ConfigError::EmptyTable("decodings"));
        }
        Ok(())
    }

    /// The transform table after applying selectors, in table order.
    ///
    /// Every entry must produce at least one decodable prefix.
    pub fn transform_table(&self) -> Result<Vec<Transform>, ConfigError> {
        let table = self.transforms.build();

        for selector in &self.transform_selectors {
            if !table.iter().any(|t| t.matches(selector)) {
                return Err(ConfigError::unknown("transform", selector));
            }
        }

        let selected: Vec<Transform> = if self.transform_selectors.is_empty() {
            table
        } else {
            table
                .into_iter()
                .filter(|t| self.transform_selectors.iter().any(|s| t.matches(s)))
                .collect()
        };

        if selected.is_empty() {
            return Err(ConfigError::EmptyTable("transforms"));
        }
        if let Some(short) = selected.iter().find(|t| t.digest_len() < DIGEST_PREFIX_LEN) {
            return Err(ConfigError::DigestTooShort {
                transform: short.name(),
                len: short.digest_len(),
            });
        }
        Ok(selected)
    }
}
