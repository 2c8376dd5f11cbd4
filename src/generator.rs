//! Enumeration of the seed x encoding x transform x decoding product.
//!
//! The product is walked lazily with a mixed-radix cursor. Seeds vary
//! slowest and decodings fastest, so `generate(k)` is always a prefix of
//! `generate(k + 1)`.

use std::fmt;
use tracing::info;

use crate::config::{ConfigError, GeneratorConfig};
use crate::decoding::{DecodeError, Decoding, Words};
use crate::encoding::Encoding;
use crate::seed::{Seed, SeedTable};
use crate::transform::{Transform, TransformError};

/// Failure inside a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    Transform(TransformError),
    Decode(DecodeError),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::Transform(e) => write!(f, "{}", e),
            StageError::Decode(e) => write!(f, "{}", e),
        }
    }
}

/// Errors raised while sizing or walking the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Requested count is not an integer in 1..=max
    InvalidCount { requested: String, max: u64 },
    /// Start position lies beyond the end of the product
    InvalidStart { start: u64, max: u64 },
    /// Product size does not fit in 64 bits
    SpaceOverflow,
    /// A transform or decoding failed; the run cannot continue
    Stage {
        position: Position,
        labels: Labels,
        cause: StageError,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidCount { max, .. } => {
                write!(f, "expected count in 1..={} (~2^{:.2})", max, log2(*max))
            }
            GenerateError::InvalidStart { start, max } => {
                write!(f, "start position {} beyond end of space ({})", start, max)
            }
            GenerateError::SpaceOverflow => write!(f, "enumeration space exceeds 2^64"),
            GenerateError::Stage {
                position,
                labels,
                cause,
            } => write!(f, "stage failed at #{} ({}): {}", position.index, labels, cause),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Stage {
                cause: StageError::Transform(e),
                ..
            } => Some(e),
            GenerateError::Stage {
                cause: StageError::Decode(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

/// Base-2 logarithm of a space size, for reporting.
pub fn log2(n: u64) -> f64 {
    (n as f64).log2()
}

/// Parse a user-supplied count against the available space.
pub fn parse_count(input: &str, max: u64) -> Result<u64, GenerateError> {
    let invalid = || GenerateError::InvalidCount {
        requested: input.to_string(),
        max,
    };
    let count: u64 = input.trim().parse().map_err(|_| invalid())?;
    if count == 0 || count > max {
        return Err(invalid());
    }
    Ok(count)
}

/// A point in the product: flat index plus one index per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub index: u64,
    pub seed: usize,
    pub encoding: usize,
    pub transform: usize,
    pub decoding: usize,
}

/// Names of the table entries active at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub seed: String,
    pub encoding: &'static str,
    pub transform: String,
    pub decoding: &'static str,
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed {}, encoding {}, transform {}, decoding {}",
            self.seed, self.encoding, self.transform, self.decoding
        )
    }
}

/// One generated constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    pub words: Words,
    pub position: Position,
}

/// The four materialized tables.
#[derive(Debug, Clone)]
pub struct Tables {
    seeds: Vec<Seed>,
    encodings: Vec<Encoding>,
    transforms: Vec<Transform>,
    decodings: Vec<Decoding>,
}

impl Tables {
    pub fn new(
        seeds: Vec<Seed>,
        encodings: Vec<Encoding>,
        transforms: Vec<Transform>,
        decodings: Vec<Decoding>,
    ) -> Self {
        Self {
            seeds,
            encodings,
            transforms,
            decodings,
        }
    }

    /// Materialize every table from a configuration.
    pub fn build(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transforms = config.transform_table()?;
        let seeds = SeedTable::build(&config.seeds)?;
        if seeds.is_empty() {
            return Err(ConfigError::EmptyTable("seeds"));
        }

        Ok(Self::new(
            seeds.into_seeds(),
            config.encodings.clone(),
            transforms,
            config.decodings.clone(),
        ))
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn decodings(&self) -> &[Decoding] {
        &self.decodings
    }

    /// Table sizes, outermost first.
    pub fn dimensions(&self) -> [usize; 4] {
        [
            self.seeds.len(),
            self.encodings.len(),
            self.transforms.len(),
            self.decodings.len(),
        ]
    }

    /// Size of the full product.
    pub fn max_count(&self) -> Result<u64, GenerateError> {
        self.dimensions().iter().try_fold(1u64, |acc, &n| {
            u64::try_from(n)
                .ok()
                .and_then(|n| acc.checked_mul(n))
                .ok_or(GenerateError::SpaceOverflow)
        })
    }

    /// Names of the entries active at `position`.
    pub fn describe(&self, position: &Position) -> Labels {
        Labels {
            seed: self.seeds[position.seed].origin().to_string(),
            encoding: self.encodings[position.encoding].name(),
            transform: self.transforms[position.transform].name(),
            decoding: self.decodings[position.decoding].name(),
        }
    }
}

/// Mixed-radix counter over the four tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    radices: [usize; 4],
    digits: [usize; 4],
    index: u64,
}

impl Cursor {
    /// Cursor at flat `index`, or `None` when the index lies outside the product.
    pub fn from_index(radices: [usize; 4], index: u64) -> Option<Self> {
        if radices.contains(&0) {
            return None;
        }

        let mut digits = [0usize; 4];
        let mut rest = index;
        for (digit, &radix) in digits.iter_mut().zip(radices.iter()).rev() {
            let radix = radix as u64;
            *digit = (rest % radix) as usize;
            rest /= radix;
        }
        if rest != 0 {
            return None;
        }

        Some(Self {
            radices,
            digits,
            index,
        })
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            seed: self.digits[0],
            encoding: self.digits[1],
            transform: self.digits[2],
            decoding: self.digits[3],
        }
    }

    /// Step to the next position; false once the product is exhausted.
    pub fn advance(&mut self) -> bool {
        for (digit, &radix) in self.digits.iter_mut().zip(self.radices.iter()).rev() {
            *digit += 1;
            if *digit < radix {
                self.index += 1;
                return true;
            }
            *digit = 0;
        }
        false
    }
}

/// Walks the product of a set of tables.
#[derive(Debug, Clone)]
pub struct Generator {
    tables: Tables,
    max: u64,
}

impl Generator {
    pub fn new(tables: Tables) -> Result<Self, GenerateError> {
        let max = tables.max_count()?;
        let [seeds, encodings, transforms, decodings] = tables.dimensions();
        info!(
            seeds,
            encodings,
            transforms,
            decodings,
            max,
            log2 = %format!("{:.2}", log2(max)),
            "enumeration space"
        );
        Ok(Self { tables, max })
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Number of constants in the whole space.
    pub fn max_count(&self) -> u64 {
        self.max
    }

    /// The first `count` constants.
    pub fn generate(&self, count: u64) -> Result<Constants<'_>, GenerateError> {
        self.generate_from(0, count)
    }

    /// `count` constants starting at flat index `start`.
    pub fn generate_from(&self, start: u64, count: u64) -> Result<Constants<'_>, GenerateError> {
        if start > self.max {
            return Err(GenerateError::InvalidStart {
                start,
                max: self.max,
            });
        }
        let available = self.max - start;
        if count == 0 || count > available {
            return Err(GenerateError::InvalidCount {
                requested: count.to_string(),
                max: available,
            });
        }

        let cursor = Cursor::from_index(self.tables.dimensions(), start).ok_or(
            GenerateError::InvalidStart {
                start,
                max: self.max,
            },
        )?;

        Ok(Constants {
            tables: &self.tables,
            cursor,
            remaining: count,
            encoded_key: None,
            encoded: Vec::new(),
            digest_key: None,
            digest: Vec::new(),
        })
    }
}

/// Lazy iterator over generated constants.
///
/// Yields at most one error, after which it is exhausted.
pub struct Constants<'a> {
    tables: &'a Tables,
    cursor: Cursor,
    remaining: u64,
    encoded_key: Option<(usize, usize)>,
    encoded: Vec<u8>,
    digest_key: Option<(usize, usize, usize)>,
    digest: Vec<u8>,
}

impl Constants<'_> {
    fn compute(&mut self, position: Position) -> Result<Words, StageError> {
        let tables = self.tables;

        let encoded_key = (position.seed, position.encoding);
        if self.encoded_key != Some(encoded_key) {
            let seed = &tables.seeds[position.seed];
            self.encoded = tables.encodings[position.encoding].encode(seed.value());
            self.encoded_key = Some(encoded_key);
            self.digest_key = None;
        }

        let digest_key = (position.seed, position.encoding, position.transform);
        if self.digest_key != Some(digest_key) {
            self.digest = tables.transforms[position.transform]
                .apply(&self.encoded)
                .map_err(StageError::Transform)?;
            self.digest_key = Some(digest_key);
        }

        tables.decodings[position.decoding]
            .decode(&self.digest)
            .map_err(StageError::Decode)
    }
}

impl Iterator for Constants<'_> {
    type Item = Result<Constant, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let position = self.cursor.position();
        let words = match self.compute(position) {
            Ok(words) => words,
            Err(cause) => {
                self.remaining = 0;
                return Some(Err(GenerateError::Stage {
                    position,
                    labels: self.tables.describe(&position),
                    cause,
                }));
            }
        };

        self.remaining -= 1;
        if self.remaining > 0 && !self.cursor.advance() {
            self.remaining = 0;
        }

        Some(Ok(Constant { words, position }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}
