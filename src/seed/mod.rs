//! Numeric seed engine.
//!
//! Seeds are decimal digit strings cut from high-precision expansions of
//! "innocent" reals: elementary functions of small primes and well-known
//! irrational constants. Each real contributes its value, its reciprocal, and
//! the fractional parts of those that are at least one, each truncated to
//! every configured precision.

mod source;

pub use source::{
    real_sources, Function, NamedConstant, Provenance, RealSource, ALL_CONSTANTS, ALL_FUNCTIONS,
};

use num_bigint::BigUint;
use std::fmt;
use tracing::{debug, info};

use crate::config::ConfigError;
use crate::precision::{MathContext, Real};

/// Default primes fed to every function.
pub const DEFAULT_PRIMES: [u64; 6] = [2, 3, 5, 7, 11, 13];

/// Default truncation precisions, in table order.
pub const DEFAULT_PRECISIONS: [usize; 13] = [
    42, 50, 100, 200, 500, 1000, 16, 32, 64, 128, 256, 512, 1024,
];

/// Largest accepted truncation precision.
pub const MAX_PRECISION: usize = 100_000;

/// Digits rendered beyond the largest precision.
const RENDER_MARGIN: usize = 2;

/// Which number derived from a real source a seed was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// |x|
    Value,
    /// 1 / |x|
    Reciprocal,
    /// Fractional part of |x|, when |x| >= 1
    ValueFraction,
    /// Fractional part of 1 / |x|, when 1 / |x| >= 1
    ReciprocalFraction,
}

/// Where a seed came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOrigin {
    Derived {
        provenance: Provenance,
        variant: Variant,
        precision: usize,
    },
    /// Supplied directly rather than derived
    Custom,
}

impl fmt::Display for SeedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedOrigin::Derived {
                provenance,
                variant,
                precision,
            } => match variant {
                Variant::Value => write!(f, "{}@{}", provenance, precision),
                Variant::Reciprocal => write!(f, "1/{}@{}", provenance, precision),
                Variant::ValueFraction => write!(f, "frac({})@{}", provenance, precision),
                Variant::ReciprocalFraction => write!(f, "frac(1/{})@{}", provenance, precision),
            },
            SeedOrigin::Custom => write!(f, "custom"),
        }
    }
}

/// A seed: a non-empty string of ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    digits: String,
    value: BigUint,
    origin: SeedOrigin,
}

impl Seed {
    /// Build a seed from a digit string supplied by the caller.
    pub fn custom(digits: &str) -> Result<Self, ConfigError> {
        Self::with_origin(digits, SeedOrigin::Custom)
    }

    fn with_origin(digits: &str, origin: SeedOrigin) -> Result<Self, ConfigError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidSeed(digits.to_string()));
        }
        let value = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| ConfigError::InvalidSeed(digits.to_string()))?;

        Ok(Self {
            digits: digits.to_string(),
            value,
            origin,
        })
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The digit string read as a non-negative integer.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn origin(&self) -> &SeedOrigin {
        &self.origin
    }
}

/// Parameters of the seed engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub primes: Vec<u64>,
    pub functions: Vec<Function>,
    pub constants: Vec<NamedConstant>,
    pub precisions: Vec<usize>,
    /// Also derive seeds from reciprocals
    pub reciprocals: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            primes: DEFAULT_PRIMES.to_vec(),
            functions: ALL_FUNCTIONS.to_vec(),
            constants: ALL_CONSTANTS.to_vec(),
            precisions: DEFAULT_PRECISIONS.to_vec(),
            reciprocals: true,
        }
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precisions.is_empty() {
            return Err(ConfigError::EmptyTable("precisions"));
        }
        if self.precisions.contains(&0) {
            return Err(ConfigError::ZeroPrecision);
        }
        if let Some(&precision) = self.precisions.iter().find(|&&p| p > MAX_PRECISION) {
            return Err(ConfigError::PrecisionTooLarge(precision));
        }
        Ok(())
    }

    /// Working precision: strictly more digits than any truncation needs.
    pub fn working_digits(&self) -> Result<u32, ConfigError> {
        let largest = self.precisions.iter().copied().max().unwrap_or(0);
        largest
            .checked_add(RENDER_MARGIN)
            .and_then(|digits| u32::try_from(digits).ok())
            .ok_or(ConfigError::PrecisionTooLarge(largest))
    }
}

/// The materialized, immutable seed table.
#[derive(Debug, Clone)]
pub struct SeedTable {
    seeds: Vec<Seed>,
    skipped: usize,
}

impl SeedTable {
    /// Evaluate every source and cut seeds at every precision.
    pub fn build(config: &SeedConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let digits = config.working_digits()?;
        let ctx = MathContext::new(digits);

        let (sources, failures) =
            real_sources(&ctx, &config.primes, &config.functions, &config.constants);
        let mut skipped = failures.len();
        for (provenance, err) in &failures {
            debug!(source = %provenance, error = %err, "skipping seed source");
        }

        let mut seeds = Vec::new();
        for source in &sources {
            for (variant, digits) in derive_variants(&ctx, source, config.reciprocals) {
                if digits.is_empty() {
                    debug!(source = %source.provenance, ?variant, "skipping zero seed");
                    skipped += 1;
                    continue;
                }

                for &precision in &config.precisions {
                    let truncated = &digits[..precision.min(digits.len())];
                    let origin = SeedOrigin::Derived {
                        provenance: source.provenance,
                        variant,
                        precision,
                    };
                    seeds.push(Seed::with_origin(truncated, origin)?);
                }
            }
        }

        info!(
            sources = sources.len(),
            seeds = seeds.len(),
            skipped,
            digits,
            "built seed table"
        );

        Ok(Self { seeds, skipped })
    }

    /// Table made of caller-supplied digit strings, in order.
    pub fn from_digits<'a>(digits: impl IntoIterator<Item = &'a str>) -> Result<Self, ConfigError> {
        let seeds = digits
            .into_iter()
            .map(Seed::custom)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { seeds, skipped: 0 })
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn into_seeds(self) -> Vec<Seed> {
        self.seeds
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Sources and variants left out because they were undefined or zero.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Digit strings for each variant of one source, in variant order.
///
/// Value and reciprocal are rendered as significant digits; fractional parts
/// keep the digits right after the decimal point, leading zeros included.
fn derive_variants(ctx: &MathContext, source: &RealSource, reciprocals: bool) -> Vec<(Variant, String)> {
    let value = source.value.abs();
    let mut bases: Vec<(Variant, Variant, Real)> =
        vec![(Variant::Value, Variant::ValueFraction, value.clone())];

    if reciprocals {
        match ctx.recip(&value) {
            Ok(reciprocal) => {
                bases.push((Variant::Reciprocal, Variant::ReciprocalFraction, reciprocal))
            }
            Err(err) => debug!(source = %source.provenance, error = %err, "no reciprocal"),
        }
    }

    let mut variants: Vec<(Variant, String)> = bases
        .iter()
        .map(|(variant, _, x)| (*variant, ctx.significant_digits(x)))
        .collect();

    for (_, fraction_variant, x) in &bases {
        if ctx.has_integer_part(x) {
            variants.push((*fraction_variant, ctx.digits_of(&ctx.fract(x)).fraction));
        }
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SeedConfig {
        SeedConfig {
            primes: vec![2],
            functions: vec![Function::Sqrt],
            constants: vec![],
            precisions: vec![16, 8],
            reciprocals: true,
        }
    }

    fn digits(table: &SeedTable) -> Vec<&str> {
        table.seeds().iter().map(|s| s.digits()).collect()
    }

    #[test]
    fn test_sqrt2_variants() {
        let table = SeedTable::build(&small_config()).unwrap();
        assert_eq!(
            digits(&table),
            [
                "1414213562373095",
                "14142135",
                "7071067811865475",
                "70710678",
                "4142135623730950",
                "41421356",
            ]
        );
    }

    #[test]
    fn test_seed_origins() {
        let table = SeedTable::build(&small_config()).unwrap();
        let origins: Vec<String> = table.seeds().iter().map(|s| s.origin().to_string()).collect();
        assert_eq!(
            origins,
            [
                "sqrt(2)@16",
                "sqrt(2)@8",
                "1/sqrt(2)@16",
                "1/sqrt(2)@8",
                "frac(sqrt(2))@16",
                "frac(sqrt(2))@8",
            ]
        );
    }

    #[test]
    fn test_reciprocal_fraction() {
        // ln 2 < 1, so only its reciprocal has a fractional part
        let config = SeedConfig {
            functions: vec![Function::Ln],
            precisions: vec![10],
            ..small_config()
        };
        let table = SeedTable::build(&config).unwrap();
        assert_eq!(digits(&table), ["6931471805", "1442695040", "4426950408"]);
        assert_eq!(table.seeds()[2].origin().to_string(), "frac(1/ln(2))@10");
    }

    #[test]
    fn test_without_reciprocals() {
        let config = SeedConfig {
            reciprocals: false,
            ..small_config()
        };
        let table = SeedTable::build(&config).unwrap();
        assert_eq!(
            digits(&table),
            ["1414213562373095", "14142135", "4142135623730950", "41421356"]
        );
    }

    #[test]
    fn test_domain_failures_skipped() {
        // ln(1) = 0 has no reciprocal and renders to nothing; ln(0) is undefined
        let config = SeedConfig {
            primes: vec![0, 1],
            functions: vec![Function::Ln],
            ..small_config()
        };
        let table = SeedTable::build(&config).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.skipped(), 2);
    }

    #[test]
    fn test_seed_invariants_on_default_sources() {
        let config = SeedConfig {
            precisions: vec![16, 42],
            ..SeedConfig::default()
        };
        let table = SeedTable::build(&config).unwrap();

        assert!(!table.is_empty());
        assert_eq!(table.skipped(), 0);
        assert_eq!(table.len() % 2, 0);
        for seed in table.seeds() {
            assert!(!seed.digits().is_empty());
            assert!(seed.digits().bytes().all(|b| b.is_ascii_digit()));
            match seed.origin() {
                SeedOrigin::Derived { precision, .. } => assert!(seed.digits().len() <= *precision),
                SeedOrigin::Custom => panic!("derived table holds custom seed"),
            }
        }
    }

    #[test]
    fn test_constants_follow_prime_sources() {
        let config = SeedConfig {
            primes: vec![3],
            functions: vec![Function::Cbrt],
            constants: vec![NamedConstant::Pi],
            precisions: vec![5],
            reciprocals: false,
        };
        let table = SeedTable::build(&config).unwrap();
        assert_eq!(digits(&table), ["14422", "44224", "31415", "14159"]);
    }

    #[test]
    fn test_custom_seeds() {
        let table = SeedTable::from_digits(["31415", "007"]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.seeds()[1].value(), &BigUint::from(7u32));
        assert_eq!(table.seeds()[1].digits(), "007");
        assert_eq!(table.seeds()[0].origin(), &SeedOrigin::Custom);

        assert!(Seed::custom("").is_err());
        assert!(Seed::custom("12a4").is_err());
        assert!(Seed::custom("-12").is_err());
    }

    #[test]
    fn test_invalid_config() {
        let empty = SeedConfig {
            precisions: vec![],
            ..SeedConfig::default()
        };
        assert!(matches!(
            SeedTable::build(&empty),
            Err(ConfigError::EmptyTable("precisions"))
        ));

        let zero = SeedConfig {
            precisions: vec![16, 0],
            ..SeedConfig::default()
        };
        assert!(matches!(SeedTable::build(&zero), Err(ConfigError::ZeroPrecision)));
    }

    #[test]
    fn test_working_digits_exceed_precisions() {
        assert_eq!(SeedConfig::default().working_digits(), Ok(1026));
        assert_eq!(small_config().working_digits(), Ok(18));
    }

    #[test]
    fn test_oversized_precision_rejected() {
        for precision in [MAX_PRECISION + 1, 4_294_967_290, usize::MAX] {
            let config = SeedConfig {
                precisions: vec![16, precision],
                ..small_config()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::PrecisionTooLarge(precision))
            );
            assert!(matches!(
                SeedTable::build(&config),
                Err(ConfigError::PrecisionTooLarge(p)) if p == precision
            ));
        }

        let overflowing = SeedConfig {
            precisions: vec![usize::MAX],
            ..small_config()
        };
        assert_eq!(
            overflowing.working_digits(),
            Err(ConfigError::PrecisionTooLarge(usize::MAX))
        );

        let largest = SeedConfig {
            precisions: vec![MAX_PRECISION],
            ..small_config()
        };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.working_digits(), Ok(MAX_PRECISION as u32 + 2));
    }
}
