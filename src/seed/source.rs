//! Real-valued sources: functions of small primes and named constants.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::precision::{DomainError, MathContext, Real};

/// Real-valued function applied to a prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Ln,
    Log10,
    Sqrt,
    Cbrt,
    Cos,
    Sin,
    Tan,
}

/// All functions, in table order.
pub const ALL_FUNCTIONS: [Function; 7] = [
    Function::Ln,
    Function::Log10,
    Function::Sqrt,
    Function::Cbrt,
    Function::Cos,
    Function::Sin,
    Function::Tan,
];

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Cos => "cos",
            Function::Sin => "sin",
            Function::Tan => "tan",
        }
    }

    /// Evaluate at an integer argument.
    pub fn eval(&self, ctx: &MathContext, argument: i64) -> Result<Real, DomainError> {
        let x = ctx.from_int(argument);
        match self {
            Function::Ln => ctx.ln(&x),
            Function::Log10 => ctx.log10(&x),
            Function::Sqrt => ctx.sqrt(&x),
            Function::Cbrt => Ok(ctx.cbrt(&x)),
            Function::Cos => Ok(ctx.cos(&x)),
            Function::Sin => Ok(ctx.sin(&x)),
            Function::Tan => ctx.tan(&x),
        }
    }
}

impl FromStr for Function {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ALL_FUNCTIONS
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| ConfigError::unknown("function", s))
    }
}

/// Well-known irrational constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedConstant {
    GoldenRatio,
    Pi,
    E,
    EulerGamma,
    Apery,
    LogPi,
}

/// All constants, in table order.
pub const ALL_CONSTANTS: [NamedConstant; 6] = [
    NamedConstant::GoldenRatio,
    NamedConstant::Pi,
    NamedConstant::E,
    NamedConstant::EulerGamma,
    NamedConstant::Apery,
    NamedConstant::LogPi,
];

impl NamedConstant {
    pub fn name(&self) -> &'static str {
        match self {
            NamedConstant::GoldenRatio => "phi",
            NamedConstant::Pi => "pi",
            NamedConstant::E => "e",
            NamedConstant::EulerGamma => "euler",
            NamedConstant::Apery => "zeta3",
            NamedConstant::LogPi => "logpi",
        }
    }

    pub fn eval(&self, ctx: &MathContext) -> Real {
        match self {
            NamedConstant::GoldenRatio => ctx.phi(),
            NamedConstant::Pi => ctx.pi(),
            NamedConstant::E => ctx.e(),
            NamedConstant::EulerGamma => ctx.euler_gamma(),
            NamedConstant::Apery => ctx.zeta3(),
            NamedConstant::LogPi => ctx.ln_pi(),
        }
    }
}

impl FromStr for NamedConstant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ALL_CONSTANTS
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| ConfigError::unknown("constant", s))
    }
}

/// How a real source was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// A function applied to a prime
    Prime { function: Function, prime: u64 },
    /// A named constant
    Constant(NamedConstant),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Prime { function, prime } => write!(f, "{}({})", function.name(), prime),
            Provenance::Constant(constant) => write!(f, "{}", constant.name()),
        }
    }
}

/// A real number together with where it came from.
#[derive(Debug, Clone)]
pub struct RealSource {
    pub provenance: Provenance,
    pub value: Real,
}

/// Evaluate every (prime, function) pair, then every constant.
///
/// Pairs outside the function's domain are left out and returned alongside.
pub fn real_sources(
    ctx: &MathContext,
    primes: &[u64],
    functions: &[Function],
    constants: &[NamedConstant],
) -> (Vec<RealSource>, Vec<(Provenance, DomainError)>) {
    let mut sources = Vec::with_capacity(primes.len() * functions.len() + constants.len());
    let mut skipped = Vec::new();

    for &prime in primes {
        for &function in functions {
            let provenance = Provenance::Prime { function, prime };
            let evaluated = i64::try_from(prime)
                .map_err(|_| DomainError {
                    function: function.name(),
                    argument: prime.to_string(),
                })
                .and_then(|argument| function.eval(ctx, argument));

            match evaluated {
                Ok(value) => sources.push(RealSource { provenance, value }),
                Err(err) => skipped.push((provenance, err)),
            }
        }
    }

    for &constant in constants {
        sources.push(RealSource {
            provenance: Provenance::Constant(constant),
            value: constant.eval(ctx),
        });
    }

    (sources, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names_round_trip() {
        for function in ALL_FUNCTIONS {
            assert_eq!(function.name().parse::<Function>().unwrap(), function);
        }
        assert_eq!("LN".parse::<Function>().unwrap(), Function::Ln);
        assert!("atan".parse::<Function>().is_err());
    }

    #[test]
    fn test_constant_names_round_trip() {
        for constant in ALL_CONSTANTS {
            assert_eq!(constant.name().parse::<NamedConstant>().unwrap(), constant);
        }
        assert!("tau".parse::<NamedConstant>().is_err());
    }

    #[test]
    fn test_real_sources_order() {
        let ctx = MathContext::new(20);
        let (sources, skipped) = real_sources(
            &ctx,
            &[2, 3],
            &[Function::Sqrt, Function::Ln],
            &[NamedConstant::Pi],
        );

        assert!(skipped.is_empty());
        let labels: Vec<String> = sources.iter().map(|s| s.provenance.to_string()).collect();
        assert_eq!(labels, ["sqrt(2)", "ln(2)", "sqrt(3)", "ln(3)", "pi"]);
    }

    #[test]
    fn test_domain_errors_are_skipped() {
        let ctx = MathContext::new(20);
        let (sources, skipped) = real_sources(&ctx, &[0, 2], &[Function::Ln, Function::Log10], &[]);

        assert_eq!(sources.len(), 2);
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].0.to_string(), "ln(0)");
        assert_eq!(skipped[1].0.to_string(), "log10(0)");
    }

    #[test]
    fn test_negative_values_kept() {
        // cos(2) < 0; magnitudes are taken later, when seeds are rendered
        let ctx = MathContext::new(20);
        let (sources, _) = real_sources(&ctx, &[2], &[Function::Cos], &[]);
        assert!(sources[0].value.is_negative());
    }
}
