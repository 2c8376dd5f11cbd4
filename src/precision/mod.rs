//! Fixed-point decimal arithmetic at arbitrary precision.
//!
//! A [`Real`] is a `BigInt` scaled by `10^(digits + GUARD_DIGITS)`. The
//! precision is fixed once, when the [`MathContext`] is built, and every value
//! produced by a context shares its scale. Mixing values from contexts of
//! different precision gives meaningless results.
//!
//! Only what the seed engine needs is provided: the elementary functions
//! applied to small integers, a handful of named constants, reciprocals, and
//! rendering to decimal digit strings.

mod constants;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use std::fmt;

/// Extra decimal digits carried below the requested precision.
///
/// Series truncation, argument reduction and division each lose a few units in
/// the last place; the guard digits absorb that before rendering.
pub const GUARD_DIGITS: u32 = 32;

/// A math function was evaluated outside its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    /// Name of the function (e.g. "ln", "reciprocal")
    pub function: &'static str,
    /// Rendered argument, for diagnostics
    pub argument: String,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is undefined at {}", self.function, self.argument)
    }
}

impl std::error::Error for DomainError {}

/// A real number in fixed-point representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Real(BigInt);

impl Real {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Absolute value.
    pub fn abs(&self) -> Real {
        Real(self.0.abs())
    }
}

/// Decimal expansion of a real, split at the decimal point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digits {
    /// Integer part without leading zeros ("0" for values below one)
    pub integer: String,
    /// Fractional digits, exactly `digits` of them
    pub fraction: String,
}

/// Precision configuration and the working state derived from it.
#[derive(Debug, Clone)]
pub struct MathContext {
    digits: u32,
    scale: BigInt,
    ln2: BigInt,
    pi: BigInt,
}

impl MathContext {
    /// Create a context evaluating to `digits` decimal digits after the point.
    pub fn new(digits: u32) -> Self {
        let scale = BigInt::from(10u32).pow(digits + GUARD_DIGITS);
        let mut ctx = Self {
            digits,
            scale,
            ln2: BigInt::zero(),
            pi: BigInt::zero(),
        };
        // ln 2 = 2 atanh(1/3)
        ctx.ln2 = ctx.atanh_raw(&ctx.ratio_raw(1, 3)) * 2u32;
        ctx.pi = ctx.machin_pi();
        ctx
    }

    pub fn from_int(&self, n: i64) -> Real {
        Real(BigInt::from(n) * &self.scale)
    }

    pub fn recip(&self, x: &Real) -> Result<Real, DomainError> {
        if x.is_zero() {
            return Err(DomainError {
                function: "reciprocal",
                argument: "0".to_string(),
            });
        }
        Ok(Real(self.div_raw(&self.scale, &x.0)))
    }

    /// True when `|x| >= 1`.
    pub fn has_integer_part(&self, x: &Real) -> bool {
        x.0.abs() >= self.scale
    }

    /// Fractional part of `|x|`.
    pub fn fract(&self, x: &Real) -> Real {
        Real(x.0.abs() % &self.scale)
    }

    pub fn sqrt(&self, x: &Real) -> Result<Real, DomainError> {
        if x.is_negative() {
            return Err(self.domain("sqrt", x));
        }
        Ok(Real((&x.0 * &self.scale).sqrt()))
    }

    pub fn cbrt(&self, x: &Real) -> Real {
        Real((&x.0 * &self.scale * &self.scale).cbrt())
    }

    /// Natural logarithm.
    pub fn ln(&self, x: &Real) -> Result<Real, DomainError> {
        if x.is_negative() || x.is_zero() {
            return Err(self.domain("ln", x));
        }
        Ok(Real(self.ln_raw(&x.0)))
    }

    pub fn log10(&self, x: &Real) -> Result<Real, DomainError> {
        if x.is_negative() || x.is_zero() {
            return Err(self.domain("log10", x));
        }
        let ln10 = self.ln_raw(&(BigInt::from(10u32) * &self.scale));
        Ok(Real(self.div_raw(&self.ln_raw(&x.0), &ln10)))
    }

    pub fn sin(&self, x: &Real) -> Real {
        Real(self.sin_cos_raw(&x.0).0)
    }

    pub fn cos(&self, x: &Real) -> Real {
        Real(self.sin_cos_raw(&x.0).1)
    }

    pub fn tan(&self, x: &Real) -> Result<Real, DomainError> {
        let (sin, cos) = self.sin_cos_raw(&x.0);
        if cos.is_zero() {
            return Err(self.domain("tan", x));
        }
        Ok(Real(self.div_raw(&sin, &cos)))
    }

    /// Decimal expansion of `|x|`, truncated (never rounded) to the context
    /// precision.
    pub fn digits_of(&self, x: &Real) -> Digits {
        let magnitude = x.0.abs();
        let integer = (&magnitude / &self.scale).to_string();
        let fraction = self.full_fraction(&magnitude);
        Digits {
            integer,
            fraction: fraction[..self.digits as usize].to_string(),
        }
    }

    /// The first `digits` significant decimal digits of `|x|`, with no decimal
    /// point and no leading zeros. Empty for zero.
    pub fn significant_digits(&self, x: &Real) -> String {
        let magnitude = x.0.abs();
        let integer = &magnitude / &self.scale;
        let mut all = if integer.is_zero() {
            String::new()
        } else {
            integer.to_string()
        };
        // Half of the guard digits may stand in for leading zeros; the rest stay hidden.
        let fraction = self.full_fraction(&magnitude);
        all.push_str(&fraction[..(self.digits + GUARD_DIGITS / 2) as usize]);

        let significant = all.trim_start_matches('0');
        significant
            .chars()
            .take(self.digits as usize)
            .collect()
    }

    /// Guard digits included; callers trim to the context precision.
    fn full_fraction(&self, magnitude: &BigInt) -> String {
        let width = (self.digits + GUARD_DIGITS) as usize;
        let fraction = (magnitude % &self.scale).to_string();
        format!("{:0>width$}", fraction, width = width)
    }

    fn domain(&self, function: &'static str, x: &Real) -> DomainError {
        let digits = self.digits_of(x);
        let sign = if x.is_negative() { "-" } else { "" };
        let preview: String = digits.fraction.chars().take(8).collect();
        DomainError {
            function,
            argument: format!("{}{}.{}", sign, digits.integer, preview),
        }
    }

    fn ratio_raw(&self, num: i64, den: i64) -> BigInt {
        BigInt::from(num) * &self.scale / den
    }

    fn mul_raw(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b / &self.scale
    }

    fn div_raw(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * &self.scale / b
    }

    /// atanh(x) = x + x^3/3 + x^5/5 + ... for |x| well below one.
    fn atanh_raw(&self, x: &BigInt) -> BigInt {
        let x2 = self.mul_raw(x, x);
        let mut power = x.clone();
        let mut sum = BigInt::zero();
        let mut k = 1u32;

        while !power.is_zero() {
            sum += &power / k;
            power = self.mul_raw(&power, &x2);
            k += 2;
        }

        sum
    }

    /// ln(x) = k ln 2 + 2 atanh((y - 1) / (y + 1)), with y = x / 2^k in [3/4, 3/2].
    fn ln_raw(&self, x: &BigInt) -> BigInt {
        let one = &self.scale;
        let upper = one * 3u32 / 2u32;
        let lower = one * 3u32 / 4u32;

        let mut y = x.clone();
        let mut k: i64 = 0;
        while y > upper {
            y /= 2u32;
            k += 1;
        }
        while y < lower {
            y *= 2u32;
            k -= 1;
        }

        let t = self.div_raw(&(&y - one), &(&y + one));
        &self.ln2 * k + self.atanh_raw(&t) * 2u32
    }

    /// Taylor series after reducing the argument into [-pi, pi].
    fn sin_cos_raw(&self, x: &BigInt) -> (BigInt, BigInt) {
        let two_pi = &self.pi * 2u32;
        let turns = (x + &self.pi).div_floor(&two_pi);
        let y = x - turns * &two_pi;
        let y2 = self.mul_raw(&y, &y);

        let mut sin = BigInt::zero();
        let mut term = y.clone();
        let mut n = 1u64;
        while !term.is_zero() {
            sin += &term;
            term = -self.mul_raw(&term, &y2) / ((n + 1) * (n + 2));
            n += 2;
        }

        let mut cos = BigInt::zero();
        let mut term = self.scale.clone();
        let mut n = 0u64;
        while !term.is_zero() {
            cos += &term;
            term = -self.mul_raw(&term, &y2) / ((n + 1) * (n + 2));
            n += 2;
        }

        (sin, cos)
    }
}
