//! Named mathematical constants.

use num_bigint::BigInt;
use num_traits::Zero;

use super::{MathContext, Real, GUARD_DIGITS};

impl MathContext {
    pub fn pi(&self) -> Real {
        Real(self.pi.clone())
    }

    /// e = sum of 1/k!
    pub fn e(&self) -> Real {
        let mut sum = BigInt::zero();
        let mut term = self.scale.clone();
        let mut k = 1u32;

        while !term.is_zero() {
            sum += &term;
            term /= k;
            k += 1;
        }

        Real(sum)
    }

    /// Golden ratio (1 + sqrt 5) / 2.
    pub fn phi(&self) -> Real {
        let sqrt5 = (&self.scale * &self.scale * 5u32).sqrt();
        Real((&self.scale + sqrt5) / 2u32)
    }

    /// Euler-Mascheroni constant.
    ///
    /// Brent-McMillan: gamma ~ U/V with
    /// V = sum (n^k / k!)^2 and U = sum (n^k / k!)^2 (H_k - ln n).
    /// The error is below pi e^(-4n), so n grows linearly with the precision.
    pub fn euler_gamma(&self) -> Real {
        let working = u64::from(self.digits + GUARD_DIGITS);
        // ln(10) / 4 ~ 0.5757
        let n = (working * 5757).div_ceil(10_000) + 1;
        let n2 = BigInt::from(n * n);

        let ln_n = self.ln_raw(&(BigInt::from(n) * &self.scale));
        let mut a = -ln_n;
        let mut b = self.scale.clone();
        let mut u = a.clone();
        let mut v = b.clone();
        let mut k = 1u64;

        loop {
            b = &b * &n2 / (k * k);
            a = (&a * &n2 / k + &b) / k;
            u += &a;
            v += &b;

            if k > n && a.is_zero() && b.is_zero() {
                break;
            }
            k += 1;
        }

        Real(self.div_raw(&u, &v))
    }

    /// Apery's constant zeta(3) = 5/2 sum (-1)^(k+1) / (k^3 C(2k, k)).
    pub fn zeta3(&self) -> Real {
        // 1 / C(2k, k), starting at k = 1
        let mut inverse_binomial = &self.scale / 2u32;
        let mut sum = BigInt::zero();
        let mut k = 1u64;
        let mut positive = true;

        while !inverse_binomial.is_zero() {
            let term = &inverse_binomial / (k * k * k);
            if positive {
                sum += term;
            } else {
                sum -= term;
            }

            k += 1;
            inverse_binomial = inverse_binomial * k / (2 * (2 * k - 1));
            positive = !positive;
        }

        Real(sum * 5u32 / 2u32)
    }

    /// Natural logarithm of pi.
    pub fn ln_pi(&self) -> Real {
        Real(self.ln_raw(&self.pi))
    }

    /// Machin: pi = 16 atan(1/5) - 4 atan(1/239).
    pub(super) fn machin_pi(&self) -> BigInt {
        self.atan_inverse(5) * 16u32 - self.atan_inverse(239) * 4u32
    }

    /// atan(1/n) = sum (-1)^k / ((2k + 1) n^(2k + 1)).
    fn atan_inverse(&self, n: u32) -> BigInt {
        let n2 = BigInt::from(n) * n;
        let mut power = &self.scale / n;
        let mut sum = BigInt::zero();
        let mut k = 1u32;
        let mut positive = true;

        while !power.is_zero() {
            let term = &power / k;
            if positive {
                sum += term;
            } else {
                sum -= term;
            }
            power /= &n2;
            k += 2;
            positive = !positive;
        }

        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> MathContext {
        MathContext::new(50)
    }

    #[test]
    fn test_pi() {
        let ctx = ctx();
        assert_eq!(
            ctx.significant_digits(&ctx.pi()),
            "31415926535897932384626433832795028841971693993751"
        );
    }

    #[test]
    fn test_e() {
        let ctx = ctx();
        assert_eq!(
            ctx.significant_digits(&ctx.e()),
            "27182818284590452353602874713526624977572470936999"
        );
    }

    #[test]
    fn test_phi() {
        let ctx = ctx();
        assert_eq!(
            ctx.significant_digits(&ctx.phi()),
            "16180339887498948482045868343656381177203091798057"
        );
    }

    #[test]
    fn test_euler_gamma() {
        let ctx = ctx();
        assert_eq!(
            ctx.significant_digits(&ctx.euler_gamma()),
            "57721566490153286060651209008240243104215933593992"
        );
    }

    #[test]
    fn test_zeta3() {
        let ctx = ctx();
        assert_eq!(
            ctx.significant_digits(&ctx.zeta3()),
            "12020569031595942853997381615114499907649862923404"
        );
    }

    #[test]
    fn test_ln_pi() {
        let ctx = ctx();
        assert_eq!(
            ctx.significant_digits(&ctx.ln_pi()),
            "11447298858494001741434273513530587116472948129153"
        );
    }

    #[test]
    fn test_high_precision_pi_prefix() {
        let ctx = MathContext::new(1026);
        let digits = ctx.significant_digits(&ctx.pi());
        assert_eq!(digits.len(), 1026);
        assert!(digits.starts_with("3141592653589793238462643383279502884197"));
        // digits 1000..1010 of pi (counting the leading 3 as the first)
        assert_eq!(&digits[1000..1010], "9380952572");
    }
}
