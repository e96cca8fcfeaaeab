//! Feedback polynomials for Fibonacci LFSRs
//!
//! A polynomial over GF(2) is stored as a 32-bit mask where bit `i` is the
//! coefficient of x^i. The order (degree) is the index of the highest set
//! bit and equals the width of the shift register it drives.
//!
//! ```text
//! x^3 + x^2 + 1  →  0b1101 = 13
//!   │     │   └── bit 0 (constant term, feedback into the output stage)
//!   │     └────── bit 2
//!   └──────────── bit 3 (order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pnseq_core::polynomial::Polynomial;
//!
//! let poly = Polynomial::from_taps(&[3, 2, 0]).unwrap();
//! assert_eq!(poly.mask(), 13);
//! assert_eq!(poly.order(), 3);
//! assert_eq!(poly.to_string(), "x^3 + x^2 + 1");
//! assert!(poly.is_maximal_length());
//! ```

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{PnError, PnResult};

/// Most taps accepted by [`Polynomial::from_taps`].
pub const MAX_TAPS: usize = 5;

/// Highest supported register order.
pub const MAX_ORDER: u32 = 31;

/// OR together `1 << tap` for every tap.
///
/// Usable in constant context; callers guarantee every tap is at most 31.
pub(crate) const fn taps_mask(taps: &[u32]) -> u32 {
    let mut mask = 0u32;
    let mut i = 0;
    while i < taps.len() {
        mask |= 1 << taps[i];
        i += 1;
    }
    mask
}

/// OR together one bit per tap exponent.
///
/// Checks only the tap count (1..=5) and that every exponent fits in 32
/// bits, so `[0]` gives `1` even though that mask has no register.
/// [`Polynomial::from_taps`] adds the order check on top.
pub fn build_mask(taps: &[u32]) -> PnResult<u32> {
    if taps.is_empty() || taps.len() > MAX_TAPS {
        return Err(PnError::TapCount { count: taps.len() });
    }
    if let Some(&tap) = taps.iter().find(|&&t| t > MAX_ORDER) {
        return Err(PnError::TapOutOfRange { tap });
    }
    Ok(taps_mask(taps))
}

/// Binary feedback polynomial of order 1..=31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Polynomial(NonZeroU32);

impl Polynomial {
    /// Wrap a raw mask.
    ///
    /// Fails for the zero mask and for `1` (order 0, no register bits).
    pub fn new(mask: u32) -> PnResult<Self> {
        let mask = NonZeroU32::new(mask).ok_or(PnError::ZeroPolynomial)?;
        if mask.get() == 1 {
            return Err(PnError::OrderOutOfRange { order: 0 });
        }
        Ok(Self(mask))
    }

    /// Build a polynomial from 1 to 5 tap exponents.
    ///
    /// The mask is the bitwise OR of `1 << tap`; repeated exponents
    /// collapse into one term. Exponents above 31 are rejected.
    pub fn from_taps(taps: &[u32]) -> PnResult<Self> {
        Self::new(build_mask(taps)?)
    }

    /// Raw bitmask.
    #[inline]
    pub fn mask(&self) -> u32 {
        self.0.get()
    }

    /// Degree of the polynomial, which is also the register width.
    #[inline]
    pub fn order(&self) -> u32 {
        31 - self.0.leading_zeros()
    }

    /// Mask covering the low `order` bits.
    #[inline]
    pub fn register_mask(&self) -> u32 {
        (1u32 << self.order()) - 1
    }

    /// Tap exponents, highest first.
    pub fn taps(&self) -> Vec<u32> {
        (0..=self.order())
            .rev()
            .filter(|&bit| self.mask() & (1 << bit) != 0)
            .collect()
    }

    /// Nominal period of a maximal-length sequence of this order.
    pub fn maximal_period(&self) -> u64 {
        (1u64 << self.order()) - 1
    }

    /// Whether the polynomial is primitive over GF(2).
    ///
    /// The feedback recurrence of the Fibonacci register has exactly this
    /// polynomial as its characteristic polynomial, so primitivity is
    /// equivalent to the register cycling through all `2^order - 1`
    /// nonzero states.
    ///
    /// `x` must have multiplicative order exactly `2^n - 1` modulo the
    /// polynomial: `x^(2^n-1) = 1` and `x^((2^n-1)/q) != 1` for every prime
    /// `q` dividing `2^n - 1`.
    pub fn is_maximal_length(&self) -> bool {
        if self.mask() & 1 == 0 {
            return false;
        }
        let field = Gf2Modulus::new(self.mask() as u64, self.order());
        let period = self.maximal_period();
        if field.pow_x(period) != 1 {
            return false;
        }
        prime_factors(period)
            .into_iter()
            .all(|q| field.pow_x(period / q) != 1)
    }
}

impl TryFrom<u32> for Polynomial {
    type Error = PnError;

    fn try_from(mask: u32) -> PnResult<Self> {
        Self::new(mask)
    }
}

impl From<Polynomial> for u32 {
    fn from(poly: Polynomial) -> u32 {
        poly.mask()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .taps()
            .into_iter()
            .map(|tap| match tap {
                0 => "1".to_string(),
                1 => "x".to_string(),
                n => format!("x^{}", n),
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}

/// Arithmetic in GF(2)[x] modulo a polynomial of degree `order`.
struct Gf2Modulus {
    modulus: u64,
    top: u64,
}

impl Gf2Modulus {
    fn new(modulus: u64, order: u32) -> Self {
        Self {
            modulus,
            top: 1u64 << order,
        }
    }

    #[inline]
    fn reduce(&self, v: u64) -> u64 {
        if v & self.top != 0 {
            v ^ self.modulus
        } else {
            v
        }
    }

    /// Carryless `a * b mod m`; both inputs already reduced.
    fn mul(&self, mut a: u64, mut b: u64) -> u64 {
        let mut result = 0;
        while b != 0 {
            if b & 1 != 0 {
                result ^= a;
            }
            b >>= 1;
            a = self.reduce(a << 1);
        }
        result
    }

    /// `x^exp mod m`.
    fn pow_x(&self, mut exp: u64) -> u64 {
        let mut result = 1u64;
        let mut base = self.reduce(2);
        while exp > 0 {
            if exp & 1 != 0 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }
        result
    }
}

/// Distinct prime factors by trial division. `n < 2^31` here.
fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_taps_mask() {
        assert_eq!(Polynomial::from_taps(&[3, 2, 0]).unwrap().mask(), 13);
        assert_eq!(
            Polynomial::from_taps(&[16, 15, 13, 4, 0]).unwrap().mask(),
            (1 << 16) | (1 << 15) | (1 << 13) | (1 << 4) | 1
        );
    }

    #[test]
    fn test_build_mask_single_tap() {
        assert_eq!(build_mask(&[0]), Ok(1));
        assert_eq!(build_mask(&[5]), Ok(32));
        assert_eq!(build_mask(&[31]), Ok(0x8000_0000));
        assert_eq!(build_mask(&[]), Err(PnError::TapCount { count: 0 }));
        assert_eq!(build_mask(&[1, 32]), Err(PnError::TapOutOfRange { tap: 32 }));
        // a valid mask, but not a usable register
        assert_eq!(
            Polynomial::from_taps(&[0]),
            Err(PnError::OrderOutOfRange { order: 0 })
        );
    }

    #[test]
    fn test_two_taps_is_sum() {
        for a in 0..32u32 {
            for b in 0..32u32 {
                if a == b {
                    continue;
                }
                let expected = (1u64 << a) + (1u64 << b);
                let poly = Polynomial::from_taps(&[a, b]).unwrap();
                assert_eq!(poly.mask() as u64, expected, "taps ({a}, {b})");
            }
        }
    }

    #[test]
    fn test_single_tap() {
        let poly = Polynomial::from_taps(&[31]).unwrap();
        assert_eq!(poly.mask(), 1 << 31);
        assert_eq!(poly.order(), 31);
    }

    #[test]
    fn test_duplicate_taps_collapse() {
        let poly = Polynomial::from_taps(&[3, 3, 0]).unwrap();
        assert_eq!(poly.mask(), 0b1001);
    }

    #[test]
    fn test_tap_validation() {
        assert_eq!(Polynomial::from_taps(&[]), Err(PnError::TapCount { count: 0 }));
        assert_eq!(
            Polynomial::from_taps(&[6, 5, 4, 3, 2, 1]),
            Err(PnError::TapCount { count: 6 })
        );
        assert_eq!(
            Polynomial::from_taps(&[32, 0]),
            Err(PnError::TapOutOfRange { tap: 32 })
        );
        assert_eq!(
            Polynomial::from_taps(&[0]),
            Err(PnError::OrderOutOfRange { order: 0 })
        );
    }

    #[test]
    fn test_new_rejects_degenerate_masks() {
        assert_eq!(Polynomial::new(0), Err(PnError::ZeroPolynomial));
        assert_eq!(Polynomial::new(1), Err(PnError::OrderOutOfRange { order: 0 }));
        assert_eq!(Polynomial::new(2).unwrap().order(), 1);
    }

    #[test]
    fn test_order_and_register_mask() {
        let poly = Polynomial::new(13).unwrap();
        assert_eq!(poly.order(), 3);
        assert_eq!(poly.register_mask(), 0b111);
        assert_eq!(poly.maximal_period(), 7);

        let poly = Polynomial::new(0x9000_0001).unwrap();
        assert_eq!(poly.order(), 31);
        assert_eq!(poly.register_mask(), 0x7FFF_FFFF);
    }

    #[test]
    fn test_taps_listing() {
        let poly = Polynomial::new(13).unwrap();
        assert_eq!(poly.taps(), vec![3, 2, 0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Polynomial::new(13).unwrap().to_string(), "x^3 + x^2 + 1");
        assert_eq!(Polynomial::new(0b1011).unwrap().to_string(), "x^3 + x + 1");
        assert_eq!(Polynomial::new(0b100).unwrap().to_string(), "x^2");
    }

    #[test]
    fn test_primitive_small() {
        // x^2 + x + 1, x^3 + x + 1, x^3 + x^2 + 1, x^4 + x + 1
        for mask in [0b111, 0b1011, 0b1101, 0b10011] {
            assert!(Polynomial::new(mask).unwrap().is_maximal_length(), "{mask:#b}");
        }
    }

    #[test]
    fn test_not_primitive() {
        // x^4 + x^2 + 1 is reducible; x^4 + x^3 + x^2 + x + 1 is irreducible
        // but x has order 5; x^3 + x^2 lacks the constant term.
        for mask in [0b10101, 0b11111, 0b1100, 0b1001] {
            assert!(!Polynomial::new(mask).unwrap().is_maximal_length(), "{mask:#b}");
        }
    }

    #[test]
    fn test_order_one() {
        assert!(Polynomial::new(0b11).unwrap().is_maximal_length());
        assert!(!Polynomial::new(0b10).unwrap().is_maximal_length());
    }

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(7), vec![7]);
        assert_eq!(prime_factors(15), vec![3, 5]);
        assert_eq!(prime_factors(63), vec![3, 7]);
        assert_eq!(prime_factors((1 << 31) - 1), vec![(1 << 31) - 1]);
    }

    #[test]
    fn test_serde_as_integer() {
        let poly: Polynomial = serde_yaml::from_str("13").unwrap();
        assert_eq!(poly.mask(), 13);
        assert_eq!(serde_yaml::to_string(&poly).unwrap().trim(), "13");
        assert!(serde_yaml::from_str::<Polynomial>("0").is_err());
    }
}
