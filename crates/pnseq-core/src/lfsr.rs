//! PN Sequence - Fibonacci LFSR pseudo-noise generator
//!
//! Generates maximal-length (m-sequence) pseudo-noise bits with an
//! external-XOR shift register. Used for spread-spectrum chipping codes,
//! frame synchronization patterns and BER test patterns.
//!
//! ## Register structure
//!
//! ```text
//!          ┌──── XOR of tapped stages (parity of register & poly) ◄──┐
//!          ▼                                                         │
//! ┌─────────┬─────────┬─────┬─────┐                                  │
//! │ order-1 │ order-2 │ ... │  0  ├──► output bit                    │
//! └────┬────┴────┬────┴─────┴──┬──┘                                  │
//!      └─────────┴─────────────┴─────────────────────────────────────┘
//! ```
//!
//! Each step emits bit 0, shifts the register right by one and writes the
//! feedback parity into bit `order - 1`. For a maximal-length polynomial of
//! order M and a nonzero register, the output repeats every `2^M - 1` bits
//! and one period holds `2^(M-1)` ones and `2^(M-1) - 1` zeros.
//!
//! ## Example
//!
//! ```rust
//! use pnseq_core::lfsr::PnSequence;
//! use pnseq_core::polynomial::Polynomial;
//!
//! // x^3 + x^2 + 1, no shift, register starts at 1
//! let poly = Polynomial::from_taps(&[3, 2, 0]).unwrap();
//! let mut pn = PnSequence::new(poly, 0, 1).unwrap();
//!
//! let mut bits = [0u8; 7];
//! pn.generate(&mut bits);
//! assert_eq!(bits, [1, 0, 0, 1, 1, 1, 0]);
//!
//! pn.reset();
//! assert_eq!(pn.generate_bits(7), bits);
//! ```

use num_complex::Complex64;
use tracing::trace;

use crate::error::{PnError, PnResult};
use crate::maximal::maximal_length_polynomial;
use crate::polynomial::Polynomial;

/// Fibonacci LFSR generator state.
///
/// Plain data with no heap ownership; the value can live on the stack,
/// inside another struct or in caller-provided storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnSequence {
    /// Feedback polynomial.
    polynomial: Polynomial,
    /// Register width, the index of the polynomial's highest bit.
    order: u32,
    /// Current register contents.
    register: u32,
    /// Register value after the initialization shift; restored by `reset`.
    seed: u32,
}

impl PnSequence {
    /// Create a generator.
    ///
    /// - `polynomial`: feedback polynomial; its order sets the register width
    /// - `shift`: steps to advance before the start state is captured
    /// - `initial_value`: raw register value, masked to `order` bits
    ///
    /// Bits of `initial_value` above the register width are discarded.
    /// Fails when `initial_value` is zero, or becomes zero after masking.
    /// See [`new_clamped`](Self::new_clamped) for the variant that accepts
    /// the latter.
    pub fn new(polynomial: Polynomial, shift: u32, initial_value: u32) -> PnResult<Self> {
        if initial_value != 0 && initial_value & polynomial.register_mask() == 0 {
            return Err(PnError::ZeroRegister {
                initial: initial_value,
                order: polynomial.order(),
            });
        }
        Self::new_clamped(polynomial, shift, initial_value)
    }

    /// Create a generator, keeping whatever survives the register mask.
    ///
    /// Only a zero `initial_value` is rejected. A value with no bits inside
    /// the register width leaves the register at 0, a fixed point, and the
    /// generator emits zeros forever. This matches the C ABI contract.
    pub fn new_clamped(polynomial: Polynomial, shift: u32, initial_value: u32) -> PnResult<Self> {
        if initial_value == 0 {
            return Err(PnError::ZeroInitialValue);
        }
        let order = polynomial.order();
        let register = initial_value & polynomial.register_mask();

        let mut pn = Self {
            polynomial,
            order,
            register,
            seed: register,
        };
        for _ in 0..shift {
            pn.advance();
        }
        pn.seed = pn.register;

        trace!(
            polynomial = polynomial.mask(),
            order,
            shift,
            seed = pn.seed,
            "PN generator initialized"
        );
        Ok(pn)
    }

    /// Create a generator from a raw polynomial mask.
    pub fn from_mask(mask: u32, shift: u32, initial_value: u32) -> PnResult<Self> {
        Self::new(Polynomial::new(mask)?, shift, initial_value)
    }

    /// Create a generator with the tabulated maximal-length polynomial.
    pub fn maximal(order: u32, shift: u32, initial_value: u32) -> PnResult<Self> {
        let polynomial =
            maximal_length_polynomial(order).ok_or(PnError::OrderOutOfRange { order })?;
        Self::new(polynomial, shift, initial_value)
    }

    /// Single-bit advance: emit bit 0, shift right, feed parity into the top.
    #[inline]
    fn advance(&mut self) -> u8 {
        let output = (self.register & 1) as u8;
        let feedback = (self.register & self.polynomial.mask()).count_ones() & 1;
        self.register = (self.register >> 1) | (feedback << (self.order - 1));
        output
    }

    /// Generate the next output bit (0 or 1).
    #[inline]
    pub fn next_bit(&mut self) -> u8 {
        self.advance()
    }

    /// Fill `dst` with the next `dst.len()` bits, in order.
    ///
    /// An empty slice leaves the register untouched.
    pub fn generate(&mut self, dst: &mut [u8]) {
        for bit in dst.iter_mut() {
            *bit = self.advance();
        }
    }

    /// Generate N bits.
    pub fn generate_bits(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.advance()).collect()
    }

    /// Generate N bipolar chips: bit 0 → +1.0, bit 1 → -1.0.
    pub fn generate_bipolar(&mut self, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| 1.0 - 2.0 * self.advance() as f64)
            .collect()
    }

    /// Generate N BPSK chips on the in-phase axis.
    pub fn generate_bpsk(&mut self, n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|_| Complex64::new(1.0 - 2.0 * self.advance() as f64, 0.0))
            .collect()
    }

    /// Skip N bits without producing output.
    pub fn discard(&mut self, n: u64) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Return the register to the state captured at initialization.
    pub fn reset(&mut self) {
        self.register = self.seed;
        trace!(seed = self.seed, "PN generator reset");
    }

    /// Feedback polynomial.
    pub fn polynomial(&self) -> Polynomial {
        self.polynomial
    }

    /// Register width in bits.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Current register contents.
    pub fn register(&self) -> u32 {
        self.register
    }

    /// Register value restored by [`reset`](Self::reset).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Nominal maximal-length period (2^order - 1).
    ///
    /// Only the true period when the polynomial is maximal-length; see
    /// [`analysis::measure_period`](crate::analysis::measure_period).
    pub fn period(&self) -> u64 {
        self.polynomial.maximal_period()
    }
}

impl Iterator for PnSequence {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        Some(self.advance())
    }
}
