//! Sequence analysis - period, balance, autocorrelation and BER checking
//!
//! Tools for verifying PN sequences: measuring the actual cycle length of a
//! generator, counting ones and zeros, periodic autocorrelation in bipolar
//! form, and a checker that compares a received bit stream against a
//! reference generator for BER testing.
//!
//! ## Example
//!
//! ```rust
//! use pnseq_core::analysis::{count_balance, measure_period, PnChecker};
//! use pnseq_core::lfsr::PnSequence;
//!
//! let mut pn = PnSequence::maximal(7, 0, 1).unwrap();
//! assert_eq!(measure_period(&pn), Some(127));
//!
//! let bits = pn.generate_bits(127);
//! assert_eq!(count_balance(&bits), (64, 63));
//!
//! let mut checker = PnChecker::new(PnSequence::maximal(7, 0, 1).unwrap());
//! let (checked, errors) = checker.check(&bits);
//! assert_eq!((checked, errors), (127, 0));
//! ```

use crate::lfsr::PnSequence;

/// Number of steps until the register returns to its current value.
///
/// Returns `None` when the current state is not on a cycle within
/// `2^order` steps, which happens for polynomials without a constant term.
/// Walks up to `2^order` states, so large orders take a while.
pub fn measure_period(pn: &PnSequence) -> Option<u64> {
    let mut probe = *pn;
    let start = probe.register();
    let limit = 1u64 << probe.order();
    for step in 1..=limit {
        probe.next_bit();
        if probe.register() == start {
            return Some(step);
        }
    }
    None
}

/// Count `(ones, zeros)`; any nonzero byte counts as a one.
pub fn count_balance(bits: &[u8]) -> (usize, usize) {
    let ones = bits.iter().filter(|&&b| b != 0).count();
    (ones, bits.len() - ones)
}

/// Periodic autocorrelation of `bits` at `lag`, in bipolar form.
///
/// For one full period of an m-sequence of length N this is N at lag 0 and
/// -1 at every other lag.
pub fn periodic_autocorrelation(bits: &[u8], lag: usize) -> i64 {
    let n = bits.len();
    if n == 0 {
        return 0;
    }
    (0..n)
        .map(|i| {
            let a = bits[i] & 1;
            let b = bits[(i + lag) % n] & 1;
            if a == b {
                1
            } else {
                -1
            }
        })
        .sum()
}

/// PN sequence checker for BER testing.
#[derive(Debug, Clone)]
pub struct PnChecker {
    /// Reference generator producing the expected bits.
    reference: PnSequence,
    /// Total bits checked.
    total_bits: usize,
    /// Total bit errors found.
    total_errors: usize,
    /// Synchronized flag.
    synchronized: bool,
}

impl PnChecker {
    /// Create a checker that expects the output of `reference`.
    pub fn new(reference: PnSequence) -> Self {
        Self {
            reference,
            total_bits: 0,
            total_errors: 0,
            synchronized: false,
        }
    }

    /// Check a block of received bits against the expected sequence.
    ///
    /// Only bit 0 of each byte is compared. Returns (bits_checked, bit_errors).
    pub fn check(&mut self, received: &[u8]) -> (usize, usize) {
        let errors = received
            .iter()
            .zip(&mut self.reference)
            .filter(|(&bit, expected)| bit & 1 != *expected)
            .count();
        self.total_bits += received.len();
        self.total_errors += errors;
        (received.len(), errors)
    }

    /// Align the reference with `data` by trying every phase of one period.
    ///
    /// On a match of more than three quarters of the bits the reference is
    /// left positioned just after `data`, so the next [`check`](Self::check)
    /// continues the stream. Returns the best match count.
    ///
    /// Costs up to `period() * data.len()` steps, about `2^31` phases at
    /// order 31. Use [`synchronize_within`](Self::synchronize_within) when
    /// the offset is known to be small.
    pub fn synchronize(&mut self, data: &[u8]) -> usize {
        let phases = self.reference.period();
        self.synchronize_within(data, phases)
    }

    /// Like [`synchronize`](Self::synchronize), but only tries the first
    /// `max_phases` phases counted from the reference seed.
    pub fn synchronize_within(&mut self, data: &[u8], max_phases: u64) -> usize {
        let mut phase = self.reference;
        phase.reset();

        let mut best_phase = phase;
        let mut best_matches = 0;
        for _ in 0..max_phases.min(phase.period()) {
            let mut candidate = phase;
            let matches = data
                .iter()
                .zip(&mut candidate)
                .filter(|(&bit, expected)| bit & 1 == *expected)
                .count();
            if matches > best_matches {
                best_matches = matches;
                best_phase = phase;
            }
            if best_matches == data.len() {
                break;
            }
            phase.next_bit();
        }

        if best_matches > data.len() * 3 / 4 {
            best_phase.discard(data.len() as u64);
            self.reference = best_phase;
            self.synchronized = true;
        }
        best_matches
    }

    /// Get total bits checked.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Get total bit errors.
    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    /// Get BER (bit error rate).
    pub fn ber(&self) -> f64 {
        if self.total_bits == 0 {
            return 0.0;
        }
        self.total_errors as f64 / self.total_bits as f64
    }

    /// Is synchronized?
    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    /// Rewind the reference and clear the statistics.
    pub fn reset(&mut self) {
        self.reference.reset();
        self.total_bits = 0;
        self.total_errors = 0;
        self.synchronized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(order: u32) -> PnSequence {
        PnSequence::maximal(order, 0, 1).unwrap()
    }

    #[test]
    fn test_measure_period_maximal() {
        for order in 3..=14 {
            assert_eq!(measure_period(&reference(order)), Some((1 << order) - 1));
        }
    }

    #[test]
    fn test_measure_period_leaves_generator() {
        let pn = reference(5);
        let before = pn;
        measure_period(&pn);
        assert_eq!(pn, before);
    }

    #[test]
    fn test_measure_period_non_maximal() {
        // x^4 + x^3 + x^2 + x + 1: x has order 5
        let pn = PnSequence::from_mask(0b11111, 0, 1).unwrap();
        assert_eq!(measure_period(&pn), Some(5));
    }

    #[test]
    fn test_measure_period_transient() {
        // x^3 + x^2 has no constant term: state 0b001 never recurs
        let pn = PnSequence::from_mask(0b1100, 0, 1).unwrap();
        assert_eq!(measure_period(&pn), None);
    }

    #[test]
    fn test_balance() {
        for order in 3..=12 {
            let mut pn = reference(order);
            let bits = pn.generate_bits(pn.period() as usize);
            let half = 1usize << (order - 1);
            assert_eq!(count_balance(&bits), (half, half - 1), "order {order}");
        }
        assert_eq!(count_balance(&[]), (0, 0));
    }

    #[test]
    fn test_autocorrelation_two_valued() {
        let mut pn = reference(6);
        let bits = pn.generate_bits(63);
        assert_eq!(periodic_autocorrelation(&bits, 0), 63);
        for lag in 1..63 {
            assert_eq!(periodic_autocorrelation(&bits, lag), -1, "lag {lag}");
        }
        assert_eq!(periodic_autocorrelation(&[], 3), 0);
    }

    #[test]
    fn test_perfect_check() {
        let bits = reference(7).generate_bits(100);
        let mut checker = PnChecker::new(reference(7));
        assert_eq!(checker.check(&bits), (100, 0));
        assert_eq!(checker.ber(), 0.0);
    }

    #[test]
    fn test_check_with_errors() {
        let mut bits = reference(7).generate_bits(100);
        bits[0] ^= 1;
        bits[10] ^= 1;
        bits[50] ^= 1;
        let mut checker = PnChecker::new(reference(7));
        assert_eq!(checker.check(&bits), (100, 3));
        assert!((checker.ber() - 0.03).abs() < 1e-10);
    }

    #[test]
    fn test_cumulative_stats() {
        let bits = reference(5).generate_bits(62);
        let mut checker = PnChecker::new(reference(5));
        checker.check(&bits[..31]);
        checker.check(&bits[31..]);
        assert_eq!(checker.total_bits(), 62);
        assert_eq!(checker.total_errors(), 0);
    }

    #[test]
    fn test_synchronize_offset() {
        let full = reference(7).generate_bits(200);
        let mut checker = PnChecker::new(reference(7));
        let matches = checker.synchronize(&full[37..87]);
        assert_eq!(matches, 50);
        assert!(checker.is_synchronized());
        assert_eq!(checker.check(&full[87..200]), (113, 0));
    }

    #[test]
    fn test_synchronize_within_bound() {
        let full = reference(7).generate_bits(200);

        let mut checker = PnChecker::new(reference(7));
        checker.synchronize_within(&full[37..87], 37);
        assert!(!checker.is_synchronized());

        let mut checker = PnChecker::new(reference(7));
        assert_eq!(checker.synchronize_within(&full[37..87], 38), 50);
        assert!(checker.is_synchronized());
        assert_eq!(checker.check(&full[87..120]), (33, 0));
    }

    #[test]
    fn test_synchronize_within_large_order() {
        let full = reference(31).generate_bits(300);
        let mut checker = PnChecker::new(reference(31));
        assert_eq!(checker.synchronize_within(&full[200..264], 1024), 64);
        assert_eq!(checker.check(&full[264..300]), (36, 0));
    }

    #[test]
    fn test_synchronize_rejects_mismatch() {
        // Any 8-bit window of the order-3 sequence holds at most 4 zeros
        let mut checker = PnChecker::new(reference(3));
        let matches = checker.synchronize(&[0; 8]);
        assert_eq!(matches, 4);
        assert!(!checker.is_synchronized());
    }

    #[test]
    fn test_reset() {
        let bits = reference(5).generate_bits(10);
        let mut checker = PnChecker::new(reference(5));
        checker.check(&bits);
        checker.reset();
        assert_eq!(checker.total_bits(), 0);
        assert_eq!(checker.total_errors(), 0);
        assert!(!checker.is_synchronized());
        assert_eq!(checker.check(&bits), (10, 0));
    }
}
