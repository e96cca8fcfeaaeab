//! PN sequence error types

use thiserror::Error;

/// Result type for polynomial and generator operations
pub type PnResult<T> = Result<T, PnError>;

/// Errors raised while building polynomials or initializing a generator.
///
/// Every variant is a caller contract violation detected synchronously;
/// nothing here is transient and nothing is retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnError {
    /// The zero polynomial has no taps and no order
    #[error("polynomial must be nonzero")]
    ZeroPolynomial,

    /// Register order outside the supported 1..=31 range
    #[error("polynomial order {order} out of range (expected 1..=31)")]
    OrderOutOfRange { order: u32 },

    /// Tap exponent does not fit in a 32-bit mask
    #[error("tap exponent {tap} out of range (expected 0..=31)")]
    TapOutOfRange { tap: u32 },

    /// Polynomials are built from one to five taps
    #[error("expected 1 to 5 taps, got {count}")]
    TapCount { count: usize },

    /// The all-zero register is a fixed point of the LFSR
    #[error("initial value must be nonzero")]
    ZeroInitialValue,

    /// Initial value has no bits inside the register width
    #[error("initial value 0x{initial:08x} is zero within {order} register bits")]
    ZeroRegister { initial: u32, order: u32 },

    /// Polynomial is not primitive over GF(2)
    #[error("polynomial 0x{polynomial:08x} does not generate a maximal-length sequence")]
    NotMaximalLength { polynomial: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(PnError::ZeroPolynomial.to_string(), "polynomial must be nonzero");
        assert_eq!(
            PnError::ZeroRegister { initial: 8, order: 3 }.to_string(),
            "initial value 0x00000008 is zero within 3 register bits"
        );
        assert_eq!(
            PnError::TapCount { count: 6 }.to_string(),
            "expected 1 to 5 taps, got 6"
        );
    }
}
