//! # PN Sequence Core Library
//!
//! Maximal-length pseudo-noise (PN) bit sequences from a Fibonacci
//! linear-feedback shift register, for spread-spectrum chipping codes,
//! synchronization patterns and test-pattern generation.
//!
//! ## Overview
//!
//! - **Polynomials**: build feedback polynomials from tap exponents, test
//!   them for primitivity over GF(2)
//! - **Maximal-length table**: known-good polynomials for orders 3 to 31
//! - **Generator**: [`PnSequence`] with initialization phase shift, reset
//!   and bit generation
//! - **Analysis**: period measurement, balance, autocorrelation, BER checking
//!
//! ## Signal Flow
//!
//! ```text
//! taps / order → Polynomial → PnSequence::new(poly, shift, seed) → generate → bits
//!                                      ▲                              │
//!                                      └──────────── reset ───────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pnseq_core::prelude::*;
//!
//! let poly = maximal_length_polynomial(10).unwrap();
//! let mut pn = PnSequence::new(poly, 0, 1).unwrap();
//!
//! let period = pn.period() as usize;
//! let bits = pn.generate_bits(2 * period);
//! assert_eq!(&bits[..period], &bits[period..]);
//! ```
//!
//! A generator is plain data and assumes exclusive access; wrap it in a
//! lock to share one across threads.

pub mod analysis;
pub mod config;
pub mod error;
pub mod lfsr;
pub mod logging;
pub mod maximal;
pub mod polynomial;

pub use analysis::PnChecker;
pub use config::{ConfigError, PnConfig};
pub use error::{PnError, PnResult};
pub use lfsr::PnSequence;
pub use maximal::maximal_length_polynomial;
pub use polynomial::{build_mask, Polynomial};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PnError, PnResult};
    pub use crate::lfsr::PnSequence;
    pub use crate::maximal::maximal_length_polynomial;
    pub use crate::polynomial::Polynomial;
}
