//! Maximal-length feedback polynomials for register orders 3 through 31.
//!
//! Taps follow Xilinx XAPP052 ("Efficient Shift Registers, LFSR Counters,
//! and Long Pseudo-Random Sequence Generators"), with the constant term
//! added for the Fibonacci wiring used by [`PnSequence`](crate::lfsr::PnSequence).
//!
//! ## Example
//!
//! ```rust
//! use pnseq_core::maximal::maximal_length_polynomial;
//!
//! let poly = maximal_length_polynomial(3).unwrap();
//! assert_eq!(poly.mask(), 13); // x^3 + x^2 + 1
//! assert!(maximal_length_polynomial(2).is_none());
//! ```

use crate::polynomial::{taps_mask, Polynomial};

/// Lowest order with a table entry.
pub const MIN_TABLE_ORDER: u32 = 3;

/// Highest order with a table entry.
pub const MAX_TABLE_ORDER: u32 = 31;

/// Indexed by `order - MIN_TABLE_ORDER`.
const MAXIMAL_LENGTH_TABLE: [u32; 29] = [
    taps_mask(&[3, 2, 0]),
    taps_mask(&[4, 3, 0]),
    taps_mask(&[5, 3, 0]),
    taps_mask(&[6, 5, 0]),
    taps_mask(&[7, 6, 0]),
    taps_mask(&[8, 6, 5, 4, 0]),
    taps_mask(&[9, 5, 0]),
    taps_mask(&[10, 7, 0]),
    taps_mask(&[11, 9, 0]),
    taps_mask(&[12, 6, 4, 1, 0]),
    taps_mask(&[13, 4, 3, 1, 0]),
    taps_mask(&[14, 5, 3, 1, 0]),
    taps_mask(&[15, 14, 0]),
    taps_mask(&[16, 15, 13, 4, 0]),
    taps_mask(&[17, 14, 0]),
    taps_mask(&[18, 11, 0]),
    taps_mask(&[19, 6, 2, 1, 0]),
    taps_mask(&[20, 17, 0]),
    taps_mask(&[21, 19, 0]),
    taps_mask(&[22, 21, 0]),
    taps_mask(&[23, 18, 0]),
    taps_mask(&[24, 23, 22, 17, 0]),
    taps_mask(&[25, 22, 0]),
    taps_mask(&[26, 6, 2, 1, 0]),
    taps_mask(&[27, 5, 2, 1, 0]),
    taps_mask(&[28, 25, 0]),
    taps_mask(&[29, 27, 0]),
    taps_mask(&[30, 6, 4, 1, 0]),
    taps_mask(&[31, 28, 0]),
];

/// Known maximal-length polynomial for `order`, or `None` outside 3..=31.
pub fn maximal_length_polynomial(order: u32) -> Option<Polynomial> {
    if !(MIN_TABLE_ORDER..=MAX_TABLE_ORDER).contains(&order) {
        return None;
    }
    let mask = MAXIMAL_LENGTH_TABLE[(order - MIN_TABLE_ORDER) as usize];
    Polynomial::new(mask).ok()
}

/// All table entries as `(order, polynomial)` pairs.
pub fn maximal_length_table() -> impl Iterator<Item = (u32, Polynomial)> {
    (MIN_TABLE_ORDER..=MAX_TABLE_ORDER)
        .filter_map(|order| maximal_length_polynomial(order).map(|poly| (order, poly)))
}
