//! Generate one full period of the order-3 m-sequence and print it.
//!
//! Run with: cargo run -p pnseq-core --example full_sequence

use pnseq_core::logging::{init_logging, LogConfig, LogLevel};
use pnseq_core::prelude::*;

fn main() -> Result<(), PnError> {
    init_logging(&LogConfig {
        level: LogLevel::Trace,
        ..Default::default()
    });

    // x^3 + x^2 + 1, no shift, initial state 0x0001
    let poly = Polynomial::from_taps(&[3, 2, 0])?;
    let mut pn = PnSequence::new(poly, 0, 1)?;

    let mut bits = [0u8; 7];
    pn.generate(&mut bits);

    println!("{} ({} bits):", poly, bits.len());
    for bit in bits {
        print!("{}", bit);
    }
    println!();
    Ok(())
}
