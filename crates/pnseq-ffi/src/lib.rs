//! # pnseq FFI - C Bindings for PN Sequence Generation
//!
//! C-compatible API over `pnseq-core`. The library never allocates: the
//! caller queries the state size, provides storage of at least that many
//! bytes, and frees it when done.
//!
//! ## Building
//!
//! ```bash
//! cargo build --release -p pnseq-ffi
//! ```
//!
//! This generates `libpnseq.so` / `libpnseq.a`; declarations are in
//! `crates/pnseq-ffi/include/pnseq.h`.
//!
//! ## Usage from C
//!
//! ```c
//! #include <pnseq.h>
//!
//! int main() {
//!     int32_t size = 0;
//!     pnseq_get_state_size(&size);
//!     uint8_t *storage = malloc(size);
//!
//!     // x^3 + x^2 + 1
//!     uint32_t taps[] = {3, 2, 0};
//!     uint32_t poly = pnseq_get_poly(taps, 3);
//!
//!     PnSequenceState *state;
//!     pnseq_init(&state, poly, 0, 1, storage);
//!
//!     uint8_t bits[7];
//!     pnseq_generate(state, bits, 7);
//!
//!     free(storage);
//! }
//! ```

use std::ffi::{c_char, c_int};
use std::mem;
use std::ptr;
use std::slice;

use pnseq_core::{build_mask, maximal_length_polynomial, PnSequence, Polynomial};

// =============================================================================
// Types
// =============================================================================

/// Status codes returned by pnseq functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnStatus {
    /// Success
    Ok = 0,
    /// Null pointer, zero polynomial or seed, negative count, bad alignment
    InvalidArgument = -1,
}

/// Generator state placed in caller-provided storage.
///
/// Opaque to C; only handled through pointers returned by [`pnseq_init`].
pub struct PnSequenceState {
    inner: PnSequence,
}

// =============================================================================
// Version
// =============================================================================

/// Get pnseq library version string
///
/// Returns a null-terminated string like "0.1.0"
#[no_mangle]
pub extern "C" fn pnseq_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

// =============================================================================
// Polynomials
// =============================================================================

/// Build a polynomial mask from `count` tap exponents.
///
/// The result is the plain OR of `1 << tap`, so `{0}` gives 1. Returns 0
/// when `taps` is null, `count` is not 1..=5, or an exponent exceeds 31.
///
/// # Safety
/// `taps` must point to at least `count` values
#[no_mangle]
pub unsafe extern "C" fn pnseq_get_poly(taps: *const u32, count: usize) -> u32 {
    if taps.is_null() {
        return 0;
    }
    let taps = slice::from_raw_parts(taps, count);
    build_mask(taps).unwrap_or(0)
}

/// Maximal-length polynomial for `order` in 3..=31, or 0 for any other order.
#[no_mangle]
pub extern "C" fn pnseq_get_ml_poly(order: u32) -> u32 {
    maximal_length_polynomial(order).map(|p| p.mask()).unwrap_or(0)
}

// =============================================================================
// Generator
// =============================================================================

/// Write the number of bytes of storage [`pnseq_init`] needs.
///
/// # Safety
/// `size` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn pnseq_get_state_size(size: *mut i32) -> PnStatus {
    if size.is_null() {
        return PnStatus::InvalidArgument;
    }
    *size = mem::size_of::<PnSequenceState>() as i32;
    PnStatus::Ok
}

/// Initialize a generator inside `buffer` and store its handle in `state`.
///
/// `initial_state` is masked to the register width, then the register is
/// advanced `shift` steps; the result is what [`pnseq_reset`] restores.
/// An initial state with no bits inside the register width is accepted and
/// yields the all-zero sequence. Fails on null pointers, a polynomial of 0
/// or 1, an initial state of 0, or a buffer not aligned to 4 bytes.
///
/// # Safety
/// `buffer` must be valid for writes of [`pnseq_get_state_size`] bytes and
/// outlive every use of the returned handle
#[no_mangle]
pub unsafe extern "C" fn pnseq_init(
    state: *mut *mut PnSequenceState,
    polynomial: u32,
    shift: u32,
    initial_state: u32,
    buffer: *mut u8,
) -> PnStatus {
    if state.is_null() || buffer.is_null() {
        return PnStatus::InvalidArgument;
    }
    if (buffer as usize) % mem::align_of::<PnSequenceState>() != 0 {
        return PnStatus::InvalidArgument;
    }

    let inner = match Polynomial::new(polynomial)
        .and_then(|poly| PnSequence::new_clamped(poly, shift, initial_state))
    {
        Ok(pn) => pn,
        Err(_) => return PnStatus::InvalidArgument,
    };

    let handle = buffer as *mut PnSequenceState;
    ptr::write(handle, PnSequenceState { inner });
    *state = handle;
    PnStatus::Ok
}

/// Return the generator to its post-shift initial state.
///
/// # Safety
/// `state` must be null or a handle returned by [`pnseq_init`]
#[no_mangle]
pub unsafe extern "C" fn pnseq_reset(state: *mut PnSequenceState) -> PnStatus {
    if state.is_null() {
        return PnStatus::InvalidArgument;
    }
    (*state).inner.reset();
    PnStatus::Ok
}

/// Generate `n` bits into `dst`, one byte (0 or 1) per bit.
///
/// # Safety
/// `state` must be a handle returned by [`pnseq_init`]; `dst` must point to
/// at least `n` writable bytes
#[no_mangle]
pub unsafe extern "C" fn pnseq_generate(
    state: *mut PnSequenceState,
    dst: *mut u8,
    n: c_int,
) -> PnStatus {
    if state.is_null() || dst.is_null() || n < 0 {
        return PnStatus::InvalidArgument;
    }
    if n == 0 {
        return PnStatus::Ok;
    }
    let out = slice::from_raw_parts_mut(dst, n as usize);
    (*state).inner.generate(out);
    PnStatus::Ok
}
