//! Integer division of lane vectors by a runtime-invariant divisor.
//!
//! Dividing many integers by the same divisor is common in image processing,
//! hashing, fixed-point arithmetic and columnar kernels, yet SIMD pipelines
//! have no integer division instruction. This crate precomputes a small
//! parameter block per divisor (a magic multiplier plus shift counts, after
//! T. Granlund and P. L. Montgomery, "Division by invariant integers using
//! multiplication", PLDI 1994) and then evaluates each division with a
//! multiply-high, a couple of adds and right shifts.
//!
//! Both truncating (C-style) and flooring (Python/NumPy-style) quotients are
//! supported for all eight integer lane types `u8`..`u64`, `i8`..`i64`.
//!
//! ```
//! use lanediv::{compute_params, int_div, Lanes};
//!
//! let by7 = compute_params(7u8);
//! let q = int_div(Lanes::from_array([0u8, 6, 7, 8, 14, 15, 254, 255]), &by7);
//! assert_eq!(q.to_array(), [0, 0, 1, 1, 2, 2, 36, 36]);
//! ```
//!
//! The parameter block is plain data: derive it once, then share it freely
//! across threads and reuse it for any number of dividends. Division by zero
//! is rejected at derivation time; the evaluation itself cannot fail, and the
//! single degenerate signed input `MIN / -1` wraps to `MIN` instead of
//! trapping.

pub mod divide;
pub mod lanes;
pub mod params;
pub mod slice;
pub mod wide;

pub use divide::{
    divide_by_scalar, floor_divide_by_scalar, int_div, int_div_floor, shift_right_uniform,
};
pub use lanes::{
    native_lane_count, LaneInt, LaneMask, LaneNum, Lanes, SignedLane, UnsignedLane, VECTOR_BYTES,
};
pub use params::{compute_params, DivisorInt, SignedDivisor, UnsignedDivisor};
pub use slice::{divide_slice_by_scalar, floor_divide_slice_by_scalar};
pub use wide::{divide_high_by, divide_high_by_portable};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivideError {
    #[error("divisor must be != 0")]
    Zero,
}
