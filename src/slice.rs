//! Whole-slice division: derive once, stride at the natural lane count,
//! finish the tail with partial loads and stores.

use num_traits::Zero;

use crate::lanes::Lanes;
use crate::params::{compute_params, DivisorInt};

/// Divide every element of `data` by `divisor`, truncating.
/// Panics if `divisor == 0`.
pub fn divide_slice_by_scalar<T: DivisorInt>(data: &mut [T], divisor: T) {
    assert!(divisor != T::zero(), "lanediv: division by zero");
    let params = compute_params(divisor);
    T::divide_slice(data, &params);
}

/// Divide every element of `data` by `divisor`, flooring.
/// Panics if `divisor == 0`.
pub fn floor_divide_slice_by_scalar<T: DivisorInt>(data: &mut [T], divisor: T) {
    assert!(divisor != T::zero(), "lanediv: division by zero");
    let params = compute_params(divisor);
    T::floor_divide_slice(data, &params);
}

/// Run `op` over `data` one vector at a time. The tail shorter than a
/// vector goes through a zero-filled partial load; the zero lanes divide to
/// zero and are not stored back.
pub(crate) fn for_each_vector<T: DivisorInt, const N: usize>(
    data: &mut [T],
    params: &T::Divisor,
    op: fn(Lanes<T, N>, &T::Divisor) -> Lanes<T, N>,
) {
    let mut chunks = data.chunks_exact_mut(N);
    for chunk in &mut chunks {
        op(Lanes::from_slice(chunk), params).write_to_slice(chunk);
    }
    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        op(Lanes::load_partial(tail), params).store_partial(tail);
    }
}
