//! Vector evaluation of precomputed division parameters.

use num_traits::{One, Zero};

use crate::lanes::{LaneInt, LaneNum, Lanes, SignedLane, UnsignedLane};
use crate::params::{compute_params, DivisorInt, SignedDivisor, UnsignedDivisor};

/// 64-bit lanes divide per-lane with the scalar unit on targets whose vector
/// multiply-high for 64-bit elements is emulated more slowly than hardware
/// division.
const SCALAR_DIV64: bool = cfg!(any(
    target_arch = "aarch64",
    target_arch = "powerpc64",
    feature = "scalar-div64",
));

/// Truncating quotient of every lane.
#[inline]
pub fn int_div<T: DivisorInt, const N: usize>(
    dividend: Lanes<T, N>,
    params: &T::Divisor,
) -> Lanes<T, N> {
    T::int_div(dividend, params)
}

/// Flooring quotient of every lane.
#[inline]
pub fn int_div_floor<T: DivisorInt, const N: usize>(
    dividend: Lanes<T, N>,
    params: &T::Divisor,
) -> Lanes<T, N> {
    T::int_div_floor(dividend, params)
}

/// Right-shift every lane by a runtime count, arithmetic for signed lanes
/// and logical for unsigned. Counts `<= 0` leave the vector unchanged;
/// counts `>= BITS` clamp to `BITS - 1`, which keeps the all-sign-bits
/// outcome for signed lanes.
pub fn shift_right_uniform<T: LaneNum, const N: usize>(v: Lanes<T, N>, count: i32) -> Lanes<T, N> {
    if count <= 0 {
        return v;
    }
    let bits = T::BITS as i32;
    let sh = if count >= bits { bits - 1 } else { count };
    let sh = sh as u32;

    // Per-lane variable shifts are native and fast here.
    if cfg!(any(
        target_arch = "aarch64",
        all(target_arch = "x86_64", target_feature = "avx512f")
    )) {
        return v.shift_right_var(sh);
    }
    // AVX2 only has them for 32-bit lanes (vpsravd / vpsrlvd).
    if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) && T::BITS == 32 {
        return v.shift_right_var(sh);
    }

    // Elsewhere, decompose the count into compile-time shifts.
    let mut v = v;
    if T::BITS > 64 && sh & 64 != 0 {
        v = v.shift_right::<64>();
    }
    if T::BITS > 32 && sh & 32 != 0 {
        v = v.shift_right::<32>();
    }
    if T::BITS > 16 && sh & 16 != 0 {
        v = v.shift_right::<16>();
    }
    if T::BITS > 8 && sh & 8 != 0 {
        v = v.shift_right::<8>();
    }
    if sh & 4 != 0 {
        v = v.shift_right::<4>();
    }
    if sh & 2 != 0 {
        v = v.shift_right::<2>();
    }
    if sh & 1 != 0 {
        v = v.shift_right::<1>();
    }
    v
}

/// Store, divide each lane with the scalar unit, reload.
fn scalar_div_lanes<T: LaneInt, const N: usize>(
    dividend: Lanes<T, N>,
    divisor: T,
) -> Lanes<T, N> {
    let mut buf = dividend.to_array();
    for lane in buf.iter_mut() {
        *lane = lane.wrapping_div_lane(divisor);
    }
    Lanes::from_array(buf)
}

impl<T: UnsignedLane> UnsignedDivisor<T> {
    /// Truncating quotient of every lane.
    pub fn int_div<const N: usize>(&self, dividend: Lanes<T, N>) -> Lanes<T, N> {
        if self.is_pow2 {
            return shift_right_uniform(dividend, self.pow2_shift as i32);
        }
        if self.shift1 == 0 && self.shift2 == 0 && self.multiplier == T::Mul::one() {
            return dividend;
        }
        if T::BITS == 64 && SCALAR_DIV64 {
            return scalar_div_lanes(dividend, self.divisor);
        }

        let t1 = if T::BITS <= 16 {
            // Double-width multiplier: promote, multiply, keep the high
            // half, demote.
            let wide = dividend.promote() * Lanes::splat(self.multiplier.into());
            Lanes::<T, N>::demote(shift_right_uniform(wide, T::BITS as i32))
        } else {
            dividend.mulhi(Lanes::splat(T::mul_to_lane(self.multiplier)))
        };
        let t2 = shift_right_uniform(dividend - t1, self.shift1 as i32);
        shift_right_uniform(t1 + t2, self.shift2 as i32)
    }

    /// Flooring equals truncation for unsigned lanes.
    #[inline]
    pub fn int_div_floor<const N: usize>(&self, dividend: Lanes<T, N>) -> Lanes<T, N> {
        self.int_div(dividend)
    }
}

impl<T: SignedLane> SignedDivisor<T> {
    /// Truncating quotient of every lane. `MIN / -1` wraps to `MIN`.
    pub fn int_div<const N: usize>(&self, dividend: Lanes<T, N>) -> Lanes<T, N> {
        let neg_divisor = self.divisor < T::zero();
        if self.is_pow2 {
            // Round toward zero by biasing negative lanes with 2^k - 1.
            // Never forms |lane|, so MIN survives.
            let mask = Lanes::splat(T::low_bits_mask(self.pow2_shift));
            let bias = dividend.sign_bits() & mask;
            let mut q = shift_right_uniform(dividend + bias, self.pow2_shift as i32);
            if neg_divisor {
                q = -q;
            }
            return q;
        }
        if self.shift == 0 && self.multiplier == T::Mul::one() {
            return if neg_divisor { -dividend } else { dividend };
        }
        if T::BITS == 64 && SCALAR_DIV64 {
            return scalar_div_lanes(dividend, self.divisor);
        }

        let mulh = if T::BITS <= 16 {
            let wide = dividend.promote() * Lanes::splat(self.multiplier.into());
            Lanes::<T, N>::demote(shift_right_uniform(wide, T::BITS as i32))
        } else {
            dividend.mulhi(Lanes::splat(T::mul_to_lane(self.multiplier)))
        };
        let mut q0 = dividend + mulh;
        q0 = shift_right_uniform(q0, self.shift as i32);
        // Truncation correction: subtract the dividend's sign.
        q0 = q0 - dividend.sign_bits();
        if neg_divisor {
            let all_ones = Lanes::splat(T::zero().wrapping_sub(&T::one()));
            q0 = (q0 ^ all_ones) - all_ones;
        }
        q0
    }

    /// Flooring quotient of every lane.
    pub fn int_div_floor<const N: usize>(&self, dividend: Lanes<T, N>) -> Lanes<T, N> {
        let q = self.int_div(dividend);
        let divisor = Lanes::splat(self.divisor);
        let zero = Lanes::splat(T::zero());
        // floor = trunc - 1 exactly when the remainder is non-zero and the
        // operands' signs differ. The product uses the wrapping low half.
        let remainder_nonzero = dividend.ne(q * divisor);
        let opposite_signs = dividend.lt(zero) ^ divisor.lt(zero);
        let adjust = (remainder_nonzero & opposite_signs).select(Lanes::splat(T::one()), zero);
        q - adjust
    }
}

/// Derive parameters and divide in one call (truncating).
/// Panics if `divisor == 0`.
pub fn divide_by_scalar<T: DivisorInt, const N: usize>(
    dividend: Lanes<T, N>,
    divisor: T,
) -> Lanes<T, N> {
    assert!(divisor != T::zero(), "lanediv: division by zero");
    if !T::SIGNED && divisor & (divisor - T::one()) == T::zero() {
        return shift_right_uniform(dividend, divisor.trailing_zeros() as i32);
    }
    T::int_div(dividend, &compute_params(divisor))
}

/// Derive parameters and divide in one call (flooring).
/// Panics if `divisor == 0`.
pub fn floor_divide_by_scalar<T: DivisorInt, const N: usize>(
    dividend: Lanes<T, N>,
    divisor: T,
) -> Lanes<T, N> {
    assert!(divisor != T::zero(), "lanediv: division by zero");
    T::int_div_floor(dividend, &compute_params(divisor))
}
