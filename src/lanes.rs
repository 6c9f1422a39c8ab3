//! Lane-vector vocabulary consumed by the division kernel.
//!
//! `Lanes<T, N>` is a fixed-width vector of integer lanes with the wrapping,
//! element-wise semantics of SIMD registers. The arithmetic is written as
//! plain per-lane loops over arrays so that it compiles on every target and
//! auto-vectorizes on the ones with vector units; nothing in the kernel
//! depends on a particular instruction set.
//!
//! Lane order is unspecified: every output lane depends only on the same
//! input lane, so the compiler is free to process them in any order.

use core::array;
use core::fmt::Debug;
use core::ops::{Add, BitAnd, BitXor, Div, Mul, Neg, Sub};

use num_traits::{PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingShr, WrappingSub};

/// Bytes per vector register assumed for the natural lane count.
pub const VECTOR_BYTES: usize = if cfg!(all(target_arch = "x86_64", target_feature = "avx512f")) {
    64
} else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
    32
} else {
    16
};

/// Lanes per vector for the element type `T` at the target's register width.
pub const fn native_lane_count<T>() -> usize {
    VECTOR_BYTES / core::mem::size_of::<T>()
}

/// An integer usable as a lane element.
pub trait LaneNum:
    PrimInt + WrappingAdd + WrappingSub + WrappingMul + WrappingNeg + WrappingShr + Debug + 'static
{
    const BITS: u32;
    const SIGNED: bool;
}

macro_rules! impl_lane_num {
    ($($t:ty => $signed:expr),* $(,)?) => {$(
        impl LaneNum for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = $signed;
        }
    )*};
}

impl_lane_num!(
    u8 => false, u16 => false, u32 => false, u64 => false, u128 => false,
    i8 => true, i16 => true, i32 => true, i64 => true, i128 => true,
);

/// A lane element the division kernel can divide by: adds the double-width
/// type used for promotion and multiply-high, and the multiplier storage
/// type of the parameter block (double-width for 8/16-bit lanes, same-width
/// for 32/64-bit lanes).
pub trait LaneInt: LaneNum {
    type Wide: LaneNum;
    type Mul: PrimInt + Into<Self::Wide> + Debug;

    /// Zero- or sign-extension to double width, per the lane's signedness.
    fn widen(self) -> Self::Wide;
    /// Truncation back to lane width.
    fn narrow(wide: Self::Wide) -> Self;
    /// The multiplier viewed at lane width (identity for 32/64-bit lanes).
    fn mul_to_lane(m: Self::Mul) -> Self;
    /// `(1 << k) - 1` for `k < BITS`, formed in the unsigned domain so that
    /// `k == BITS - 1` does not overflow signed lanes.
    fn low_bits_mask(k: u32) -> Self;
    /// Truncating division, with `MIN / -1` wrapping to `MIN`.
    fn wrapping_div_lane(self, divisor: Self) -> Self;

    /// High half of the double-width product.
    #[inline]
    fn mulhi(self, other: Self) -> Self {
        let prod = self.widen().wrapping_mul(&other.widen());
        Self::narrow(prod >> (Self::BITS as usize))
    }
}

macro_rules! impl_lane_int {
    ($($t:ty => ($wide:ty, $mul:ty, $un:ty)),* $(,)?) => {$(
        impl LaneInt for $t {
            type Wide = $wide;
            type Mul = $mul;

            #[inline]
            fn widen(self) -> $wide {
                self as $wide
            }

            #[inline]
            fn narrow(wide: $wide) -> $t {
                wide as $t
            }

            #[inline]
            fn mul_to_lane(m: $mul) -> $t {
                m as $t
            }

            #[inline]
            fn low_bits_mask(k: u32) -> $t {
                (((1 as $un) << k) - 1) as $t
            }

            #[inline]
            fn wrapping_div_lane(self, divisor: $t) -> $t {
                self.wrapping_div(divisor)
            }
        }
    )*};
}

impl_lane_int!(
    u8 => (u16, u16, u8),
    u16 => (u32, u32, u16),
    u32 => (u64, u32, u32),
    u64 => (u128, u64, u64),
    i8 => (i16, i16, u8),
    i16 => (i32, i32, u16),
    i32 => (i64, i32, u32),
    i64 => (i128, i64, u64),
);

/// Marker for the unsigned lane types.
pub trait UnsignedLane: LaneInt {}
/// Marker for the signed lane types.
pub trait SignedLane: LaneInt {}

impl UnsignedLane for u8 {}
impl UnsignedLane for u16 {}
impl UnsignedLane for u32 {}
impl UnsignedLane for u64 {}
impl SignedLane for i8 {}
impl SignedLane for i16 {}
impl SignedLane for i32 {}
impl SignedLane for i64 {}

/// A vector of `N` integer lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lanes<T, const N: usize>(pub(crate) [T; N]);

impl<T: LaneNum, const N: usize> Lanes<T, N> {
    /// Broadcast one value into every lane.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline]
    pub fn from_array(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    /// Load from the first `N` elements of `slice`.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut lanes = [T::zero(); N];
        lanes.copy_from_slice(&slice[..N]);
        Self(lanes)
    }

    /// Store all `N` lanes into the first `N` elements of `out`.
    #[inline]
    pub fn write_to_slice(self, out: &mut [T]) {
        out[..N].copy_from_slice(&self.0);
    }

    /// Load up to `N` elements; missing tail lanes are zero.
    #[inline]
    pub fn load_partial(slice: &[T]) -> Self {
        let n = slice.len().min(N);
        let mut lanes = [T::zero(); N];
        lanes[..n].copy_from_slice(&slice[..n]);
        Self(lanes)
    }

    /// Store up to `N` lanes, bounded by the length of `out`.
    #[inline]
    pub fn store_partial(self, out: &mut [T]) {
        let n = out.len().min(N);
        out[..n].copy_from_slice(&self.0[..n]);
    }

    /// Right shift every lane by the compile-time count `K`, taken modulo
    /// the lane width. Arithmetic for signed lanes, logical for unsigned.
    #[inline]
    pub fn shift_right<const K: u32>(self) -> Self {
        self.map(|x| x.wrapping_shr(K))
    }

    /// Per-lane right shift by a runtime count. Callers must keep
    /// `count < BITS`; use [`crate::shift_right_uniform`] for clamping.
    #[inline]
    pub fn shift_right_var(self, count: u32) -> Self {
        debug_assert!(count < T::BITS);
        self.map(|x| x >> (count as usize))
    }

    /// The sign bit of each lane broadcast across the lane: all ones for
    /// negative lanes of a signed type, zero otherwise.
    #[inline]
    pub fn sign_bits(self) -> Self {
        self.map(|x| x >> ((T::BITS - 1) as usize))
    }

    /// Lane-wise `!=`.
    #[inline]
    pub fn ne(self, other: Self) -> LaneMask<N> {
        LaneMask(array::from_fn(|i| self.0[i] != other.0[i]))
    }

    /// Lane-wise `<`.
    #[inline]
    pub fn lt(self, other: Self) -> LaneMask<N> {
        LaneMask(array::from_fn(|i| self.0[i] < other.0[i]))
    }

    #[inline]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.map(f))
    }

    #[inline]
    fn zip(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        Self(array::from_fn(|i| f(self.0[i], other.0[i])))
    }
}

impl<T: LaneInt, const N: usize> Lanes<T, N> {
    /// Widen every lane to the double-width element type.
    #[inline]
    pub fn promote(self) -> Lanes<T::Wide, N> {
        Lanes(self.0.map(T::widen))
    }

    /// Truncate double-width lanes back to lane width.
    #[inline]
    pub fn demote(wide: Lanes<T::Wide, N>) -> Self {
        Lanes(wide.0.map(T::narrow))
    }

    /// Lane-wise high half of the double-width product.
    #[inline]
    pub fn mulhi(self, other: Self) -> Self {
        self.zip(other, T::mulhi)
    }
}

impl<T: LaneNum, const N: usize> Add for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a.wrapping_add(&b))
    }
}

impl<T: LaneNum, const N: usize> Sub for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a.wrapping_sub(&b))
    }
}

/// Low half of the lane product (wrapping).
impl<T: LaneNum, const N: usize> Mul for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a.wrapping_mul(&b))
    }
}

impl<T: LaneNum, const N: usize> Neg for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|x| x.wrapping_neg())
    }
}

impl<T: LaneNum, const N: usize> BitXor for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl<T: LaneNum, const N: usize> BitAnd for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

/// Truncating division by a precomputed unsigned divisor.
impl<T: UnsignedLane, const N: usize> Div<&crate::params::UnsignedDivisor<T>> for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn div(self, params: &crate::params::UnsignedDivisor<T>) -> Self {
        params.int_div(self)
    }
}

/// Truncating division by a precomputed signed divisor.
impl<T: SignedLane, const N: usize> Div<&crate::params::SignedDivisor<T>> for Lanes<T, N> {
    type Output = Self;

    #[inline]
    fn div(self, params: &crate::params::SignedDivisor<T>) -> Self {
        params.int_div(self)
    }
}

/// The boolean result of a lane comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneMask<const N: usize>([bool; N]);

impl<const N: usize> LaneMask<N> {
    #[inline]
    pub fn splat(value: bool) -> Self {
        Self([value; N])
    }

    pub fn to_array(self) -> [bool; N] {
        self.0
    }

    /// Pick `yes` lanes where the mask is set, `no` lanes elsewhere.
    #[inline]
    pub fn select<T: LaneNum>(self, yes: Lanes<T, N>, no: Lanes<T, N>) -> Lanes<T, N> {
        Lanes(array::from_fn(|i| if self.0[i] { yes.0[i] } else { no.0[i] }))
    }
}

impl<const N: usize> BitAnd for LaneMask<N> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] & rhs.0[i]))
    }
}

impl<const N: usize> BitXor for LaneMask<N> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] ^ rhs.0[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mulhi_matches_wide_product() {
        assert_eq!(0x8000_0000u32.mulhi(2), 1);
        assert_eq!(u32::MAX.mulhi(u32::MAX), u32::MAX - 1);
        assert_eq!(u64::MAX.mulhi(u64::MAX), u64::MAX - 1);
        assert_eq!((-1i32).mulhi(i32::MAX), -1);
        assert_eq!(i64::MIN.mulhi(-1), 0);
        assert_eq!(200u8.mulhi(72), 56);
    }

    #[test]
    fn promote_demote_round_trip() {
        let v = Lanes::from_array([-2i8, -1, 0, 1]);
        let wide = v.promote();
        assert_eq!(wide.to_array(), [-2i16, -1, 0, 1]);
        assert_eq!(Lanes::<i8, 4>::demote(wide), v);
    }

    #[test]
    fn sign_bits_broadcasts() {
        let v = Lanes::from_array([-5i16, 0, 5, i16::MIN]);
        assert_eq!(v.sign_bits().to_array(), [-1, 0, 0, -1]);
    }

    #[test]
    fn partial_load_zero_fills() {
        let v = Lanes::<u32, 4>::load_partial(&[7, 8]);
        assert_eq!(v.to_array(), [7, 8, 0, 0]);

        let mut out = [1u32; 3];
        Lanes::from_array([9u32, 10, 11, 12]).store_partial(&mut out);
        assert_eq!(out, [9, 10, 11]);
    }

    #[test]
    fn mask_select_is_lane_wise() {
        let a = Lanes::from_array([1u8, 2, 3, 4]);
        let b = Lanes::from_array([5u8, 2, 7, 4]);
        let picked = a.ne(b).select(Lanes::splat(1), Lanes::splat(0));
        assert_eq!(picked.to_array(), [1, 0, 1, 0]);
    }

    #[test]
    fn low_bits_mask_survives_top_shift() {
        assert_eq!(i8::low_bits_mask(7), 0x7f);
        assert_eq!(i64::low_bits_mask(63), i64::MAX);
        assert_eq!(u16::low_bits_mask(3), 7);
    }
}
