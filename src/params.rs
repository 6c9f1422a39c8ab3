//! Divisor parameter derivation.
//!
//! `compute_params` turns a non-zero divisor into a small read-only block of
//! multiply-and-shift parameters that every later division reuses. Four arms
//! per integer type: reject zero, shift-only parameters for power-of-two
//! magnitudes (which also covers ±1), a fixed boundary tuple for the signed
//! minimum, and the general magic-multiplier construction.

use num_integer::Integer;
use num_traits::Zero;

use crate::lanes::{LaneInt, Lanes, SignedLane, UnsignedLane};
use crate::wide::divide_high_by;
use crate::DivideError;

/// Parameters for dividing unsigned lanes by one fixed divisor.
///
/// `multiplier` is held at double width for 8/16-bit lanes and at lane width
/// for 32/64-bit lanes. When `is_pow2` is set only `pow2_shift` matters.
/// The divisor itself is preserved for the scalar fallback path.
#[derive(Clone, Copy, Debug)]
pub struct UnsignedDivisor<T: LaneInt> {
    pub(crate) multiplier: T::Mul,
    pub(crate) shift1: u32,
    pub(crate) shift2: u32,
    pub(crate) is_pow2: bool,
    pub(crate) pow2_shift: u32,
    pub(crate) divisor: T,
}

/// Parameters for dividing signed lanes by one fixed divisor.
///
/// `multiplier` holds the magic reduced modulo `2^W` and interpreted as
/// W-bit signed (sign-extended into the double-width storage for 8/16-bit
/// lanes); it is negative for every general divisor. `is_pow2`/`pow2_shift`
/// are computed on the divisor's magnitude, and the divisor is preserved for
/// the floor correction and final negation.
#[derive(Clone, Copy, Debug)]
pub struct SignedDivisor<T: LaneInt> {
    pub(crate) multiplier: T::Mul,
    pub(crate) shift: u32,
    pub(crate) is_pow2: bool,
    pub(crate) pow2_shift: u32,
    pub(crate) divisor: T,
}

impl<T> UnsignedDivisor<T>
where
    T: UnsignedLane + DivisorInt<Divisor = UnsignedDivisor<T>>,
{
    /// Derive parameters. Panics if `divisor == 0`.
    pub fn new(divisor: T) -> Self {
        compute_params(divisor)
    }

    pub fn try_new(divisor: T) -> Result<Self, DivideError> {
        divisor.try_params()
    }

    /// The original divisor.
    pub fn divisor(&self) -> T {
        self.divisor
    }
}

impl<T> SignedDivisor<T>
where
    T: SignedLane + DivisorInt<Divisor = SignedDivisor<T>>,
{
    /// Derive parameters. Panics if `divisor == 0`.
    pub fn new(divisor: T) -> Self {
        compute_params(divisor)
    }

    pub fn try_new(divisor: T) -> Result<Self, DivideError> {
        divisor.try_params()
    }

    /// The original divisor.
    pub fn divisor(&self) -> T {
        self.divisor
    }
}

/// A lane type with a divisor parameterization: ties each integer type to
/// its parameter block and to the division entry points.
pub trait DivisorInt: LaneInt {
    type Divisor: Copy + core::fmt::Debug;

    fn try_params(self) -> Result<Self::Divisor, DivideError>;

    /// Truncating quotient of every lane.
    fn int_div<const N: usize>(dividend: Lanes<Self, N>, params: &Self::Divisor)
        -> Lanes<Self, N>;

    /// Flooring quotient of every lane.
    fn int_div_floor<const N: usize>(
        dividend: Lanes<Self, N>,
        params: &Self::Divisor,
    ) -> Lanes<Self, N>;

    fn divide_slice(data: &mut [Self], params: &Self::Divisor);
    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor);
}

/// Derive division parameters for `divisor`. Panics if `divisor == 0`;
/// use [`DivisorInt::try_params`] to filter instead.
pub fn compute_params<T: DivisorInt>(divisor: T) -> T::Divisor {
    assert!(divisor != T::zero(), "lanediv: division by zero");
    match divisor.try_params() {
        Ok(params) => params,
        Err(DivideError::Zero) => unreachable!(),
    }
}

impl DivisorInt for u8 {
    type Divisor = UnsignedDivisor<u8>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        if d & (d - 1) == 0 {
            return Ok(UnsignedDivisor {
                multiplier: 1,
                shift1: 0,
                shift2: 0,
                is_pow2: true,
                pow2_shift: d.trailing_zeros(),
                divisor: d,
            });
        }
        let l = u8::BITS - (d - 1).leading_zeros();
        let two_l_minus_d = if l < u8::BITS {
            (1u8 << l).wrapping_sub(d)
        } else {
            d.wrapping_neg()
        };
        let (q, r) = ((two_l_minus_d as u16) << u8::BITS).div_rem(&(d as u16));
        debug_assert!(r > 0 && r < d as u16);
        Ok(UnsignedDivisor {
            multiplier: q + 1,
            shift1: 1,
            shift2: l - 1,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for u16 {
    type Divisor = UnsignedDivisor<u16>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        if d & (d - 1) == 0 {
            return Ok(UnsignedDivisor {
                multiplier: 1,
                shift1: 0,
                shift2: 0,
                is_pow2: true,
                pow2_shift: d.trailing_zeros(),
                divisor: d,
            });
        }
        let l = u16::BITS - (d - 1).leading_zeros();
        let two_l_minus_d = if l < u16::BITS {
            (1u16 << l).wrapping_sub(d)
        } else {
            d.wrapping_neg()
        };
        let (q, r) = ((two_l_minus_d as u32) << u16::BITS).div_rem(&(d as u32));
        debug_assert!(r > 0 && r < d as u32);
        Ok(UnsignedDivisor {
            multiplier: q + 1,
            shift1: 1,
            shift2: l - 1,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 2 }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 2 }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for u32 {
    type Divisor = UnsignedDivisor<u32>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        if d & (d - 1) == 0 {
            return Ok(UnsignedDivisor {
                multiplier: 1,
                shift1: 0,
                shift2: 0,
                is_pow2: true,
                pow2_shift: d.trailing_zeros(),
                divisor: d,
            });
        }
        let l = u32::BITS - (d - 1).leading_zeros();
        let two_l_minus_d = if l < u32::BITS {
            (1u32 << l).wrapping_sub(d)
        } else {
            d.wrapping_neg()
        };
        let (q, r) = ((two_l_minus_d as u64) << u32::BITS).div_rem(&(d as u64));
        debug_assert!(r > 0 && r < d as u64);
        Ok(UnsignedDivisor {
            multiplier: (q + 1) as u32,
            shift1: 1,
            shift2: l - 1,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 4 }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 4 }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for u64 {
    type Divisor = UnsignedDivisor<u64>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        if d & (d - 1) == 0 {
            return Ok(UnsignedDivisor {
                multiplier: 1,
                shift1: 0,
                shift2: 0,
                is_pow2: true,
                pow2_shift: d.trailing_zeros(),
                divisor: d,
            });
        }
        let l = u64::BITS - (d - 1).leading_zeros();
        let two_l_minus_d = if l < u64::BITS {
            (1u64 << l).wrapping_sub(d)
        } else {
            d.wrapping_neg()
        };
        Ok(UnsignedDivisor {
            multiplier: divide_high_by(two_l_minus_d, d) + 1,
            shift1: 1,
            shift2: l - 1,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 8 }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 8 }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for i8 {
    type Divisor = SignedDivisor<i8>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        // wrapping_neg keeps |MIN| representable; its single set bit lands
        // in the power-of-two arm below.
        let abs_d = (if d < 0 { d.wrapping_neg() } else { d }) as u8;
        if abs_d & (abs_d - 1) == 0 {
            return Ok(SignedDivisor {
                multiplier: 1,
                shift: 0,
                is_pow2: true,
                pow2_shift: abs_d.trailing_zeros(),
                divisor: d,
            });
        }
        if d as u8 == 0x80 {
            // The generic formula overflows at |MIN|; its magic is fixed.
            return Ok(SignedDivisor {
                multiplier: (0x81u8 as i8) as i16,
                shift: 6,
                is_pow2: false,
                pow2_shift: 0,
                divisor: d,
            });
        }
        let sh = (u8::BITS - 1) - (abs_d - 1).leading_zeros();
        let (q, r) = (256u32 << sh).div_rem(&(abs_d as u32));
        debug_assert!(r > 0 && r < abs_d as u32);
        let m = q + 1;
        Ok(SignedDivisor {
            multiplier: (m as u8 as i8) as i16,
            shift: sh,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for i16 {
    type Divisor = SignedDivisor<i16>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        let abs_d = (if d < 0 { d.wrapping_neg() } else { d }) as u16;
        if abs_d & (abs_d - 1) == 0 {
            return Ok(SignedDivisor {
                multiplier: 1,
                shift: 0,
                is_pow2: true,
                pow2_shift: abs_d.trailing_zeros(),
                divisor: d,
            });
        }
        if d as u16 == 0x8000 {
            return Ok(SignedDivisor {
                multiplier: (0x8001u16 as i16) as i32,
                shift: 14,
                is_pow2: false,
                pow2_shift: 0,
                divisor: d,
            });
        }
        let sh = (u16::BITS - 1) - (abs_d - 1).leading_zeros();
        let (q, r) = (65536u32 << sh).div_rem(&(abs_d as u32));
        debug_assert!(r > 0 && r < abs_d as u32);
        let m = q + 1;
        Ok(SignedDivisor {
            multiplier: (m as u16 as i16) as i32,
            shift: sh,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 2 }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 2 }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for i32 {
    type Divisor = SignedDivisor<i32>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        let abs_d = (if d < 0 { d.wrapping_neg() } else { d }) as u32;
        if abs_d & (abs_d - 1) == 0 {
            return Ok(SignedDivisor {
                multiplier: 1,
                shift: 0,
                is_pow2: true,
                pow2_shift: abs_d.trailing_zeros(),
                divisor: d,
            });
        }
        if d as u32 == 0x8000_0000 {
            return Ok(SignedDivisor {
                multiplier: 0x8000_0001u32 as i32,
                shift: 30,
                is_pow2: false,
                pow2_shift: 0,
                divisor: d,
            });
        }
        let sh = (u32::BITS - 1) - (abs_d - 1).leading_zeros();
        let (q, r) = ((1u64 << u32::BITS) << sh).div_rem(&(abs_d as u64));
        debug_assert!(r > 0 && r < abs_d as u64);
        let m = q + 1;
        Ok(SignedDivisor {
            multiplier: m as u32 as i32,
            shift: sh,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 4 }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 4 }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}

impl DivisorInt for i64 {
    type Divisor = SignedDivisor<i64>;

    fn try_params(self) -> Result<Self::Divisor, DivideError> {
        let d = self;
        if d == 0 {
            return Err(DivideError::Zero);
        }
        let abs_d = (if d < 0 { d.wrapping_neg() } else { d }) as u64;
        if abs_d & (abs_d - 1) == 0 {
            return Ok(SignedDivisor {
                multiplier: 1,
                shift: 0,
                is_pow2: true,
                pow2_shift: abs_d.trailing_zeros(),
                divisor: d,
            });
        }
        if d as u64 == 0x8000_0000_0000_0000 {
            return Ok(SignedDivisor {
                multiplier: 0x8000_0000_0000_0001u64 as i64,
                shift: 62,
                is_pow2: false,
                pow2_shift: 0,
                divisor: d,
            });
        }
        let sh = (u64::BITS - 1) - (abs_d - 1).leading_zeros();
        let m = divide_high_by(1u64 << sh, abs_d) + 1;
        Ok(SignedDivisor {
            multiplier: m as i64,
            shift: sh,
            is_pow2: false,
            pow2_shift: 0,
            divisor: d,
        })
    }

    fn int_div<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div(v)
    }

    fn int_div_floor<const N: usize>(v: Lanes<Self, N>, params: &Self::Divisor) -> Lanes<Self, N> {
        params.int_div_floor(v)
    }

    fn divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 8 }>(
            data,
            params,
            Self::int_div,
        );
    }

    fn floor_divide_slice(data: &mut [Self], params: &Self::Divisor) {
        crate::slice::for_each_vector::<Self, { crate::lanes::VECTOR_BYTES / 8 }>(
            data,
            params,
            Self::int_div_floor,
        );
    }
}
