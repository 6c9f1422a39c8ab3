use lanediv::{
    compute_params, divide_by_scalar, divide_high_by, divide_high_by_portable,
    divide_slice_by_scalar, floor_divide_by_scalar, floor_divide_slice_by_scalar, int_div,
    int_div_floor, DivideError, DivisorInt, Lanes, SignedDivisor, UnsignedDivisor,
};
use proptest::prelude::*;

/// Scalar flooring reference: truncate, then step down when a non-zero
/// remainder has the opposite sign of the divisor.
macro_rules! floor_ref {
    ($a:expr, $d:expr) => {{
        let q = $a.wrapping_div($d);
        let r = $a.wrapping_rem($d);
        if r != 0 && ((r < 0) != ($d < 0)) {
            q - 1
        } else {
            q
        }
    }};
}

proptest! {
    #[test]
    fn u8_int_div_vs_native(lanes in any::<[u8; 16]>(), divisor in 1..=u8::MAX) {
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a / divisor);
        }
    }

    #[test]
    fn u16_int_div_vs_native(lanes in any::<[u16; 8]>(), divisor in 1..=u16::MAX) {
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a / divisor);
        }
    }

    #[test]
    fn u32_int_div_vs_native(lanes in any::<[u32; 8]>(), divisor in 1..=u32::MAX) {
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a / divisor);
        }
    }

    #[test]
    fn u64_int_div_vs_native(lanes in any::<[u64; 4]>(), divisor in 1..=u64::MAX) {
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a / divisor);
        }
    }

    #[test]
    fn i8_int_div_vs_native(lanes in any::<[i8; 16]>(), divisor in any::<i8>()) {
        prop_assume!(divisor != 0);
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            // wrapping_div is plain truncation everywhere except MIN / -1,
            // where it wraps to MIN exactly like the kernel.
            prop_assert_eq!(q[i], a.wrapping_div(divisor));
        }
    }

    #[test]
    fn i16_int_div_vs_native(lanes in any::<[i16; 8]>(), divisor in any::<i16>()) {
        prop_assume!(divisor != 0);
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a.wrapping_div(divisor));
        }
    }

    #[test]
    fn i32_int_div_vs_native(lanes in any::<[i32; 8]>(), divisor in any::<i32>()) {
        prop_assume!(divisor != 0);
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a.wrapping_div(divisor));
        }
    }

    #[test]
    fn i64_int_div_vs_native(lanes in any::<[i64; 4]>(), divisor in any::<i64>()) {
        prop_assume!(divisor != 0);
        let params = compute_params(divisor);
        let q = int_div(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], a.wrapping_div(divisor));
        }
    }

    #[test]
    fn i32_floor_vs_reference(lanes in any::<[i32; 8]>(), divisor in any::<i32>()) {
        prop_assume!(divisor != 0);
        let params = compute_params(divisor);
        let q = int_div_floor(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], floor_ref!(a, divisor));
        }
    }

    #[test]
    fn i64_floor_vs_reference(lanes in any::<[i64; 4]>(), divisor in any::<i64>()) {
        prop_assume!(divisor != 0);
        let params = compute_params(divisor);
        let q = int_div_floor(Lanes::from_array(lanes), &params).to_array();
        for (i, &a) in lanes.iter().enumerate() {
            prop_assert_eq!(q[i], floor_ref!(a, divisor));
        }
    }

    #[test]
    fn unsigned_floor_equals_trunc(lanes in any::<[u64; 4]>(), divisor in 1..=u64::MAX) {
        let params = compute_params(divisor);
        let v = Lanes::from_array(lanes);
        prop_assert_eq!(int_div_floor(v, &params), int_div(v, &params));
    }

    #[test]
    fn divide_by_scalar_equals_explicit_derivation(
        lanes in any::<[u32; 8]>(),
        divisor in 1..=u32::MAX,
    ) {
        let v = Lanes::from_array(lanes);
        let params = compute_params(divisor);
        prop_assert_eq!(divide_by_scalar(v, divisor), int_div(v, &params));
        prop_assert_eq!(floor_divide_by_scalar(v, divisor), int_div_floor(v, &params));
    }

    #[test]
    fn slice_division_matches_per_lane(
        mut data in proptest::collection::vec(any::<u32>(), 0..64),
        divisor in 1..=u32::MAX,
    ) {
        let expected: Vec<u32> = data.iter().map(|&a| a / divisor).collect();
        divide_slice_by_scalar(&mut data, divisor);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn floor_slice_division_matches_reference(
        mut data in proptest::collection::vec(any::<i16>(), 0..64),
        divisor in any::<i16>(),
    ) {
        prop_assume!(divisor != 0);
        let expected: Vec<i16> = data.iter().map(|&a| floor_ref!(a, divisor)).collect();
        floor_divide_slice_by_scalar(&mut data, divisor);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn wide_division_variants_agree(high in any::<u64>(), divisor in 1..=u64::MAX) {
        prop_assert_eq!(divide_high_by_portable(high, divisor), divide_high_by(high, divisor));
    }
}

mod edge_case_tests {
    use super::*;

    #[test]
    fn zero_divisor_is_an_error() {
        assert!(matches!(0u8.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0u16.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0u32.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0u64.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0i8.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0i16.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0i32.try_params(), Err(DivideError::Zero)));
        assert!(matches!(0i64.try_params(), Err(DivideError::Zero)));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn zero_divisor_panics_on_the_slice_path() {
        divide_slice_by_scalar(&mut [1u32, 2, 3], 0);
    }

    #[test]
    fn every_u8_pair_matches_native() {
        for divisor in 1..=u8::MAX {
            let params = compute_params(divisor);
            for base in (0..=u8::MAX).step_by(16) {
                let lanes: [u8; 16] = core::array::from_fn(|i| base.wrapping_add(i as u8));
                let q = int_div(Lanes::from_array(lanes), &params).to_array();
                for (i, &a) in lanes.iter().enumerate() {
                    assert_eq!(q[i], a / divisor, "{a} / {divisor}");
                }
            }
        }
    }

    #[test]
    fn every_i8_pair_matches_native() {
        for divisor in i8::MIN..=i8::MAX {
            if divisor == 0 {
                continue;
            }
            let trunc = compute_params(divisor);
            for base in (0..=u8::MAX).step_by(16) {
                let lanes: [i8; 16] = core::array::from_fn(|i| base.wrapping_add(i as u8) as i8);
                let q = int_div(Lanes::from_array(lanes), &trunc).to_array();
                let f = int_div_floor(Lanes::from_array(lanes), &trunc).to_array();
                for (i, &a) in lanes.iter().enumerate() {
                    assert_eq!(q[i], a.wrapping_div(divisor), "trunc {a} / {divisor}");
                    assert_eq!(f[i], floor_ref!(a, divisor), "floor {a} / {divisor}");
                }
            }
        }
    }

    #[test]
    fn power_of_two_divisors() {
        for shift in 0..32 {
            let divisor = 1u32 << shift;
            let params = UnsignedDivisor::new(divisor);
            for dividend in [0, 1, divisor.wrapping_sub(1), divisor, u32::MAX] {
                let q = int_div(Lanes::<u32, 4>::splat(dividend), &params).to_array()[0];
                assert_eq!(q, dividend / divisor);
            }
        }
        for shift in 0..63 {
            for divisor in [1i64 << shift, -(1i64 << shift)] {
                let params = SignedDivisor::new(divisor);
                for dividend in [i64::MIN, -100, -1, 0, 1, 100, i64::MAX] {
                    let q = int_div(Lanes::<i64, 2>::splat(dividend), &params).to_array()[0];
                    assert_eq!(q, dividend.wrapping_div(divisor), "{dividend} / {divisor}");
                }
            }
        }
    }

    #[test]
    fn unit_divisors_are_identity_or_negation() {
        let v = Lanes::from_array([0u32, 1, 77, u32::MAX]);
        assert_eq!(int_div(v, &compute_params(1u32)), v);

        let v = Lanes::from_array([i32::MIN + 1, -1, 0, 1, i32::MAX, 0, 0, 0]);
        assert_eq!(int_div(v, &compute_params(1i32)), v);
        assert_eq!(int_div(v, &compute_params(-1i32)), -v);
    }

    #[test]
    fn min_divided_by_minus_one_wraps_to_min() {
        assert_eq!(
            int_div(Lanes::<i8, 4>::splat(i8::MIN), &compute_params(-1i8)).to_array()[0],
            i8::MIN
        );
        assert_eq!(
            int_div(Lanes::<i16, 4>::splat(i16::MIN), &compute_params(-1i16)).to_array()[0],
            i16::MIN
        );
        assert_eq!(
            int_div(Lanes::<i32, 4>::splat(i32::MIN), &compute_params(-1i32)).to_array()[0],
            i32::MIN
        );
        assert_eq!(
            int_div(Lanes::<i64, 2>::splat(i64::MIN), &compute_params(-1i64)).to_array()[0],
            i64::MIN
        );
    }

    #[test]
    fn extreme_unsigned_values() {
        for (dividend, divisor) in [
            (u32::MAX, u32::MAX),
            (u32::MAX - 1, u32::MAX),
            (0, u32::MAX),
            (1, u32::MAX),
            (u32::MAX, 3),
        ] {
            let params = UnsignedDivisor::new(divisor);
            let q = int_div(Lanes::<u32, 8>::splat(dividend), &params).to_array()[0];
            assert_eq!(q, dividend / divisor);
        }
    }

    #[test]
    fn signed_minimum_divisors() {
        for dividend in [i32::MIN, i32::MIN + 1, -1, 0, 1, i32::MAX] {
            let q = int_div(Lanes::<i32, 4>::splat(dividend), &compute_params(i32::MIN));
            assert_eq!(q.to_array()[0], dividend.wrapping_div(i32::MIN));

            let f = int_div_floor(Lanes::<i32, 4>::splat(dividend), &compute_params(i32::MIN));
            assert_eq!(f.to_array()[0], floor_ref!(dividend, i32::MIN));
        }
    }

    #[test]
    fn sixteen_bit_divisor_sweep() {
        let dividends: [i16; 8] = [i16::MIN, -1234, -7, -1, 0, 1, 1234, i16::MAX];
        let v = Lanes::from_array(dividends);
        for divisor in [3i16, 5, 7, -3, -7, 17, -17, 255, -256, 1000, i16::MAX, i16::MIN] {
            let trunc = int_div(v, &compute_params(divisor)).to_array();
            let floor = int_div_floor(v, &compute_params(divisor)).to_array();
            for (i, &a) in dividends.iter().enumerate() {
                assert_eq!(trunc[i], a.wrapping_div(divisor), "trunc {a} / {divisor}");
                assert_eq!(floor[i], floor_ref!(a, divisor), "floor {a} / {divisor}");
            }
        }
    }
}

mod end_to_end {
    use super::*;

    #[test]
    fn u8_by_7() {
        let q = divide_by_scalar(Lanes::from_array([0u8, 6, 7, 8, 14, 15, 254, 255]), 7);
        assert_eq!(q.to_array(), [0, 0, 1, 1, 2, 2, 36, 36]);
    }

    #[test]
    fn u32_by_12345() {
        let v = Lanes::from_array([0u32, 12344, 12345, 12346, 24690, 1 << 31, u32::MAX, 100000]);
        let q = divide_by_scalar(v, 12345);
        assert_eq!(q.to_array(), [0, 0, 1, 1, 2, 173955, 347911, 8]);
    }

    #[test]
    fn i32_trunc_by_minus_3() {
        let v = Lanes::from_array([-7i32, -6, -3, 0, 3, 6, 7, i32::MAX]);
        let q = divide_by_scalar(v, -3);
        assert_eq!(q.to_array(), [2, 2, 1, 0, -1, -2, -2, -715827882]);
    }

    #[test]
    fn i32_floor_by_3() {
        let v = Lanes::from_array([-7i32, -4, -1, 0, 1, 4, 7]);
        let q = floor_divide_by_scalar(v, 3);
        assert_eq!(q.to_array(), [-3, -2, -1, 0, 0, 1, 2]);
    }

    #[test]
    fn i32_floor_by_minus_3() {
        let v = Lanes::from_array([-7i32, 0, 7]);
        let q = floor_divide_by_scalar(v, -3);
        assert_eq!(q.to_array(), [2, 0, -3]);
    }

    #[test]
    fn i32_by_minus_1() {
        let v = Lanes::from_array([i32::MIN, -1, 0, 1, i32::MAX]);
        let q = divide_by_scalar(v, -1);
        assert_eq!(q.to_array(), [i32::MIN, 1, 0, -1, -i32::MAX]);
    }

    #[test]
    fn u64_by_large_prime() {
        let v = Lanes::from_array([0u64, 1_000_000_006, 1_000_000_007, u64::MAX]);
        let q = divide_by_scalar(v, 1_000_000_007);
        assert_eq!(q.to_array(), [0, 0, 1, 18_446_743_944]);
    }

    #[test]
    fn operator_form_divides_lanes() {
        let by9 = UnsignedDivisor::new(9u16);
        assert_eq!(
            (Lanes::from_array([0u16, 8, 9, 81, u16::MAX]) / &by9).to_array(),
            [0, 0, 1, 9, 7281]
        );

        let by_neg5 = SignedDivisor::new(-5i32);
        assert_eq!(
            (Lanes::from_array([-11i32, -10, 0, 10, 11]) / &by_neg5).to_array(),
            [2, 2, 0, -2, -2]
        );
    }
}
