#![no_main]
use lanediv::{compute_params, int_div, int_div_floor, Lanes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|items: Vec<u64>| {
    if items.is_empty() {
        return;
    }
    let d = items[0];
    macro_rules! run {
        ($num_type:ty) => {{
            let d = d as $num_type;
            if d != 0 {
                let params = compute_params(d);
                for chunk in items.chunks(4) {
                    let mut lanes = [0 as $num_type; 4];
                    for (lane, item) in lanes.iter_mut().zip(chunk) {
                        *lane = *item as $num_type;
                    }
                    let q = int_div(Lanes::from_array(lanes), &params).to_array();
                    for (i, &a) in lanes.iter().enumerate() {
                        // wrapping_div matches the kernel on MIN / -1 too.
                        assert_eq!(
                            q[i],
                            a.wrapping_div(d),
                            "trunc {} {} / {}",
                            stringify!($num_type),
                            a,
                            d
                        );
                    }
                }
            }
        }};
    }
    macro_rules! run_floor {
        ($num_type:ty) => {{
            let d = d as $num_type;
            if d != 0 {
                let params = compute_params(d);
                for chunk in items.chunks(4) {
                    let mut lanes = [0 as $num_type; 4];
                    for (lane, item) in lanes.iter_mut().zip(chunk) {
                        *lane = *item as $num_type;
                    }
                    let f = int_div_floor(Lanes::from_array(lanes), &params).to_array();
                    for (i, &a) in lanes.iter().enumerate() {
                        let q = a.wrapping_div(d);
                        let r = a.wrapping_rem(d);
                        let expected = if r != 0 && ((r < 0) != (d < 0)) { q - 1 } else { q };
                        assert_eq!(
                            f[i],
                            expected,
                            "floor {} {} / {}",
                            stringify!($num_type),
                            a,
                            d
                        );
                    }
                }
            }
        }};
    }
    run!(u64);
    run!(i64);
    run!(u32);
    run!(i32);
    run!(u16);
    run!(i16);
    run!(u8);
    run!(i8);
    run_floor!(i64);
    run_floor!(i32);
    run_floor!(i16);
    run_floor!(i8);
});
