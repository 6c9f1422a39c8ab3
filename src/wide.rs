//! 128-by-64-bit high-half division used by the 64-bit magic derivation.

use num_integer::Integer;

/// Returns `((high << 64) / divisor) mod 2^64`.
///
/// This is the division that produces 64-bit magic multipliers: the numerator
/// is `high` scaled by `2^64`, with zero low bits.
#[inline]
pub fn divide_high_by(high: u64, divisor: u64) -> u64 {
    debug_assert!(divisor != 0);
    (((high as u128) << 64) / divisor as u128) as u64
}

/// Two-digit schoolbook variant of [`divide_high_by`] for hosts whose 128-bit
/// division lowers to a slow library call.
///
/// Reduce first: writing `high = q * divisor + r`, the quotient is
/// `(q << 64) + (r << 64) / divisor`, and `(r << 64) / divisor < 2^64`, so
/// the low 64 result bits depend only on `r = high % divisor`. After the
/// reduction the divisor is normalized by its leading-zero count and the
/// quotient is produced as two 32-bit digits with the usual
/// overestimate-and-correct step (Knuth TAOCP vol. 2, Algorithm D).
pub fn divide_high_by_portable(high: u64, divisor: u64) -> u64 {
    debug_assert!(divisor != 0);

    let high = high % divisor;
    if high == 0 {
        return 0;
    }

    let shift = divisor.leading_zeros();
    let d_norm = divisor << shift;
    let n_norm = high << shift;

    let d_hi = d_norm >> 32;
    let d_lo = d_norm & 0xFFFF_FFFF;

    const BASE: u64 = 1 << 32;

    // First digit: estimate from the top 32 divisor bits, then walk the
    // estimate down. Against a two-digit divisor the test is exact, so no
    // add-back pass is needed. `q_hi * d_lo` cannot overflow once
    // `q_hi < BASE`, and the loop exits when the partial remainder reaches
    // BASE.
    let (mut q_hi, mut rem) = n_norm.div_rem(&d_hi);
    while q_hi >= BASE || q_hi * d_lo > (rem << 32) {
        q_hi -= 1;
        rem += d_hi;
        if rem >= BASE {
            break;
        }
    }

    // Second digit from the exact partial remainder, same correction.
    let partial = (n_norm << 32).wrapping_sub(d_norm.wrapping_mul(q_hi));
    let (mut q_lo, mut rem) = partial.div_rem(&d_hi);
    while q_lo >= BASE || q_lo * d_lo > (rem << 32) {
        q_lo -= 1;
        rem += d_hi;
        if rem >= BASE {
            break;
        }
    }

    (q_hi << 32) | q_lo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_quotients() {
        assert_eq!(divide_high_by(1, 3), 0x5555_5555_5555_5555);
        assert_eq!(divide_high_by(1 << 63, 1 << 63), 0);
        assert_eq!(divide_high_by(1, u64::MAX), 1);

        assert_eq!(divide_high_by_portable(1, 3), 0x5555_5555_5555_5555);
        assert_eq!(divide_high_by_portable(1 << 63, 1 << 63), 0);
        assert_eq!(divide_high_by_portable(1, u64::MAX), 1);
    }

    #[test]
    fn portable_matches_native() {
        let interesting = [
            1u64,
            2,
            3,
            5,
            7,
            10,
            1000,
            12345,
            0x8000_0000,
            0xFFFF_FFFF,
            0x1_0000_0001,
            1_000_000_007,
            u64::MAX / 3,
            u64::MAX - 1,
            u64::MAX,
            1 << 63,
            (1 << 63) + 1,
        ];
        for &divisor in &interesting {
            for &high in &interesting {
                assert_eq!(
                    divide_high_by_portable(high, divisor),
                    divide_high_by(high, divisor),
                    "high={high} divisor={divisor}"
                );
            }
        }
    }
}
