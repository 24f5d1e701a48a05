//! Exact round-half-to-even on integer ratios.

/// `numerator / denominator` rounded half-to-even.
///
/// `denominator` must be positive.
pub fn div_round_half_even(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);
    let twice = remainder * 2;
    if twice > denominator || (twice == denominator && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

/// `value × percent / 100`, rounded half-to-even.
pub fn scale_percent(value: i64, percent: u32) -> i64 {
    div_round_half_even(value * i64::from(percent), 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_go_to_even() {
        assert_eq!(div_round_half_even(5, 2), 2);
        assert_eq!(div_round_half_even(7, 2), 4);
        assert_eq!(div_round_half_even(-5, 2), -2);
        assert_eq!(div_round_half_even(-7, 2), -4);
    }

    #[test]
    fn non_halves_go_to_nearest() {
        assert_eq!(div_round_half_even(7, 3), 2);
        assert_eq!(div_round_half_even(8, 3), 3);
        assert_eq!(div_round_half_even(-8, 3), -3);
        assert_eq!(div_round_half_even(9, 3), 3);
    }

    #[test]
    fn percent_scaling() {
        assert_eq!(scale_percent(5, 70), 4); // 3.5 -> 4
        assert_eq!(scale_percent(5, 50), 2); // 2.5 -> 2
        assert_eq!(scale_percent(24, 150), 36);
        assert_eq!(scale_percent(110, 120), 132);
    }
}
