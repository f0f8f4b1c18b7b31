//! Present value discounting
//!
//! Single discounting primitive used by every pricing component. `years` is
//! a non-negative whole number of years; callers guarantee this, so there is
//! no error path.

/// Present value of a single payment due `years` from now.
///
/// `years == 0` returns the amount unchanged; `rate == 0.0` is legal and
/// returns the amount for any horizon.
pub fn present_value(amount: f64, rate: f64, years: u32) -> f64 {
    amount / (1.0 + rate).powi(years as i32)
}

/// Discount factor v^years = 1 / (1 + rate)^years
pub fn discount_factor(rate: f64, years: u32) -> f64 {
    present_value(1.0, rate, years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_years_is_identity() {
        assert_relative_eq!(present_value(1000.0, 0.05, 0), 1000.0);
    }

    #[test]
    fn test_zero_rate_is_identity() {
        assert_relative_eq!(present_value(1000.0, 0.0, 25), 1000.0);
    }

    #[test]
    fn test_known_value() {
        // 1000 in 2 years at 5%: 1000 / 1.1025
        let pv = present_value(1000.0, 0.05, 2);
        assert_relative_eq!(pv, 1000.0 / 1.1025, epsilon = 1e-9);
    }

    #[test]
    fn test_discount_factor() {
        assert_relative_eq!(discount_factor(0.05, 1), 1.0 / 1.05, epsilon = 1e-12);
    }
}
