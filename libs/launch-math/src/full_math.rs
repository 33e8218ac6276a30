use soroban_sdk::{Env, U256};

/// (a * b) / denominator with a 256-bit intermediate, plus whether it was exact
fn product_quotient(env: &Env, a: u128, b: u128, denominator: u128) -> (U256, bool) {
    if denominator == 0 {
        panic!("Division by zero");
    }
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let denominator = U256::from_u128(env, denominator);
    let exact = product.rem_euclid(&denominator) == U256::from_u32(env, 0);
    (product.div(&denominator), exact)
}

fn narrow(value: &U256) -> u128 {
    match value.to_u128() {
        Some(value) => value,
        None => panic!("U256 overflow when converting to u128"),
    }
}

/// Multiply and divide with 256-bit intermediate precision (rounds down)
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    let (quotient, _) = product_quotient(env, a, b, denominator);
    narrow(&quotient)
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
pub fn mul_div_rounding_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    let (quotient, exact) = product_quotient(env, a, b, denominator);
    let quotient = narrow(&quotient);
    if exact {
        quotient
    } else {
        quotient + 1
    }
}

/// Like [`mul_div`] and [`mul_div_rounding_up`], but `None` when the result
/// does not fit a u128
pub fn checked_mul_div(
    env: &Env,
    a: u128,
    b: u128,
    denominator: u128,
    round_up: bool,
) -> Option<u128> {
    let (quotient, exact) = product_quotient(env, a, b, denominator);
    let quotient = quotient.to_u128()?;
    if round_up && !exact {
        quotient.checked_add(1)
    } else {
        Some(quotient)
    }
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: u128, b: u128) -> u128 {
    if b == 0 {
        panic!("Division by zero");
    }
    a.div_ceil(b)
}

/// Non-negative token amount as u128; amounts below zero are a caller bug
pub fn to_unsigned(amount: i128) -> u128 {
    if amount < 0 {
        panic!("Negative amount");
    }
    amount as u128
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_mul_div_rounds_down() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 20, 5), 40);
        assert_eq!(mul_div(&env, 3, 1, 2), 1);
        assert_eq!(mul_div(&env, 5, 1, 3), 1);
    }

    #[test]
    fn test_mul_div_phantom_overflow() {
        let env = Env::default();
        let max = u128::MAX;
        assert_eq!(mul_div(&env, max, max, max), max);
        let q64 = 1u128 << 64;
        assert_eq!(mul_div(&env, q64 * 3, q64 * 2, q64), q64 * 6);
    }

    #[test]
    fn test_mul_div_rounding_up() {
        let env = Env::default();
        assert_eq!(mul_div_rounding_up(&env, 10, 20, 5), 40);
        assert_eq!(mul_div_rounding_up(&env, 10, 3, 7), 5);
        assert_eq!(mul_div_rounding_up(&env, 7, 11, 13) - mul_div(&env, 7, 11, 13), 1);
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_mul_div_zero_denominator() {
        let env = Env::default();
        mul_div(&env, 10, 20, 0);
    }

    #[test]
    #[should_panic(expected = "U256 overflow when converting to u128")]
    fn test_mul_div_result_overflow() {
        let env = Env::default();
        mul_div(&env, u128::MAX, 2, 1);
    }

    #[test]
    fn test_checked_mul_div_reports_overflow() {
        let env = Env::default();
        assert_eq!(checked_mul_div(&env, u128::MAX, 2, 1, false), None);
        assert_eq!(checked_mul_div(&env, u128::MAX, 1, 1, true), Some(u128::MAX));
        assert_eq!(checked_mul_div(&env, 10, 3, 7, true), Some(5));
        assert_eq!(checked_mul_div(&env, 10, 3, 7, false), Some(4));
    }

    #[test]
    fn test_div_rounding_up() {
        assert_eq!(div_rounding_up(9, 3), 3);
        assert_eq!(div_rounding_up(10, 3), 4);
        assert_eq!(div_rounding_up(0, 5), 0);
    }

    #[test]
    #[should_panic(expected = "Negative amount")]
    fn test_to_unsigned_rejects_negative() {
        to_unsigned(-1);
    }

    #[test]
    fn test_to_unsigned() {
        assert_eq!(to_unsigned(42), 42);
    }
}
