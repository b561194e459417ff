use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Fractional digits shown for token amounts in the UI
pub const DISPLAY_DECIMALS: u8 = 10;

/// Raw on-chain integer amount together with the token's decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenAmount {
    pub raw: U256,
    pub decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Normalized amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        !self.raw.is_zero()
    }

    /// Exact decimal string of `raw / 10^decimals`
    pub fn normalized(&self) -> String {
        format_units(self.raw, self.decimals)
    }

    /// Normalized amount as a float, for price math only
    pub fn normalized_f64(&self) -> f64 {
        self.normalized().parse().unwrap_or(0.0)
    }

    /// Normalized amount trimmed for display, never past [`DISPLAY_DECIMALS`]
    pub fn display(&self, max_fraction_digits: u8) -> String {
        trim_amount_to(&self.normalized(), max_fraction_digits.min(DISPLAY_DECIMALS))
    }
}

/// Render `raw / 10^decimals` exactly, without trailing fractional zeros
pub fn format_units(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Trim a decimal string to at most [`DISPLAY_DECIMALS`] fractional digits
pub fn trim_amount(amount: &str) -> String {
    trim_amount_to(amount, DISPLAY_DECIMALS)
}

/// Round a non-negative decimal string half-up to `max_fraction_digits`
/// fractional digits and drop trailing zeros.
///
/// Anything that is not a plain decimal number renders as `"0"`.
pub fn trim_amount_to(amount: &str, max_fraction_digits: u8) -> String {
    let amount = amount.trim();
    let (integer, fraction) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction)
    {
        return "0".to_string();
    }

    let keep = (max_fraction_digits as usize).min(fraction.len());
    let round_up = fraction.as_bytes().get(keep).is_some_and(|d| *d >= b'5');

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(keep))
        .map(|b| b - b'0')
        .collect();
    let mut integer_len = integer.len();

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            integer_len += 1;
        }
    }

    let to_str = |ds: &[u8]| ds.iter().map(|d| (d + b'0') as char).collect::<String>();
    let integer_part = to_str(&digits[..integer_len]);
    let integer_part = integer_part.trim_start_matches('0');
    let integer_part = if integer_part.is_empty() { "0" } else { integer_part };
    let fraction_part = to_str(&digits[integer_len..]);
    let fraction_part = fraction_part.trim_end_matches('0');

    if fraction_part.is_empty() {
        integer_part.to_string()
    } else {
        format!("{}.{}", integer_part, fraction_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(1), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(1_500_000_000_000_000_000u128), 18), "1.5");
        assert_eq!(format_units(U256::from(100), 0), "100");
        assert_eq!(format_units(U256::from(123_456), 2), "1234.56");
        assert_eq!(
            format_units(U256::from(u128::MAX), 18),
            "340282366920938463463.374607431768211455"
        );
        assert_eq!(
            format_units(U256::MAX, 18),
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935"
        );
    }

    #[test]
    fn test_trim_amount_limits_fraction() {
        assert_eq!(trim_amount("1.123456789012345"), "1.123456789");
        assert_eq!(trim_amount("1.12345678915"), "1.1234567892");
        assert_eq!(trim_amount("0.000000000000000001"), "0");
        assert_eq!(trim_amount("0.99999999999"), "1");
        assert_eq!(trim_amount("99.99999999995"), "100");
        assert_eq!(trim_amount("42"), "42");
        assert_eq!(trim_amount("1.50"), "1.5");
        assert_eq!(trim_amount(".5"), "0.5");
        assert_eq!(trim_amount("007.25"), "7.25");
    }

    #[test]
    fn test_trim_amount_rejects_garbage() {
        assert_eq!(trim_amount(""), "0");
        assert_eq!(trim_amount("abc"), "0");
        assert_eq!(trim_amount("-1.5"), "0");
        assert_eq!(trim_amount("1.2.3"), "0");
    }

    #[test]
    fn test_trim_amount_is_idempotent() {
        let samples = [
            "0",
            "1.123456789012345",
            "0.99999999999",
            "123456789.00000000005",
            "0.0000000001",
            "0.00000000005",
            "340282366920938463463.374607431768211455",
        ];
        for s in samples {
            let once = trim_amount(s);
            let fraction_len = once.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
            assert!(fraction_len <= DISPLAY_DECIMALS as usize, "{} -> {}", s, once);
            assert_eq!(trim_amount(&once), once, "not idempotent for {}", s);
        }
    }

    #[test]
    fn test_token_amount_helpers() {
        let amount = TokenAmount::new(U256::from(2_500_000), 6);
        assert_eq!(amount.normalized(), "2.5");
        assert_eq!(amount.normalized_f64(), 2.5);
        assert!(amount.is_positive());
        assert!(TokenAmount::new(U256::ZERO, 18).is_zero());
        assert_eq!(TokenAmount::new(U256::from(1), 18).display(DISPLAY_DECIMALS), "0");
    }

    #[test]
    fn test_display_never_exceeds_display_decimals() {
        let amount = TokenAmount::new(U256::from(123_456_789_012_345_678u128), 18);
        assert_eq!(amount.display(18), "0.123456789");
        assert_eq!(amount.display(18), amount.display(DISPLAY_DECIMALS));
        assert_eq!(amount.display(4), "0.1235");
    }
}
