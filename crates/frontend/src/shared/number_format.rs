//! Number formatting for amounts and USD counter values

/// Counter values above this are shown without cents
const WHOLE_DOLLARS_ABOVE: f64 = 10_000.0;

/// Formats a number with a thousands separator (comma) and the given number
/// of fractional digits
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Insert a comma every 3 digits from the end of the integer part
    let mut result = String::new();
    let chars: Vec<char> = integer_part.chars().rev().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 && *c != '-' {
            result.push(',');
        }
        result.push(*c);
    }

    let formatted_integer = result.chars().rev().collect::<String>();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// USD value of `amount` tokens at `price`
///
/// `$0.00` when either side is zero, whole dollars above 10 000, cents
/// otherwise.
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_counter_value;
/// assert_eq!(format_counter_value(2.0, 1.5), "$3.00");
/// ```
pub fn format_counter_value(amount: f64, price: f64) -> String {
    if amount == 0.0 || price == 0.0 || !amount.is_finite() || !price.is_finite() {
        return format!("${}", format_number_with_decimals(0.0, 2));
    }
    let value = amount * price;
    if value > WHOLE_DOLLARS_ABOVE {
        format!("${}", format_number_with_decimals(value, 0))
    } else {
        format!("${}", format_number_with_decimals(value, 2))
    }
}
