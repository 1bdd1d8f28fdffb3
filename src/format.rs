// 💵 Display formatting - whole-dollar currency and grouped numbers
// Every panel renders money the same way: "$452,000", "-$14"

/// Round half away from zero to whole dollars.
///
/// This is the single rounding policy for every displayed figure;
/// the underlying calculations stay unrounded.
pub fn round_dollars(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round() as i64
}

/// Group digits with commas: 2250 -> "2,250"
pub fn group_thousands(value: i64) -> String {
    let grouped = group_digits(value.unsigned_abs());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(magnitude: u64) -> String {
    let digits = magnitude.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// USD with no fraction digits: 452000.0 -> "$452,000", -14.4 -> "-$14"
pub fn format_currency(value: f64) -> String {
    let rounded = round_dollars(value);
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}${}", sign, group_digits(rounded.unsigned_abs()))
}

/// Signed currency used for cash flow: "+$147" / "-$14"
pub fn format_signed_currency(value: f64) -> String {
    let rounded = round_dollars(value);
    let sign = if rounded < 0 { "-" } else { "+" };
    format!("{}${}", sign, group_digits(rounded.unsigned_abs()))
}

/// Percentages keep one decimal only when they need it: 6.5 -> "6.5%", 8.0 -> "8%"
pub fn format_percent(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}%", value.round() as i64)
    } else {
        format!("{:.1}%", value)
    }
}
