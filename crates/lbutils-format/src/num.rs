/// Render `value` with comma-grouped thousands.
///
/// With `decimals` the value is rounded to exactly that many places first;
/// without, it prints as short as possible (`9000000.0` → `9,000,000`).
pub fn fmt_num(value: f64, decimals: Option<usize>) -> String {
    let raw = match decimals {
        Some(places) => format!("{value:.places$}"),
        None => format!("{value}"),
    };
    group_thousands(&raw)
}

/// Insert commas into the integer part of an already formatted number.
/// Input that is not a plain decimal number is returned unchanged.
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return number.to_string();
    }

    let mut grouped = String::with_capacity(number.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
