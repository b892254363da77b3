/// Format a price with exactly two decimals
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

/// Round to an integer and group thousands with commas: 1500000.4 -> "1,500,000"
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" after rounding a small negative number
    if grouped == "0" {
        return grouped;
    }
    format!("{}{}", sign, grouped)
}
