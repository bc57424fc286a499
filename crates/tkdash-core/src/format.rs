//! Display helpers shared by the table and chart tooltips.

/// Formats a count with `,` thousands separators: `1234567` → `"1,234,567"`.
#[must_use]
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `12.5` → `"12.50%"`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// `12.345` → `"12.35s"`.
#[must_use]
pub fn seconds(value: f64) -> String {
    format!("{value:.2}s")
}
