/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// `1234.5` -> `$1,234.50`; negatives put the sign before the symbol.
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.2}", amount.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!("{}{}{}.{}", sign, self.symbol, group_thousands(whole), cents)
    }
}

/// Hours as a plain decimal that always shows a fractional part (`10.0`, `2.5`).
/// Never uses exponent notation.
pub fn format_hours(hours: f64) -> String {
    let plain = hours.to_string();
    if plain.contains('.') || !hours.is_finite() {
        plain
    } else {
        format!("{}.0", plain)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
