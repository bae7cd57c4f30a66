//! Currency formatting for insight text

/// Currency symbol used in generated text
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount with Indian digit grouping and two decimals.
///
/// `123456.5` becomes `₹1,23,456.50`. Magnitudes beyond `u64::MAX` paise
/// saturate; stored amounts are capped well below that.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise = (amount.abs() * 100.0).round() as u64;
    let whole = (paise / 100).to_string();
    let fraction = paise % 100;

    let grouped = if whole.len() <= 3 {
        whole
    } else {
        let (head, last_three) = whole.split_at(whole.len() - 3);
        // Groups of two above the thousands
        let mut parts: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            parts.push(&head[start..end]);
            end = start;
        }
        parts.reverse();
        format!("{},{}", parts.join(","), last_three)
    };

    format!(
        "{}{}{}.{:02}",
        if negative { "-" } else { "" },
        CURRENCY_SYMBOL,
        grouped,
        fraction
    )
}
