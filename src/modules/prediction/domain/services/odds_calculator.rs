/// Combined odds arithmetic for accumulator tickets
pub struct OddsCalculator;

impl OddsCalculator {
    /// Round to two decimal places (cents of a decimal odds value)
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Product of all odds rounded to two decimals; `None` for an empty ticket
    /// or when the product overflows
    pub fn ticket_odds<I>(odds: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = odds.into_iter().peekable();
        iter.peek()?;
        Some(Self::round2(iter.product())).filter(|total| total.is_finite())
    }

    /// Total for the admin form: entries that do not parse are ignored,
    /// and a form without any usable odds totals `0.0`
    pub fn form_total<S: AsRef<str>>(entries: &[S]) -> f64 {
        let valid = entries
            .iter()
            .filter_map(|entry| entry.as_ref().trim().parse::<f64>().ok())
            .filter(|odds| odds.is_finite());
        Self::ticket_odds(valid).unwrap_or(0.0)
    }
}
