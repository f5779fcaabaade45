use chrono::NaiveDate;

/// A daily close augmented with derived indicator values.
///
/// The rolling fields stay `None` until enough preceding history exists
/// (50 rows for SMA50, 200 for SMA200, 14 differences for RSI14). The MACD
/// fields are recursive EMAs seeded at the first row and are always present.
/// RSI is also `None` wherever the trailing average loss is exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
}

impl IndicatorRow {
    /// True when every indicator field is defined.
    pub fn is_complete(&self) -> bool {
        self.sma50.is_some() && self.sma200.is_some() && self.rsi14.is_some()
    }
}

/// An [`IndicatorRow`] with every field defined. The signal labeler only
/// accepts these; incomplete rows must be filtered out first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub rsi14: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
}
