use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Discrete rating produced by the signal labeler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    HoldNeutral,
    Sell,
    StrongSell,
    InsufficientData,
}

impl SignalLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "Strong Buy",
            SignalLabel::Buy => "Buy",
            SignalLabel::HoldNeutral => "Hold/Neutral",
            SignalLabel::Sell => "Sell",
            SignalLabel::StrongSell => "Strong Sell",
            SignalLabel::InsufficientData => "Insufficient Data",
        }
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SignalLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of processing one ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerStatus {
    Ok,
    NoData,
    Error(String),
}

impl fmt::Display for TickerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerStatus::Ok => f.write_str("ok"),
            TickerStatus::NoData => f.write_str("no_data"),
            TickerStatus::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl Serialize for TickerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One CSV row of the final report. Numeric fields and the label are absent
/// on `no_data` and `error` rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub ticker: String,
    pub as_of_date: Option<NaiveDate>,
    pub last_close: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub label: Option<SignalLabel>,
    pub status: TickerStatus,
}

impl ReportRecord {
    pub fn no_data(ticker: &str) -> Self {
        Self::empty(ticker, TickerStatus::NoData)
    }

    pub fn error(ticker: &str, message: String) -> Self {
        Self::empty(ticker, TickerStatus::Error(message))
    }

    fn empty(ticker: &str, status: TickerStatus) -> Self {
        Self {
            ticker: ticker.to_string(),
            as_of_date: None,
            last_close: None,
            sma50: None,
            sma200: None,
            rsi14: None,
            macd: None,
            macd_signal: None,
            label: None,
            status,
        }
    }
}
