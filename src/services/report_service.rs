use std::path::Path;

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::external::price_provider::PriceProvider;
use crate::models::{PricePoint, ReportRecord, TickerStatus};
use crate::services::signal_service::{compute_indicators, drop_incomplete, label_signal};

// SMA200 needs this much calendar lookback regardless of --days.
const MIN_LOOKBACK_DAYS: u32 = 250;

/// Process each ticker in order and collect one record per ticker. A single
/// ticker's failure never aborts the batch.
pub async fn build_report(
    provider: &dyn PriceProvider,
    tickers: &[String],
    days: u32,
) -> Vec<ReportRecord> {
    let mut records = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let record = process_ticker(provider, ticker, days).await;
        match &record.status {
            TickerStatus::Ok => info!(
                "rated {}: {}",
                ticker,
                record.label.map(|l| l.as_str()).unwrap_or("-")
            ),
            TickerStatus::NoData => warn!("no price data for {}", ticker),
            TickerStatus::Error(msg) => error!("failed to rate {}: {}", ticker, msg),
        }
        records.push(record);
    }
    records
}

async fn process_ticker(provider: &dyn PriceProvider, ticker: &str, days: u32) -> ReportRecord {
    match rate_ticker(provider, ticker, days).await {
        Ok(record) => record,
        Err(e) => ReportRecord::error(ticker, e.to_string()),
    }
}

async fn rate_ticker(
    provider: &dyn PriceProvider,
    ticker: &str,
    days: u32,
) -> Result<ReportRecord, AppError> {
    let lookback = days.max(MIN_LOOKBACK_DAYS);
    let points = provider.fetch_daily_history(ticker, lookback).await?;

    if points.is_empty() {
        return Ok(ReportRecord::no_data(ticker));
    }

    summarize(ticker, &points)
}

/// Compute indicators over the full series, drop incomplete rows, label what
/// remains and report the latest values.
fn summarize(ticker: &str, points: &[PricePoint]) -> Result<ReportRecord, AppError> {
    let rows = compute_indicators(points);
    let cleaned = drop_incomplete(&rows);

    let last = cleaned
        .last()
        .ok_or_else(|| AppError::Compute("no rows with a complete indicator set".into()))?;
    let label = label_signal(&cleaned);

    Ok(ReportRecord {
        ticker: ticker.to_string(),
        as_of_date: Some(last.date),
        last_close: Some(round_to(last.close, 4)),
        sma50: Some(round_to(last.sma50, 4)),
        sma200: Some(round_to(last.sma200, 4)),
        rsi14: Some(round_to(last.rsi14, 2)),
        macd: Some(round_to(last.macd, 4)),
        macd_signal: Some(round_to(last.macd_signal, 4)),
        label: Some(label),
        status: TickerStatus::Ok,
    })
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Write the report as CSV, creating parent directories as needed.
pub fn write_report(records: &[ReportRecord], path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_report_precision() {
        assert_eq!(round_to(123.456789, 4), 123.4568);
        assert_eq!(round_to(51.23567, 2), 51.24);
        assert_eq!(round_to(-0.00005, 4), -0.0001);
    }
}
