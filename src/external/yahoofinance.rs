use async_trait::async_trait;
use serde::Deserialize;

use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::PricePoint;

/// Yahoo Finance provider - free v8 chart API, no API key required.
pub struct YahooFinanceProvider {
    client: reqwest::Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (compatible; StockRater/0.1)")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResult {
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// Map a day count onto the coarse ranges the chart API accepts.
fn range_for_days(days: u32) -> &'static str {
    if days <= 5 {
        "5d"
    } else if days <= 30 {
        "1mo"
    } else if days <= 90 {
        "3mo"
    } else if days <= 180 {
        "6mo"
    } else if days <= 365 {
        "1y"
    } else if days <= 730 {
        "2y"
    } else {
        "5y"
    }
}

/// Convert one chart result into bars, oldest first. Rows with any missing
/// field (market holidays, partial sessions) are skipped.
pub(crate) fn points_from_chart(result: &ChartResult) -> Result<Vec<PricePoint>, PriceProviderError> {
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| PriceProviderError::BadResponse("no quote data in response".into()))?;

    let n = result.timestamp.len();
    for (name, series) in [
        ("open", &quote.open),
        ("high", &quote.high),
        ("low", &quote.low),
        ("close", &quote.close),
        ("volume", &quote.volume),
    ] {
        if series.len() != n {
            return Err(PriceProviderError::Parse(format!(
                "timestamp and {} arrays have different lengths",
                name
            )));
        }
    }

    let mut points: Vec<PricePoint> = (0..n)
        .filter_map(|i| {
            let date = chrono::DateTime::from_timestamp(result.timestamp[i], 0)
                .map(|dt| dt.date_naive())?;
            Some(PricePoint {
                date,
                open: quote.open[i]?,
                high: quote.high[i]?,
                low: quote.low[i]?,
                close: quote.close[i]?,
                volume: quote.volume[i]?,
            })
        })
        .collect();

    points.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(points)
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        lookback_days: u32,
    ) -> Result<Vec<PricePoint>, PriceProviderError> {
        let url = format!("https://query1.finance.yahoo.com/v8/finance/chart/{}", ticker);

        let resp = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", range_for_days(lookback_days))])
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        // Unknown tickers come back as 404; that is the empty-series case.
        if resp.status().as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !resp.status().is_success() {
            return Err(PriceProviderError::BadResponse(format!(
                "HTTP {}",
                resp.status()
            )));
        }

        let body: ChartResponse = resp
            .json()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        if let Some(error) = body.chart.error {
            if error.description.contains("No data found") {
                return Ok(Vec::new());
            }
            return Err(PriceProviderError::BadResponse(error.description));
        }

        // Bulk queries return one result per ticker; we always query one at a
        // time, so normalize to the first result.
        let results = body
            .chart
            .result
            .ok_or_else(|| PriceProviderError::BadResponse("no results in response".into()))?;

        match results.first() {
            Some(result) => points_from_chart(result),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1735776000, 1735689600, 1735862400],
                "indicators": {
                    "quote": [{
                        "open":   [101.0, 100.0, null],
                        "high":   [103.0, 102.0, 104.0],
                        "low":    [100.5, 99.0, 101.0],
                        "close":  [102.5, 101.5, 103.0],
                        "volume": [1200.0, 1000.0, 900.0]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_chart_and_sorts_by_date() {
        let body: ChartResponse = serde_json::from_str(FIXTURE).unwrap();
        let results = body.chart.result.unwrap();
        let points = points_from_chart(&results[0]).unwrap();

        // Third row has a null open and is skipped; remaining rows come out
        // oldest first even though the payload is unordered.
        assert_eq!(points.len(), 2);
        assert!(points[0].date < points[1].date);
        assert_eq!(points[0].close, 101.5);
        assert_eq!(points[1].close, 102.5);
    }

    #[test]
    fn mismatched_array_lengths_are_a_parse_error() {
        let body: ChartResponse = serde_json::from_str(
            r#"{"chart":{"result":[{"timestamp":[1735689600],
                "indicators":{"quote":[{"open":[1.0],"high":[2.0],"low":[0.5],
                "close":[1.5,1.6],"volume":[10.0]}]}}],"error":null}}"#,
        )
        .unwrap();
        let results = body.chart.result.unwrap();
        assert!(matches!(
            points_from_chart(&results[0]),
            Err(PriceProviderError::Parse(_))
        ));
    }

    #[test]
    fn range_buckets_cover_the_default_lookback() {
        assert_eq!(range_for_days(5), "5d");
        assert_eq!(range_for_days(250), "1y");
        assert_eq!(range_for_days(450), "2y");
        assert_eq!(range_for_days(2000), "5y");
    }
}
