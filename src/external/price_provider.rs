use async_trait::async_trait;
use thiserror::Error;

use crate::models::PricePoint;

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily OHLCV history covering `lookback_days` calendar days,
    /// oldest first. An empty vector means the provider has no data for the
    /// ticker; that is not an error.
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        lookback_days: u32,
    ) -> Result<Vec<PricePoint>, PriceProviderError>;
}
