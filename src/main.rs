use anyhow::Result;
use clap::Parser;

use stock_rater::cli::Cli;
use stock_rater::external::yahoofinance::YahooFinanceProvider;
use stock_rater::logging::{init_logging, LoggingConfig};
use stock_rater::services::report_service;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env());

    let cli = Cli::parse();
    let tickers = cli.load_tickers()?;

    let provider = YahooFinanceProvider::new();
    let records = report_service::build_report(&provider, &tickers, cli.days).await;
    report_service::write_report(&records, &cli.output)?;

    tracing::info!("wrote {} rows to {}", records.len(), cli.output.display());
    Ok(())
}
