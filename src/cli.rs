use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::errors::AppError;

/// Rates stock tickers (Strong Buy / Buy / Hold / Sell / Strong Sell) from
/// daily price history and writes a CSV report.
#[derive(Parser, Debug)]
#[command(name = "stock-rater")]
#[command(group = ArgGroup::new("source").required(true))]
pub struct Cli {
    /// Space-separated tickers, e.g. AAPL MSFT NVDA
    #[arg(long, num_args = 1.., group = "source")]
    pub tickers: Option<Vec<String>>,

    /// Path to a file with one ticker per line
    #[arg(long, group = "source")]
    pub tickers_file: Option<PathBuf>,

    /// How many days of history to fetch
    #[arg(long, default_value_t = 450)]
    pub days: u32,

    /// CSV output path
    #[arg(long, default_value = "output/results.csv")]
    pub output: PathBuf,
}

impl Cli {
    /// Resolve the requested ticker list, upper-cased, order preserved.
    pub fn load_tickers(&self) -> Result<Vec<String>, AppError> {
        if let Some(tickers) = &self.tickers {
            return Ok(tickers.iter().map(|t| t.trim().to_uppercase()).collect());
        }
        if let Some(path) = &self.tickers_file {
            let contents = std::fs::read_to_string(path)?;
            return Ok(parse_ticker_lines(&contents));
        }
        Err(AppError::Usage(
            "provide --tickers or --tickers-file".to_string(),
        ))
    }
}

/// One ticker per line; blank lines and `#` comment lines are skipped.
pub fn parse_ticker_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ticker_lines_skips_blanks_and_comments() {
        let contents = "AAPL\n# comment\n\nMSFT\n";
        assert_eq!(parse_ticker_lines(contents), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_parse_ticker_lines_uppercases() {
        assert_eq!(parse_ticker_lines("aapl\nmsft"), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_requires_exactly_one_ticker_source() {
        assert!(Cli::try_parse_from(["stock-rater"]).is_err());
        assert!(Cli::try_parse_from([
            "stock-rater",
            "--tickers",
            "AAPL",
            "--tickers-file",
            "tickers.txt"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["stock-rater", "--tickers", "AAPL", "MSFT"]).is_ok());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["stock-rater", "--tickers", "AAPL"]).unwrap();
        assert_eq!(cli.days, 450);
        assert_eq!(cli.output, PathBuf::from("output/results.csv"));
    }
}
