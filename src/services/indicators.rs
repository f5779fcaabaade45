/// Simple Moving Average (SMA)
/// Returns a vector aligned with `values`:
/// - `None` until enough values exist
/// - `Some(avg)` after `window` values
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    // Running sum via scan; the value that falls out of the window is
    // subtracted back off.
    values
        .iter()
        .enumerate()
        .scan(0.0_f64, move |sum, (i, &v)| {
            *sum += v;
            if i >= window {
                *sum -= values[i - window];
            }

            let out = if i + 1 >= window {
                Some(*sum / window as f64)
            } else {
                None
            };

            Some(out)
        })
        .collect()
}

/// Exponential Moving Average (EMA)
///
/// Recursive form with `alpha = 2 / (span + 1)`, seeded at the first value.
/// Defined from the first row onward; the output is only numerically
/// meaningful after a warm-up of several spans.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    if values.is_empty() || span == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);
    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// Relative Strength Index (RSI)
///
/// Day-over-day differences split into gains and losses, each averaged with a
/// trailing simple moving average over `period` differences:
///   RS  = avg_gain / avg_loss
///   RSI = 100 - 100 / (1 + RS)
///
/// Returns `None` for the first `period` rows and wherever the average loss
/// is exactly zero. The zero-loss case is deliberately left undefined rather
/// than reported as the conventional RSI = 100.
pub fn rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = prices.len();
    if period == 0 || n <= period {
        return vec![None; n];
    }

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = changes.iter().map(|&c| c.max(0.0)).collect();
    let losses: Vec<f64> = changes.iter().map(|&c| (-c).max(0.0)).collect();

    let mut result = vec![None; n];
    let mut gain_sum: f64 = gains[..period].iter().sum();
    let mut loss_sum: f64 = losses[..period].iter().sum();

    for i in period..n {
        if i > period {
            // Slide the window one difference forward.
            gain_sum += gains[i - 1] - gains[i - 1 - period];
            loss_sum += losses[i - 1] - losses[i - 1 - period];
        }

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;

        result[i] = if avg_loss == 0.0 {
            None
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - (100.0 / (1.0 + rs)))
        };
    }

    result
}

/// Moving Average Convergence Divergence (MACD)
///
/// - MACD line: EMA(fast) - EMA(slow)
/// - Signal line: EMA of the MACD line over `signal_span`
/// - Histogram: MACD line - signal line
///
/// All three are defined from the first row because the EMAs are seeded at
/// the first value.
///
/// Returns: (macd_line, signal_line, histogram)
pub fn macd(
    prices: &[f64],
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    if prices.is_empty() {
        return (Vec::new(), Vec::new(), Vec::new());
    }

    let fast_ema = ema(prices, fast_span);
    let slow_ema = ema(prices, slow_span);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();

    let signal_line = ema(&macd_line, signal_span);

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    (macd_line, signal_line, histogram)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 250-day series that trends up but keeps regular small pullbacks, so
    /// both gains and losses stay in every RSI window.
    fn wavy_uptrend(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + i as f64 * 0.3 + (i as f64 * 0.9).sin() * 2.0)
            .collect()
    }

    #[test]
    fn test_sma_window_alignment() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let out = sma(&values, 3);

        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn test_ema_seeded_at_first_value() {
        let values = vec![10.0, 13.0, 13.0];
        let out = ema(&values, 3);

        // alpha = 0.5 for span 3
        assert_eq!(out[0], 10.0);
        assert!((out[1] - 11.5).abs() < 1e-12);
        assert!((out[2] - 12.25).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_undefined_for_first_period_rows() {
        let prices = wavy_uptrend(40);
        let out = rsi(&prices, 14);

        for v in &out[..14] {
            assert!(v.is_none());
        }
        assert!(out[14].is_some());
    }

    #[test]
    fn test_rsi_bounded_on_long_series() {
        let prices = wavy_uptrend(250);
        for v in rsi(&prices, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {}", v);
        }
    }

    #[test]
    fn test_rsi_flat_series_is_undefined() {
        // Constant closes have zero losses, which trips the division guard.
        let prices = vec![50.0; 30];
        assert!(rsi(&prices, 14).iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_gain_only_series_is_undefined() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert!(rsi(&prices, 14).iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_loss_only_series_is_zero() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&prices, 14);
        for v in out.into_iter().flatten() {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn test_macd_defined_from_first_row() {
        let prices = wavy_uptrend(60);
        let (line, signal, hist) = macd(&prices, 12, 26, 9);

        assert_eq!(line.len(), prices.len());
        assert_eq!(signal.len(), prices.len());
        assert_eq!(hist.len(), prices.len());
        assert_eq!(line[0], 0.0);
        assert_eq!(signal[0], line[0]);
    }

    #[test]
    fn test_macd_histogram_identity() {
        let prices = wavy_uptrend(120);
        let (line, signal, hist) = macd(&prices, 12, 26, 9);

        for i in 0..prices.len() {
            assert!((hist[i] - (line[i] - signal[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let prices: Vec<f64> = (0..120).map(|i| 100.0 + i as f64 * 0.5).collect();
        let (line, _, _) = macd(&prices, 12, 26, 9);
        assert!(*line.last().unwrap() > 0.0, "uptrend should lift MACD above zero");
    }
}
