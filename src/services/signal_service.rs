use crate::models::{IndicatorRow, IndicatorSnapshot, PricePoint, SignalLabel};
use crate::services::indicators::{macd, rsi, sma};

pub const SMA_FAST_WINDOW: usize = 50;
pub const SMA_SLOW_WINDOW: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST_SPAN: usize = 12;
pub const MACD_SLOW_SPAN: usize = 26;
pub const MACD_SIGNAL_SPAN: usize = 9;

/// Augment a price series with SMA50, SMA200, RSI14 and MACD(12,26,9).
pub fn compute_indicators(points: &[PricePoint]) -> Vec<IndicatorRow> {
    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();

    let sma50 = sma(&closes, SMA_FAST_WINDOW);
    let sma200 = sma(&closes, SMA_SLOW_WINDOW);
    let rsi14 = rsi(&closes, RSI_PERIOD);
    let (macd_line, signal_line, histogram) =
        macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN);

    points
        .iter()
        .enumerate()
        .map(|(i, p)| IndicatorRow {
            date: p.date,
            close: p.close,
            sma50: sma50[i],
            sma200: sma200[i],
            rsi14: rsi14[i],
            macd: macd_line[i],
            macd_signal: signal_line[i],
            macd_hist: histogram[i],
        })
        .collect()
}

/// Drop rows with any undefined indicator field, keeping only rows the
/// labeler can evaluate.
pub fn drop_incomplete(rows: &[IndicatorRow]) -> Vec<IndicatorSnapshot> {
    rows.iter()
        .filter(|r| r.is_complete())
        .map(|r| IndicatorSnapshot {
            date: r.date,
            close: r.close,
            sma50: r.sma50.unwrap_or_default(),
            sma200: r.sma200.unwrap_or_default(),
            rsi14: r.rsi14.unwrap_or_default(),
            macd: r.macd,
            macd_signal: r.macd_signal,
            macd_hist: r.macd_hist,
        })
        .collect()
}

/// Map the latest two snapshots to a rating.
///
/// The rules form an ordered chain; the first match wins. Trend is strictly
/// SMA50 vs SMA200, so an exact tie is neither uptrend nor downtrend.
pub fn label_signal(rows: &[IndicatorSnapshot]) -> SignalLabel {
    if rows.len() < 2 {
        return SignalLabel::InsufficientData;
    }

    let last = &rows[rows.len() - 1];
    let prev = &rows[rows.len() - 2];

    let uptrend = last.sma50 > last.sma200;
    let downtrend = last.sma50 < last.sma200;

    let macd_cross_up = prev.macd <= prev.macd_signal && last.macd > last.macd_signal;
    let macd_cross_down = prev.macd >= prev.macd_signal && last.macd < last.macd_signal;

    if uptrend && macd_cross_up && (30.0..=60.0).contains(&last.rsi14) {
        return SignalLabel::StrongBuy;
    }
    if uptrend && (last.macd > last.macd_signal || last.rsi14 < 35.0) {
        return SignalLabel::Buy;
    }
    if downtrend && macd_cross_down && (40.0..=70.0).contains(&last.rsi14) {
        return SignalLabel::StrongSell;
    }
    if downtrend && (last.macd < last.macd_signal || last.rsi14 > 65.0) {
        return SignalLabel::Sell;
    }

    SignalLabel::HoldNeutral
}
