pub mod indicator_row;
pub mod price_point;
pub mod report;

pub use indicator_row::{IndicatorRow, IndicatorSnapshot};
pub use price_point::PricePoint;
pub use report::{ReportRecord, SignalLabel, TickerStatus};
