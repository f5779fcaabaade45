pub mod indicators;
pub mod report_service;
pub mod signal_service;
