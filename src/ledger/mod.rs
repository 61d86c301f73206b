//! Ledger engine and report types.

pub mod engine;
pub mod report;

pub use engine::LedgerEngine;
pub use report::{
    CompareReport, DayRecord, ForecastOutlook, MonthSummary, UpdateOutcome, WeekSummary,
};
