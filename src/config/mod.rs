use serde::{Deserialize, Serialize};
use std::env;

const FIRST_ROW_VAR: &str = "CADERNETA_FIRST_ROW";
const TOTALS_ROW_VAR: &str = "CADERNETA_TOTALS_ROW";
const SUMMARY_ROW_VAR: &str = "CADERNETA_SUMMARY_ROW";

/// Row placement of the backing sheet.
///
/// Day 1 of every month sits on `first_day_row`; the sheet's own column sums
/// live on `totals_row`, and the derived saída-total and performance cells on
/// `summary_row`. Column placement is not configurable, see `crate::sheet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    pub first_day_row: u32,
    pub totals_row: u32,
    pub summary_row: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            first_day_row: 5,
            totals_row: 37,
            summary_row: 38,
        }
    }
}

impl SheetConfig {
    /// Builds the config from environment overrides on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(row) = read_row(FIRST_ROW_VAR) {
            config.first_day_row = row;
        }
        if let Some(row) = read_row(TOTALS_ROW_VAR) {
            config.totals_row = row;
        }
        if let Some(row) = read_row(SUMMARY_ROW_VAR) {
            config.summary_row = row;
        }
        config
    }

    /// Loads the config from a JSON document, e.g. a deployment snapshot.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

fn read_row(var: &str) -> Option<u32> {
    env::var(var).ok()?.trim().parse().ok().filter(|row| *row > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_sheet() {
        let config = SheetConfig::default();
        assert_eq!(config.first_day_row, 5);
        assert_eq!(config.totals_row, 37);
        assert_eq!(config.summary_row, 38);
    }

    #[test]
    fn loads_from_json() {
        let config =
            SheetConfig::from_json(r#"{"first_day_row":3,"totals_row":40,"summary_row":41}"#)
                .unwrap();
        assert_eq!(config.first_day_row, 3);
        assert_eq!(config.totals_row, 40);
    }
}
