//! Cell addressing for the month-block sheet layout.
//!
//! Every month owns a fixed-width block of columns; every day of the month
//! owns one row. Coordinates are derived on demand and never stored.

use std::fmt;

use crate::config::SheetConfig;
use crate::errors::CoreError;

/// Physical columns per month block: day label, the four value fields, and a
/// trailing spacer column.
pub const BLOCK_WIDTH: u32 = 6;

/// The four value fields plus the day label column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Dia,
    Entrada,
    Saida,
    Diario,
    Saldo,
}

impl Field {
    /// Column offset inside a month block, 1-indexed like the sheet itself.
    pub fn offset(self) -> u32 {
        match self {
            Field::Dia => 1,
            Field::Entrada => 2,
            Field::Saida => 3,
            Field::Diario => 4,
            Field::Saldo => 5,
        }
    }
}

/// One cell position, 1-indexed. `Display` renders the A1 form ("G12").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// Rectangular cell range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Derived placement of one (month, year) block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    pub month: u32,
    pub year: i32,
    pub base_col: u32,
    pub first_row: u32,
    pub totals_row: u32,
    pub summary_row: u32,
    pub last_day: u32,
}

impl MonthLayout {
    pub fn of(month: u32, year: i32, config: &SheetConfig) -> Self {
        Self {
            month,
            year,
            base_col: (month - 1) * BLOCK_WIDTH,
            first_row: config.first_day_row,
            totals_row: config.totals_row,
            summary_row: config.summary_row,
            last_day: last_valid_day(month, year),
        }
    }

    /// Cell of one field on one day. Days past the month's end are an error,
    /// never clamped.
    pub fn cell(&self, field: Field, day: u32) -> Result<CellCoord, CoreError> {
        self.check_day(day)?;
        Ok(CellCoord {
            col: self.base_col + field.offset(),
            row: self.first_row + day - 1,
        })
    }

    /// Single-row range spanning contiguous fields of one day.
    pub fn day_range(&self, first: Field, last: Field, day: u32) -> Result<CellRange, CoreError> {
        Ok(CellRange {
            start: self.cell(first, day)?,
            end: self.cell(last, day)?,
        })
    }

    /// Range covering contiguous field columns across every day of the month.
    pub fn column_range(&self, first: Field, last: Field) -> CellRange {
        CellRange {
            start: CellCoord {
                col: self.base_col + first.offset(),
                row: self.first_row,
            },
            end: CellCoord {
                col: self.base_col + last.offset(),
                row: self.first_row + self.last_day - 1,
            },
        }
    }

    /// Cell holding the sheet's own sum of a field column.
    pub fn total_cell(&self, field: Field) -> CellCoord {
        CellCoord {
            col: self.base_col + field.offset(),
            row: self.totals_row,
        }
    }

    /// Cell on the summary row (saída total under `Saida`, performance under
    /// `Saldo`).
    pub fn summary_cell(&self, field: Field) -> CellCoord {
        CellCoord {
            col: self.base_col + field.offset(),
            row: self.summary_row,
        }
    }

    fn check_day(&self, day: u32) -> Result<(), CoreError> {
        if day == 0 || day > self.last_day {
            return Err(CoreError::InvalidDay {
                day,
                month: self.month,
                year: self.year,
                last: self.last_day,
            });
        }
        Ok(())
    }
}

/// Length of a month, honoring Gregorian leap years.
pub fn last_valid_day(month: u32, year: i32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn column_letters(mut col: u32) -> String {
    let mut letters = String::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.insert(0, (b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(month: u32, year: i32) -> MonthLayout {
        MonthLayout::of(month, year, &SheetConfig::default())
    }

    #[test]
    fn month_lengths() {
        assert_eq!(last_valid_day(1, 2025), 31);
        assert_eq!(last_valid_day(4, 2025), 30);
        assert_eq!(last_valid_day(2, 2023), 28);
        assert_eq!(last_valid_day(2, 2024), 29);
        assert_eq!(last_valid_day(2, 2000), 29);
        assert_eq!(last_valid_day(2, 2100), 28);
    }

    #[test]
    fn january_block_starts_at_column_one() {
        let coord = layout(1, 2025).cell(Field::Entrada, 1).unwrap();
        assert_eq!(coord, CellCoord { col: 2, row: 5 });
    }

    #[test]
    fn december_block_is_offset_by_eleven_blocks() {
        let coord = layout(12, 2025).cell(Field::Saldo, 31).unwrap();
        assert_eq!(coord.col, 11 * BLOCK_WIDTH + 5);
        assert_eq!(coord.row, 35);
    }

    #[test]
    fn day_past_month_end_is_an_error() {
        let err = layout(4, 2025).cell(Field::Diario, 31).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDay { day: 31, last: 30, .. }));
        assert!(layout(2, 2024).cell(Field::Diario, 29).is_ok());
        assert!(layout(2, 2023).cell(Field::Diario, 29).is_err());
    }

    #[test]
    fn column_range_covers_whole_month() {
        let range = layout(2, 2024).column_range(Field::Entrada, Field::Diario);
        assert_eq!(range.start, CellCoord { col: 8, row: 5 });
        assert_eq!(range.end, CellCoord { col: 10, row: 33 });
    }

    #[test]
    fn renders_a1_notation() {
        assert_eq!(CellCoord { col: 1, row: 5 }.to_string(), "A5");
        assert_eq!(CellCoord { col: 26, row: 1 }.to_string(), "Z1");
        assert_eq!(CellCoord { col: 27, row: 10 }.to_string(), "AA10");
        assert_eq!(CellCoord { col: 71, row: 35 }.to_string(), "BS35");
        let range = CellRange {
            start: CellCoord { col: 2, row: 5 },
            end: CellCoord { col: 5, row: 5 },
        };
        assert_eq!(range.to_string(), "B5:E5");
    }

    #[test]
    fn totals_cells_sit_below_the_day_grid() {
        let layout = layout(3, 2025);
        assert_eq!(layout.total_cell(Field::Entrada), CellCoord { col: 14, row: 37 });
        assert_eq!(layout.summary_cell(Field::Saldo), CellCoord { col: 17, row: 38 });
    }
}
