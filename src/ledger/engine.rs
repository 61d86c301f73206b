//! Mutations and aggregations over the backing sheet.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::SheetConfig;
use crate::currency;
use crate::ledger::report::{
    CompareReport, DayRecord, ForecastOutlook, MonthSummary, UpdateOutcome, WeekSummary,
};
use crate::parser::EntryKind;
use crate::sheet::{last_valid_day, CellCoord, Field, MonthLayout};
use crate::storage::{Result, SheetStore};

/// Applies chat commands to the sheet and computes its reports.
///
/// Holds no cell state: every operation re-reads storage. Two concurrent adds
/// against the same cell race (each performs its own read-modify-write and
/// the last write wins); accepted consistency gap, there is no cross-request
/// lock or transaction.
pub struct LedgerEngine<S> {
    store: Arc<S>,
    config: SheetConfig,
}

impl<S: SheetStore> LedgerEngine<S> {
    pub fn new(store: Arc<S>, config: SheetConfig) -> Self {
        Self { store, config }
    }

    /// Adds onto (or, with `replace`, overwrites) one day's field.
    pub async fn apply_update(
        &self,
        kind: EntryKind,
        amount: f64,
        date: NaiveDate,
        replace: bool,
    ) -> Result<UpdateOutcome> {
        let layout = self.layout(date.month(), date.year());
        let coord = layout.cell(field_for(kind), date.day())?;
        let total = if replace {
            amount
        } else {
            currency::parse_cell(&self.store.read_cell(coord).await?) + amount
        };
        tracing::debug!(cell = %coord, amount, replace, "recording update");
        self.store
            .write_cell(coord, &currency::format_brl(total))
            .await?;
        Ok(UpdateOutcome {
            kind,
            date,
            delta: amount,
            total,
            replaced: replace,
        })
    }

    /// One range read covering the four value cells of a day.
    pub async fn day_report(&self, date: NaiveDate) -> Result<DayRecord> {
        let layout = self.layout(date.month(), date.year());
        let range = layout.day_range(Field::Entrada, Field::Saldo, date.day())?;
        let grid = self.store.read_range(range).await?;
        let row = grid.first().map(Vec::as_slice).unwrap_or(&[]);
        Ok(DayRecord {
            entrada: cell_at(row, 0),
            saida: cell_at(row, 1),
            diario: cell_at(row, 2),
            saldo: cell_at(row, 3),
        })
    }

    /// Totals for the 7 days ending at `until` inclusive. Days are read one
    /// by one: a week can straddle two month blocks, which a single
    /// rectangular range cannot express.
    pub async fn week_report(&self, until: NaiveDate) -> Result<WeekSummary> {
        let start = until - Duration::days(6);
        let mut summary = WeekSummary {
            start,
            end: until,
            entradas: 0.0,
            saidas: 0.0,
            diario: 0.0,
            saldo: 0.0,
        };
        for offset in 0..7 {
            let day = start + Duration::days(offset);
            let record = self.day_report(day).await?;
            summary.entradas += record.entrada;
            summary.saidas += record.saida;
            summary.diario += record.diario;
            if day == until {
                summary.saldo = record.saldo;
            }
        }
        Ok(summary)
    }

    /// Month aggregate: one batched read of the five totals cells plus one
    /// range read over the mutable columns to count days with data.
    pub async fn month_totals(&self, month: u32, year: i32) -> Result<MonthSummary> {
        let layout = self.layout(month, year);
        let coords = [
            layout.total_cell(Field::Entrada),
            layout.total_cell(Field::Saida),
            layout.total_cell(Field::Diario),
            layout.summary_cell(Field::Saida),
            layout.summary_cell(Field::Saldo),
        ];
        let cells = self.store.batch_read(&coords).await?;
        let value = |coord: CellCoord| {
            currency::parse_cell(cells.get(&coord).map(String::as_str).unwrap_or(""))
        };

        let grid = self
            .store
            .read_range(layout.column_range(Field::Entrada, Field::Diario))
            .await?;
        let days_with_data = grid
            .iter()
            .filter(|row| row.iter().any(|cell| currency::parse_cell(cell) > 0.0))
            .count() as u32;

        let entradas = value(coords[0]);
        let saidas = value(coords[1]);
        let diario = value(coords[2]);
        let average_daily = if days_with_data == 0 {
            0.0
        } else {
            (entradas + saidas + diario) / days_with_data as f64
        };
        Ok(MonthSummary {
            month,
            year,
            entradas,
            saidas,
            diario,
            saida_total: value(coords[3]),
            performance: value(coords[4]),
            days_with_data,
            average_daily,
        })
    }

    /// Current month against the previous one; the two aggregates are
    /// independent and read concurrently.
    pub async fn compare_report(&self, anchor: NaiveDate) -> Result<CompareReport> {
        let (month, year) = (anchor.month(), anchor.year());
        let (prev_month, prev_year) = if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        };
        let (current, previous) = futures::join!(
            self.month_totals(month, year),
            self.month_totals(prev_month, prev_year)
        );
        Ok(CompareReport {
            current: current?,
            previous: previous?,
        })
    }

    /// Projects the month's spending to its last day from the per-day
    /// average of the days that have data so far.
    pub async fn forecast_report(&self, anchor: NaiveDate) -> Result<ForecastOutlook> {
        let summary = self.month_totals(anchor.month(), anchor.year()).await?;
        let last = last_valid_day(anchor.month(), anchor.year());
        let remaining = last - anchor.day();
        let mut outlook = ForecastOutlook {
            month: summary.month,
            year: summary.year,
            days_with_data: summary.days_with_data,
            days_remaining: remaining,
            saidas: summary.saidas,
            diario: summary.diario,
            saida_total: summary.saida_total,
            performance: summary.performance,
        };
        if summary.days_with_data > 0 {
            let per_day = summary.days_with_data as f64;
            let remaining = remaining as f64;
            outlook.saidas = summary.saidas + summary.saidas / per_day * remaining;
            outlook.diario = summary.diario + summary.diario / per_day * remaining;
            outlook.saida_total =
                summary.saida_total + summary.saida_total / per_day * remaining;
            outlook.performance = summary.entradas - outlook.saida_total;
        }
        Ok(outlook)
    }

    fn layout(&self, month: u32, year: i32) -> MonthLayout {
        MonthLayout::of(month, year, &self.config)
    }
}

fn field_for(kind: EntryKind) -> Field {
    match kind {
        EntryKind::Entrada => Field::Entrada,
        EntryKind::Saida => Field::Saida,
        EntryKind::Diario => Field::Diario,
    }
}

fn cell_at(row: &[String], index: usize) -> f64 {
    currency::parse_cell(row.get(index).map(String::as_str).unwrap_or(""))
}
