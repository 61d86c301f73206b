//! Aggregate report types and their chat rendering.

use chrono::NaiveDate;

use crate::currency::format_brl;
use crate::parser::EntryKind;

/// Outcome of one add-or-replace mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub kind: EntryKind,
    pub date: NaiveDate,
    /// Amount the command carried.
    pub delta: f64,
    /// Value now stored in the cell.
    pub total: f64,
    pub replaced: bool,
}

impl UpdateOutcome {
    pub fn render(&self) -> String {
        let day = self.date.format("%d/%m/%Y");
        if self.replaced {
            format!(
                "✅ {} de {} agora é {}",
                self.kind.label(),
                day,
                format_brl(self.total)
            )
        } else {
            format!(
                "✅ {} de {} em {} (total do dia: {})",
                self.kind.label(),
                format_brl(self.delta),
                day,
                format_brl(self.total)
            )
        }
    }
}

/// The four value fields of one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayRecord {
    pub entrada: f64,
    pub saida: f64,
    pub diario: f64,
    pub saldo: f64,
}

impl DayRecord {
    pub fn render(&self, date: NaiveDate) -> String {
        format!(
            "📊 Resumo de {}\nEntradas: {}\nSaídas: {}\nDiário: {}\nSaldo: {}",
            date.format("%d/%m/%Y"),
            format_brl(self.entrada),
            format_brl(self.saida),
            format_brl(self.diario),
            format_brl(self.saldo)
        )
    }
}

/// Totals of the 7 days ending at `end`; `saldo` is the latest day's balance,
/// not a sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entradas: f64,
    pub saidas: f64,
    pub diario: f64,
    pub saldo: f64,
}

impl WeekSummary {
    pub fn render(&self) -> String {
        format!(
            "🗓 Semana de {} a {}\nEntradas: {}\nSaídas: {}\nDiário: {}\nSaldo atual: {}",
            self.start.format("%d/%m"),
            self.end.format("%d/%m/%Y"),
            format_brl(self.entradas),
            format_brl(self.saidas),
            format_brl(self.diario),
            format_brl(self.saldo)
        )
    }
}

/// Month aggregate as stored by the sheet's own totals cells, plus the
/// days-with-data count derived from the day grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthSummary {
    pub month: u32,
    pub year: i32,
    pub entradas: f64,
    pub saidas: f64,
    pub diario: f64,
    pub saida_total: f64,
    pub performance: f64,
    pub days_with_data: u32,
    pub average_daily: f64,
}

impl MonthSummary {
    pub fn title(&self) -> String {
        format!("{}/{}", month_name(self.month), self.year)
    }

    pub fn render_month(&self) -> String {
        let average = if self.days_with_data == 0 {
            "n/d".to_string()
        } else {
            format_brl(self.average_daily)
        };
        format!(
            "📅 {}\nEntradas: {}\nSaídas: {}\nDiário: {}\nSaída total: {}\nPerformance: {}\nDias com lançamentos: {}\nMédia diária: {}",
            self.title(),
            format_brl(self.entradas),
            format_brl(self.saidas),
            format_brl(self.diario),
            format_brl(self.saida_total),
            format_brl(self.performance),
            self.days_with_data,
            average
        )
    }

    pub fn render_performance(&self) -> String {
        if self.days_with_data == 0 {
            return format!("📈 Ainda não há lançamentos em {}.", self.title());
        }
        format!(
            "📈 Performance de {}\nEntradas: {}\nSaída total: {}\nResultado: {}",
            self.title(),
            format_brl(self.entradas),
            format_brl(self.saida_total),
            format_brl(self.performance)
        )
    }
}

/// Current month against the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareReport {
    pub current: MonthSummary,
    pub previous: MonthSummary,
}

impl CompareReport {
    pub fn render(&self) -> String {
        format!(
            "🔁 {} x {}\nEntradas: {}\nSaída total: {}\nPerformance: {}",
            self.current.title(),
            self.previous.title(),
            delta_line(self.current.entradas, self.previous.entradas),
            delta_line(self.current.saida_total, self.previous.saida_total),
            delta_line(self.current.performance, self.previous.performance)
        )
    }
}

/// End-of-month projection from the per-day-with-data averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastOutlook {
    pub month: u32,
    pub year: i32,
    pub days_with_data: u32,
    pub days_remaining: u32,
    pub saidas: f64,
    pub diario: f64,
    pub saida_total: f64,
    pub performance: f64,
}

impl ForecastOutlook {
    pub fn render(&self) -> String {
        if self.days_with_data == 0 {
            return format!(
                "🔮 Ainda não há lançamentos em {}/{} para projetar.",
                month_name(self.month),
                self.year
            );
        }
        format!(
            "🔮 Previsão para {}/{}\nSaídas: {}\nDiário: {}\nSaída total: {}\nPerformance: {}\n({} dias lançados, {} restantes)",
            month_name(self.month),
            self.year,
            format_brl(self.saidas),
            format_brl(self.diario),
            format_brl(self.saida_total),
            format_brl(self.performance),
            self.days_with_data,
            self.days_remaining
        )
    }
}

fn delta_line(current: f64, previous: f64) -> String {
    let delta = current - previous;
    if delta > 0.004 {
        format!("📈 +{}", format_brl(delta))
    } else if delta < -0.004 {
        format!("📉 {}", format_brl(delta))
    } else {
        format!("➖ {}", format_brl(0.0))
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Janeiro",
        2 => "Fevereiro",
        3 => "Março",
        4 => "Abril",
        5 => "Maio",
        6 => "Junho",
        7 => "Julho",
        8 => "Agosto",
        9 => "Setembro",
        10 => "Outubro",
        11 => "Novembro",
        12 => "Dezembro",
        _ => "",
    }
}
