//! Classification of free-form chat text into ledger commands.
//!
//! Rules run in a fixed priority order and the first match wins. Parsing is
//! pure: the same text plus the same anchor always yields the same command,
//! and unrecognized input is `None`, never an error.

use chrono::{DateTime, FixedOffset, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::currency;
use crate::dates;

/// Which ledger field an add command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Entrada,
    Saida,
    Diario,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Entrada => "Entrada",
            EntryKind::Saida => "Saída",
            EntryKind::Diario => "Diário",
        }
    }
}

/// One recognized chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        kind: EntryKind,
        amount: f64,
        date: NaiveDate,
        replace: bool,
    },
    SaldoToday,
    SaldoOn {
        date: NaiveDate,
    },
    Week,
    Month,
    Performance,
    Compare,
    Forecast,
    Help,
}

static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}(?:/(?:\d{4}|\d{2}))?\b").unwrap());

static RELATIVE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:hoje|ontem|amanh[aã])\b").unwrap());

static BALANCE_QUERY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:saldo|resumo|extrato)\b\s*(.*)$").unwrap());

static KEYWORD_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:entradas?|sa[ií]das?|di[aá]rio|saldo|resumo|extrato|sub)\b").unwrap()
});

static NUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)*").unwrap());

static PURE_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)*$").unwrap());

/// Classifies one message. `None` means unrecognized; the dispatcher decides
/// what to do with those.
pub fn parse(text: &str, anchor: DateTime<FixedOffset>) -> Option<Command> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    // 1. substitution marker switches add semantics to overwrite
    let (body, replace) = match strip_marker(&lowered) {
        Some(rest) => (rest, true),
        None => (lowered.as_str(), false),
    };
    if body.is_empty() {
        return None;
    }

    // 2. help
    if matches!(body, "ajuda" | "help" | "?") {
        return Some(Command::Help);
    }

    // 3. analysis keywords, no value or date extraction
    let first = body.split_whitespace().next().unwrap_or(body);
    match first {
        "performance" | "desempenho" => return Some(Command::Performance),
        "comparar" | "compara" | "comparativo" | "comparacao" | "comparação" => {
            return Some(Command::Compare)
        }
        "previsao" | "previsão" | "prever" | "projecao" | "projeção" => {
            return Some(Command::Forecast)
        }
        _ => {}
    }

    // 4/5/6. balance queries, bare or with an explicit day
    if let Some(caps) = BALANCE_QUERY.captures(body) {
        let rest = caps[1].trim();
        match rest {
            "" | "hoje" => return Some(Command::SaldoToday),
            "semana" | "semanal" => return Some(Command::Week),
            "mes" | "mês" | "mensal" => return Some(Command::Month),
            _ => {
                if let Some(date) = dates::parse_token(rest, anchor) {
                    return Some(Command::SaldoOn { date });
                }
                // "saldo <ruído>" keeps falling through the rule chain
            }
        }
    }

    // 5. standalone relative-day queries
    match body {
        "hoje" => return Some(Command::SaldoToday),
        "ontem" | "amanha" | "amanhã" => {
            return Some(Command::SaldoOn {
                date: dates::resolve(body, anchor),
            })
        }
        _ => {}
    }

    // 6. week/month aggregates
    match first {
        "semana" | "semanal" => return Some(Command::Week),
        "mes" | "mês" | "mensal" => return Some(Command::Month),
        _ => {}
    }

    // 7. explicit add keywords anywhere in the text
    if body.contains("entrada") {
        return parse_add(EntryKind::Entrada, body, replace, anchor);
    }
    if body.contains("saida") || body.contains("saída") {
        return parse_add(EntryKind::Saida, body, replace, anchor);
    }
    if body.contains("diario") || body.contains("diário") {
        return parse_add(EntryKind::Diario, body, replace, anchor);
    }

    // 8. bare amount shorthand for the daily spend
    parse_bare_amount(body, replace, anchor)
}

fn strip_marker(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("sub")?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

fn parse_add(
    kind: EntryKind,
    body: &str,
    replace: bool,
    anchor: DateTime<FixedOffset>,
) -> Option<Command> {
    let amount = extract_amount(body)?;
    Some(Command::Add {
        kind,
        amount,
        date: extract_date(body, anchor),
        replace,
    })
}

fn parse_bare_amount(
    body: &str,
    replace: bool,
    anchor: DateTime<FixedOffset>,
) -> Option<Command> {
    let stripped = strip_tokens(body);
    let rest = stripped.trim();
    if !PURE_AMOUNT.is_match(rest) {
        return None;
    }
    Some(Command::Add {
        kind: EntryKind::Diario,
        amount: currency::normalize_amount(rest)?,
        date: extract_date(body, anchor),
        replace,
    })
}

/// Relative keyword first, then a numeric date, then the anchor's own day.
fn extract_date(body: &str, anchor: DateTime<FixedOffset>) -> NaiveDate {
    if let Some(token) = RELATIVE_TOKEN.find(body) {
        return dates::resolve(token.as_str(), anchor);
    }
    if let Some(token) = DATE_TOKEN.find(body) {
        return dates::resolve(token.as_str(), anchor);
    }
    anchor.date_naive()
}

/// Takes the single remaining numeric run after keyword and date stripping.
/// More than one run is ambiguous and parses as unrecognized.
fn extract_amount(body: &str) -> Option<f64> {
    let stripped = strip_tokens(body);
    let mut runs = NUMERIC_RUN.find_iter(&stripped);
    let run = runs.next()?;
    if runs.next().is_some() {
        return None;
    }
    currency::normalize_amount(run.as_str())
}

fn strip_tokens(body: &str) -> String {
    let no_dates = DATE_TOKEN.replace_all(body, " ");
    let no_relative = RELATIVE_TOKEN.replace_all(&no_dates, " ");
    KEYWORD_TOKEN.replace_all(&no_relative, " ").into_owned()
}
