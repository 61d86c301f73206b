//! Date anchoring and natural-language date resolution.
//!
//! All relative keywords resolve against an anchor taken once per incoming
//! message, never against the host clock inside business logic.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed wall-clock offset the ledger runs on (Brasília time). A constant,
/// not a config knob: "hoje" must mean the same day in every deployment.
pub const UTC_OFFSET_HOURS: i32 = -3;

static DAY_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?$").unwrap());

/// Current moment in the fixed ledger timezone.
pub fn anchor_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(UTC_OFFSET_HOURS * 3600).unwrap();
    Utc::now().with_timezone(&offset)
}

/// Resolves a date token, falling back to the anchor's own date.
///
/// Total by contract: unrecognized input means "today", never an error.
pub fn resolve(token: &str, anchor: DateTime<FixedOffset>) -> NaiveDate {
    parse_token(token, anchor).unwrap_or_else(|| anchor.date_naive())
}

/// Strict single-token variant: relative keyword or `dd/mm[/yy[yy]]`.
pub fn parse_token(token: &str, anchor: DateTime<FixedOffset>) -> Option<NaiveDate> {
    let today = anchor.date_naive();
    match token.trim().to_lowercase().as_str() {
        "hoje" => Some(today),
        "ontem" => Some(today - Duration::days(1)),
        "amanha" | "amanhã" => Some(today + Duration::days(1)),
        normalized => parse_numeric(normalized, today),
    }
}

fn parse_numeric(token: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = DAY_MONTH.captures(token)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = match caps.get(3) {
        Some(m) if m.as_str().len() == 2 => 2000 + m.as_str().parse::<i32>().ok()?,
        Some(m) => m.as_str().parse().ok()?,
        None => today.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
