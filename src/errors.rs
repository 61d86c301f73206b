use thiserror::Error;

/// Error type that captures the failures a command can surface.
///
/// Parse failures are not errors (the parser returns `None` and the
/// dispatcher falls back to help), and unreadable cell numbers are not
/// errors either (they read as zero so old garbage never breaks a report).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("dia {day} não existe em {month:02}/{year} (o mês vai até {last})")]
    InvalidDay {
        day: u32,
        month: u32,
        year: i32,
        last: u32,
    },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("fallback responder error: {0}")]
    Responder(String),
}
