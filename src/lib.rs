#![doc(test(attr(deny(warnings))))]

//! Caderneta Core turns free-form Portuguese chat commands into deterministic
//! mutations and reports over a calendar-shaped spreadsheet ledger.
//!
//! The chat transport and the concrete sheet backend stay outside; they plug
//! in through [`bot::Dispatcher`] and [`storage::SheetStore`].

pub mod bot;
pub mod config;
pub mod currency;
pub mod dates;
pub mod errors;
pub mod ledger;
pub mod parser;
pub mod sheet;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("caderneta_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Caderneta tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
