//! Chat-facing dispatch: one message in, one reply out.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset};

use crate::dates;
use crate::errors::CoreError;
use crate::ledger::LedgerEngine;
use crate::parser::{self, Command};
use crate::storage::{Result, SheetStore};

/// Static command overview, also the fallback of last resort.
pub const HELP_TEXT: &str = "\
📒 Caderneta

Lançamentos (somam na célula do dia; comece com \"sub\" para substituir):
  entrada 350           registra entrada de hoje
  saida 120,50 16/12    registra saída em 16/12
  87,10                 registra o diário de hoje
  sub diario 200        substitui o diário de hoje

Consultas:
  saldo [hoje|ontem|dd/mm]   resumo de um dia
  semana                     totais dos últimos 7 dias
  mes                        fechamento do mês
  performance                resultado do mês
  comparar                   mês atual x mês anterior
  previsao                   projeção de fim de mês";

const HELP_POINTER: &str = "Envie *ajuda* para ver os comandos.";

/// Optional conversational collaborator consulted when the parser gives up.
#[async_trait]
pub trait FallbackResponder: Send + Sync {
    async fn respond(&self, message: &str, conversation_id: &str) -> Result<String>;
}

/// Stateless per-message router: parse, run one engine operation, render.
pub struct Dispatcher<S> {
    engine: LedgerEngine<S>,
    fallback: Option<Arc<dyn FallbackResponder>>,
}

impl<S: SheetStore> Dispatcher<S> {
    pub fn new(engine: LedgerEngine<S>) -> Self {
        Self {
            engine,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, responder: Arc<dyn FallbackResponder>) -> Self {
        self.fallback = Some(responder);
        self
    }

    /// Handles one incoming message, anchoring "hoje" at the current moment.
    pub async fn handle(&self, conversation_id: &str, raw_text: &str) -> String {
        self.handle_at(conversation_id, raw_text, dates::anchor_now())
            .await
    }

    /// Anchor-injectable variant so tests can pin the clock.
    pub async fn handle_at(
        &self,
        conversation_id: &str,
        raw_text: &str,
        anchor: DateTime<FixedOffset>,
    ) -> String {
        let Some(command) = parser::parse(raw_text, anchor) else {
            return self.unrecognized(conversation_id, raw_text).await;
        };
        match self.execute(command, anchor).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(conversation_id, %err, "command failed");
                render_failure(&err)
            }
        }
    }

    async fn execute(&self, command: Command, anchor: DateTime<FixedOffset>) -> Result<String> {
        let today = anchor.date_naive();
        match command {
            Command::Add {
                kind,
                amount,
                date,
                replace,
            } => Ok(self
                .engine
                .apply_update(kind, amount, date, replace)
                .await?
                .render()),
            Command::SaldoToday => Ok(self.engine.day_report(today).await?.render(today)),
            Command::SaldoOn { date } => Ok(self.engine.day_report(date).await?.render(date)),
            Command::Week => Ok(self.engine.week_report(today).await?.render()),
            Command::Month => Ok(self
                .engine
                .month_totals(today.month(), today.year())
                .await?
                .render_month()),
            Command::Performance => Ok(self
                .engine
                .month_totals(today.month(), today.year())
                .await?
                .render_performance()),
            Command::Compare => Ok(self.engine.compare_report(today).await?.render()),
            Command::Forecast => Ok(self.engine.forecast_report(today).await?.render()),
            Command::Help => Ok(HELP_TEXT.to_string()),
        }
    }

    async fn unrecognized(&self, conversation_id: &str, raw_text: &str) -> String {
        let Some(responder) = &self.fallback else {
            return HELP_TEXT.to_string();
        };
        match responder.respond(raw_text, conversation_id).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(conversation_id, %err, "fallback responder failed");
                HELP_TEXT.to_string()
            }
        }
    }
}

fn render_failure(err: &CoreError) -> String {
    match err {
        CoreError::InvalidDay { .. } => format!("⚠️ {err}. {HELP_POINTER}"),
        CoreError::Storage(_) | CoreError::Responder(_) => format!(
            "⚠️ Não consegui falar com a planilha agora. Tente de novo em instantes. {HELP_POINTER}"
        ),
    }
}
