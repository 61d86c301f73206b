use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use caderneta_core::bot::{Dispatcher, FallbackResponder, HELP_TEXT};
use caderneta_core::config::SheetConfig;
use caderneta_core::errors::CoreError;
use caderneta_core::ledger::LedgerEngine;
use caderneta_core::sheet::{CellCoord, CellRange, Field, MonthLayout};
use caderneta_core::storage::{MemorySheet, Result, SheetStore};
use chrono::{DateTime, FixedOffset, TimeZone};

fn anchor() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(-3 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 12, 16, 9, 0, 0)
        .unwrap()
}

fn dispatcher_over(store: Arc<MemorySheet>) -> Dispatcher<MemorySheet> {
    Dispatcher::new(LedgerEngine::new(store, SheetConfig::default()))
}

#[tokio::test]
async fn records_daily_amount_and_replies_with_total() {
    let store = Arc::new(MemorySheet::new());
    let dispatcher = dispatcher_over(store.clone());

    let reply = dispatcher.handle_at("chat-1", "diario 87,10", anchor()).await;

    assert!(reply.contains("R$ 87,10"), "{reply}");
    let coord = MonthLayout::of(12, 2025, &SheetConfig::default())
        .cell(Field::Diario, 16)
        .unwrap();
    assert_eq!(store.cell_text(coord), "R$ 87,10");
}

#[tokio::test]
async fn substitution_overwrites_instead_of_adding() {
    let store = Arc::new(MemorySheet::new());
    let dispatcher = dispatcher_over(store.clone());

    dispatcher.handle_at("chat-1", "entrada 500", anchor()).await;
    let reply = dispatcher
        .handle_at("chat-1", "sub entrada 200", anchor())
        .await;

    assert!(reply.contains("R$ 200,00"), "{reply}");
    let coord = MonthLayout::of(12, 2025, &SheetConfig::default())
        .cell(Field::Entrada, 16)
        .unwrap();
    assert_eq!(store.cell_text(coord), "R$ 200,00");
}

#[tokio::test]
async fn balance_query_names_the_requested_day() {
    let store = Arc::new(MemorySheet::new());
    let month = MonthLayout::of(12, 2025, &SheetConfig::default());
    store.seed(month.cell(Field::Saldo, 16).unwrap(), "R$ 165,81");
    let dispatcher = dispatcher_over(store);

    let reply = dispatcher.handle_at("chat-1", "saldo 16/12", anchor()).await;

    assert!(reply.contains("16/12/2025"), "{reply}");
    assert!(reply.contains("Saldo: R$ 165,81"), "{reply}");
}

#[tokio::test]
async fn help_and_unknown_text_without_fallback_show_help() {
    let dispatcher = dispatcher_over(Arc::new(MemorySheet::new()));
    assert_eq!(dispatcher.handle_at("chat-1", "ajuda", anchor()).await, HELP_TEXT);
    assert_eq!(dispatcher.handle_at("chat-1", "bom dia", anchor()).await, HELP_TEXT);
}

struct CannedResponder;

#[async_trait]
impl FallbackResponder for CannedResponder {
    async fn respond(&self, message: &str, _conversation_id: &str) -> Result<String> {
        Ok(format!("resposta livre para: {message}"))
    }
}

#[tokio::test]
async fn unknown_text_goes_to_the_fallback_responder() {
    let dispatcher =
        dispatcher_over(Arc::new(MemorySheet::new())).with_fallback(Arc::new(CannedResponder));

    let reply = dispatcher.handle_at("chat-1", "bom dia", anchor()).await;

    assert_eq!(reply, "resposta livre para: bom dia");
}

struct BrokenResponder;

#[async_trait]
impl FallbackResponder for BrokenResponder {
    async fn respond(&self, _message: &str, _conversation_id: &str) -> Result<String> {
        Err(CoreError::Responder("offline".into()))
    }
}

#[tokio::test]
async fn fallback_failure_degrades_to_help() {
    let dispatcher =
        dispatcher_over(Arc::new(MemorySheet::new())).with_fallback(Arc::new(BrokenResponder));

    let reply = dispatcher.handle_at("chat-1", "bom dia", anchor()).await;

    assert_eq!(reply, HELP_TEXT);
}

struct FailingSheet;

#[async_trait]
impl SheetStore for FailingSheet {
    async fn read_cell(&self, _coord: CellCoord) -> Result<String> {
        Err(CoreError::Storage("quota exceeded".into()))
    }

    async fn write_cell(&self, _coord: CellCoord, _text: &str) -> Result<()> {
        Err(CoreError::Storage("quota exceeded".into()))
    }

    async fn read_range(&self, _range: CellRange) -> Result<Vec<Vec<String>>> {
        Err(CoreError::Storage("quota exceeded".into()))
    }

    async fn batch_read(&self, _coords: &[CellCoord]) -> Result<HashMap<CellCoord, String>> {
        Err(CoreError::Storage("quota exceeded".into()))
    }
}

#[tokio::test]
async fn storage_failure_renders_an_apology_with_help_pointer() {
    let dispatcher = Dispatcher::new(LedgerEngine::new(Arc::new(FailingSheet), SheetConfig::default()));

    let reply = dispatcher.handle_at("chat-1", "saldo", anchor()).await;

    assert!(reply.contains("planilha"), "{reply}");
    assert!(reply.contains("ajuda"), "{reply}");
}
