pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::CoreError;
use crate::sheet::{CellCoord, CellRange};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Abstraction over the backing spreadsheet.
///
/// Implementations talk to the real sheet API. Absent cells read as empty
/// text, never as an error; retry policy belongs to the implementation, not
/// to the callers.
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn read_cell(&self, coord: CellCoord) -> Result<String>;

    async fn write_cell(&self, coord: CellCoord, text: &str) -> Result<()>;

    /// Row-major grid covering the range, padded with empty strings.
    async fn read_range(&self, range: CellRange) -> Result<Vec<Vec<String>>>;

    /// One read for a scattered set of coordinates.
    async fn batch_read(&self, coords: &[CellCoord]) -> Result<HashMap<CellCoord, String>>;
}

pub use memory::MemorySheet;
