use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Result, SheetStore};
use crate::sheet::{CellCoord, CellRange};

/// In-memory sheet used by tests and demos. Unset cells read as empty text,
/// matching the contract of the real backend.
#[derive(Debug, Default)]
pub struct MemorySheet {
    cells: Mutex<HashMap<CellCoord, String>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a cell, e.g. a totals formula result.
    pub fn seed(&self, coord: CellCoord, text: impl Into<String>) {
        self.lock().insert(coord, text.into());
    }

    /// Direct synchronous peek, handy in assertions.
    pub fn cell_text(&self, coord: CellCoord) -> String {
        self.lock().get(&coord).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CellCoord, String>> {
        self.cells.lock().expect("cell map lock poisoned")
    }
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn read_cell(&self, coord: CellCoord) -> Result<String> {
        Ok(self.cell_text(coord))
    }

    async fn write_cell(&self, coord: CellCoord, text: &str) -> Result<()> {
        self.lock().insert(coord, text.to_string());
        Ok(())
    }

    async fn read_range(&self, range: CellRange) -> Result<Vec<Vec<String>>> {
        let cells = self.lock();
        let mut grid = Vec::new();
        for row in range.start.row..=range.end.row {
            let mut cols = Vec::new();
            for col in range.start.col..=range.end.col {
                cols.push(
                    cells
                        .get(&CellCoord { col, row })
                        .cloned()
                        .unwrap_or_default(),
                );
            }
            grid.push(cols);
        }
        Ok(grid)
    }

    async fn batch_read(&self, coords: &[CellCoord]) -> Result<HashMap<CellCoord, String>> {
        let cells = self.lock();
        Ok(coords
            .iter()
            .map(|coord| (*coord, cells.get(coord).cloned().unwrap_or_default()))
            .collect())
    }
}
