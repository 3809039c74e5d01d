use super::DocumentExport;
use crate::color::{CellColor, ChannelOrder};
use crate::config::CellGeometry;
use crate::error::{MosaicError, MosaicResult};
use crate::types::CellCoordinate;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// In-memory spreadsheet backend.
///
/// Keeps the final color of every cell plus the order cells were written in.
/// `save` only records the target path; nothing touches the file system.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    order: ChannelOrder,
    open: bool,
    sessions_closed: usize,
    sized: Option<(u32, u32, CellGeometry)>,
    cells: BTreeMap<CellCoordinate, CellColor>,
    write_order: Vec<CellCoordinate>,
    saved_to: Option<PathBuf>,
}

impl MemoryDocument {
    pub fn new(order: ChannelOrder) -> Self {
        Self {
            order,
            open: false,
            sessions_closed: 0,
            sized: None,
            cells: BTreeMap::new(),
            write_order: Vec::new(),
            saved_to: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// How many times `close_forcefully` ran on an open session
    pub fn sessions_closed(&self) -> usize {
        self.sessions_closed
    }

    /// Rows, columns and geometry passed to `size_cells`
    pub fn sized(&self) -> Option<(u32, u32, CellGeometry)> {
        self.sized
    }

    pub fn color_at(&self, cell: CellCoordinate) -> Option<CellColor> {
        self.cells.get(&cell).copied()
    }

    /// Number of distinct cells that received a color
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn distinct_colors(&self) -> usize {
        self.cells.values().collect::<HashSet<_>>().len()
    }

    /// Every cell write, in the order it happened
    pub fn write_order(&self) -> &[CellCoordinate] {
        &self.write_order
    }

    pub fn saved_to(&self) -> Option<&Path> {
        self.saved_to.as_deref()
    }

    fn ensure_open(&self) -> MosaicResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(MosaicError::Export("document is not open".to_string()))
        }
    }
}

impl DocumentExport for MemoryDocument {
    fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    fn open_session(&mut self) -> MosaicResult<()> {
        self.open = true;
        self.sized = None;
        self.cells.clear();
        self.write_order.clear();
        self.saved_to = None;
        Ok(())
    }

    fn size_cells(
        &mut self,
        rows: u32,
        columns: u32,
        geometry: &CellGeometry,
    ) -> MosaicResult<()> {
        self.ensure_open()?;
        self.sized = Some((rows, columns, *geometry));
        Ok(())
    }

    fn set_cell_color(&mut self, cell: CellCoordinate, color: CellColor) -> MosaicResult<()> {
        self.ensure_open()?;
        self.cells.insert(cell, color);
        self.write_order.push(cell);
        Ok(())
    }

    fn save(&mut self, path: &Path) -> MosaicResult<()> {
        if !self.open {
            return Err(MosaicError::Save {
                path: path.to_path_buf(),
                reason: "document is not open".to_string(),
            });
        }
        self.saved_to = Some(path.to_path_buf());
        Ok(())
    }

    fn close_forcefully(&mut self) -> MosaicResult<()> {
        if self.open {
            self.open = false;
            self.sessions_closed += 1;
        }
        Ok(())
    }
}
