use crate::color::{CellColor, ChannelOrder};
use crate::config::CellGeometry;
use crate::error::MosaicResult;
use crate::types::CellCoordinate;
use std::path::Path;

/// A spreadsheet backend the mosaic can be written into.
///
/// Calls arrive in a fixed sequence: `open_session`, `size_cells`, cell
/// writes in raster order, `save`, then `close_forcefully`. The close call
/// also arrives after any failure and must not assume `save` happened.
pub trait DocumentExport {
    /// Channel order of the colors this backend stores
    fn channel_order(&self) -> ChannelOrder;

    /// Create a fresh workbook with its first worksheet
    fn open_session(&mut self) -> MosaicResult<()>;

    /// Apply `geometry` to the sheet. Must cover at least the first `rows`
    /// rows and `columns` columns.
    fn size_cells(&mut self, rows: u32, columns: u32, geometry: &CellGeometry)
        -> MosaicResult<()>;

    fn set_cell_color(&mut self, cell: CellCoordinate, color: CellColor) -> MosaicResult<()>;

    /// Color `len` cells of one row starting at `start`.
    ///
    /// Backends that can fill a range in one call override this.
    fn set_cell_color_run(
        &mut self,
        start: CellCoordinate,
        len: u32,
        color: CellColor,
    ) -> MosaicResult<()> {
        for offset in 0..len {
            self.set_cell_color(CellCoordinate::new(start.row, start.column + offset), color)?;
        }
        Ok(())
    }

    /// Persist the workbook to `path`, replacing any existing file
    fn save(&mut self, path: &Path) -> MosaicResult<()>;

    /// Release the workbook without saving anything further
    fn close_forcefully(&mut self) -> MosaicResult<()>;
}
