//! Writes a decoded image into an open export session, one cell per pixel

use super::{DocumentExport, ExportSession, MAX_COLUMNS, MAX_ROWS};
use crate::cancel::CancelFlag;
use crate::color::{map_color, CellColor};
use crate::config::CellGeometry;
use crate::error::{MosaicError, MosaicResult};
use crate::types::{CellCoordinate, SourceImage};
use tracing::{debug, info};

/// Counts reported after a mosaic has been written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub cells_written: u64,
    /// Same-color runs handed to the backend
    pub runs: u64,
}

/// Color cell (r+1, c+1) with pixel (r, c) for the whole image.
///
/// Rows and columns are sized first. Pixels go out in raster order; within a
/// row, neighbouring pixels of the same color are sent as one run.
/// `on_row(rows_done, rows_total)` runs after every finished row and `cancel`
/// is checked before every row.
pub fn build_mosaic<D, F>(
    image: &SourceImage,
    session: &mut ExportSession<'_, D>,
    geometry: &CellGeometry,
    cancel: &CancelFlag,
    mut on_row: F,
) -> MosaicResult<BuildStats>
where
    D: DocumentExport + ?Sized,
    F: FnMut(u32, u32),
{
    let (width, height) = (image.width(), image.height());
    if width > MAX_COLUMNS || height > MAX_ROWS {
        return Err(MosaicError::TooLarge {
            width,
            height,
            max_columns: MAX_COLUMNS,
            max_rows: MAX_ROWS,
        });
    }

    let document = session.document_mut()?;
    let order = document.channel_order();
    document.size_cells(height, width, geometry)?;
    debug!(width, height, ?geometry, "sized worksheet cells");

    let mut stats = BuildStats::default();
    let mut colors: Vec<CellColor> = Vec::with_capacity(width as usize);

    for (row, pixels) in (0..height).zip(image.rows()) {
        if cancel.is_cancelled() {
            info!(row, height, "mosaic build cancelled");
            return Err(MosaicError::Cancelled);
        }

        colors.clear();
        colors.extend(pixels.iter().map(|&pixel| map_color(pixel, order)));

        let mut start = 0usize;
        while start < colors.len() {
            let color = colors[start];
            let end = colors[start..]
                .iter()
                .position(|&c| c != color)
                .map_or(colors.len(), |offset| start + offset);

            document.set_cell_color_run(
                CellCoordinate::new(row, start as u32),
                (end - start) as u32,
                color,
            )?;
            stats.runs += 1;
            start = end;
        }
        stats.cells_written += u64::from(width);

        on_row(row + 1, height);
    }

    info!(
        cells = stats.cells_written,
        runs = stats.runs,
        "mosaic written"
    );
    Ok(stats)
}
