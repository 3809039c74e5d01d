//! Excel exporter implementation

use super::DocumentExport;
use crate::color::{CellColor, ChannelOrder};
use crate::config::CellGeometry;
use crate::error::{MosaicError, MosaicResult};
use crate::types::CellCoordinate;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name of the single worksheet holding the mosaic
pub const SHEET_NAME: &str = "Mosaic";

/// Rows per worksheet in the xlsx format
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per worksheet in the xlsx format
pub const MAX_COLUMNS: u32 = 16_384;

/// Writes the mosaic to an .xlsx file with rust_xlsxwriter.
///
/// Every distinct color gets one solid-fill [`Format`], reused for all
/// cells of that color. Cells are written blank with only the fill.
#[derive(Default)]
pub struct XlsxExporter {
    workbook: Option<Workbook>,
    worksheet: Option<Worksheet>,
    formats: HashMap<CellColor, Format>,
}

impl XlsxExporter {
    /// Create an exporter with no workbook yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.workbook.is_some()
    }

    /// Number of distinct fill formats created so far
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }

    fn worksheet_mut(&mut self) -> MosaicResult<&mut Worksheet> {
        self.worksheet
            .as_mut()
            .ok_or_else(|| MosaicError::Export("worksheet is not open".to_string()))
    }

    fn column_index(column: u32) -> MosaicResult<u16> {
        u16::try_from(column)
            .map_err(|_| MosaicError::Export(format!("column {} out of range", column)))
    }
}

impl DocumentExport for XlsxExporter {
    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }

    fn open_session(&mut self) -> MosaicResult<()> {
        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| MosaicError::SessionStart(format!("Failed to name worksheet: {}", e)))?;

        self.workbook = Some(Workbook::new());
        self.worksheet = Some(worksheet);
        self.formats.clear();
        Ok(())
    }

    fn size_cells(
        &mut self,
        _rows: u32,
        _columns: u32,
        geometry: &CellGeometry,
    ) -> MosaicResult<()> {
        let last_column = Self::column_index(MAX_COLUMNS - 1)?;
        let worksheet = self.worksheet_mut()?;

        // Whole sheet, not just the mosaic area
        worksheet.set_default_row_height(geometry.row_height);
        worksheet
            .set_column_range_width(0, last_column, geometry.column_width)
            .map_err(|e| MosaicError::Export(format!("Failed to set column width: {}", e)))?;
        Ok(())
    }

    fn set_cell_color(&mut self, cell: CellCoordinate, color: CellColor) -> MosaicResult<()> {
        self.set_cell_color_run(cell, 1, color)
    }

    fn set_cell_color_run(
        &mut self,
        start: CellCoordinate,
        len: u32,
        color: CellColor,
    ) -> MosaicResult<()> {
        let order = self.channel_order();
        let first = Self::column_index(start.column)?;
        let last = Self::column_index(start.column + len.saturating_sub(1))?;

        let worksheet = self
            .worksheet
            .as_mut()
            .ok_or_else(|| MosaicError::Export("worksheet is not open".to_string()))?;
        let format = self.formats.entry(color).or_insert_with(|| {
            Format::new().set_background_color(Color::RGB(color.to_rgb_hex(order)))
        });

        if len == 0 {
            return Ok(());
        }
        for column in first..=last {
            worksheet
                .write_blank(start.row, column, format)
                .map_err(|e| {
                    MosaicError::Export(format!(
                        "Failed to color cell {}: {}",
                        CellCoordinate::new(start.row, u32::from(column)).to_a1(),
                        e
                    ))
                })?;
        }
        Ok(())
    }

    fn save(&mut self, path: &Path) -> MosaicResult<()> {
        let save_error = |reason: String| MosaicError::Save {
            path: path.to_path_buf(),
            reason,
        };

        let workbook = self
            .workbook
            .as_mut()
            .ok_or_else(|| save_error("workbook is not open".to_string()))?;
        if let Some(worksheet) = self.worksheet.take() {
            workbook.push_worksheet(worksheet);
        }

        workbook
            .save(path)
            .map_err(|e| save_error(format!("Failed to save Excel file: {}", e)))?;

        debug!(path = %path.display(), formats = self.formats.len(), "saved workbook");
        Ok(())
    }

    fn close_forcefully(&mut self) -> MosaicResult<()> {
        self.worksheet = None;
        self.workbook = None;
        self.formats.clear();
        Ok(())
    }
}
