//! Conversion options
//!
//! There is no config file; the CLI fills these from flags or the
//! `MOSAIC_ROW_HEIGHT` / `MOSAIC_COLUMN_WIDTH` environment variables.

use crate::error::{MosaicError, MosaicResult};
use serde::Serialize;

/// Row height in points that makes a cell roughly one pixel tall
pub const DEFAULT_ROW_HEIGHT: f64 = 7.5;

/// Column width in character units that matches [`DEFAULT_ROW_HEIGHT`]
pub const DEFAULT_COLUMN_WIDTH: f64 = 0.77;

/// Largest row height Excel accepts, in points
pub const MAX_ROW_HEIGHT: f64 = 409.0;

/// Largest column width Excel accepts, in characters
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Footprint applied to every row and column of the mosaic
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellGeometry {
    pub row_height: f64,
    pub column_width: f64,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// Options for one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConvertOptions {
    pub geometry: CellGeometry,
}

impl ConvertOptions {
    pub fn with_geometry(row_height: f64, column_width: f64) -> Self {
        Self {
            geometry: CellGeometry {
                row_height,
                column_width,
            },
        }
    }

    pub fn validate(&self) -> MosaicResult<()> {
        let CellGeometry {
            row_height,
            column_width,
        } = self.geometry;

        if !(row_height > 0.0 && row_height <= MAX_ROW_HEIGHT) {
            return Err(MosaicError::InvalidOption(format!(
                "row height must be in (0, {}] points, got {}",
                MAX_ROW_HEIGHT, row_height
            )));
        }
        if !(column_width > 0.0 && column_width <= MAX_COLUMN_WIDTH) {
            return Err(MosaicError::InvalidOption(format!(
                "column width must be in (0, {}] characters, got {}",
                MAX_COLUMN_WIDTH, column_width
            )));
        }
        Ok(())
    }
}
