use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

//==============================================================================
// Pixels
//==============================================================================

/// One decoded pixel, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

/// A fully decoded raster image held in memory.
///
/// Pixels are stored row-major: the pixel at `(row, column)` lives at
/// `row * width + column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl SourceImage {
    /// Build an image from row-major pixels.
    ///
    /// Returns `None` when a dimension is zero or the pixel count does not
    /// match `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at a 0-indexed cell position, `None` if out of bounds
    pub fn pixel(&self, cell: CellCoordinate) -> Option<Rgba> {
        if cell.row >= self.height || cell.column >= self.width {
            return None;
        }
        let index = cell.row as usize * self.width as usize + cell.column as usize;
        self.pixels.get(index).copied()
    }

    /// Rows top-to-bottom, each left-to-right
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks_exact(self.width as usize)
    }
}

//==============================================================================
// Cell addressing
//==============================================================================

/// 0-indexed worksheet position of one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellCoordinate {
    pub row: u32,
    pub column: u32,
}

impl CellCoordinate {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// 1-indexed (row, column) as used by spreadsheet applications
    pub const fn one_based(&self) -> (u32, u32) {
        (self.row + 1, self.column + 1)
    }

    /// A1-style reference, e.g. `(0, 27)` -> `AB1`
    pub fn to_a1(&self) -> String {
        format!("{}{}", Self::column_letters(self.column), self.row + 1)
    }

    /// Convert a 0-indexed column to its letters (0 -> A, 26 -> AA)
    pub fn column_letters(column: u32) -> String {
        let mut result = String::new();
        let mut idx = column;

        loop {
            let remainder = idx % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if idx < 26 {
                break;
            }
            idx = idx / 26 - 1;
        }

        result
    }
}

//==============================================================================
// Conversion outcome
//==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    Success,
    Failure,
    Cancelled,
}

/// Outcome of one conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub status: ConversionStatus,
    pub elapsed: Duration,
    pub output_path: PathBuf,
    /// Status text for the user
    pub message: String,
    pub finished_at: DateTime<Utc>,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }
}

/// Render a duration as `{h}h {m}m {s}s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}h {}m {}s", total / 3600, (total / 60) % 60, total % 60)
}
