//! Mosaic - turn a raster image into an Excel pixel mosaic
//!
//! Every pixel of the source image becomes one tiny cell whose background
//! fill matches the pixel color. The workbook is saved next to the image
//! with the same name and an `.xlsx` extension.
//!
//! # Features
//!
//! - PNG, JPEG and BMP input, decoded fully into memory
//! - Native .xlsx output (no spreadsheet application required)
//! - Background conversion with status events and cancellation
//! - Guaranteed session cleanup on success, failure and shutdown
//!
//! # Example
//!
//! ```no_run
//! use royalbit_mosaic::cancel::CancelFlag;
//! use royalbit_mosaic::convert::Converter;
//! use royalbit_mosaic::excel::XlsxExporter;
//! use std::path::Path;
//!
//! let converter = Converter::default();
//! let mut exporter = XlsxExporter::new();
//! let result = converter.convert(
//!     Path::new("photo.png"),
//!     &mut exporter,
//!     &CancelFlag::new(),
//!     |event| println!("{:?}", event),
//! );
//!
//! println!("{}", result.message);
//! ```

pub mod cancel;
pub mod cli;
pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod excel;
pub mod raster;
pub mod types;

// Re-export commonly used types
pub use error::{MosaicError, MosaicResult};
pub use types::{CellCoordinate, ConversionResult, ConversionStatus, Rgba, SourceImage};
