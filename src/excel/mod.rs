//! Excel mosaic export
//!
//! - [`DocumentExport`]: the capability a spreadsheet backend provides
//! - [`XlsxExporter`]: writes a real .xlsx file with rust_xlsxwriter
//! - [`MemoryDocument`]: records writes in memory (dry runs, tests)
//! - [`ExportSession`]: open → save → always-close lifecycle around a backend
//! - [`build_mosaic`]: writes one colored cell per pixel

mod builder;
mod document;
mod exporter;
mod memory;
mod session;

pub use builder::{build_mosaic, BuildStats};
pub use document::DocumentExport;
pub use exporter::{XlsxExporter, MAX_COLUMNS, MAX_ROWS, SHEET_NAME};
pub use memory::MemoryDocument;
pub use session::{output_path_for, ExportSession, SessionState, OUTPUT_EXTENSION};
