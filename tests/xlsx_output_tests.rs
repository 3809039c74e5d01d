//! Tests that read back workbooks written by the xlsx exporter

use calamine::{open_workbook, Reader, Xlsx};
use pretty_assertions::assert_eq;
use royalbit_mosaic::cancel::CancelFlag;
use royalbit_mosaic::convert::{Converter, StatusEvent};
use royalbit_mosaic::excel::{XlsxExporter, SHEET_NAME};
use royalbit_mosaic::ConversionStatus;
use image::{ImageFormat, RgbaImage};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn save_png(dir: &TempDir, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

fn quad() -> RgbaImage {
    let pixels = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
    ];
    RgbaImage::from_fn(2, 2, |x, y| image::Rgba(pixels[(y * 2 + x) as usize]))
}

/// Read one XML part out of an .xlsx package
fn read_part(workbook: &Path, name: &str) -> String {
    let file = File::open(workbook).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

fn convert(path: &Path) -> royalbit_mosaic::ConversionResult {
    let mut exporter = XlsxExporter::new();
    Converter::default().convert(path, &mut exporter, &CancelFlag::new(), |_| {})
}

#[test]
fn test_workbook_saved_next_to_image() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "quad.png", &quad());

    let result = convert(&path);

    assert_eq!(result.status, ConversionStatus::Success);
    assert_eq!(result.output_path, dir.path().join("quad.xlsx"));
    assert!(result.output_path.exists());
}

#[test]
fn test_workbook_opens_with_single_mosaic_sheet() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "quad.png", &quad());
    let result = convert(&path);

    let workbook: Xlsx<_> = open_workbook(&result.output_path).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
}

#[test]
fn test_cells_and_fills_written() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "quad.png", &quad());
    let result = convert(&path);

    let sheet = read_part(&result.output_path, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<c r=").count(), 4);
    for cell in ["A1", "B1", "A2", "B2"] {
        assert!(sheet.contains(&format!("<c r=\"{}\"", cell)), "missing {}", cell);
    }

    let styles = read_part(&result.output_path, "xl/styles.xml");
    for argb in ["FFFF0000", "FF00FF00", "FF0000FF", "FFFFFF00"] {
        assert!(styles.contains(argb), "missing fill {}", argb);
    }
}

#[test]
fn test_whole_sheet_sized_to_pixels() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "quad.png", &quad());
    let result = convert(&path);

    let sheet = read_part(&result.output_path, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("defaultRowHeight=\"7.5\""), "{}", sheet);
    assert!(sheet.contains("customHeight=\"1\""));
    // Width covers every column, not only the two the image uses
    assert!(sheet.contains("<col min=\"1\" max=\"16384\""), "{}", sheet);
    assert!(!sheet.contains("max=\"2\""));
}

#[test]
fn test_second_conversion_overwrites_with_same_content() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "again.png", &quad());

    let first = convert(&path);
    let sheet_first = read_part(&first.output_path, "xl/worksheets/sheet1.xml");
    let styles_first = read_part(&first.output_path, "xl/styles.xml");

    let second = convert(&path);
    assert_eq!(second.status, ConversionStatus::Success);
    assert_eq!(first.output_path, second.output_path);

    assert_eq!(
        read_part(&second.output_path, "xl/worksheets/sheet1.xml"),
        sheet_first
    );
    assert_eq!(read_part(&second.output_path, "xl/styles.xml"), styles_first);
}

#[test]
fn test_existing_unrelated_file_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "stale.png", &quad());
    std::fs::write(dir.path().join("stale.xlsx"), b"old junk").unwrap();

    let result = convert(&path);

    assert_eq!(result.status, ConversionStatus::Success);
    let workbook: Xlsx<_> = open_workbook(&result.output_path).unwrap();
    assert_eq!(workbook.sheet_names().len(), 1);
}

#[test]
fn test_cancelled_conversion_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let image = RgbaImage::from_fn(20, 20, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
    let path = save_png(&dir, "cancel.png", &image);
    let cancel = CancelFlag::new();
    let mut exporter = XlsxExporter::new();

    let result = Converter::default().convert(&path, &mut exporter, &cancel, |event| {
        if let StatusEvent::Progress { rows_done: 5, .. } = &event {
            cancel.cancel();
        }
    });

    assert_eq!(result.status, ConversionStatus::Cancelled);
    assert!(!result.output_path.exists());
    assert!(!exporter.is_open());
}

#[test]
fn test_unwritable_target_is_failure() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "locked.png", &quad());
    // A directory where the workbook should go makes the save fail
    std::fs::create_dir(dir.path().join("locked.xlsx")).unwrap();
    let mut exporter = XlsxExporter::new();

    let result = Converter::default().convert(&path, &mut exporter, &CancelFlag::new(), |_| {});

    assert_eq!(result.status, ConversionStatus::Failure);
    assert_eq!(result.message, "Conversion failed: Could not save the workbook");
    assert!(!exporter.is_open());
}
