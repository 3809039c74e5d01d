use super::StatusEvent;
use crate::cancel::CancelFlag;
use crate::config::ConvertOptions;
use crate::error::MosaicResult;
use crate::excel::{build_mosaic, output_path_for, DocumentExport, ExportSession};
use crate::raster::read_source_image;
use crate::types::{format_elapsed, ConversionResult, ConversionStatus};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Runs single image-to-workbook conversions
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert `image_path` into a workbook next to it using `document`.
    ///
    /// Never returns an error: every failure becomes a `Failure` or
    /// `Cancelled` result. The session on `document` is closed before this
    /// returns, whatever happened.
    pub fn convert<D, F>(
        &self,
        image_path: &Path,
        document: &mut D,
        cancel: &CancelFlag,
        mut on_event: F,
    ) -> ConversionResult
    where
        D: DocumentExport + ?Sized,
        F: FnMut(StatusEvent),
    {
        let started = Instant::now();
        let output_path = output_path_for(image_path);

        info!(image = %image_path.display(), output = %output_path.display(), "conversion started");
        on_event(StatusEvent::Started {
            image: image_path.to_path_buf(),
        });

        let outcome = self.run(image_path, &output_path, document, cancel, &mut on_event);
        let elapsed = started.elapsed();

        let (status, message) = match outcome {
            Ok(()) => {
                info!(elapsed = %format_elapsed(elapsed), "conversion finished");
                on_event(StatusEvent::Succeeded {
                    elapsed,
                    output: output_path.clone(),
                });
                (
                    ConversionStatus::Success,
                    format!("Conversion finished in {}", format_elapsed(elapsed)),
                )
            }
            Err(e) if e.is_cancelled() => {
                info!("conversion cancelled");
                on_event(StatusEvent::Cancelled);
                (ConversionStatus::Cancelled, e.user_message().to_string())
            }
            Err(e) => {
                error!("conversion failed: {}", e);
                let message = format!("Conversion failed: {}", e.user_message());
                on_event(StatusEvent::Failed {
                    message: message.clone(),
                });
                (ConversionStatus::Failure, message)
            }
        };

        ConversionResult {
            status,
            elapsed,
            output_path,
            message,
            finished_at: Utc::now(),
        }
    }

    fn run<D, F>(
        &self,
        image_path: &Path,
        output_path: &Path,
        document: &mut D,
        cancel: &CancelFlag,
        on_event: &mut F,
    ) -> MosaicResult<()>
    where
        D: DocumentExport + ?Sized,
        F: FnMut(StatusEvent),
    {
        self.options.validate()?;

        let image = read_source_image(image_path)?;
        let mut session = ExportSession::open(document)?;

        build_mosaic(
            &image,
            &mut session,
            &self.options.geometry,
            cancel,
            |rows_done, rows_total| {
                on_event(StatusEvent::Progress {
                    rows_done,
                    rows_total,
                })
            },
        )?;
        drop(image);

        session.save(output_path)?;
        session.close();
        Ok(())
    }
}
