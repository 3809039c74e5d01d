use crate::cli::status::StatusBoard;
use crate::color::ChannelOrder;
use crate::config::ConvertOptions;
use crate::convert::{spawn_conversion, ConversionTask, Converter, StatusEvent};
use crate::excel::{output_path_for, DocumentExport, MemoryDocument, XlsxExporter, MAX_COLUMNS, MAX_ROWS};
use crate::raster::read_source_image;
use crate::types::{ConversionResult, Rgba};
use colored::Colorize;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Execute the convert command
pub async fn convert(
    image: PathBuf,
    options: ConvertOptions,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<ConversionResult> {
    if !json {
        println!("{}", "🧩 Mosaic - Image to Excel".bold().green());
        println!("   Input:  {}", image.display());
        println!("   Output: {}", output_path_for(&image).display());
        if dry_run {
            println!("   Mode:   {}", "dry run (nothing is written)".yellow());
        }
        println!();
    }

    let converter = Converter::new(options);

    let result = if dry_run {
        let task = spawn_conversion(converter, image, MemoryDocument::new(ChannelOrder::Rgb));
        let (result, document) = drive(task, json).await?;
        if !json && result.is_success() {
            println!("   Cells:           {}", document.cell_count());
            println!("   Distinct colors: {}", document.distinct_colors());
            println!(
                "   Would write:     {}\n",
                result.output_path.display()
            );
        }
        result
    } else {
        let task = spawn_conversion(converter, image, XlsxExporter::new());
        let (result, _) = drive(task, json).await?;
        if !json && result.is_success() {
            println!("   Excel file: {}\n", result.output_path.display());
        }
        result
    };

    if json {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(result)
}

/// Pump status events from a conversion until its worker is done.
///
/// A shutdown signal cancels the conversion and keeps pumping, so the
/// process only exits after the worker has closed its session.
async fn drive<D>(
    mut task: ConversionTask<D>,
    json: bool,
) -> anyhow::Result<(ConversionResult, D)>
where
    D: DocumentExport + Send + 'static,
{
    let mut board = StatusBoard::new();
    let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
    let mut frame = 0usize;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = task.next_event() => match event {
                Some(event) => {
                    board.apply(&event);
                    report(&event, &board, json)?;
                }
                None => break,
            },
            _ = &mut shutdown, if !task.is_cancelled() => {
                warn!("shutdown requested, cancelling conversion");
                task.cancel();
            }
            _ = ticker.tick(), if board.busy() && !json => {
                frame += 1;
                eprint!("\r{}", board.spinner_line(frame).cyan());
                std::io::stderr().flush()?;
            }
        }
    }

    Ok(task.finish().await?)
}

fn report(event: &StatusEvent, board: &StatusBoard, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        StatusEvent::Started { .. } => println!("{}", board.text().cyan()),
        StatusEvent::Succeeded { .. } => {
            clear_spinner();
            println!("{} {}", "✅".green(), board.text().bold().green());
        }
        StatusEvent::Failed { .. } => {
            clear_spinner();
            println!("{} {}", "❌".red(), board.text().bold().red());
        }
        StatusEvent::Cancelled => {
            clear_spinner();
            println!("{} {}", "⚠️".yellow(), board.text().bold().yellow());
        }
        StatusEvent::Busy { busy: false } => clear_spinner(),
        StatusEvent::Progress { .. } | StatusEvent::Busy { .. } | StatusEvent::TriggerEnabled { .. } => {}
    }
    Ok(())
}

fn clear_spinner() {
    eprint!("\r\x1B[2K");
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
///
/// On unix the handlers are installed when this is called, not on first poll.
#[cfg(unix)]
fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    use tokio::signal::unix::{signal, SignalKind};

    let interrupt = signal(SignalKind::interrupt());
    let terminate = signal(SignalKind::terminate());

    async move {
        match (interrupt, terminate) {
            (Ok(mut interrupt), Ok(mut terminate)) => {
                tokio::select! {
                    _ = interrupt.recv() => {},
                    _ = terminate.recv() => {},
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("failed to install shutdown handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(not(unix))]
fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Execute the inspect command
pub fn inspect(image: PathBuf) -> anyhow::Result<()> {
    let source = read_source_image(&image)?;
    let output = output_path_for(&image);

    let distinct: HashSet<(u8, u8, u8)> = source
        .rows()
        .flatten()
        .map(|&Rgba { red, green, blue, .. }| (red, green, blue))
        .collect();
    let fits = source.width() <= MAX_COLUMNS && source.height() <= MAX_ROWS;

    println!("{}", "🧩 Mosaic - Inspect".bold().green());
    println!("   Image:           {}", image.display());
    println!(
        "   Size:            {} x {} pixels",
        source.width(),
        source.height()
    );
    println!("   Cells:           {}", source.pixel_count());
    println!("   Distinct colors: {}", distinct.len());
    if fits {
        println!("   Fits worksheet:  {}", "yes".green());
    } else {
        println!(
            "   Fits worksheet:  {} (limit {} x {})",
            "no".red(),
            MAX_COLUMNS,
            MAX_ROWS
        );
    }
    if output.exists() {
        println!(
            "   Output:          {} {}",
            output.display(),
            "(exists, will be overwritten)".yellow()
        );
    } else {
        println!("   Output:          {}", output.display());
    }

    Ok(())
}
