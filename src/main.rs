use clap::{Parser, Subcommand};
use royalbit_mosaic::cli;
use royalbit_mosaic::config::{ConvertOptions, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mosaic")]
#[command(about = "Turn an image into an Excel workbook, one colored cell per pixel.")]
#[command(long_about = "Mosaic - Image to Excel pixel mosaic

Every pixel of the image becomes one tiny cell whose background fill
matches the pixel. The workbook is saved next to the image with the same
name and an .xlsx extension, replacing any existing file.

COMMANDS:
  convert   - Write the mosaic workbook for an image
  inspect   - Show size, color count and target path without converting

EXAMPLES:
  mosaic convert photo.jpg                 # Writes photo.xlsx
  mosaic convert photo.png --dry-run       # Build in memory only
  mosaic convert photo.png --json          # Status events as JSON lines
  mosaic inspect photo.jpg

Large images take a while: every pixel is one cell.
Press Ctrl+C to cancel; the partial workbook is discarded.")]
#[command(version)]
struct Cli {
    /// Log pipeline steps to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into an .xlsx mosaic next to it
    Convert {
        /// Path to the image (PNG, JPEG or BMP)
        image: PathBuf,

        /// Build the mosaic in memory without writing the workbook
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Print status events and the result as JSON lines
        #[arg(long)]
        json: bool,

        /// Row height in points
        #[arg(long, default_value_t = DEFAULT_ROW_HEIGHT, env = "MOSAIC_ROW_HEIGHT")]
        row_height: f64,

        /// Column width in characters
        #[arg(long, default_value_t = DEFAULT_COLUMN_WIDTH, env = "MOSAIC_COLUMN_WIDTH")]
        column_width: f64,
    },

    /// Show what a conversion would produce
    Inspect {
        /// Path to the image
        image: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "royalbit_mosaic=info"
    } else {
        "royalbit_mosaic=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            image,
            dry_run,
            json,
            row_height,
            column_width,
        } => {
            let options = ConvertOptions::with_geometry(row_height, column_width);
            let result = cli::convert(image, options, dry_run, json).await?;
            if !result.is_success() {
                anyhow::bail!("{}", result.message);
            }
            Ok(())
        }

        Commands::Inspect { image } => cli::inspect(image),
    }
}
