//! stacked-chart-extract CLI: recover the numeric table behind a stacked bar chart image.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use stacked_chart_extract::calibration::coords::display_to_image_row;
use stacked_chart_extract::calibration::render_overlay;
use stacked_chart_extract::config::SeriesNames;
use stacked_chart_extract::export::{self, ExtractionReport};
use stacked_chart_extract::{
    CalibrationSession, CalibrationStep, Category, ExtractorConfig, OutputRow, RasterImage,
    logger, paths, resolve_positions,
};

#[derive(Parser)]
#[command(name = "stacked-chart-extract")]
#[command(about = "Extract stacked bar chart series from an image using two axis reference clicks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract series values and write them out.
    Extract(ExtractArgs),

    /// Render sampling columns and reference rows over the image.
    Preview {
        #[command(flatten)]
        calibration: CalibrationArgs,

        /// Path to write the overlay PNG.
        #[arg(long)]
        out: PathBuf,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Destination (defaults to config.json next to the executable).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct CalibrationArgs {
    /// Path to the chart image.
    #[arg(long)]
    image: PathBuf,

    /// Vertical position of the click on the top of the value axis.
    #[arg(long)]
    top_y: f64,

    /// Vertical position of the click on the bottom of the value axis.
    #[arg(long)]
    bottom_y: f64,

    /// Height the image was displayed at when the clicks were taken.
    /// Omit when the positions are already image rows.
    #[arg(long)]
    display_height: Option<f64>,

    /// Value at the top reference click (overrides config).
    #[arg(long)]
    max: Option<f64>,

    /// Value at the bottom reference click (overrides config).
    #[arg(long)]
    min: Option<f64>,

    /// Configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ExtractArgs {
    #[command(flatten)]
    calibration: CalibrationArgs,

    /// Path to write the table (CSV).
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Path to write the full report (JSON).
    #[arg(long)]
    json: Option<PathBuf>,

    /// Path to write a stacked bar re-plot (PNG).
    #[arg(long)]
    chart: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => run_extract(&args),
        Commands::Preview { calibration, out } => run_preview(&calibration, &out),
        Commands::InitConfig { out } => {
            let path = out.unwrap_or_else(paths::default_config_path);
            ExtractorConfig::save_default(&path)?;
            info!("Default config written to {}", path.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ExtractorConfig> {
    match path {
        Some(path) => ExtractorConfig::from_file(path),
        None => Ok(ExtractorConfig::load(&paths::default_config_path())),
    }
}

fn load_image(path: &Path) -> Result<RasterImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;
    Ok(RasterImage::from_dynamic(img))
}

fn to_row(y: f64, display_height: Option<f64>, image_height: u32) -> Result<u32> {
    let display_height = display_height.unwrap_or(image_height as f64);
    display_to_image_row(y, display_height, image_height)
        .ok_or_else(|| anyhow!("Click at y={} is above the image", y))
}

/// Walks the session through image load, both clicks and the optional range edit.
fn calibrate(
    args: &CalibrationArgs,
    config: &ExtractorConfig,
    image: &RasterImage,
) -> Result<CalibrationSession> {
    let mut session = CalibrationSession::new(config.axis.value_at_max, config.axis.value_at_min);
    log_step(&session);
    session.load_image(image.width(), image.height());
    log_step(&session);

    for y in [args.top_y, args.bottom_y] {
        let row = to_row(y, args.display_height, image.height())?;
        session.record_click(row)?;
        log_step(&session);
    }

    if args.max.is_some() || args.min.is_some() {
        session.set_axis_range(
            args.max.unwrap_or(config.axis.value_at_max),
            args.min.unwrap_or(config.axis.value_at_min),
        )?;
        log_step(&session);
    }

    Ok(session)
}

fn log_step(session: &CalibrationSession) {
    let step = session.step();
    info!(
        "Step {}/{}: {}",
        step.step_number(),
        CalibrationStep::total_steps(),
        step.description()
    );
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    let config = load_config(args.calibration.config.as_deref())?;
    let image = load_image(&args.calibration.image)?;
    let mut session = calibrate(&args.calibration, &config, &image)?;

    let calibrator = session.calibrator()?;
    let positions = resolve_positions(&config.positions, image.width())?;
    let rows = config.pipeline().extract(&image, &positions, &calibrator)?;
    session.mark_extracted()?;
    log_step(&session);

    print_table(&rows, &config.series);

    let mut csv_path = args.csv.clone();
    if csv_path.is_none() && args.json.is_none() && args.chart.is_none() {
        csv_path = Some(PathBuf::from(paths::DEFAULT_CSV_NAME));
    }

    if let Some(path) = &csv_path {
        export::write_csv(path, &rows, &config.series)?;
        info!("CSV saved: {}", path.display());
    }
    if let Some(path) = &args.chart {
        export::render_stacked_chart(&rows, &config.stacking, &config.series, path)?;
        info!("Chart saved: {}", path.display());
    }
    if let Some(path) = &args.json {
        let report = ExtractionReport::new(image.width(), image.height(), *session.points(), rows);
        export::export_to_json(&report, path)?;
        info!("Report saved: {}", path.display());
    }

    Ok(())
}

fn run_preview(args: &CalibrationArgs, out: &Path) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let image = load_image(&args.image)?;
    let session = calibrate(args, &config, &image)?;

    let positions = resolve_positions(&config.positions, image.width())?;
    let overlay = render_overlay(&image, session.points(), &positions);
    overlay
        .save(out)
        .with_context(|| format!("Failed to save preview: {}", out.display()))?;
    info!("Preview saved: {}", out.display());
    Ok(())
}

fn print_table(rows: &[OutputRow], names: &SeriesNames) {
    let mut header = format!("{:<10} {:<10}", names.label_header, names.kind_header);
    for category in Category::ALL {
        header.push_str(&format!(" {:>12}", names.header_for(category)));
    }
    header.push_str(&format!(" {:>12}", names.total_header));
    println!("{}", header);

    for row in rows {
        let mut line = format!("{:<10} {:<10}", row.label, row.kind.to_string());
        for category in Category::ALL {
            line.push_str(&format!(" {:>12}", row.value(category)));
        }
        line.push_str(&format!(" {:>12}", row.total));
        println!("{}", line);
    }
}
