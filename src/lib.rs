//! Zonecount: zone-aware object counting from raw detector output.
//!
//! Zonecount takes the candidate boxes an object detector produced for one
//! image, removes duplicate boxes with non-maximum suppression, keeps the
//! confident detections whose center falls inside a region of interest, and
//! reports how many objects of each class were found there.
//!
//! # Modules
//!
//! - [`ir`]: Boxes, detections, zones and the class registry
//! - [`nms`]: Greedy non-maximum suppression
//! - [`count`]: Score/zone filtering and per-class counts
//! - [`pipeline`]: The full per-image pass
//! - [`render`]: Drawing counted boxes and the zone onto the image
//! - [`config`]: Layered settings (defaults, file, flags)
//! - [`error`]: Error types for zonecount operations
//!
//! # Example
//!
//! ```
//! use zonecount::ir::{ClassRegistry, RawDetection, Zone};
//! use zonecount::pipeline::{run, PipelineConfig};
//!
//! let config = PipelineConfig::new(ClassRegistry::new(["bin"]), 100, 100)
//!     .with_zone(Zone::full());
//! let raw = [
//!     RawDetection::from_row([10.0, 10.0, 30.0, 30.0, 0.9, 0.0]),
//!     RawDetection::from_row([12.0, 12.0, 28.0, 28.0, 0.85, 0.0]),
//! ];
//!
//! let output = run(&raw, &config).unwrap();
//! assert_eq!(output.result.total_count, 1);
//! assert_eq!(output.result.found_classes, vec!["bin"]);
//! ```

pub mod config;
pub mod count;
pub mod error;
pub mod ir;
pub mod nms;
pub mod pipeline;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::ZoneCountError;

use config::{CountSettings, SettingsOverrides};
use count::AnnotatedDetection;
use ir::{ResolvedZone, Zone};

/// The zonecount CLI application.
#[derive(Parser)]
#[command(name = "zonecount")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Count detections inside the zone for one image.
    Count(CountArgs),
    /// Print the zone resolved to pixel coordinates for an image size.
    Zone(ZoneArgs),
}

/// Where the image dimensions come from.
#[derive(clap::Args)]
struct ImageArgs {
    /// Image file to read the dimensions from (header only).
    #[arg(long, conflicts_with_all = ["width", "height"])]
    image: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

/// Settings shared by every subcommand.
#[derive(clap::Args)]
struct SettingsArgs {
    /// YAML or JSON settings file.
    #[arg(long, env = "ZONECOUNT_CONFIG")]
    config: Option<PathBuf>,

    /// IoU at or above which a weaker overlapping box is suppressed.
    #[arg(long, env = "ZONECOUNT_IOU_THRESHOLD")]
    iou_threshold: Option<f64>,

    /// Detections must score strictly above this to be counted.
    #[arg(long, env = "ZONECOUNT_SCORE_THRESHOLD")]
    score_threshold: Option<f64>,

    /// Normalized zone as x1,y1,x2,y2 (fractions of width and height).
    #[arg(long, env = "ZONECOUNT_ZONE", allow_hyphen_values = true)]
    zone: Option<String>,

    /// Comma-separated class labels in detector index order.
    #[arg(long, env = "ZONECOUNT_CLASSES", value_delimiter = ',')]
    classes: Option<Vec<String>>,
}

/// Arguments for the count subcommand.
#[derive(clap::Args)]
struct CountArgs {
    /// JSON file with the detector's raw detections.
    detections: PathBuf,

    #[command(flatten)]
    image: ImageArgs,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Output format for stdout ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Also write the result record to this JSON file.
    #[arg(long)]
    result_out: Option<PathBuf>,

    /// Write the counted boxes and the pixel zone to this JSON file.
    #[arg(long)]
    annotations_out: Option<PathBuf>,

    /// Draw the counted boxes and the zone onto --image and save it here.
    #[arg(long, requires = "image")]
    annotated_out: Option<PathBuf>,
}

/// Arguments for the zone subcommand.
#[derive(clap::Args)]
struct ZoneArgs {
    #[command(flatten)]
    image: ImageArgs,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// What the annotation file holds: everything a renderer needs.
#[derive(Serialize)]
struct AnnotationRecord<'a> {
    zone: &'a ResolvedZone,
    annotations: &'a [AnnotatedDetection],
}

/// Run the zonecount CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ZoneCountError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Count(args)) => run_count(args),
        Some(Commands::Zone(args)) => run_zone(args),
        None => {
            println!("zonecount {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Zone-aware object counting from raw detector output.");
            println!();
            println!("Run 'zonecount --help' for usage information.");
            Ok(())
        }
    }
}

fn check_output_format(output: &str) -> Result<(), ZoneCountError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(ZoneCountError::InvalidOption(format!(
            "output format '{}' (supported: text, json)",
            other
        ))),
    }
}

fn load_settings(args: SettingsArgs) -> Result<CountSettings, ZoneCountError> {
    let zone = args.zone.as_deref().map(str::parse::<Zone>).transpose()?;
    let overrides = SettingsOverrides {
        iou_threshold: args.iou_threshold,
        score_threshold: args.score_threshold,
        zone,
        classes: args.classes,
    };
    CountSettings::load(args.config.as_deref(), overrides)
}

fn image_dimensions(args: &ImageArgs) -> Result<(u32, u32), ZoneCountError> {
    match (&args.image, args.width, args.height) {
        (Some(path), _, _) => ir::io_image::read_image_dimensions(path),
        (None, Some(width), Some(height)) => Ok((width, height)),
        _ => Err(ZoneCountError::MissingImageDimensions),
    }
}

/// Execute the count subcommand.
fn run_count(args: CountArgs) -> Result<(), ZoneCountError> {
    check_output_format(&args.output)?;
    let settings = load_settings(args.settings)?;
    let (width, height) = image_dimensions(&args.image)?;

    let raw = ir::io_json::read_detections_json(&args.detections)?;
    log::info!(
        "read {} detection(s) from {}",
        raw.len(),
        args.detections.display()
    );

    let output = pipeline::run(&raw, &settings.pipeline_config(width, height))?;

    if let Some(path) = &args.result_out {
        ir::io_json::write_json(path, &output.result)?;
        log::info!("wrote result to {}", path.display());
    }
    if let Some(path) = &args.annotations_out {
        let record = AnnotationRecord {
            zone: &output.zone,
            annotations: &output.annotations,
        };
        ir::io_json::write_json(path, &record)?;
        log::info!(
            "wrote {} annotation(s) to {}",
            output.annotations.len(),
            path.display()
        );
    }
    if let (Some(dest), Some(source)) = (&args.annotated_out, &args.image.image) {
        render::write_annotated_image(source, dest, &output)?;
        log::info!("wrote annotated image to {}", dest.display());
    }

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&output.result)?),
        _ => {
            print!("{}", output.result);
            println!("Zone (pixels): {}", output.zone.rect());
            for annotation in &output.annotations {
                println!("  {}", annotation);
            }
        }
    }

    Ok(())
}

/// Execute the zone subcommand.
fn run_zone(args: ZoneArgs) -> Result<(), ZoneCountError> {
    check_output_format(&args.output)?;
    let settings = load_settings(args.settings)?;
    let (width, height) = image_dimensions(&args.image)?;
    let resolved = settings.zone.resolve(width, height);

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&resolved)?),
        _ => {
            println!("Image: {}x{}", width, height);
            println!("Zone (normalized): {}", settings.zone);
            println!("Zone (pixels): {}", resolved.rect());
        }
    }

    Ok(())
}
