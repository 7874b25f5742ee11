//! One pass over a single image's detections.
//!
//! raw detections -> checked class conversion -> NMS -> threshold + zone ->
//! counts and annotations. The pass holds no state between calls; images can
//! be processed in parallel by the caller.

use serde::Serialize;

use crate::count::{aggregate, AnnotatedDetection, PipelineResult};
use crate::error::ZoneCountError;
use crate::ir::{ClassRegistry, Detection, RawDetection, ResolvedZone, Zone};
use crate::nms::suppress;

pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;

/// Everything a pipeline pass needs besides the detections themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Candidates overlapping a better one with IoU at or above this are dropped.
    pub iou_threshold: f64,
    /// Only detections scoring strictly above this are counted.
    pub score_threshold: f64,
    pub zone: Zone,
    pub registry: ClassRegistry,
    pub image_width: u32,
    pub image_height: u32,
}

impl PipelineConfig {
    /// Default thresholds and zone for an image of the given size.
    pub fn new(registry: ClassRegistry, image_width: u32, image_height: u32) -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            zone: Zone::default(),
            registry,
            image_width,
            image_height,
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    pub fn with_score_threshold(mut self, score_threshold: f64) -> Self {
        self.score_threshold = score_threshold;
        self
    }
}

/// The outcome of one pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub result: PipelineResult,
    /// Detections that were counted, best first.
    pub annotations: Vec<AnnotatedDetection>,
    /// The zone in the image's pixel space, for drawing.
    pub zone: ResolvedZone,
}

/// Runs the pipeline over detector output.
///
/// Class ids are converted with a checked conversion; a non-integral or
/// out-of-range id aborts the pass with [`ZoneCountError::InvalidClassIndex`].
pub fn run(raw: &[RawDetection], config: &PipelineConfig) -> Result<PipelineOutput, ZoneCountError> {
    let class_count = config.registry.len();
    let detections = raw
        .iter()
        .map(|r| r.to_detection(class_count))
        .collect::<Result<Vec<_>, _>>()?;

    run_detections(&detections, config)
}

/// Runs the pipeline over already-converted detections.
pub fn run_detections(
    detections: &[Detection],
    config: &PipelineConfig,
) -> Result<PipelineOutput, ZoneCountError> {
    if config.image_width == 0 || config.image_height == 0 {
        return Err(ZoneCountError::InvalidImageDimensions {
            width: config.image_width,
            height: config.image_height,
        });
    }

    let malformed = detections
        .iter()
        .filter(|d| !d.bbox.is_ordered() || !d.bbox.is_finite())
        .count();
    if malformed > 0 {
        log::warn!("{} malformed box(es) treated as zero-area", malformed);
    }

    let zone = config.zone.resolve(config.image_width, config.image_height);
    let kept = suppress(detections, config.iou_threshold);
    let (result, annotations) = aggregate(&kept, config.score_threshold, &zone, &config.registry)?;

    log::debug!(
        "{} raw, {} after nms, {} counted in zone {}",
        detections.len(),
        kept.len(),
        result.total_count,
        zone.rect()
    );

    Ok(PipelineOutput {
        result,
        annotations,
        zone,
    })
}
