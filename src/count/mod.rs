//! Thresholding, zone filtering and per-class tallies.

mod report;

pub use report::{AnnotatedDetection, BinCounts, PipelineResult};

use crate::error::ZoneCountError;
use crate::ir::{ClassRegistry, Detection, ResolvedZone};

/// Counts the detections that are confident enough and centered in `zone`.
///
/// A detection is counted, and returned for annotation, iff
/// `score > score_threshold` (a score equal to the threshold is rejected)
/// and its box center lies in `zone` (edges included). Annotations keep the
/// order of `detections`.
///
/// # Errors
/// Returns [`ZoneCountError::InvalidClassIndex`] if any detection, counted or
/// not, references a class outside `registry`.
pub fn aggregate(
    detections: &[Detection],
    score_threshold: f64,
    zone: &ResolvedZone,
    registry: &ClassRegistry,
) -> Result<(PipelineResult, Vec<AnnotatedDetection>), ZoneCountError> {
    let mut counts = BinCounts::zeroed(registry);
    let mut annotations = Vec::new();

    for det in detections {
        let label = registry
            .label(det.class_id)
            .ok_or(ZoneCountError::InvalidClassIndex {
                class_id: det.class_id as f64,
                class_count: registry.len(),
            })?;

        let confident = det.score > score_threshold;
        if !confident {
            log::trace!("rejected {:?}: score {} <= {}", det.bbox, det.score, score_threshold);
            continue;
        }
        if !zone.contains(&det.bbox) {
            log::trace!("rejected {:?}: center outside zone", det.bbox);
            continue;
        }

        counts.increment(det.class_id)?;
        annotations.push(AnnotatedDetection {
            label: label.to_string(),
            class_id: det.class_id,
            score: det.score,
            bbox: det.bbox,
        });
    }

    Ok((PipelineResult::from_counts(counts), annotations))
}
