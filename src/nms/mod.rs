//! Greedy non-maximum suppression.
//!
//! Detectors usually report the same object several times with slightly
//! shifted boxes. NMS keeps the most confident box of each overlapping
//! cluster and drops the rest.

use std::cmp::Ordering;

use crate::ir::Detection;

/// Orders by descending score. NaN scores sort after every number.
fn by_score_desc(a: &Detection, b: &Detection) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// Runs greedy NMS and returns the kept detections, best first.
///
/// Candidates are visited in descending score order; equal scores keep their
/// input order, so the result is reproducible. Each visited candidate that
/// is still alive is kept, and every later candidate whose IoU with it is
/// `>= iou_threshold` is dropped. An IoU exactly at the threshold is
/// therefore suppressed.
///
/// A threshold `<= 0` drops everything after the first kept box, and a
/// threshold above 1 drops nothing.
pub fn suppress(detections: &[Detection], iou_threshold: f64) -> Vec<Detection> {
    let mut order: Vec<&Detection> = detections.iter().collect();
    order.sort_by(|a, b| by_score_desc(a, b));

    let mut suppressed = vec![false; order.len()];
    let mut kept = Vec::new();

    for (i, best) in order.iter().enumerate() {
        if suppressed[i] {
            continue;
        }
        kept.push(**best);

        for (j, candidate) in order.iter().enumerate().skip(i + 1) {
            if !suppressed[j] && best.bbox.iou(&candidate.bbox) >= iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    log::debug!(
        "nms kept {} of {} detection(s) at iou threshold {}",
        kept.len(),
        detections.len(),
        iou_threshold
    );

    kept
}
