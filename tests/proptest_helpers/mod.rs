#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use zonecount::ir::{BBoxXYXY, ClassRegistry, Detection, Pixel, Zone};

pub const CLASS_LABELS: &[&str] = &["garbage bin", "recycling bin", "compost bin", "crate"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(128);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn registry(class_count: usize) -> ClassRegistry {
    ClassRegistry::new(CLASS_LABELS.iter().take(class_count).copied())
}

/// Ordered box with positive area inside a 1000x1000 canvas.
pub fn arb_bbox() -> BoxedStrategy<BBoxXYXY<Pixel>> {
    (0.0f64..900.0, 0.0f64..900.0, 1.0f64..100.0, 1.0f64..100.0)
        .prop_map(|(x, y, w, h)| BBoxXYXY::from_xyxy(x, y, x + w, y + h))
        .boxed()
}

/// Any box, including inverted and zero-area ones.
pub fn arb_any_bbox() -> BoxedStrategy<BBoxXYXY<Pixel>> {
    (
        -50.0f64..1050.0,
        -50.0f64..1050.0,
        -50.0f64..1050.0,
        -50.0f64..1050.0,
    )
        .prop_map(|(x1, y1, x2, y2)| BBoxXYXY::from_xyxy(x1, y1, x2, y2))
        .boxed()
}

/// Scores on a coarse grid so that ties are common.
pub fn arb_score() -> BoxedStrategy<f64> {
    (0u32..=20).prop_map(|s| f64::from(s) / 20.0).boxed()
}

/// Detections clustered in a small area so NMS has overlaps to resolve.
pub fn arb_detections(class_count: usize, max_len: usize) -> BoxedStrategy<Vec<Detection>> {
    assert!(class_count > 0, "class_count must be > 0");

    let clustered = (0.0f64..200.0, 0.0f64..200.0, 5.0f64..80.0, 5.0f64..80.0)
        .prop_map(|(x, y, w, h)| BBoxXYXY::from_xyxy(x, y, x + w, y + h));

    proptest::collection::vec(
        (clustered, arb_score(), 0usize..class_count)
            .prop_map(|(bbox, score, class_id)| Detection::new(bbox, score, class_id)),
        0..=max_len,
    )
    .boxed()
}

pub fn arb_zone() -> BoxedStrategy<Zone> {
    (0.0f64..0.9, 0.0f64..0.9, 0.05f64..1.0, 0.05f64..1.0)
        .prop_map(|(x1, y1, fw, fh)| {
            let x2 = (x1 + fw * (1.0 - x1)).min(1.0);
            let y2 = (y1 + fh * (1.0 - y1)).min(1.0);
            Zone::new(x1, y1, x2, y2).expect("generated zone is valid")
        })
        .boxed()
}

pub fn arb_image_size() -> BoxedStrategy<(u32, u32)> {
    (64u32..=4096, 64u32..=4096).boxed()
}

/// Input sorted by descending score, ties in input order.
pub fn stable_sort_by_score(detections: &[Detection]) -> Vec<Detection> {
    let mut sorted = detections.to_vec();
    sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).expect("no NaN scores"));
    sorted
}
