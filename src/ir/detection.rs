//! Detection records at and behind the detector boundary.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::space::Pixel;
use crate::error::ZoneCountError;

/// A single detector candidate: a pixel box, a confidence and a class index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BBoxXYXY<Pixel>,
    pub score: f64,
    pub class_id: usize,
}

impl Detection {
    pub fn new(bbox: BBoxXYXY<Pixel>, score: f64, class_id: usize) -> Self {
        Self {
            bbox,
            score,
            class_id,
        }
    }
}

/// A detection as the detector emits it, with a floating-point class id.
///
/// YOLO-style output tensors carry the class index in the same float row as
/// the box and the score. Deserializes from either a six-element row
/// `[x1, y1, x2, y2, score, class_id]` or an object with those field names.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RawDetection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub score: f64,
    pub class_id: f64,
}

impl RawDetection {
    pub fn from_row(row: [f64; 6]) -> Self {
        let [x1, y1, x2, y2, score, class_id] = row;
        Self {
            x1,
            y1,
            x2,
            y2,
            score,
            class_id,
        }
    }

    /// Converts into a [`Detection`], checking the class id.
    ///
    /// The class id must be a finite, non-negative integer below
    /// `class_count`. Anything else is reported as
    /// [`ZoneCountError::InvalidClassIndex`] instead of being truncated.
    pub fn to_detection(&self, class_count: usize) -> Result<Detection, ZoneCountError> {
        let id = self.class_id;
        let is_index = id.is_finite() && id >= 0.0 && id.fract() == 0.0;
        if !is_index || id >= class_count as f64 {
            return Err(ZoneCountError::InvalidClassIndex {
                class_id: id,
                class_count,
            });
        }

        Ok(Detection::new(
            BBoxXYXY::from_xyxy(self.x1, self.y1, self.x2, self.y2),
            self.score,
            id as usize,
        ))
    }
}

impl<'de> Deserialize<'de> for RawDetection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
            score: f64,
            class_id: f64,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Row([f64; 6]),
            Object(Fields),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Row(row) => RawDetection::from_row(row),
            Repr::Object(f) => RawDetection {
                x1: f.x1,
                y1: f.y1,
                x2: f.x2,
                y2: f.y2,
                score: f.score,
                class_id: f.class_id,
            },
        })
    }
}
