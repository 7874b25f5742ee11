//! Counting zones: a normalized rectangle resolved per image into pixels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::space::{Normalized, Pixel};
use crate::error::ZoneCountError;

/// Zone used when none is configured: the central band of the frame.
pub const DEFAULT_ZONE: (f64, f64, f64, f64) = (0.35, 0.2, 0.7, 0.6);

/// A validated region of interest in normalized image coordinates.
///
/// Invariants: every coordinate is finite and in `[0, 1]`, `x1 < x2` and
/// `y1 < y2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Zone {
    rect: BBoxXYXY<Normalized>,
}

impl Zone {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ZoneCountError> {
        let invalid = |reason| ZoneCountError::InvalidZone {
            x1,
            y1,
            x2,
            y2,
            reason,
        };

        let coords = [x1, y1, x2, y2];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(invalid("coordinates must be finite"));
        }
        if coords.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(invalid("coordinates must lie in [0, 1]"));
        }
        if x1 >= x2 {
            return Err(invalid("x1 must be less than x2"));
        }
        if y1 >= y2 {
            return Err(invalid("y1 must be less than y2"));
        }

        Ok(Self {
            rect: BBoxXYXY::from_xyxy(x1, y1, x2, y2),
        })
    }

    /// The whole image.
    pub fn full() -> Self {
        Self {
            rect: BBoxXYXY::from_xyxy(0.0, 0.0, 1.0, 1.0),
        }
    }

    pub fn rect(&self) -> &BBoxXYXY<Normalized> {
        &self.rect
    }

    /// Maps the zone onto an image of the given size.
    ///
    /// Each coordinate is scaled by its axis dimension and rounded to the
    /// nearest pixel (halves away from zero).
    pub fn resolve(&self, image_width: u32, image_height: u32) -> ResolvedZone {
        let w = f64::from(image_width);
        let h = f64::from(image_height);
        ResolvedZone {
            rect: BBoxXYXY::from_xyxy(
                (self.rect.x1() * w).round(),
                (self.rect.y1() * h).round(),
                (self.rect.x2() * w).round(),
                (self.rect.y2() * h).round(),
            ),
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        let (x1, y1, x2, y2) = DEFAULT_ZONE;
        Self {
            rect: BBoxXYXY::from_xyxy(x1, y1, x2, y2),
        }
    }
}

impl TryFrom<[f64; 4]> for Zone {
    type Error = ZoneCountError;

    fn try_from([x1, y1, x2, y2]: [f64; 4]) -> Result<Self, Self::Error> {
        Zone::new(x1, y1, x2, y2)
    }
}

impl From<Zone> for [f64; 4] {
    fn from(zone: Zone) -> Self {
        let r = zone.rect;
        [r.x1(), r.y1(), r.x2(), r.y2()]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rect)
    }
}

/// Parses `"x1,y1,x2,y2"`, as accepted on the command line.
impl FromStr for Zone {
    type Err = ZoneCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ZoneCountError::InvalidOption(format!("zone '{s}': {e}")))?;

        match parts.as_slice() {
            &[x1, y1, x2, y2] => Zone::new(x1, y1, x2, y2),
            _ => Err(ZoneCountError::InvalidOption(format!(
                "zone '{s}': expected four comma-separated values x1,y1,x2,y2"
            ))),
        }
    }
}

/// A zone in the pixel space of one particular image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedZone {
    rect: BBoxXYXY<Pixel>,
}

impl ResolvedZone {
    pub fn rect(&self) -> &BBoxXYXY<Pixel> {
        &self.rect
    }

    /// Returns true if the center of `bbox` lies inside the zone.
    ///
    /// All four edges are inclusive: a center exactly on the border counts.
    #[inline]
    pub fn contains(&self, bbox: &BBoxXYXY<Pixel>) -> bool {
        self.rect.contains_point(bbox.center())
    }
}
