//! Axis-aligned boxes in XYXY form and the overlap arithmetic used by NMS.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// An axis-aligned bounding box in XYXY format (x1, y1, x2, y2).
///
/// The constructor does NOT enforce `x1 <= x2` or `y1 <= y2`. Detector
/// output is noisy, and the geometry below treats an inverted box as having
/// zero extent on the inverted axis instead of rejecting it.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn from_xyxy(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Coord::new(x1, y1),
            max: Coord::new(x2, y2),
        }
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn x2(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn y2(&self) -> f64 {
        self.max.y
    }

    /// Width clamped to zero for inverted boxes.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Height clamped to zero for inverted boxes.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Area of the box, never negative.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns true if the box is properly ordered (min <= max on both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Midpoint of the box.
    #[inline]
    pub fn center(&self) -> Coord<TSpace> {
        Coord::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Area of the overlap rectangle, 0 when the boxes are disjoint.
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let x1 = self.min.x.max(other.min.x);
        let y1 = self.min.y.max(other.min.y);
        let x2 = self.max.x.min(other.max.x);
        let y2 = self.max.y.min(other.max.y);

        (x2 - x1).max(0.0) * (y2 - y1).max(0.0)
    }

    /// Area covered by either box.
    pub fn union_area(&self, other: &Self) -> f64 {
        self.area() + other.area() - self.intersection_area(other)
    }

    /// Intersection-over-Union in `[0, 1]`.
    ///
    /// Two degenerate boxes have a zero union; that case returns 0 rather
    /// than dividing by zero.
    pub fn iou(&self, other: &Self) -> f64 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union > 0.0 {
            inter / union
        } else {
            0.0
        }
    }

    /// Returns true if `point` lies inside the box, edges included.
    #[inline]
    pub fn contains_point(&self, point: Coord<TSpace>) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("x1", &self.min.x)
            .field("y1", &self.min.y)
            .field("x2", &self.max.x)
            .field("y2", &self.max.y)
            .finish()
    }
}

impl<TSpace> std::fmt::Display for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BBoxXYXY", 4)?;
        state.serialize_field("x1", &self.min.x)?;
        state.serialize_field("y1", &self.min.y)?;
        state.serialize_field("x2", &self.max.x)?;
        state.serialize_field("y2", &self.max.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BBoxData {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        }
        let data = BBoxData::deserialize(deserializer)?;
        Ok(BBoxXYXY::from_xyxy(data.x1, data.y1, data.x2, data.y2))
    }
}
