//! Core value types for detection post-processing.
//!
//! Boxes, points and zones carry their coordinate space as a type parameter,
//! so a normalized zone cannot be compared against pixel boxes until it has
//! been resolved for a concrete image size.
//!
//! # Example
//!
//! ```
//! use zonecount::ir::{BBoxXYXY, Pixel, Zone};
//!
//! let zone = Zone::new(0.0, 0.0, 0.5, 0.5).unwrap().resolve(200, 100);
//! let bbox = BBoxXYXY::<Pixel>::from_xyxy(10.0, 10.0, 30.0, 30.0);
//! assert!(zone.contains(&bbox));
//! ```

mod bbox;
mod coord;
mod detection;
pub mod io_image;
pub mod io_json;
mod registry;
mod space;
mod zone;

pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use detection::{Detection, RawDetection};
pub use registry::ClassRegistry;
pub use space::{Normalized, Pixel};
pub use zone::{ResolvedZone, Zone, DEFAULT_ZONE};
