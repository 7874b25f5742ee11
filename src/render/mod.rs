//! Draws a pass's counted boxes and zone onto the source image.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::count::AnnotatedDetection;
use crate::error::ZoneCountError;
use crate::ir::{BBoxXYXY, Pixel, ResolvedZone};
use crate::pipeline::PipelineOutput;

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const ZONE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Outline thickness in pixels; extra lines are drawn inside the box.
const LINE_THICKNESS: u32 = 2;

/// Draws the zone, then every counted box on top of it.
pub fn draw_output(img: &mut RgbImage, zone: &ResolvedZone, annotations: &[AnnotatedDetection]) {
    draw_box(img, zone.rect(), ZONE_COLOR);
    for annotation in annotations {
        draw_box(img, &annotation.bbox, BOX_COLOR);
    }
}

/// Reads `source`, draws `output` onto it and writes the result to `dest`.
///
/// The output format follows the extension of `dest`.
pub fn write_annotated_image(
    source: &Path,
    dest: &Path,
    output: &PipelineOutput,
) -> Result<(), ZoneCountError> {
    let mut img = image::open(source)
        .map_err(|source_err| ZoneCountError::ImageDecode {
            path: source.to_path_buf(),
            source: source_err,
        })?
        .to_rgb8();

    draw_output(&mut img, &output.zone, &output.annotations);

    img.save(dest).map_err(|source| ZoneCountError::ImageWrite {
        path: dest.to_path_buf(),
        source,
    })
}

fn draw_box(img: &mut RgbImage, bbox: &BBoxXYXY<Pixel>, color: Rgb<u8>) {
    if !bbox.is_finite() {
        log::warn!("not drawing non-finite box {:?}", bbox);
        return;
    }

    let x = bbox.x1().round() as i32;
    let y = bbox.y1().round() as i32;
    let width = bbox.width().round() as u32;
    let height = bbox.height().round() as u32;

    for inset in 0..LINE_THICKNESS {
        // Rect::of_size panics on a zero extent.
        let w = width.saturating_sub(2 * inset);
        let h = height.saturating_sub(2 * inset);
        if w == 0 || h == 0 {
            break;
        }
        let offset = inset as i32;
        let rect = Rect::at(x.saturating_add(offset), y.saturating_add(offset)).of_size(w, h);
        draw_hollow_rect_mut(img, rect, color);
    }
}
