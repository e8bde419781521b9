//! Dashed cut guides.
//!
//! Guides are blended over whatever is already on the sheet. Each segment is
//! rasterised to a set of covered pixels first and every covered pixel is blended
//! exactly once per segment, so the result does not depend on segment order.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::CutLine;

/// Stroke parameters for cut guides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CutLineStyle {
    pub color: [u8; 3],
    /// Blend factor, 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Stroke width in pixels, centred on the segment.
    pub width: u32,
    /// Dash length in pixels.
    pub dash: u32,
    /// Gap length in pixels.
    pub gap: u32,
}

impl Default for CutLineStyle {
    fn default() -> Self {
        Self {
            color: [180, 180, 180],
            opacity: 0.8,
            width: 3,
            dash: 18,
            gap: 12,
        }
    }
}

impl CutLineStyle {
    /// Whether the pixel at distance `along` from the segment start is inside a dash.
    pub fn is_dash(&self, along: u32) -> bool {
        let period = self.dash + self.gap;
        period == 0 || self.gap == 0 || along % period < self.dash
    }

    pub fn blend(&self, under: Rgb<u8>) -> Rgb<u8> {
        let a = self.opacity.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for (i, o) in out.iter_mut().enumerate() {
            let v = self.color[i] as f32 * a + under.0[i] as f32 * (1.0 - a);
            *o = v.round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    }
}

/// Pixels covered by one dashed segment, clipped to a `width x height` canvas.
pub fn rasterize(
    line: &CutLine,
    style: &CutLineStyle,
    width: u32,
    height: u32,
) -> HashSet<(u32, u32)> {
    let mut covered = HashSet::new();
    let len = line.length();
    if len <= 0.0 || style.width == 0 {
        return covered;
    }
    let (x1, y1) = (line.x1 as f64, line.y1 as f64);
    let dx = (line.x2 as f64 - x1) / len;
    let dy = (line.y2 as f64 - y1) / len;
    let half = (style.width / 2) as i64;
    let stroke = style.width as i64;
    // Axis-aligned guides widen across the stroke only; diagonals get a square pen.
    let pen: Vec<(i64, i64)> = if line.is_horizontal() {
        (0..stroke).map(|o| (0, o - half)).collect()
    } else if line.is_vertical() {
        (0..stroke).map(|o| (o - half, 0)).collect()
    } else {
        (0..stroke)
            .flat_map(|oy| (0..stroke).map(move |ox| (ox - half, oy - half)))
            .collect()
    };
    let steps = len.ceil() as u32;
    for s in 0..steps {
        if !style.is_dash(s) {
            continue;
        }
        let t = s as f64;
        let cx = (x1 + dx * t).round() as i64;
        let cy = (y1 + dy * t).round() as i64;
        for &(ox, oy) in &pen {
            let (px, py) = (cx + ox, cy + oy);
            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                covered.insert((px as u32, py as u32));
            }
        }
    }
    covered
}

/// Blends every segment of `lines` onto `canvas`.
pub fn draw_cut_lines(canvas: &mut RgbImage, lines: &[CutLine], style: &CutLineStyle) {
    let (w, h) = canvas.dimensions();
    for line in lines {
        for (x, y) in rasterize(line, style, w, h) {
            let under = *canvas.get_pixel(x, y);
            canvas.put_pixel(x, y, style.blend(under));
        }
    }
}
