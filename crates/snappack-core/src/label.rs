//! Name labels under passport photos.
//!
//! A label is upper-cased and centred in its strip. The font size starts at 52% of
//! the strip height and shrinks in steps of 2 px while the text is wider than the
//! strip minus a 10 px margin each side, never going below [`MIN_FONT_PX`]. Text
//! that still overflows at the floor is drawn anyway.
//!
//! DejaVu Sans Bold is embedded as the default face, so names render without any
//! font on the host.

use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};
use std::path::Path;
use tracing::{debug, trace};

use crate::compositing::fill_rect;
use crate::error::{Result, SnapPackError};
use crate::model::Rect;

/// Smallest font size the auto-shrink loop will choose.
pub const MIN_FONT_PX: u32 = 18;
/// Shrink step in pixels.
pub const FONT_STEP_PX: u32 = 2;
/// Initial size as a fraction of the label strip height.
pub const FONT_HEIGHT_RATIO: f64 = 0.52;
/// Horizontal room kept free around the text (total of both sides).
pub const LABEL_PADDING_PX: u32 = 20;

/// DejaVu Sans Bold, used when no other face is configured.
pub const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Something that can measure and draw a single line of text.
///
/// Widths are advance widths: the distance the pen moves while laying out the
/// string, including kerning.
pub trait TextFace: Send + Sync {
    fn measure(&self, text: &str, px: f32) -> f32;
    /// Draws `text` so its advance box is centred on `(cx, cy)`.
    fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        px: f32,
        cx: f32,
        cy: f32,
        color: Rgb<u8>,
    );
}

/// A TrueType/OpenType face rendered with `rusttype`.
pub struct TrueTypeFace {
    font: Font<'static>,
}

impl TrueTypeFace {
    /// The embedded default face ([`FONT_BYTES`]).
    pub fn embedded() -> Result<Self> {
        let font = Font::try_from_bytes(FONT_BYTES)
            .ok_or_else(|| SnapPackError::Font("embedded font is unreadable".into()))?;
        Ok(Self { font })
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| SnapPackError::Font("unrecognised font data".into()))?;
        Ok(Self { font })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_bytes(data).map_err(|_| {
            SnapPackError::Font(format!("{}: unrecognised font data", path.display()))
        })
    }
}

impl TextFace for TrueTypeFace {
    fn measure(&self, text: &str, px: f32) -> f32 {
        let scale = Scale::uniform(px);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        px: f32,
        cx: f32,
        cy: f32,
        color: Rgb<u8>,
    ) {
        let scale = Scale::uniform(px);
        let vm = self.font.v_metrics(scale);
        let width = self.measure(text, px);
        let height = (vm.ascent - vm.descent).max(1.0);
        let left = (cx - width / 2.0).round();
        let baseline = (cy - height / 2.0).round() + vm.ascent;
        let (cw, ch) = canvas.dimensions();

        for glyph in self.font.layout(text, scale, point(left, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let x = gx as i32 + bb.min.x;
                let y = gy as i32 + bb.min.y;
                if x < 0 || y < 0 || x as u32 >= cw || y as u32 >= ch {
                    return;
                }
                let a = v.clamp(0.0, 1.0);
                if a <= 0.0 {
                    return;
                }
                let dst = canvas.get_pixel_mut(x as u32, y as u32);
                for i in 0..3 {
                    let mixed = color.0[i] as f32 * a + dst.0[i] as f32 * (1.0 - a);
                    dst.0[i] = mixed.round() as u8;
                }
            });
        }
    }
}

/// Trims, caps at `max_chars` characters and upper-cases a name.
/// Returns `None` when nothing printable remains.
pub fn normalize_label(name: &str, max_chars: usize) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    let capped: String = trimmed.chars().take(max_chars).collect();
    let upper = capped.trim_end().to_uppercase();
    if upper.is_empty() { None } else { Some(upper) }
}

/// Initial font size for a label strip `strip_h` pixels tall, never below
/// [`MIN_FONT_PX`]. Strips of 33 px or less start at the floor.
pub fn initial_font_px(strip_h: u32) -> u32 {
    ((strip_h as f64 * FONT_HEIGHT_RATIO).round() as u32).max(MIN_FONT_PX)
}

/// Upper bound on shrink iterations from `initial` down to the floor.
pub fn max_shrink_steps(initial: u32) -> u32 {
    initial.saturating_sub(MIN_FONT_PX).div_ceil(FONT_STEP_PX)
}

/// Chooses the label font size for `text` in a strip `max_w x strip_h`.
///
/// `measure(text, px)` returns the rendered advance width at `px`.
pub fn fit_font_px<F>(text: &str, max_w: u32, strip_h: u32, measure: F) -> u32
where
    F: Fn(&str, f32) -> f32,
{
    let limit = max_w.saturating_sub(LABEL_PADDING_PX) as f32;
    let mut size = initial_font_px(strip_h);
    for _ in 0..max_shrink_steps(size) {
        if measure(text, size as f32) <= limit || size <= MIN_FONT_PX {
            break;
        }
        size = (size - FONT_STEP_PX).max(MIN_FONT_PX);
    }
    trace!(size, "label font size");
    size
}

/// Paints the white strip behind `area` and, when there is text and a face, the
/// label centred in it.
pub fn draw_label(
    canvas: &mut RgbImage,
    area: &Rect,
    text: Option<&str>,
    face: Option<&dyn TextFace>,
    color: Rgb<u8>,
) {
    fill_rect(canvas, area, Rgb([255, 255, 255]));
    let (Some(text), Some(face)) = (text, face) else {
        return;
    };
    let size = fit_font_px(text, area.w, area.h, |t, px| face.measure(t, px));
    let cx = area.x as f32 + area.w as f32 / 2.0;
    let cy = area.y as f32 + area.h as f32 / 2.0;
    debug!(size, cx, cy, "draw label");
    face.draw_centered(canvas, text, size as f32, cx, cy, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(
            normalize_label("  juan dela cruz ", 60).as_deref(),
            Some("JUAN DELA CRUZ")
        );
        assert_eq!(normalize_label("   ", 60), None);
        assert_eq!(normalize_label("", 60), None);
    }

    #[test]
    fn normalize_caps_length() {
        let long = "a".repeat(80);
        assert_eq!(normalize_label(&long, 60).map(|s| s.len()), Some(60));
    }

    #[test]
    fn odd_start_stops_at_floor() {
        // 37 px strip starts at 19 px
        assert_eq!(fit_font_px("WIDE", 100, 37, |_, _| 1000.0), MIN_FONT_PX);
    }

    #[test]
    fn shrink_steps_bound() {
        assert_eq!(initial_font_px(69), 36);
        assert_eq!(max_shrink_steps(36), 9);
        assert_eq!(max_shrink_steps(19), 1);
        assert_eq!(max_shrink_steps(10), 0);
    }

    #[test]
    fn small_strips_start_at_floor() {
        // 100 DPI name strip
        assert_eq!(initial_font_px(23), MIN_FONT_PX);
        assert_eq!(fit_font_px("ANA", 138, 23, |_, _| 1000.0), MIN_FONT_PX);
    }

    #[test]
    fn embedded_face_loads() {
        let face = TrueTypeFace::embedded().expect("embedded face");
        let narrow = face.measure("ANA", 18.0);
        let wide = face.measure("ANA", 36.0);
        assert!(narrow > 0.0 && (wide / narrow - 2.0).abs() < 0.05);
    }

    #[test]
    fn garbage_font_is_rejected() {
        assert!(matches!(
            TrueTypeFace::from_bytes(vec![0u8; 64]),
            Err(SnapPackError::Font(_))
        ));
    }
}
