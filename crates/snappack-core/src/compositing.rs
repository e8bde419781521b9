use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// Fractional source window selected by a cover fit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SourceWindow {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
}

impl SourceWindow {
    pub fn aspect(&self) -> f64 {
        self.sw / self.sh
    }

    /// Snaps the window to whole pixels, keeping it inside a `width x height` source
    /// and at least one pixel in each direction.
    pub fn to_pixels(&self, width: u32, height: u32) -> Rect {
        let w = (self.sw.round() as u32).clamp(1, width.max(1));
        let h = (self.sh.round() as u32).clamp(1, height.max(1));
        let x = (self.sx.round() as u32).min(width.saturating_sub(w));
        let y = (self.sy.round() as u32).min(height.saturating_sub(h));
        Rect::new(x, y, w, h)
    }
}

/// Selects the centred window of a `src_w x src_h` image whose aspect ratio equals
/// `dw / dh`.
///
/// A source wider than the destination keeps its full height and loses equal
/// slices left and right; otherwise it keeps its full width and loses equal
/// slices top and bottom.
pub fn cover_window(src_w: u32, src_h: u32, dw: u32, dh: u32) -> SourceWindow {
    let (iw, ih) = (src_w as f64, src_h as f64);
    let ir = iw / ih;
    let dr = dw as f64 / dh as f64;
    if ir > dr {
        let sh = ih;
        let sw = sh * dr;
        SourceWindow {
            sx: (iw - sw) / 2.0,
            sy: 0.0,
            sw,
            sh,
        }
    } else {
        let sw = iw;
        let sh = sw / dr;
        SourceWindow {
            sx: 0.0,
            sy: (ih - sh) / 2.0,
            sw,
            sh,
        }
    }
}

/// Crops `src` to the cover window for a `dw x dh` destination and resamples it
/// to exactly that size.
pub fn cover_crop(src: &RgbImage, dw: u32, dh: u32, filter: FilterType) -> RgbImage {
    let (iw, ih) = src.dimensions();
    let win = cover_window(iw, ih, dw, dh).to_pixels(iw, ih);
    let view = imageops::crop_imm(src, win.x, win.y, win.w, win.h);
    if win.w == dw && win.h == dh {
        return view.to_image();
    }
    imageops::resize(&*view, dw, dh, filter)
}

/// Copies `tile` into `canvas` with its top-left at `(dx, dy)`, clipped to the canvas.
pub fn blit_rgb(tile: &RgbImage, canvas: &mut RgbImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    for (x, y, px) in tile.enumerate_pixels() {
        if dx + x < cw && dy + y < ch {
            canvas.put_pixel(dx + x, dy + y, *px);
        }
    }
}

/// Cover-fits `src` into `dest` on `canvas`.
pub fn draw_cover(src: &RgbImage, canvas: &mut RgbImage, dest: &Rect, filter: FilterType) {
    if dest.w == 0 || dest.h == 0 {
        return;
    }
    let tile = cover_crop(src, dest.w, dest.h, filter);
    blit_rgb(&tile, canvas, dest.x, dest.y);
}

/// Paints `r` with a solid colour.
pub fn fill_rect(canvas: &mut RgbImage, r: &Rect, color: Rgb<u8>) {
    if r.w == 0 || r.h == 0 {
        return;
    }
    let rect = imageproc::rect::Rect::at(r.x as i32, r.y as i32).of_size(r.w, r.h);
    draw_filled_rect_mut(canvas, rect, color);
}

/// Strokes a border of `thickness` pixels just inside the edges of `r`.
pub fn stroke_inner_border(canvas: &mut RgbImage, r: &Rect, thickness: u32, color: Rgb<u8>) {
    if thickness == 0 {
        return;
    }
    let t = thickness.min(r.w / 2).min(r.h / 2).max(1);
    let sides = [
        Rect::new(r.x, r.y, r.w, t),
        Rect::new(r.x, r.bottom() - t, r.w, t),
        Rect::new(r.x, r.y, t, r.h),
        Rect::new(r.right() - t, r.y, t, r.h),
    ];
    for side in &sides {
        fill_rect(canvas, side, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_source_keeps_full_height() {
        let w = cover_window(4000, 3000, 900, 1200);
        assert_eq!(w.sh, 3000.0);
        assert!((w.sw - 2250.0).abs() < 1e-9);
        assert!((w.sx - 875.0).abs() < 1e-9);
        assert_eq!(w.sy, 0.0);
    }

    #[test]
    fn tall_source_keeps_full_width() {
        let w = cover_window(300, 900, 600, 600);
        assert_eq!(w.sw, 300.0);
        assert_eq!(w.sh, 300.0);
        assert_eq!(w.sy, 300.0);
    }

    #[test]
    fn pixel_window_stays_in_bounds() {
        let r = cover_window(7, 3, 413, 531).to_pixels(7, 3);
        assert!(r.right() <= 7 && r.bottom() <= 3);
        assert!(r.w >= 1 && r.h >= 1);
    }

    #[test]
    fn inner_border_leaves_centre_untouched() {
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        stroke_inner_border(&mut canvas, &Rect::new(0, 0, 20, 20), 3, Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(2, 10).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(17, 10).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(3, 10).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(10, 10).0, [255, 255, 255]);
    }
}
