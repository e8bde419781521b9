use serde::{Deserialize, Serialize};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Print resolution every package is designed for.
pub const STANDARD_DPI: u32 = 300;

/// Physical paper size in inches (portrait 4x6).
pub const PAPER_INCHES: (u32, u32) = (4, 6);

/// Passport photo size in millimetres (35x45).
pub const PASSPORT_MM: (f64, f64) = (35.0, 45.0);

/// Thickness of the border stroked around each passport cell, in millimetres.
pub const CELL_BORDER_MM: f64 = 0.5;

/// Pixel measurements derived from a print resolution.
///
/// All values are computed once from `dpi` and handed to each layout function.
/// Fractional results are rounded half away from zero (`f64::round`), so a 300 DPI
/// geometry reproduces the reference sheets pixel for pixel:
///
/// | field          | 300 DPI |
/// |----------------|---------|
/// | `paper_w`      | 1200    |
/// | `paper_h`      | 1800    |
/// | `s1` (1x1 in)  | 300     |
/// | `s2` (2x2 in)  | 600     |
/// | `passport_w`   | 413     |
/// | `passport_h`   | 531     |
/// | `name_h`       | 69      |
/// | `cell_h`       | 600     |
/// | `border_px`    | 6       |
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetGeometry {
    pub dpi: u32,
    pub paper_w: u32,
    pub paper_h: u32,
    /// 1x1 inch cell edge.
    pub s1: u32,
    /// 2x2 inch cell edge.
    pub s2: u32,
    /// 3x4 inch portrait cell.
    pub s34_w: u32,
    pub s34_h: u32,
    pub passport_w: u32,
    pub passport_h: u32,
    /// Height of the name strip under a passport photo.
    ///
    /// Leftover height after three passport rows, split evenly across three rows.
    /// The two-row package shares this value so every passport cell has the same
    /// height.
    pub name_h: u32,
    /// `passport_h + name_h`.
    pub cell_h: u32,
    pub border_px: u32,
}

impl SheetGeometry {
    pub fn new(dpi: u32) -> Self {
        let d = dpi as f64;
        let px_per_mm = d / MM_PER_INCH;
        let paper_w = PAPER_INCHES.0 * dpi;
        let paper_h = PAPER_INCHES.1 * dpi;
        let passport_w = round_px(PASSPORT_MM.0 * px_per_mm);
        let passport_h = round_px(PASSPORT_MM.1 * px_per_mm);
        let leftover = paper_h as f64 - 3.0 * passport_h as f64;
        let name_h = round_px(leftover / 3.0);
        Self {
            dpi,
            paper_w,
            paper_h,
            s1: dpi,
            s2: 2 * dpi,
            s34_w: 3 * dpi,
            s34_h: 4 * dpi,
            passport_w,
            passport_h,
            name_h,
            cell_h: passport_h + name_h,
            border_px: round_px(CELL_BORDER_MM * px_per_mm),
        }
    }

    /// Geometry at 300 DPI.
    pub fn standard() -> Self {
        Self::new(STANDARD_DPI)
    }

    /// Pixels per millimetre at this resolution.
    pub fn px_per_mm(&self) -> f64 {
        self.dpi as f64 / MM_PER_INCH
    }

    /// Offset that centres a block of `block` pixels within `span` pixels.
    pub fn centered(span: u32, block: u32) -> u32 {
        round_px((span as f64 - block as f64) / 2.0)
    }
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Round to the nearest pixel, halves away from zero; negatives clamp to 0.
pub fn round_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}
