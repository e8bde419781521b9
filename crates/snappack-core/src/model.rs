use serde::{Deserialize, Serialize};

use crate::package::PackageId;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the interiors intersect; touching edges do not count.
    pub fn overlaps(&self, r: &Rect) -> bool {
        self.x < r.right() && r.x < self.right() && self.y < r.bottom() && r.y < self.bottom()
    }
}

/// A straight cut-guide segment from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CutLine {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CutLine {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }
    pub fn horizontal(y: u32, x1: u32, x2: u32) -> Self {
        Self::new(x1, y, x2, y)
    }
    pub fn vertical(x: u32, y1: u32, y2: u32) -> Self {
        Self::new(x, y1, x, y2)
    }
    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }
    pub fn length(&self) -> f64 {
        let dx = self.x2 as f64 - self.x1 as f64;
        let dy = self.y2 as f64 - self.y1 as f64;
        dx.hypot(dy)
    }
    /// The four edges of `r`: top, bottom, left, right.
    pub fn outline(r: &Rect) -> [CutLine; 4] {
        [
            Self::horizontal(r.y, r.x, r.right()),
            Self::horizontal(r.bottom(), r.x, r.right()),
            Self::vertical(r.x, r.y, r.bottom()),
            Self::vertical(r.right(), r.y, r.bottom()),
        ]
    }
}

/// One placement of the source photo. Passport cells carry a name strip directly
/// beneath the photo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub photo: Rect,
    pub label: Option<Rect>,
}

impl Cell {
    pub fn photo(photo: Rect) -> Self {
        Self { photo, label: None }
    }

    /// Photo of `w x photo_h` with a `w x label_h` strip below it.
    pub fn labelled(x: u32, y: u32, w: u32, photo_h: u32, label_h: u32) -> Self {
        Self {
            photo: Rect::new(x, y, w, photo_h),
            label: Some(Rect::new(x, y + photo_h, w, label_h)),
        }
    }

    /// Bounding box of photo and label together.
    pub fn outer(&self) -> Rect {
        match self.label {
            Some(l) => {
                let h = l.bottom() - self.photo.y;
                Rect::new(self.photo.x, self.photo.y, self.photo.w, h)
            }
            None => self.photo,
        }
    }
}

/// Cells and cut guides of one package on one sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageLayout {
    pub package: PackageId,
    pub sheet_w: u32,
    pub sheet_h: u32,
    /// Cells in drawing order.
    pub cells: Vec<Cell>,
    /// Guides drawn after every cell.
    pub cut_lines: Vec<CutLine>,
    /// Cells carry name strips and a border.
    pub labelled: bool,
}

/// Coverage figures for a layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    pub num_cells: usize,
    pub num_cut_lines: usize,
    /// Sum of photo areas (label strips excluded).
    pub photo_area: u64,
    /// Sum of outer cell areas.
    pub cell_area: u64,
    pub sheet_area: u64,
    /// `cell_area / sheet_area` (0.0 to 1.0).
    pub coverage: f64,
}

impl PackageLayout {
    pub fn sheet_rect(&self) -> Rect {
        Rect::new(0, 0, self.sheet_w, self.sheet_h)
    }

    pub fn stats(&self) -> LayoutStats {
        let photo_area: u64 = self.cells.iter().map(|c| c.photo.area()).sum();
        let cell_area: u64 = self.cells.iter().map(|c| c.outer().area()).sum();
        let sheet_area = self.sheet_rect().area();
        let coverage = if sheet_area > 0 {
            cell_area as f64 / sheet_area as f64
        } else {
            0.0
        };
        LayoutStats {
            num_cells: self.cells.len(),
            num_cut_lines: self.cut_lines.len(),
            photo_area,
            cell_area,
            sheet_area,
            coverage,
        }
    }
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Cells: {}, Cut lines: {}, Coverage: {:.2}%, Photo area: {} px², Sheet area: {} px²",
            self.num_cells,
            self.num_cut_lines,
            self.coverage * 100.0,
            self.photo_area,
            self.sheet_area,
        )
    }
}
