//! Single-size packages: B (ten 1x1) and C (six 2x2).

use super::{column_dividers, grid, photo_layout};
use crate::geometry::SheetGeometry;
use crate::model::{CutLine, PackageLayout, Rect};
use crate::package::PackageId;

/// Package B: rows of 4 + 4 + 2 one-inch photos, top-aligned. The last two sit in
/// columns 1 and 2 of the four-column grid.
pub fn package_b(g: &SheetGeometry) -> PackageLayout {
    let s1 = g.s1;
    let mut rects = grid(0, 0, 4, 2, s1, s1);
    rects.extend((1..=2).map(|c| Rect::new(c * s1, 2 * s1, s1, s1)));

    let mut lines: Vec<CutLine> = (1..=3)
        .map(|r| CutLine::horizontal(r * s1, 0, g.paper_w))
        .collect();
    lines.extend(column_dividers(0, 4, s1, 0, 2 * s1));
    lines.extend(column_dividers(0, 4, s1, 2 * s1, 3 * s1));
    photo_layout(PackageId::B, g, rects, lines)
}

/// Package C: 2 columns x 3 rows of 2x2 photos filling the sheet exactly.
pub fn package_c(g: &SheetGeometry) -> PackageLayout {
    let s2 = g.s2;
    let rects = grid(0, 0, 2, 3, s2, s2);
    let lines = vec![
        CutLine::vertical(s2, 0, g.paper_h),
        CutLine::horizontal(s2, 0, g.paper_w),
        CutLine::horizontal(2 * s2, 0, g.paper_w),
    ];
    photo_layout(PackageId::C, g, rects, lines)
}
