//! Mixed-size packages: A, E and H.

use super::{column_dividers, grid, photo_layout};
use crate::geometry::SheetGeometry;
use crate::model::{CutLine, PackageLayout};
use crate::package::PackageId;

/// Package A: a 2x2 grid of 2x2 photos, then one row of four 1x1 photos below,
/// top-aligned.
pub fn package_a(g: &SheetGeometry) -> PackageLayout {
    let (s1, s2, pw) = (g.s1, g.s2, g.paper_w);
    let small_y = 2 * s2;
    let mut rects = grid(0, 0, 2, 2, s2, s2);
    rects.extend(grid(0, small_y, 4, 1, s1, s1));

    let mut lines = vec![
        CutLine::vertical(s2, 0, 2 * s2),
        CutLine::horizontal(s2, 0, pw),
        CutLine::horizontal(small_y, 0, pw),
    ];
    lines.extend(column_dividers(0, 4, s1, small_y, small_y + s1));
    lines.push(CutLine::horizontal(small_y + s1, 0, pw));
    photo_layout(PackageId::A, g, rects, lines)
}

/// Package E: two 2x2 photos side by side over two rows of four 1x1 photos,
/// centred vertically.
pub fn package_e(g: &SheetGeometry) -> PackageLayout {
    let (s1, s2, pw) = (g.s1, g.s2, g.paper_w);
    let total_h = s2 + 2 * s1;
    let top = SheetGeometry::centered(g.paper_h, total_h);
    let small_y = top + s2;
    let mut rects = grid(0, top, 2, 1, s2, s2);
    rects.extend(grid(0, small_y, 4, 2, s1, s1));

    let mut lines = vec![
        CutLine::vertical(s2, top, top + s2),
        CutLine::horizontal(small_y, 0, pw),
        CutLine::horizontal(small_y + s1, 0, pw),
        CutLine::horizontal(small_y + 2 * s1, 0, pw),
    ];
    lines.extend(column_dividers(0, 4, s1, small_y, top + total_h));
    lines.push(CutLine::horizontal(top, 0, pw));
    lines.push(CutLine::horizontal(top + total_h, 0, pw));
    photo_layout(PackageId::E, g, rects, lines)
}

/// Package H: 1x1 row, 2x2 row, 1x1 row, centred vertically.
pub fn package_h(g: &SheetGeometry) -> PackageLayout {
    let (s1, s2, pw) = (g.s1, g.s2, g.paper_w);
    let total_h = s1 + s2 + s1;
    let top = SheetGeometry::centered(g.paper_h, total_h);
    let mid_y = top + s1;
    let bottom_y = mid_y + s2;
    let mut rects = grid(0, top, 4, 1, s1, s1);
    rects.extend(grid(0, mid_y, 2, 1, s2, s2));
    rects.extend(grid(0, bottom_y, 4, 1, s1, s1));

    let mut lines = vec![
        CutLine::horizontal(top, 0, pw),
        CutLine::horizontal(top + total_h, 0, pw),
        CutLine::horizontal(mid_y, 0, pw),
        CutLine::horizontal(bottom_y, 0, pw),
    ];
    lines.extend(column_dividers(0, 4, s1, top, mid_y));
    lines.extend(column_dividers(0, 2, s2, mid_y, bottom_y));
    lines.extend(column_dividers(0, 4, s1, bottom_y, top + total_h));
    photo_layout(PackageId::H, g, rects, lines)
}
