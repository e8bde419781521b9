//! Package G: one 3x4 portrait with a strip of four 1x1 photos.

use super::photo_layout;
use crate::geometry::SheetGeometry;
use crate::model::{CutLine, PackageLayout, Rect};
use crate::package::PackageId;

/// Package G: a 3x4 inch photo on the left, four 1x1 photos stacked to its
/// right, centred vertically.
pub fn package_g(g: &SheetGeometry) -> PackageLayout {
    let (s1, w, h, pw) = (g.s1, g.s34_w, g.s34_h, g.paper_w);
    let top = SheetGeometry::centered(g.paper_h, h);
    let mut rects = vec![Rect::new(0, top, w, h)];
    rects.extend((0..4).map(|i| Rect::new(w, top + i * s1, s1, s1)));

    let mut lines = vec![
        CutLine::horizontal(top, 0, pw),
        CutLine::horizontal(top + h, 0, pw),
        CutLine::vertical(w, top, top + h),
    ];
    lines.extend((1..=3).map(|i| CutLine::horizontal(top + i * s1, w, pw)));
    lines.push(CutLine::vertical(pw, top, top + h));
    photo_layout(PackageId::G, g, rects, lines)
}
