//! Package layouts.
//!
//! Each package is a pure function from [`SheetGeometry`] to a [`PackageLayout`]:
//! the cells to fill with the photo (in drawing order) and the cut guides laid
//! over them. Nothing is drawn here; see [`crate::pipeline`] for rendering.

use crate::error::Result;
use crate::geometry::SheetGeometry;
use crate::model::{Cell, CutLine, PackageLayout, Rect};
use crate::package::PackageId;

pub mod combo;
pub mod passport;
pub mod school;
pub mod uniform;

/// Computes one package's layout.
pub type LayoutFn = fn(&SheetGeometry) -> PackageLayout;

/// Layout functions indexed by package, in `PackageId::ALL` order.
const REGISTRY: [(PackageId, LayoutFn); 8] = [
    (PackageId::A, combo::package_a),
    (PackageId::B, uniform::package_b),
    (PackageId::C, uniform::package_c),
    (PackageId::D, passport::package_d),
    (PackageId::E, combo::package_e),
    (PackageId::F, passport::package_f),
    (PackageId::G, school::package_g),
    (PackageId::H, combo::package_h),
];

/// Returns the layout function registered for `id`.
pub fn layout_fn(id: PackageId) -> LayoutFn {
    let (registered, f) = REGISTRY[id as usize];
    debug_assert_eq!(registered, id);
    f
}

/// Computes the layout of `id` for geometry `g`.
pub fn compute_layout(id: PackageId, g: &SheetGeometry) -> PackageLayout {
    layout_fn(id)(g)
}

/// Parses a package identifier and computes its layout.
pub fn resolve_layout(id: &str, g: &SheetGeometry) -> Result<PackageLayout> {
    let id: PackageId = id.parse()?;
    Ok(compute_layout(id, g))
}

/// Row-major grid of `cols x rows` cells of `w x h` starting at `(x0, y0)`, no gaps.
pub(crate) fn grid(x0: u32, y0: u32, cols: u32, rows: u32, w: u32, h: u32) -> Vec<Rect> {
    let mut out = Vec::with_capacity((cols * rows) as usize);
    for i in 0..cols * rows {
        let c = i % cols;
        let r = i / cols;
        out.push(Rect::new(x0 + c * w, y0 + r * h, w, h));
    }
    out
}

/// Vertical dividers at each internal column boundary of a row band.
pub(crate) fn column_dividers(x0: u32, cols: u32, w: u32, y1: u32, y2: u32) -> Vec<CutLine> {
    (1..cols).map(|c| CutLine::vertical(x0 + c * w, y1, y2)).collect()
}

pub(crate) fn photo_layout(
    package: PackageId,
    g: &SheetGeometry,
    rects: Vec<Rect>,
    cut_lines: Vec<CutLine>,
) -> PackageLayout {
    PackageLayout {
        package,
        sheet_w: g.paper_w,
        sheet_h: g.paper_h,
        cells: rects.into_iter().map(Cell::photo).collect(),
        cut_lines,
        labelled: false,
    }
}
