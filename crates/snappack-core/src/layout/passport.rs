//! Passport packages: D (six) and F (four) 35x45 mm photos with name strips.

use crate::geometry::SheetGeometry;
use crate::model::{Cell, CutLine, PackageLayout};
use crate::package::PackageId;

/// Package D: 2 columns x 3 rows of passport cells, centred on both axes.
pub fn package_d(g: &SheetGeometry) -> PackageLayout {
    passport_grid(PackageId::D, g, 3)
}

/// Package F: 2 columns x 2 rows of passport cells, centred on both axes.
pub fn package_f(g: &SheetGeometry) -> PackageLayout {
    passport_grid(PackageId::F, g, 2)
}

/// Two columns of `rows` passport cells packed edge to edge. Every cell is
/// `passport_w x cell_h`; its cut guides trace the outer rectangle only.
fn passport_grid(package: PackageId, g: &SheetGeometry, rows: u32) -> PackageLayout {
    let left = SheetGeometry::centered(g.paper_w, 2 * g.passport_w);
    let top = SheetGeometry::centered(g.paper_h, rows * g.cell_h);

    let mut cells = Vec::with_capacity((2 * rows) as usize);
    for i in 0..2 * rows {
        let x = left + (i % 2) * g.passport_w;
        let y = top + (i / 2) * g.cell_h;
        cells.push(Cell::labelled(x, y, g.passport_w, g.passport_h, g.name_h));
    }
    let cut_lines = cells
        .iter()
        .flat_map(|c| CutLine::outline(&c.outer()))
        .collect();

    PackageLayout {
        package,
        sheet_w: g.paper_w,
        sheet_h: g.paper_h,
        cells,
        cut_lines,
        labelled: true,
    }
}
