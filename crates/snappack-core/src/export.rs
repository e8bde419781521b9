use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SnapPackError};
use crate::geometry::MM_PER_INCH;
use crate::model::{PackageLayout, Rect};
use crate::package::PackageId;
use crate::pipeline::Sheet;

/// Pixels per metre for a resolution in dots per inch, as stored in a PNG `pHYs` chunk.
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 * 1000.0 / MM_PER_INCH).round() as u32
}

/// Encodes the sheet as an 8-bit RGB PNG whose `pHYs` chunk records the sheet DPI,
/// so print software places it at its physical size.
pub fn encode_png(sheet: &Sheet) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(sheet, &mut buf)?;
    Ok(buf)
}

/// Writes the PNG produced by [`encode_png`] to `path`.
pub fn save_png(sheet: &Sheet, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut w = std::io::BufWriter::new(file);
    write_png(sheet, &mut w)?;
    w.flush()?;
    Ok(())
}

fn write_png<W: Write>(sheet: &Sheet, out: W) -> Result<()> {
    let (w, h) = sheet.rgb.dimensions();
    let ppm = dpi_to_ppm(sheet.dpi);
    let mut enc = png::Encoder::new(out, w, h);
    enc.set_color(png::ColorType::Rgb);
    enc.set_depth(png::BitDepth::Eight);
    enc.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut writer = enc
        .write_header()
        .map_err(|e| SnapPackError::Encode(e.to_string()))?;
    writer
        .write_image_data(sheet.rgb.as_raw())
        .map_err(|e| SnapPackError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| SnapPackError::Encode(e.to_string()))?;
    Ok(())
}

fn rect_json(r: &Rect) -> Value {
    json!({"x": r.x, "y": r.y, "w": r.w, "h": r.h})
}

/// Serialize a layout as `{ package, sheet, labelled, cells, cutLines, stats, meta }`.
/// Cells keep drawing order; `label` is `null` for cells without a name strip.
pub fn layout_to_json(layout: &PackageLayout, dpi: u32) -> Value {
    let cells: Vec<Value> = layout
        .cells
        .iter()
        .map(|c| {
            json!({
                "photo": rect_json(&c.photo),
                "label": c.label.as_ref().map(rect_json),
            })
        })
        .collect();
    let lines: Vec<Value> = layout
        .cut_lines
        .iter()
        .map(|l| json!({"x1": l.x1, "y1": l.y1, "x2": l.x2, "y2": l.y2}))
        .collect();
    let stats = layout.stats();
    json!({
        "package": layout.package,
        "sheet": {"w": layout.sheet_w, "h": layout.sheet_h, "dpi": dpi},
        "labelled": layout.labelled,
        "cells": cells,
        "cutLines": lines,
        "stats": {
            "cells": stats.num_cells,
            "cutLines": stats.num_cut_lines,
            "photoArea": stats.photo_area,
            "coverage": stats.coverage,
        },
        "meta": {
            "app": "snappack",
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

/// Serialize the package catalogue: one entry per package with name, subtitle,
/// pieces and download stem.
pub fn catalog_to_json() -> Value {
    let packages: Vec<Value> = PackageId::ALL
        .iter()
        .map(|id| {
            let info = id.info();
            json!({
                "id": id,
                "name": info.name,
                "subtitle": info.subtitle,
                "pieces": info.pieces,
                "passport": id.is_passport(),
                "fileStem": id.file_stem(),
            })
        })
        .collect();
    json!({ "packages": packages })
}
