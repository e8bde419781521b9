use image::{DynamicImage, Rgb, RgbImage};
use snappack_core::config::ComposeConfig;
use snappack_core::label::{LABEL_PADDING_PX, MIN_FONT_PX, TextFace, TrueTypeFace, fit_font_px};
use snappack_core::model::Rect;
use snappack_core::package::PackageId;
use snappack_core::pipeline::{Composer, SourceImage, generate_package};

fn white_photo() -> SourceImage {
    let img = RgbImage::from_pixel(400, 500, Rgb([255, 255, 255]));
    SourceImage::new(DynamicImage::ImageRgb8(img)).expect("source")
}

fn plain_composer() -> Composer {
    let cfg = ComposeConfig::builder()
        .cut_lines(false)
        .cell_borders(false)
        .build();
    Composer::new(cfg).expect("composer")
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of dark pixels inside `area`.
fn ink_bbox(img: &RgbImage, area: &Rect) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for y in area.y..area.y + area.h {
        for x in area.x..area.x + area.w {
            if img.get_pixel(x, y).0.iter().all(|&v| v >= 128) {
                continue;
            }
            bbox = Some(match bbox {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bbox
}

#[test]
fn default_composer_prints_name_centred_in_strip() {
    let composer = plain_composer();
    assert!(composer.has_face());
    let sheet = composer.compose(PackageId::D, &white_photo(), Some("juan dela cruz"));

    let strip = sheet.layout.cells[0].label.expect("label");
    assert_eq!(strip, Rect::new(187, 531, 413, 69));
    let (x0, y0, x1, y1) = ink_bbox(&sheet.rgb, &strip).expect("name ink");

    let cx = (x0 + x1) as f32 / 2.0;
    let cy = (y0 + y1) as f32 / 2.0;
    assert!((cx - 393.5).abs() <= 6.0, "ink x {x0}..{x1}");
    assert!((cy - 565.5).abs() <= 8.0, "ink y {y0}..{y1}");
    // 14 capitals at 36 px span a few hundred pixels
    assert!(x1 - x0 > 200 && x1 - x0 < 393, "ink x {x0}..{x1}");

    for cell in &sheet.layout.cells {
        let strip = cell.label.expect("label");
        assert!(ink_bbox(&sheet.rgb, &strip).is_some(), "blank strip at {strip:?}");
    }
}

#[test]
fn long_name_shrinks_and_stays_inside_padding() {
    let face = TrueTypeFace::embedded().expect("face");
    let text = "JUAN DELA CRUZ SANTOS";
    let limit = (413 - LABEL_PADDING_PX) as f32;

    assert!(face.measure(text, 36.0) > limit);
    let size = fit_font_px(text, 413, 69, |t, px| face.measure(t, px));
    assert!(size > MIN_FONT_PX && size < 36, "size {size}");
    assert!(face.measure(text, size as f32) <= limit);

    let sheet = plain_composer().compose(PackageId::D, &white_photo(), Some(text));
    let strip = sheet.layout.cells[0].label.expect("label");
    let (x0, _, x1, _) = ink_bbox(&sheet.rgb, &strip).expect("name ink");
    let pad = LABEL_PADDING_PX / 2;
    assert!(x0 + 2 >= strip.x + pad, "ink starts at {x0}");
    assert!(x1 <= strip.x + strip.w - pad + 2, "ink ends at {x1}");
}

#[test]
fn one_call_generation_prints_names() {
    let sheet = generate_package("D", &white_photo(), Some("juan dela cruz"), None)
        .expect("generate");
    // inside the cell border
    let strip = sheet.layout.cells[0].label.expect("label");
    let inner = Rect::new(strip.x + 10, strip.y + 6, strip.w - 20, strip.h - 12);
    assert!(ink_bbox(&sheet.rgb, &inner).is_some());
}

#[test]
fn faceless_composer_leaves_strip_blank() {
    let composer = plain_composer().without_face();
    let sheet = composer.compose(PackageId::F, &white_photo(), Some("ana"));
    let strip = sheet.layout.cells[0].label.expect("label");
    assert_eq!(ink_bbox(&sheet.rgb, &strip), None);
}
