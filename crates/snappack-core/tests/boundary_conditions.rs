use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use snappack_core::config::{ComposeConfig, ResampleFilter};
use snappack_core::cut_lines::CutLineStyle;
use snappack_core::error::SnapPackError;
use snappack_core::package::PackageId;
use snappack_core::pipeline::{Composer, SourceImage};

/// Zero-sized bitmaps are refused before they reach the cropper
#[test]
fn test_zero_sized_source() {
    for (w, h) in [(0, 10), (10, 0), (0, 0)] {
        let img = DynamicImage::ImageRgb8(RgbImage::new(w, h));
        match SourceImage::new(img) {
            Err(SnapPackError::InvalidSource { width, height }) => {
                assert_eq!((width, height), (w, h));
            }
            _ => panic!("Expected InvalidSource for {w}x{h}"),
        }
    }
}

#[test]
fn test_one_pixel_source_fills_every_cell() {
    let img = RgbImage::from_pixel(1, 1, Rgb([9, 99, 199]));
    let src = SourceImage::new(DynamicImage::ImageRgb8(img)).expect("source");
    let cfg = ComposeConfig::builder().cut_lines(false).build();
    let composer = Composer::new(cfg).expect("composer");
    for id in PackageId::ALL {
        let sheet = composer.compose(id, &src, None);
        for cell in &sheet.layout.cells {
            let p = cell.photo;
            let centre = sheet.rgb.get_pixel(p.x + p.w / 2, p.y + p.h / 2);
            assert_eq!(centre.0, [9, 99, 199], "{id}");
        }
    }
}

#[test]
fn test_extreme_aspect_sources() {
    let composer = Composer::new(ComposeConfig::default()).expect("composer");
    for (w, h) in [(4000, 3), (3, 4000)] {
        let img = RgbImage::from_pixel(w, h, Rgb([50, 50, 50]));
        let src = SourceImage::new(DynamicImage::ImageRgb8(img)).expect("source");
        let sheet = composer.compose(PackageId::G, &src, None);
        assert_eq!(sheet.rgb.dimensions(), (1200, 1800));
    }
}

#[test]
fn test_transparent_source_flattens_to_white() {
    let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    rgba.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
    rgba.put_pixel(1, 0, Rgba([0, 0, 0, 128]));
    let src = SourceImage::new(DynamicImage::ImageRgba8(rgba)).expect("source");
    assert_eq!(src.rgb().get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(src.rgb().get_pixel(1, 0).0, [127, 127, 127]);
    assert_eq!(src.rgb().get_pixel(3, 3).0, [255, 255, 255]);
}

#[test]
fn test_config_rejects_out_of_range_dpi() {
    for dpi in [0, 9, 1201] {
        let cfg = ComposeConfig {
            dpi,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(SnapPackError::InvalidConfig(_))), "dpi {dpi}");
        assert!(Composer::new(cfg).is_err());
    }
}

#[test]
fn test_config_rejects_bad_cut_style() {
    let zero_width = ComposeConfig::builder()
        .cut_line_style(CutLineStyle {
            width: 0,
            ..Default::default()
        })
        .build();
    assert!(zero_width.validate().is_err());

    let opacity = ComposeConfig::builder()
        .cut_line_style(CutLineStyle {
            opacity: 1.5,
            ..Default::default()
        })
        .build();
    assert!(opacity.validate().is_err());

    // style is irrelevant when guides are off
    let off = ComposeConfig::builder()
        .cut_lines(false)
        .cut_line_style(CutLineStyle {
            width: 0,
            ..Default::default()
        })
        .build();
    assert!(off.validate().is_ok());
}

#[test]
fn test_config_rejects_zero_label_chars() {
    let cfg = ComposeConfig::builder().max_label_chars(0).build();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_defaults_deserialize_from_empty_object() {
    let cfg: ComposeConfig = serde_json::from_str("{}").expect("parse");
    assert_eq!(cfg.dpi, 300);
    assert!(cfg.cut_lines && cfg.cell_borders);
    assert_eq!(cfg.cut_line_style, CutLineStyle::default());
    assert_eq!(cfg.label_color, [17, 17, 17]);
    assert_eq!(cfg.max_label_chars, 60);
    assert_eq!(cfg.filter, ResampleFilter::Lanczos3);
    assert!(!cfg.parallel);
}

#[test]
fn test_filter_names_parse() {
    assert_eq!("lanczos".parse::<ResampleFilter>(), Ok(ResampleFilter::Lanczos3));
    assert_eq!("Nearest".parse::<ResampleFilter>(), Ok(ResampleFilter::Nearest));
    assert_eq!("bilinear".parse::<ResampleFilter>(), Ok(ResampleFilter::Triangle));
    assert_eq!("sharp".parse::<ResampleFilter>(), Err(()));
}

#[test]
fn test_low_dpi_sheet_matches_geometry() {
    let cfg = ComposeConfig::builder().dpi(100).build();
    let composer = Composer::new(cfg).expect("composer");
    let img = RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]));
    let src = SourceImage::new(DynamicImage::ImageRgb8(img)).expect("source");
    let sheet = composer.compose(PackageId::D, &src, None);
    assert_eq!(sheet.rgb.dimensions(), (400, 600));
    assert_eq!(sheet.physical_size_in(), (4.0, 6.0));
}
