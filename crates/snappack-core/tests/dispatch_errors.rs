use image::{DynamicImage, Rgb, RgbImage};
use snappack_core::error::SnapPackError;
use snappack_core::geometry::SheetGeometry;
use snappack_core::layout::resolve_layout;
use snappack_core::package::PackageId;
use snappack_core::pipeline::{SourceImage, generate_package};

fn source() -> SourceImage {
    let img = RgbImage::from_pixel(10, 10, Rgb([1, 2, 3]));
    SourceImage::new(DynamicImage::ImageRgb8(img)).expect("source")
}

#[test]
fn unknown_package_is_rejected() {
    for bad in ["Z", "", "a", "AA", " A", "I"] {
        match generate_package(bad, &source(), None, None) {
            Err(SnapPackError::UnknownPackage(id)) => assert_eq!(id, bad),
            Err(e) => panic!("{bad:?}: unexpected error {e}"),
            Ok(_) => panic!("{bad:?}: produced a sheet"),
        }
    }
}

#[test]
fn every_known_package_dispatches() {
    for id in PackageId::ALL {
        let sheet = generate_package(&id.to_string(), &source(), None, None).expect("generate");
        assert_eq!(sheet.package, id);
        assert_eq!(sheet.layout.package, id);
        assert_eq!(sheet.rgb.dimensions(), (1200, 1800));
    }
}

#[test]
fn resolve_layout_reports_unknown_id() {
    let g = SheetGeometry::standard();
    assert!(resolve_layout("G", &g).is_ok());
    let err = resolve_layout("Q", &g).unwrap_err();
    assert!(matches!(err, SnapPackError::UnknownPackage(ref s) if s == "Q"));
    assert_eq!(err.to_string(), "Unknown package: Q");
}

#[test]
fn package_ids_display_and_parse_round_trip() {
    for id in PackageId::ALL {
        assert_eq!(id.to_string().parse::<PackageId>().expect("parse"), id);
    }
}
