use image::{DynamicImage, Rgb, RgbImage};
use snappack_core::config::ComposeConfig;
use snappack_core::error::SnapPackError;
use snappack_core::package::PackageId;
use snappack_core::pipeline::{Composer, SourceImage};
use snappack_core::session::PreviewSession;

fn session() -> PreviewSession {
    PreviewSession::new(Composer::new(ComposeConfig::default()).expect("composer"))
}

fn photo(c: [u8; 3]) -> SourceImage {
    SourceImage::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb(c)))).expect("source")
}

#[test]
fn nothing_renders_before_a_photo_arrives() {
    let s = session();
    assert!(!s.has_photo());
    assert!(s.render().is_none());
    assert_eq!(s.selection().package, PackageId::A);
}

#[test]
fn leaving_passport_package_clears_name() {
    let mut s = session();
    s.select_package(PackageId::D);
    assert!(s.set_name("Maria Clara"));
    assert_eq!(s.selection().name, "Maria Clara");
    s.select_package(PackageId::F);
    assert_eq!(s.selection().name, "Maria Clara");
    s.select_package(PackageId::B);
    assert!(s.selection().name.is_empty());
    assert!(!s.set_name("ignored"));
    assert!(s.selection().name.is_empty());
}

#[test]
fn every_change_bumps_generation() {
    let mut s = session();
    let g0 = s.generation();
    s.select_package(PackageId::D);
    let g1 = s.generation();
    assert!(g1 > g0);
    s.set_name("ana");
    let g2 = s.generation();
    assert!(g2 > g1);
    s.set_name("ana");
    assert_eq!(s.generation(), g2);
    let t = s.begin_photo();
    s.finish_photo(t, Ok(photo([1, 2, 3]))).expect("finish");
    assert!(s.generation() > g2);
}

#[test]
fn stale_decode_is_discarded() {
    let mut s = session();
    let first = s.begin_photo();
    let second = s.begin_photo();
    let out = s.finish_photo(second, Ok(photo([0, 0, 255]))).expect("finish");
    let sheet = out.expect("latest photo renders");
    assert_eq!(sheet.rgb.get_pixel(300, 300).0, [0, 0, 255]);

    let late = s.finish_photo(first, Ok(photo([255, 0, 0]))).expect("finish");
    assert!(late.is_none());
    let again = s.render().expect("render");
    assert_eq!(again.rgb.get_pixel(300, 300).0, [0, 0, 255]);
}

#[test]
fn decode_failure_surfaces_for_current_ticket_only() {
    let mut s = session();
    let old = s.begin_photo();
    let cur = s.begin_photo();
    let stale = s.finish_photo(old, Err(SnapPackError::InvalidSource { width: 0, height: 0 }));
    assert!(matches!(stale, Ok(None)));
    let err = s.finish_photo(cur, Err(SnapPackError::InvalidSource { width: 0, height: 0 }));
    assert!(matches!(err, Err(SnapPackError::InvalidSource { .. })));
    assert!(!s.has_photo());
}

#[test]
fn render_follows_selection() {
    let mut s = session();
    let t = s.begin_photo();
    s.finish_photo(t, Ok(photo([9, 9, 9]))).expect("finish");
    s.select_package(PackageId::G);
    let sheet = s.render().expect("render");
    assert_eq!(sheet.package, PackageId::G);
    assert_eq!(sheet.layout.cells.len(), 5);
}

#[test]
fn name_is_capped_to_label_limit() {
    let mut s = session();
    s.select_package(PackageId::F);
    s.set_name(&"x".repeat(100));
    assert_eq!(s.selection().name.chars().count(), 60);
}
