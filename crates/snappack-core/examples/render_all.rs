use image::{DynamicImage, Rgb, RgbImage};
use snappack_core::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

// Usage: cargo run -p snappack-core --example render_all [PHOTO] [OUT_DIR]
fn main() -> snappack_core::Result<()> {
    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => SourceImage::open(path)?,
        None => SourceImage::new(DynamicImage::ImageRgb8(RgbImage::from_fn(1600, 1200, |x, y| {
            Rgb([(x * 255 / 1600) as u8, (y * 255 / 1200) as u8, 160])
        })))?,
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "snappack-out".into()));
    std::fs::create_dir_all(&out_dir)?;

    let composer = Composer::new(ComposeConfig::default())?;
    for id in PackageId::ALL {
        let t0 = Instant::now();
        let sheet = composer.compose(id, &source, None);
        let path = out_dir.join(format!("{}.png", id.file_stem()));
        save_png(&sheet, &path)?;
        println!(
            "{} -> {} ({} ms) {}",
            id,
            path.display(),
            t0.elapsed().as_millis(),
            sheet.layout.stats().summary()
        );
    }
    Ok(())
}
