use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::compositing::{blit_rgb, cover_crop, stroke_inner_border};
use crate::config::ComposeConfig;
use crate::cut_lines::draw_cut_lines;
use crate::error::{Result, SnapPackError};
use crate::geometry::SheetGeometry;
use crate::label::{TextFace, TrueTypeFace, draw_label, normalize_label};
use crate::layout::compute_layout;
use crate::model::PackageLayout;
use crate::package::PackageId;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// A fully decoded photo, ready to be composed. Never modified by the engine.
#[derive(Debug, Clone)]
pub struct SourceImage {
    rgb: RgbImage,
}

impl SourceImage {
    /// Wraps a decoded image. Transparent pixels are flattened onto white.
    pub fn new(image: DynamicImage) -> Result<Self> {
        let (w, h) = (image.width(), image.height());
        if w == 0 || h == 0 {
            return Err(SnapPackError::InvalidSource {
                width: w,
                height: h,
            });
        }
        let rgb = if image.color().has_alpha() {
            flatten_on_white(&image)
        } else {
            image.to_rgb8()
        };
        Ok(Self { rgb })
    }

    /// Decodes an encoded photo (JPEG, PNG, WEBP), guessing the format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;
        Self::new(img)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        Self::new(img)
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }
}

fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px.0[3] as f32 / 255.0;
        let mut c = [0u8; 3];
        for (i, v) in c.iter_mut().enumerate() {
            *v = (px.0[i] as f32 * a + 255.0 * (1.0 - a)).round() as u8;
        }
        out.put_pixel(x, y, Rgb(c));
    }
    out
}

/// A composed print sheet and the layout it was drawn from.
pub struct Sheet {
    pub package: PackageId,
    pub dpi: u32,
    pub layout: PackageLayout,
    pub rgb: RgbImage,
}

impl Sheet {
    /// Physical size in inches when printed at `dpi`.
    pub fn physical_size_in(&self) -> (f64, f64) {
        let d = self.dpi as f64;
        (self.rgb.width() as f64 / d, self.rgb.height() as f64 / d)
    }
}

/// One sheet to render in a batch.
pub struct ComposeJob {
    pub key: String,
    pub package: PackageId,
    pub source: Arc<SourceImage>,
    pub name: Option<String>,
}

/// The composition engine: configuration, derived geometry and the label face.
///
/// A new composer prints names with the embedded face; see [`Composer::with_face`].
/// A `Composer` holds no per-sheet state; every call allocates its own sheet, so
/// one instance can serve concurrent calls.
pub struct Composer {
    cfg: ComposeConfig,
    geometry: SheetGeometry,
    face: Option<Arc<dyn TextFace>>,
}

impl Composer {
    pub fn new(cfg: ComposeConfig) -> Result<Self> {
        cfg.validate()?;
        let geometry = SheetGeometry::new(cfg.dpi);
        let face: Arc<dyn TextFace> = Arc::new(TrueTypeFace::embedded()?);
        Ok(Self {
            cfg,
            geometry,
            face: Some(face),
        })
    }

    /// Sets the face used to print passport names.
    pub fn with_face(mut self, face: Arc<dyn TextFace>) -> Self {
        self.face = Some(face);
        self
    }

    /// Leaves name strips blank.
    pub fn without_face(mut self) -> Self {
        self.face = None;
        self
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.cfg
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    pub fn has_face(&self) -> bool {
        self.face.is_some()
    }

    /// Layout of `package` at this composer's resolution.
    pub fn layout(&self, package: PackageId) -> PackageLayout {
        compute_layout(package, &self.geometry)
    }

    /// Composes a sheet for the package named `package_id` (`"A"` to `"H"`).
    ///
    /// Any other identifier fails with [`SnapPackError::UnknownPackage`] and no
    /// sheet is produced.
    pub fn generate(
        &self,
        package_id: &str,
        source: &SourceImage,
        name: Option<&str>,
    ) -> Result<Sheet> {
        let package: PackageId = package_id.parse()?;
        Ok(self.compose(package, source, name))
    }

    /// Composes `source` into `package` on a fresh white sheet.
    ///
    /// `name` is only printed by passport packages; other packages ignore it.
    #[instrument(skip_all, fields(package = %package))]
    pub fn compose(&self, package: PackageId, source: &SourceImage, name: Option<&str>) -> Sheet {
        let layout = self.layout(package);
        let g = &self.geometry;
        let mut rgb = RgbImage::from_pixel(g.paper_w, g.paper_h, WHITE);

        let label = if layout.labelled {
            name.and_then(|n| normalize_label(n, self.cfg.max_label_chars))
        } else {
            None
        };
        if label.is_some() && self.face.is_none() {
            warn!("name given but the text face was removed; labels left blank");
        }
        let face = self.face.as_deref();
        let label_color = Rgb(self.cfg.label_color);
        let border_color = Rgb(self.cfg.border_color);
        let filter = self.cfg.filter.filter_type();

        // Cells of equal size get identical crops; resample once per size.
        let mut crops: HashMap<(u32, u32), RgbImage> = HashMap::new();
        for cell in &layout.cells {
            let photo = cell.photo;
            if let Some(area) = &cell.label {
                draw_label(&mut rgb, area, label.as_deref(), face, label_color);
            }
            if photo.w > 0 && photo.h > 0 {
                let tile = crops
                    .entry((photo.w, photo.h))
                    .or_insert_with(|| cover_crop(source.rgb(), photo.w, photo.h, filter));
                blit_rgb(tile, &mut rgb, photo.x, photo.y);
            }
            if layout.labelled && self.cfg.cell_borders {
                stroke_inner_border(&mut rgb, &cell.outer(), g.border_px, border_color);
            }
        }
        debug!(cells = layout.cells.len(), crops = crops.len(), "cells drawn");

        if self.cfg.cut_lines {
            draw_cut_lines(&mut rgb, &layout.cut_lines, &self.cfg.cut_line_style);
            debug!(lines = layout.cut_lines.len(), "cut lines drawn");
        }

        Sheet {
            package,
            dpi: g.dpi,
            layout,
            rgb,
        }
    }

    /// Composes every job independently, in parallel when enabled.
    /// Results are returned in job order.
    pub fn compose_many(&self, jobs: &[ComposeJob]) -> Vec<Sheet> {
        #[cfg(feature = "parallel")]
        {
            if self.cfg.parallel {
                return jobs
                    .par_iter()
                    .map(|j| self.compose(j.package, &j.source, j.name.as_deref()))
                    .collect();
            }
        }
        jobs.iter()
            .map(|j| self.compose(j.package, &j.source, j.name.as_deref()))
            .collect()
    }
}

/// Composes one sheet with a default-configured engine. `face` replaces the
/// embedded label face.
///
/// Fails with [`SnapPackError::UnknownPackage`] for identifiers outside `"A"`..`"H"`.
pub fn generate_package(
    package_id: &str,
    source: &SourceImage,
    name: Option<&str>,
    face: Option<Arc<dyn TextFace>>,
) -> Result<Sheet> {
    let mut composer = Composer::new(ComposeConfig::default())?;
    if let Some(face) = face {
        composer = composer.with_face(face);
    }
    composer.generate(package_id, source, name)
}
