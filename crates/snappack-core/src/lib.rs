//! Layout composition engine for 4x6 inch photo print packages.
//!
//! - Packages: eight fixed arrangements (A–H) of 1x1, 2x2, 3x4 inch and 35x45 mm
//!   passport photos
//! - Cropping: every cell is cover-filled from the centre of the source, never letterboxed
//! - Finishing: dashed cut guides, passport name labels with auto-shrinking text, cell borders
//! - Layouts are pure data (`PackageLayout`), serde-serializable and exportable as JSON
//!
//! Quick example:
//! ```ignore
//! use snappack_core::{ComposeConfig, Composer, SourceImage};
//! # fn main() -> anyhow::Result<()> {
//! let photo = SourceImage::open("portrait.jpg")?;
//! // names are printed with the embedded face; `with_face` swaps it
//! let composer = Composer::new(ComposeConfig::default())?;
//! let sheet = composer.generate("D", &photo, Some("juan dela cruz"))?;
//! snappack_core::save_png(&sheet, "passport.png")?;
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod cut_lines;
pub mod error;
pub mod export;
pub mod geometry;
pub mod label;
pub mod layout;
pub mod model;
pub mod package;
pub mod pipeline;
pub mod session;

pub use config::*;
pub use error::*;
pub use export::*;
pub use geometry::*;
pub use label::{TextFace, TrueTypeFace};
pub use layout::{compute_layout, resolve_layout};
pub use model::*;
pub use package::*;
pub use pipeline::*;
pub use session::*;

/// Convenience prelude for common types and functions.
/// Importing `snappack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{ComposeConfig, ComposeConfigBuilder, ResampleFilter};
    pub use crate::cut_lines::CutLineStyle;
    pub use crate::geometry::SheetGeometry;
    pub use crate::label::{TextFace, TrueTypeFace};
    pub use crate::model::{Cell, CutLine, LayoutStats, PackageLayout, Rect};
    pub use crate::package::{PackageId, PackageInfo};
    pub use crate::session::{PreviewSession, RequestTicket, Selection};
    pub use crate::{
        ComposeJob, Composer, Sheet, SourceImage, compute_layout, encode_png, generate_package,
        save_png,
    };
}
