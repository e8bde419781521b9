use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::cut_lines::CutLineStyle;
use crate::geometry::STANDARD_DPI;

/// Lowest supported print resolution.
pub const MIN_DPI: u32 = 10;
/// Highest supported print resolution.
pub const MAX_DPI: u32 = 1200;

/// Resampling filter used when scaling a crop into its cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmullrom" | "cubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Print resolution; every pixel measurement derives from it.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Overlay dashed cut guides.
    #[serde(default = "default_true")]
    pub cut_lines: bool,
    #[serde(default)]
    pub cut_line_style: CutLineStyle,

    /// Stroke a thin black border around each passport cell.
    #[serde(default = "default_true")]
    pub cell_borders: bool,
    #[serde(default = "default_border_color")]
    pub border_color: [u8; 3],

    /// Name label colour.
    #[serde(default = "default_label_color")]
    pub label_color: [u8; 3],
    /// Names longer than this many characters are cut before rendering.
    #[serde(default = "default_max_label_chars")]
    pub max_label_chars: usize,

    #[serde(default = "default_filter")]
    pub filter: ResampleFilter,

    /// Render batches in parallel when feature "parallel" is on.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            cut_lines: true,
            cut_line_style: CutLineStyle::default(),
            cell_borders: true,
            border_color: default_border_color(),
            label_color: default_label_color(),
            max_label_chars: default_max_label_chars(),
            filter: default_filter(),
            parallel: false,
        }
    }
}

impl ComposeConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `dpi` is outside `MIN_DPI..=MAX_DPI`
    /// - cut guides are enabled with a zero width or zero dash length
    /// - the cut guide opacity is outside `0.0..=1.0`
    /// - `max_label_chars` is zero
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SnapPackError;

        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(SnapPackError::InvalidConfig(format!(
                "dpi {} outside supported range {}..={}",
                self.dpi, MIN_DPI, MAX_DPI
            )));
        }

        if self.cut_lines {
            let s = &self.cut_line_style;
            if s.width == 0 {
                return Err(SnapPackError::InvalidConfig(
                    "cut_line_style.width must be at least 1".into(),
                ));
            }
            if s.dash == 0 {
                return Err(SnapPackError::InvalidConfig(
                    "cut_line_style.dash must be at least 1".into(),
                ));
            }
            if !(0.0..=1.0).contains(&s.opacity) {
                return Err(SnapPackError::InvalidConfig(format!(
                    "cut_line_style.opacity {} outside 0.0..=1.0",
                    s.opacity
                )));
            }
        }

        if self.max_label_chars == 0 {
            return Err(SnapPackError::InvalidConfig(
                "max_label_chars must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

fn default_dpi() -> u32 {
    STANDARD_DPI
}
fn default_true() -> bool {
    true
}
fn default_border_color() -> [u8; 3] {
    [0, 0, 0]
}
fn default_label_color() -> [u8; 3] {
    [0x11, 0x11, 0x11]
}
fn default_max_label_chars() -> usize {
    60
}
fn default_filter() -> ResampleFilter {
    ResampleFilter::Lanczos3
}

/// Builder for `ComposeConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct ComposeConfigBuilder {
    cfg: ComposeConfig,
}

impl ComposeConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: ComposeConfig::default(),
        }
    }
    pub fn dpi(mut self, v: u32) -> Self {
        self.cfg.dpi = v;
        self
    }
    pub fn cut_lines(mut self, v: bool) -> Self {
        self.cfg.cut_lines = v;
        self
    }
    pub fn cut_line_style(mut self, v: CutLineStyle) -> Self {
        self.cfg.cut_line_style = v;
        self
    }
    pub fn cell_borders(mut self, v: bool) -> Self {
        self.cfg.cell_borders = v;
        self
    }
    pub fn border_color(mut self, v: [u8; 3]) -> Self {
        self.cfg.border_color = v;
        self
    }
    pub fn label_color(mut self, v: [u8; 3]) -> Self {
        self.cfg.label_color = v;
        self
    }
    pub fn max_label_chars(mut self, v: usize) -> Self {
        self.cfg.max_label_chars = v;
        self
    }
    pub fn filter(mut self, v: ResampleFilter) -> Self {
        self.cfg.filter = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> ComposeConfig {
        self.cfg
    }
}

impl ComposeConfig {
    /// Create a fluent builder for `ComposeConfig`.
    pub fn builder() -> ComposeConfigBuilder {
        ComposeConfigBuilder::new()
    }
}
