use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SnapPackError;

/// The eight print packages that fit on one 4x6 sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageId {
    /// 4 pcs 2x2 + 4 pcs 1x1.
    A,
    /// 10 pcs 1x1.
    B,
    /// 6 pcs 2x2.
    C,
    /// 6 pcs passport with name.
    D,
    /// 2 pcs 2x2 + 8 pcs 1x1.
    E,
    /// 4 pcs passport with name.
    F,
    /// 1 pc 3x4 + 4 pcs 1x1.
    G,
    /// 4 pcs 1x1 + 2 pcs 2x2 + 4 pcs 1x1.
    H,
}

/// Catalogue entry describing a package to a person choosing one.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PackageInfo {
    pub id: PackageId,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub pieces: &'static [&'static str],
}

impl PackageId {
    pub const ALL: [PackageId; 8] = [
        PackageId::A,
        PackageId::B,
        PackageId::C,
        PackageId::D,
        PackageId::E,
        PackageId::F,
        PackageId::G,
        PackageId::H,
    ];

    pub fn letter(self) -> char {
        match self {
            PackageId::A => 'A',
            PackageId::B => 'B',
            PackageId::C => 'C',
            PackageId::D => 'D',
            PackageId::E => 'E',
            PackageId::F => 'F',
            PackageId::G => 'G',
            PackageId::H => 'H',
        }
    }

    /// Passport packages print a name strip under every photo.
    pub fn is_passport(self) -> bool {
        matches!(self, PackageId::D | PackageId::F)
    }

    pub fn info(self) -> PackageInfo {
        let (subtitle, pieces): (&'static str, &'static [&'static str]) = match self {
            PackageId::A => ("Combination", &["4 pcs — 2×2 inch", "4 pcs — 1×1 inch"]),
            PackageId::B => ("1×1 inch", &["10 pcs — 1×1 inch"]),
            PackageId::C => ("2×2 inch", &["6 pcs — 2×2 inch"]),
            PackageId::D => ("Passport Size", &["6 pcs — 35×45 mm", "Name printed below"]),
            PackageId::E => ("Combination", &["2 pcs — 2×2 inch", "8 pcs — 1×1 inch"]),
            PackageId::F => ("Passport Size", &["4 pcs — 35×45 mm", "Name printed below"]),
            PackageId::G => ("School Combo", &["1 pc — 3×4 inch", "4 pcs — 1×1 inch"]),
            PackageId::H => (
                "Symmetric Combo",
                &["4 pcs — 1×1 inch", "2 pcs — 2×2 inch", "4 pcs — 1×1 inch"],
            ),
        };
        PackageInfo {
            id: self,
            name: self.display_name(),
            subtitle,
            pieces,
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            PackageId::A => "Package A",
            PackageId::B => "Package B",
            PackageId::C => "Package C",
            PackageId::D => "Package D",
            PackageId::E => "Package E",
            PackageId::F => "Package F",
            PackageId::G => "Package G",
            PackageId::H => "Package H",
        }
    }

    /// Download file stem, e.g. `photo-package-g-school-combo`.
    pub fn file_stem(self) -> String {
        let info = self.info();
        let raw = format!("photo-{}-{}", info.name, info.subtitle).to_lowercase();
        let mut out = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if ch.is_ascii_alphanumeric() {
                out.push(ch);
            } else if !out.ends_with('-') {
                out.push('-');
            }
        }
        out.trim_end_matches('-').to_string()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for PackageId {
    type Err = SnapPackError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            "G" => Ok(Self::G),
            "H" => Ok(Self::H),
            other => Err(SnapPackError::UnknownPackage(other.to_string())),
        }
    }
}
