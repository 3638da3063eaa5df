use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod fonts;
pub mod plyr;

/// Directory (relative to the output root) that holds one sub-directory per font family
pub const FONTS_DIR: &str = "assets/fonts";

/// Host serving the font binaries referenced by the stylesheets
pub const GSTATIC_BASE: &str = "https://fonts.gstatic.com/s";

/// Where the media player library lands, relative to the output root
pub const PLYR_PATH: &str = "assets/vendor/glightbox/js/plyr.js";

/// One font family to mirror locally
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontDescriptor {
    pub name: String,
    pub weights: Vec<u16>,
    /// Path fragment of the family on fonts.gstatic.com, e.g. `raleway/v33`
    pub source: String,
}

impl FontDescriptor {
    pub fn new(name: &str, weights: &[u16], source: &str) -> Self {
        Self {
            name: name.to_string(),
            weights: weights.to_vec(),
            source: source.to_string(),
        }
    }

    /// Family name as the stylesheet API expects it (`open-sans` -> `Open+Sans`)
    pub fn family(&self) -> String {
        match self.name.as_str() {
            "open-sans" => "Open+Sans".to_string(),
            "raleway" => "Raleway".to_string(),
            "poppins" => "Poppins".to_string(),
            other => other.replace('-', "+"),
        }
    }

    /// Where the stylesheet is expected to point for this family's binaries
    pub fn asset_prefix(&self) -> String {
        format!("{}/{}/", GSTATIC_BASE, self.source.trim_matches('/'))
    }

    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(FONTS_DIR).join(&self.name)
    }
}

/// File-name label for a numeric weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightLabel {
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
}

impl WeightLabel {
    pub fn from_weight(weight: u16) -> Option<Self> {
        match weight {
            300 => Some(Self::Light),
            400 => Some(Self::Regular),
            500 => Some(Self::Medium),
            600 => Some(Self::SemiBold),
            700 => Some(Self::Bold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Regular => "Regular",
            Self::Medium => "Medium",
            Self::SemiBold => "SemiBold",
            Self::Bold => "Bold",
        }
    }
}

impl std::fmt::Display for WeightLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font container formats we look for in a stylesheet, preferred first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    Woff2,
    Woff,
}

impl FontFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Woff2 => "woff2",
            Self::Woff => "woff",
        }
    }
}

/// Deterministic location of a downloaded font file
pub fn font_path(root: &Path, font: &FontDescriptor, label: WeightLabel, format: FontFormat) -> PathBuf {
    font.directory(root)
        .join(format!("{}.{}", label, format.extension()))
}

/// Remote endpoints used by the fetchers
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Stylesheet API, without query string
    pub stylesheet_base: String,
    pub plyr_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            stylesheet_base: "https://fonts.googleapis.com/css2".to_string(),
            plyr_url: "https://cdn.plyr.io/3.6.12/plyr.js".to_string(),
        }
    }
}

impl Endpoints {
    pub fn stylesheet_url(&self, font: &FontDescriptor, weight: u16) -> String {
        format!(
            "{}?family={}:wght@{}&display=swap",
            self.stylesheet_base,
            font.family(),
            weight
        )
    }
}

/// Tally of one job, printed when it finishes
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub saved: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn merge(&mut self, other: &RunReport) {
        self.saved += other.saved;
        self.warnings += other.warnings;
        self.failed += other.failed;
    }
}
