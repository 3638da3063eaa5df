use crate::assets::{FontDescriptor, WeightLabel};
use crate::error::{FetchError, Result};
use serde_json;
use std::fs;
use std::path::Path;

/// Families mirrored when no catalog file is given
pub fn default_fonts() -> Vec<FontDescriptor> {
    vec![
        FontDescriptor::new("open-sans", &[300, 400, 600, 700], "opensans/v40"),
        FontDescriptor::new("raleway", &[300, 400, 500, 600, 700], "raleway/v33"),
        FontDescriptor::new("poppins", &[300, 400, 500, 600, 700], "poppins/v21"),
    ]
}

/// Load a font table from a JSON array of `{name, weights, source}` objects
pub fn load_catalog(path: &Path) -> Result<Vec<FontDescriptor>> {
    let content = fs::read_to_string(path).map_err(|e| FetchError::io(path, e))?;
    parse_catalog(&content)
}

pub fn parse_catalog(content: &str) -> Result<Vec<FontDescriptor>> {
    let fonts: Vec<FontDescriptor> = serde_json::from_str(content)
        .map_err(|e| FetchError::Catalog(format!("Failed to parse JSON: {}", e)))?;
    validate(&fonts)?;
    Ok(fonts)
}

fn validate(fonts: &[FontDescriptor]) -> Result<()> {
    for font in fonts {
        if font.name.trim().is_empty() {
            return Err(FetchError::Catalog("font with empty name".to_string()));
        }
        // Names become directory names
        if font.name.contains(['/', '\\']) || font.name == "." || font.name == ".." {
            return Err(FetchError::Catalog(format!(
                "font name '{}' is not a plain directory name",
                font.name
            )));
        }
        if let Some(weight) = font
            .weights
            .iter()
            .find(|w| WeightLabel::from_weight(**w).is_none())
        {
            return Err(FetchError::Catalog(format!(
                "font '{}' has unsupported weight {}",
                font.name, weight
            )));
        }
    }
    Ok(())
}
