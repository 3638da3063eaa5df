use crate::assets::{FontDescriptor, FONTS_DIR, PLYR_PATH};
use crate::error::{FetchError, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Fonts the site's service worker pre-caches on install
const CRITICAL_FONTS: [&str; 3] = ["open-sans", "raleway", "poppins"];

/// Ensure one directory per font family exists under `root`
pub fn ensure_directories(root: &Path, fonts: &[FontDescriptor]) -> Result<()> {
    let dirs_to_create: Vec<PathBuf> = fonts.iter().map(|font| font.directory(root)).collect();

    // Check which directories don't exist
    let missing_dirs: Vec<PathBuf> = dirs_to_create
        .into_par_iter()
        .filter(|dir| !dir.exists())
        .collect();

    missing_dirs.par_iter().try_for_each(|dir| -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| FetchError::io(dir, e))?;
        log::info!("Created directory: {}", dir.display());
        Ok(())
    })?;

    Ok(())
}

/// Files that must exist for the site to work offline: the Regular woff2 of
/// each pre-cached font, plus plyr.js which the gallery loads locally
pub fn critical_assets(root: &Path) -> Vec<PathBuf> {
    let mut assets: Vec<PathBuf> = CRITICAL_FONTS
        .iter()
        .map(|name| root.join(FONTS_DIR).join(name).join("Regular.woff2"))
        .collect();
    assets.push(root.join(PLYR_PATH));
    assets
}

/// Return every critical asset that is missing or empty
pub fn missing_critical_assets(root: &Path) -> Vec<PathBuf> {
    critical_assets(root)
        .into_iter()
        .filter(|path| match fs::metadata(path) {
            Ok(meta) => !meta.is_file() || meta.len() == 0,
            Err(_) => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::default_fonts;
    use tempfile::TempDir;

    #[test]
    fn creates_family_directories() {
        let dir = TempDir::new().unwrap();
        ensure_directories(dir.path(), &default_fonts()).unwrap();

        for name in ["open-sans", "raleway", "poppins"] {
            assert!(dir.path().join("assets/fonts").join(name).is_dir());
        }
        // second run is a no-op
        ensure_directories(dir.path(), &default_fonts()).unwrap();
    }

    #[test]
    fn reports_missing_and_empty_assets() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        ensure_directories(root, &default_fonts()).unwrap();

        fs::write(root.join("assets/fonts/open-sans/Regular.woff2"), b"wOF2").unwrap();
        fs::write(root.join("assets/fonts/raleway/Regular.woff2"), b"").unwrap();

        let missing = missing_critical_assets(root);
        assert_eq!(
            missing,
            vec![
                root.join("assets/fonts/raleway/Regular.woff2"),
                root.join("assets/fonts/poppins/Regular.woff2"),
                root.join("assets/vendor/glightbox/js/plyr.js"),
            ]
        );
    }

    #[test]
    fn nothing_missing_when_all_present() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for path in critical_assets(root) {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"data").unwrap();
        }
        assert!(missing_critical_assets(root).is_empty());
    }
}
