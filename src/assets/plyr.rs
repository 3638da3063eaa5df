use crate::assets::{Endpoints, RunReport, PLYR_PATH};
use crate::error::{FetchError, Result};
use crate::utils::http::{download_file, DOWNLOAD_USER_AGENT};
use reqwest;
use std::path::{Path, PathBuf};

/// Download plyr.js into the glightbox vendor directory.
///
/// Errors are printed and counted in the report.
pub async fn fetch_plyr(client: &reqwest::Client, endpoints: &Endpoints, root: &Path) -> RunReport {
    println!("Downloading plyr.js...");
    let mut report = RunReport::default();

    match download_plyr(client, endpoints, root).await {
        Ok(path) => {
            println!("✓ Saved: {}", path.display());
            report.saved += 1;
        }
        Err(e) => {
            log::debug!("plyr.js: {}", e);
            println!("✗ Failed to download plyr.js: {}", e);
            report.failed += 1;
        }
    }

    report
}

async fn download_plyr(client: &reqwest::Client, endpoints: &Endpoints, root: &Path) -> Result<PathBuf> {
    let save_path = root.join(PLYR_PATH);
    if let Some(parent) = save_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FetchError::io(parent, e))?;
    }

    download_file(client, &endpoints.plyr_url, &save_path, DOWNLOAD_USER_AGENT).await?;
    Ok(save_path)
}
