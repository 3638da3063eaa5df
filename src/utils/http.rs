use crate::error::{FetchError, Result};
use reqwest;
use std::path::Path;
use std::time::Duration;
use tokio;

/// Desktop Chrome identification. Google Fonts only serves woff2 to clients it recognises.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Identification sent with plain binary downloads
pub const DOWNLOAD_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Build the shared HTTP client.
///
/// Certificate validation is turned off for every request made through it.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| FetchError::http("<client>", e))
}

/// GET `url` and return the response body as text
pub async fn fetch_text(client: &reqwest::Client, url: &str, user_agent: &str) -> Result<String> {
    let response = client
        .get(url)
        .header("User-Agent", user_agent)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| FetchError::http(url, e))?;

    log::debug!("GET {} -> {}", url, response.status());

    response.text().await.map_err(|e| FetchError::http(url, e))
}

/// Download `url` into `save_path` and return the number of bytes written.
///
/// The whole body is read before the file is created, so a broken transfer
/// leaves nothing behind. The parent directory must already exist.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    save_path: &Path,
    user_agent: &str,
) -> Result<usize> {
    let response = client
        .get(url)
        .header("User-Agent", user_agent)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| FetchError::http(url, e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::http(url, e))?;

    tokio::fs::write(save_path, &bytes)
        .await
        .map_err(|e| FetchError::io(save_path, e))?;

    log::debug!("wrote {} bytes from {} to {}", bytes.len(), url, save_path.display());
    Ok(bytes.len())
}
