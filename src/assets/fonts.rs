use crate::assets::{font_path, Endpoints, FontDescriptor, FontFormat, RunReport, WeightLabel};
use crate::error::{FetchError, Result};
use crate::utils::files::ensure_directories;
use crate::utils::http::{download_file, fetch_text, BROWSER_USER_AGENT, DOWNLOAD_USER_AGENT};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use reqwest;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"url\((https?://[^)]+)\)").expect("valid url pattern"))
}

/// Font binaries referenced by a stylesheet
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StylesheetAssets {
    pub woff2: Option<String>,
    pub woff: Option<String>,
}

impl StylesheetAssets {
    pub fn get(&self, format: FontFormat) -> Option<&str> {
        match format {
            FontFormat::Woff2 => self.woff2.as_deref(),
            FontFormat::Woff => self.woff.as_deref(),
        }
    }
}

/// Pick the first `.woff2` and the first `.woff` url out of a stylesheet
pub fn extract_font_urls(css: &str) -> StylesheetAssets {
    let mut assets = StylesheetAssets::default();
    for capture in url_pattern().captures_iter(css) {
        let url = &capture[1];
        if url.ends_with(".woff2") {
            assets.woff2.get_or_insert_with(|| url.to_string());
        } else if url.ends_with(".woff") {
            assets.woff.get_or_insert_with(|| url.to_string());
        }
    }
    assets
}

/// What happened to a single family/weight slot
#[derive(Debug, Default)]
pub struct SlotOutcome {
    pub saved: Vec<PathBuf>,
    /// Set when the stylesheet had no woff2 url
    pub missing_primary: bool,
    /// Download that stopped the slot; files in `saved` are still on disk
    pub error: Option<FetchError>,
}

pub struct FontFetcher<'a> {
    client: &'a reqwest::Client,
    endpoints: &'a Endpoints,
    root: &'a Path,
}

impl<'a> FontFetcher<'a> {
    pub fn new(client: &'a reqwest::Client, endpoints: &'a Endpoints, root: &'a Path) -> Self {
        Self {
            client,
            endpoints,
            root,
        }
    }

    /// Resolve and download the font files for one family/weight.
    ///
    /// A failed stylesheet request is returned as `Err`. A failed font
    /// download ends the slot but keeps what was already saved.
    pub async fn fetch_slot(&self, font: &FontDescriptor, weight: u16) -> Result<SlotOutcome> {
        let label = WeightLabel::from_weight(weight).ok_or_else(|| {
            FetchError::Catalog(format!("font '{}' has unsupported weight {}", font.name, weight))
        })?;

        let css_url = self.endpoints.stylesheet_url(font, weight);
        let css = fetch_text(self.client, &css_url, BROWSER_USER_AGENT).await?;
        let assets = extract_font_urls(&css);

        let mut outcome = SlotOutcome::default();
        for format in [FontFormat::Woff2, FontFormat::Woff] {
            match assets.get(format) {
                Some(url) => {
                    if !url.starts_with(&font.asset_prefix()) {
                        log::debug!("{} is outside {}", url, font.asset_prefix());
                    }
                    let save_path = font_path(self.root, font, label, format);
                    match download_file(self.client, url, &save_path, DOWNLOAD_USER_AGENT).await {
                        Ok(_) => outcome.saved.push(save_path),
                        Err(e) => {
                            outcome.error = Some(e);
                            break;
                        }
                    }
                }
                None if format == FontFormat::Woff2 => outcome.missing_primary = true,
                None => {}
            }
        }

        Ok(outcome)
    }

    /// Download every slot of `fonts`, one after another.
    ///
    /// Per-slot failures are reported and counted, never returned. Only
    /// failing to create the family directories aborts the run.
    pub async fn fetch_all(&self, fonts: &[FontDescriptor]) -> Result<RunReport> {
        ensure_directories(self.root, fonts)?;

        let total_slots: usize = fonts.iter().map(|f| f.weights.len()).sum();
        let pb = ProgressBar::new(total_slots as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        pb.println("Downloading fonts...");
        let mut report = RunReport::default();

        for font in fonts {
            pb.println(format!("\n=== {} ===", font.name.to_uppercase()));
            for &weight in &font.weights {
                let label = WeightLabel::from_weight(weight)
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_else(|| weight.to_string());
                pb.set_message(format!("{} {}", font.name, label));

                match self.fetch_slot(font, weight).await {
                    Ok(outcome) => {
                        if outcome.missing_primary {
                            let warning = FetchError::MissingAsset {
                                font: font.name.clone(),
                                label: label.clone(),
                                extension: FontFormat::Woff2.extension(),
                            };
                            log::debug!("{}", warning);
                            pb.println(format!("⚠ No woff2 file found for {} {}", font.name, label));
                            report.warnings += 1;
                        }
                        for path in &outcome.saved {
                            pb.println(format!("✓ Saved: {}", path.display()));
                        }
                        report.saved += outcome.saved.len();
                        if let Some(e) = outcome.error {
                            log::debug!("{} {}: {}", font.name, label, e);
                            pb.println(format!("✗ Failed to download {} {}: {}", font.name, label, e));
                            report.failed += 1;
                        }
                    }
                    Err(e) => {
                        log::debug!("{} {}: {}", font.name, label, e);
                        pb.println(format!("✗ Failed to download {} {}: {}", font.name, label, e));
                        report.failed += 1;
                    }
                }
                pb.inc(1);
            }
        }

        pb.finish_and_clear();
        Ok(report)
    }
}
