use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
mod assets;
mod error;
mod utils;

use assets::catalog::{default_fonts, load_catalog};
use assets::fonts::FontFetcher;
use assets::plyr::fetch_plyr;
use assets::{Endpoints, FontDescriptor, RunReport};
use error::Result;

/// Download web fonts and vendor scripts for offline use
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the assets/ tree is written under
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download fonts, then plyr.js
    All {
        /// JSON file replacing the built-in font table
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Download the font files listed in the font table
    Fonts {
        /// JSON file replacing the built-in font table
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Download plyr.js into the glightbox vendor directory
    Plyr,
    /// Check that the pre-cached fonts and plyr.js are present and non-empty
    Verify,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn font_table(catalog: Option<&Path>) -> Result<Vec<FontDescriptor>> {
    match catalog {
        Some(path) => load_catalog(path),
        None => Ok(default_fonts()),
    }
}

async fn run_fonts(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    root: &Path,
    catalog: Option<&Path>,
) -> Result<RunReport> {
    let fonts = font_table(catalog)?;
    FontFetcher::new(client, endpoints, root).fetch_all(&fonts).await
}

fn print_report(report: &RunReport) {
    println!("\n✓ Done! Saved {} file(s)", report.saved);
    if report.warnings > 0 {
        println!("⚠ {} slot(s) had no woff2 file", report.warnings);
    }
    if report.failed > 0 {
        println!("✗ {} download(s) failed", report.failed);
    }
}

fn verify(root: &Path) -> i32 {
    let missing = utils::files::missing_critical_assets(root);
    if missing.is_empty() {
        println!("✓ All critical assets present");
        return 0;
    }
    for path in &missing {
        println!("✗ Missing or empty: {}", path.display());
    }
    1
}

/// Running without a subcommand downloads everything
fn resolve_command(command: Option<Commands>) -> Commands {
    command.unwrap_or(Commands::All { catalog: None })
}

/// Run one command and return its report plus whether a fatal error occurred.
///
/// Fatal means a bad catalog, an unwritable root, or missing assets for
/// `verify`. Individual download failures never are.
async fn run(
    command: Commands,
    client: &reqwest::Client,
    endpoints: &Endpoints,
    root: &Path,
) -> (RunReport, bool) {
    match command {
        Commands::Verify => (RunReport::default(), verify(root) != 0),
        Commands::Fonts { catalog } => match run_fonts(client, endpoints, root, catalog.as_deref()).await {
            Ok(report) => (report, false),
            Err(e) => {
                eprintln!("Error downloading fonts: {}", e);
                (RunReport::default(), true)
            }
        },
        Commands::Plyr => (fetch_plyr(client, endpoints, root).await, false),
        Commands::All { catalog } => {
            let mut report = RunReport::default();
            let mut fatal = false;
            match run_fonts(client, endpoints, root, catalog.as_deref()).await {
                Ok(fonts) => report.merge(&fonts),
                Err(e) => {
                    eprintln!("Error downloading fonts: {}", e);
                    fatal = true;
                }
            }
            println!();
            report.merge(&fetch_plyr(client, endpoints, root).await);
            (report, fatal)
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();
    let command = resolve_command(args.command);
    let is_verify = matches!(command, Commands::Verify);

    let client = match utils::http::build_client(args.timeout.map(Duration::from_secs)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    let endpoints = Endpoints::default();

    let (report, fatal) = run(command, &client, &endpoints, &args.root).await;

    if !is_verify {
        print_report(&report);
    }
    if fatal {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use tempfile::TempDir;

    fn endpoints_for(server: &mockito::ServerGuard) -> Endpoints {
        Endpoints {
            stylesheet_base: format!("{}/css2", server.url()),
            plyr_url: format!("{}/plyr.js", server.url()),
        }
    }

    #[test]
    fn no_subcommand_means_all() {
        let args = Args::parse_from(["asset-fetch"]);
        assert!(args.command.is_none());
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.timeout, None);
        assert!(matches!(
            resolve_command(args.command),
            Commands::All { catalog: None }
        ));
    }

    #[tokio::test]
    async fn all_with_bad_catalog_still_fetches_plyr() {
        let mut server = mockito::Server::new_async().await;
        let plyr = server
            .mock("GET", "/plyr.js")
            .with_status(200)
            .with_body("/* plyr */")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("fonts.json");
        std::fs::write(&catalog, r#"[{"name": "inter", "weights": [950], "source": "inter/v1"}]"#).unwrap();
        let client = utils::http::build_client(None).unwrap();

        let (report, fatal) = run(
            Commands::All { catalog: Some(catalog) },
            &client,
            &endpoints_for(&server),
            dir.path(),
        )
        .await;

        plyr.assert_async().await;
        assert!(fatal);
        assert_eq!(report, RunReport { saved: 1, warnings: 0, failed: 0 });
        assert!(dir.path().join("assets/vendor/glightbox/js/plyr.js").is_file());
    }

    #[tokio::test]
    async fn download_failures_are_not_fatal() {
        let mut server = mockito::Server::new_async().await;
        let slots: usize = default_fonts().iter().map(|f| f.weights.len()).sum();
        let css = server
            .mock("GET", "/css2")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(slots)
            .create_async()
            .await;
        server
            .mock("GET", "/plyr.js")
            .with_status(500)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = utils::http::build_client(None).unwrap();

        let (report, fatal) = run(
            resolve_command(None),
            &client,
            &endpoints_for(&server),
            dir.path(),
        )
        .await;

        css.assert_async().await;
        assert!(!fatal);
        assert_eq!(report, RunReport { saved: 0, warnings: 0, failed: slots + 1 });
    }

    #[tokio::test]
    async fn fonts_with_missing_catalog_is_fatal() {
        let dir = TempDir::new().unwrap();
        let client = utils::http::build_client(None).unwrap();

        let (report, fatal) = run(
            Commands::Fonts { catalog: Some(dir.path().join("absent.json")) },
            &client,
            &Endpoints::default(),
            dir.path(),
        )
        .await;

        assert!(fatal);
        assert_eq!(report, RunReport::default());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::parse_from(["asset-fetch", "fonts", "--root", "site", "--catalog", "fonts.json"]);
        assert_eq!(args.root, PathBuf::from("site"));
        match args.command {
            Some(Commands::Fonts { catalog }) => assert_eq!(catalog, Some(PathBuf::from("fonts.json"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn font_table_defaults_to_builtin() {
        assert_eq!(font_table(None).unwrap(), default_fonts());
    }

    #[test]
    fn verify_exit_codes() {
        let dir = TempDir::new().unwrap();
        assert_eq!(verify(dir.path()), 1);

        for path in utils::files::critical_assets(dir.path()) {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, b"ok").unwrap();
        }
        assert_eq!(verify(dir.path()), 0);
    }
}
