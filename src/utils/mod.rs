//! Utility modules for asset-fetch
//!
//! - `files`: directory preparation and on-disk checks
//! - `http`: HTTP client and download helpers

pub mod files;
pub mod http;
