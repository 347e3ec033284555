// src/core/fetcher.rs

use crate::constants::CEP_HELPER_FILES;
use colored::Colorize;
use rayon::prelude::*;
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Could not create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to GET {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to GET {url}: HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("Could not write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Streams a remote file to a local path.
pub trait Downloader: Sync {
    /// Downloads `url` into `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Blocking `reqwest` client with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let write_error = |source| FetchError::Write {
            path: dest.to_path_buf(),
            source,
        };
        let mut file = BufWriter::new(File::create(dest).map_err(write_error)?);
        let written = io::copy(&mut response, &mut file).map_err(write_error)?;
        file.flush().map_err(write_error)?;
        Ok(written)
    }
}

/// `<base>/<file>`, tolerating a trailing slash on the base.
pub fn helper_file_url(base_url: &str, file_name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), file_name)
}

/// Downloads the CEP helper scripts (`CSInterface.js`, ...) for one CEP
/// version into `target_dir`, creating it if needed.
///
/// Downloads run concurrently. No retries and no checksum verification; the
/// first error is returned and aborts the caller's run.
pub fn fetch_cep_helpers(
    downloader: &dyn Downloader,
    base_url: &str,
    target_dir: &Path,
) -> Result<Vec<PathBuf>, FetchError> {
    fetch_files(downloader, base_url, &CEP_HELPER_FILES, target_dir)
}

pub fn fetch_files(
    downloader: &dyn Downloader,
    base_url: &str,
    file_names: &[&str],
    target_dir: &Path,
) -> Result<Vec<PathBuf>, FetchError> {
    if !target_dir.exists() {
        fs::create_dir_all(target_dir).map_err(|source| FetchError::CreateDir {
            path: target_dir.to_path_buf(),
            source,
        })?;
    }

    file_names
        .par_iter()
        .map(|file_name| -> Result<PathBuf, FetchError> {
            let url = helper_file_url(base_url, file_name);
            let dest = target_dir.join(file_name);
            println!("  {} {}", "download".cyan(), url);
            let bytes = downloader.download(&url, &dest)?;
            log::debug!("Downloaded {} bytes to '{}'", bytes, dest.display());
            Ok(dest)
        })
        .collect()
}
