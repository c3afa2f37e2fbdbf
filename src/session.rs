use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Blocking HTTP client with a persistent on-disk response cache.
///
/// Built once per run and passed by reference to every mode routine, so
/// all fetches in a run share the same cache directory. Cache entries are
/// whole response bodies keyed by a SHA-256 digest of the request URL and
/// survive across runs until explicitly cleared.
pub struct Session {
    client: Client,
    cache_dir: PathBuf,
}

impl Session {
    pub fn new(cache_dir: &Path) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        fs::create_dir_all(cache_dir)?;

        Ok(Session {
            client,
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Response body for `url`, from cache when present. HTTP error
    /// statuses surface as errors rather than being cached.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache_lookup(url)? {
            debug!("Cache hit: {}", url);
            return Ok(body);
        }

        info!("Fetching {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.bytes()?.to_vec();
        self.cache_store(url, &body)?;
        Ok(body)
    }

    /// Body decoded as UTF-8. The documentation site serves UTF-8; stray
    /// invalid bytes are replaced rather than failing the run.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let body = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Removes every cached entry. A fetch after this always hits the
    /// network again.
    pub fn clear_cache(&self) -> Result<()> {
        let mut removed = 0usize;
        for entry in fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        info!("Cache cleared: {} entries removed", removed);
        Ok(())
    }

    fn cache_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.cache_dir.join(hex::encode(digest))
    }

    fn cache_lookup(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let path = self.cache_path(url);
        if path.exists() {
            Ok(Some(fs::read(path)?))
        } else {
            Ok(None)
        }
    }

    fn cache_store(&self, url: &str, body: &[u8]) -> Result<()> {
        fs::write(self.cache_path(url), body)?;
        Ok(())
    }
}
