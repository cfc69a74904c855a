//! Symbol source acquisition.
//!
//! Every configured endpoint is satisfied either from the on-disk cache or
//! from a `SourceFetcher`. Fetches run in parallel; the pipeline only starts
//! once `PendingSources` has received a result for every endpoint.

use std::fs;
use std::path::{Path, PathBuf};

use dtsgen_common::{ApiSource, GeneratorConfig};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to fetch {endpoint}: {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read cached source {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{endpoint} is not a valid symbol source: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no result for {} endpoint(s): {}", missing.len(), missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

/// Delivers the raw text of one endpoint.
pub trait SourceFetcher: Sync {
    fn fetch(&self, endpoint: &str) -> std::io::Result<String>;
}

/// Reads endpoints as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryFetcher { root: root.into() }
    }
}

impl SourceFetcher for DirectoryFetcher {
    fn fetch(&self, endpoint: &str) -> std::io::Result<String> {
        let path = self.root.join(endpoint);
        trace!(path = %path.display(), "reading endpoint");
        fs::read_to_string(path)
    }
}

/// Cached copies of fetched endpoints, one file per endpoint.
#[derive(Debug, Clone)]
pub struct SourceCache {
    dir: PathBuf,
}

impl SourceCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SourceCache { dir: dir.into() }
    }

    pub fn path_for(&self, endpoint: &str) -> PathBuf {
        self.dir.join(GeneratorConfig::cache_file_name(endpoint))
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.path_for(endpoint).is_file()
    }

    pub fn read(&self, endpoint: &str) -> Result<String, AcquisitionError> {
        let path = self.path_for(endpoint);
        fs::read_to_string(&path).map_err(|source| AcquisitionError::CacheRead { path, source })
    }

    /// Best effort: a cache that cannot be written only costs the next run a fetch.
    pub fn write(&self, endpoint: &str, text: &str) {
        let path = self.path_for(endpoint);
        if let Err(err) = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, text)) {
            warn!(path = %path.display(), error = %err, "could not write source cache");
        }
    }
}

/// Counting barrier keyed by endpoint.
///
/// Results may arrive in any order; `finish` hands back the sources in the
/// configured endpoint order once every endpoint has delivered.
#[derive(Debug)]
pub struct PendingSources {
    order: Vec<String>,
    delivered: FxHashMap<String, ApiSource>,
}

impl PendingSources {
    /// An endpoint listed more than once is waited for once.
    pub fn new(endpoints: &[String]) -> Self {
        let mut order: Vec<String> = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            if !order.contains(endpoint) {
                order.push(endpoint.clone());
            }
        }
        PendingSources {
            order,
            delivered: FxHashMap::default(),
        }
    }

    /// Record a result. Unknown endpoints are ignored; a repeated delivery
    /// replaces the earlier one.
    pub fn deliver(&mut self, endpoint: &str, source: ApiSource) {
        if !self.order.iter().any(|e| e == endpoint) {
            debug!(endpoint, "ignoring delivery for unrequested endpoint");
            return;
        }
        self.delivered.insert(endpoint.to_string(), source);
    }

    pub fn missing(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|endpoint| !self.delivered.contains_key(*endpoint))
            .cloned()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn finish(mut self) -> Result<Vec<ApiSource>, AcquisitionError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(AcquisitionError::Incomplete { missing });
        }
        Ok(self
            .order
            .iter()
            .filter_map(|endpoint| self.delivered.remove(endpoint))
            .collect())
    }
}

fn parse_source(endpoint: &str, text: &str) -> Result<ApiSource, AcquisitionError> {
    serde_json::from_str(text).map_err(|source| AcquisitionError::Parse {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Acquire every configured endpoint.
///
/// With a `cache`, endpoints present in it are read from it and
/// fetched endpoints are written back. Any fetch, read or parse failure
/// fails the whole acquisition.
pub fn acquire_sources(
    endpoints: &[String],
    fetcher: &dyn SourceFetcher,
    cache: Option<&SourceCache>,
) -> Result<Vec<ApiSource>, AcquisitionError> {
    let mut pending = PendingSources::new(endpoints);
    let mut to_fetch = Vec::new();

    for endpoint in endpoints {
        match cache {
            Some(cache) if cache.contains(endpoint) => {
                debug!(endpoint = endpoint.as_str(), "using cached source");
                let text = cache.read(endpoint)?;
                pending.deliver(endpoint, parse_source(endpoint, &text)?);
            }
            _ if to_fetch.contains(&endpoint.as_str()) => {}
            _ => to_fetch.push(endpoint.as_str()),
        }
    }

    let fetched: Vec<Result<(&str, ApiSource), AcquisitionError>> = to_fetch
        .par_iter()
        .map(|&endpoint| {
            let text = fetcher
                .fetch(endpoint)
                .map_err(|source| AcquisitionError::Fetch {
                    endpoint: endpoint.to_string(),
                    source,
                })?;
            if let Some(cache) = cache {
                cache.write(endpoint, &text);
            }
            Ok((endpoint, parse_source(endpoint, &text)?))
        })
        .collect();

    for result in fetched {
        let (endpoint, source) = result?;
        pending.deliver(endpoint, source);
    }

    info!(
        endpoints = endpoints.len(),
        fetched = to_fetch.len(),
        "symbol sources acquired"
    );
    pending.finish()
}

/// Cache location for a run, or `None` when caching is off.
pub fn cache_for(config: &GeneratorConfig, base_dir: &Path, no_cache: bool) -> Option<SourceCache> {
    (config.cache_apis && !no_cache).then(|| SourceCache::new(base_dir.join(&config.cache_dir)))
}
