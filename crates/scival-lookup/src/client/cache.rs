//! Two-level document cache: a bounded in-process layer over one JSON file
//! per (endpoint, identifier) on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde_json::Value;

use super::Endpoint;
use crate::error::{ClientError, ClientResult};

/// A cached document and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CachedDocument {
    /// Parsed API response.
    pub document: Value,

    /// When the document was written to the cache.
    pub stored_at: DateTime<Utc>,
}

impl CachedDocument {
    /// Elapsed time since the document was stored, clamped at zero.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.stored_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Document cache keyed by endpoint and identifier.
#[derive(Clone)]
pub struct DocumentCache {
    /// `None` when the in-process layer is disabled (capacity 0).
    memory: Option<Cache<String, CachedDocument>>,
    root: PathBuf,
}

impl DocumentCache {
    /// Create a cache rooted at `root` holding at most `capacity` documents in memory.
    ///
    /// A capacity of 0 disables the in-process layer; every lookup reads disk.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, capacity: u64) -> Self {
        let memory = (capacity > 0).then(|| Cache::builder().max_capacity(capacity).build());
        Self { memory, root: root.into() }
    }

    /// Root directory of the on-disk layer.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the document for `identifier`.
    ///
    /// Identifiers that are not filename-safe are stored under their MD5 digest.
    #[must_use]
    pub fn path_for(&self, endpoint: Endpoint, identifier: &str) -> PathBuf {
        let file_name = if is_filename_safe(identifier) {
            identifier.to_string()
        } else {
            md5_hex(identifier)
        };
        self.root.join(endpoint.name()).join(file_name)
    }

    /// Look up a document, memory first, then disk.
    ///
    /// A cache file that no longer parses is treated as a miss so the caller
    /// refetches and overwrites it.
    pub async fn load(
        &self,
        endpoint: Endpoint,
        identifier: &str,
    ) -> ClientResult<Option<CachedDocument>> {
        let key = memory_key(endpoint, identifier);
        if let Some(memory) = &self.memory {
            if let Some(cached) = memory.get(&key).await {
                tracing::debug!(endpoint = endpoint.name(), identifier, "Memory cache hit");
                return Ok(Some(cached));
            }
        }

        let path = self.path_for(endpoint, identifier);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::cache(path, e)),
        };

        let document: Value = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable cache");
                return Ok(None);
            }
        };

        let modified = tokio::fs::metadata(&path)
            .await
            .and_then(|meta| meta.modified())
            .map_err(|e| ClientError::cache(&path, e))?;

        tracing::debug!(path = %path.display(), "Disk cache hit");
        let cached = CachedDocument { document, stored_at: DateTime::<Utc>::from(modified) };
        if let Some(memory) = &self.memory {
            memory.insert(key, cached.clone()).await;
        }
        Ok(Some(cached))
    }

    /// Persist a freshly fetched document to both layers.
    pub async fn store(
        &self,
        endpoint: Endpoint,
        identifier: &str,
        document: &Value,
    ) -> ClientResult<CachedDocument> {
        let path = self.path_for(endpoint, identifier);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| ClientError::cache(parent, e))?;
        }

        let body = serde_json::to_vec(document)?;
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&target, &body))
            .await
            .map_err(std::io::Error::other)
            .and_then(|written| written)
            .map_err(|e| ClientError::cache(&path, e))?;
        tracing::debug!(path = %path.display(), "Stored document in cache");

        let cached = CachedDocument { document: document.clone(), stored_at: Utc::now() };
        if let Some(memory) = &self.memory {
            memory.insert(memory_key(endpoint, identifier), cached.clone()).await;
        }
        Ok(cached)
    }

    /// Drop every in-process entry; files on disk are kept.
    pub fn clear_memory(&self) {
        if let Some(memory) = &self.memory {
            memory.invalidate_all();
        }
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("root", &self.root)
            .field("memory_entries", &self.memory.as_ref().map(|m| m.entry_count()))
            .finish()
    }
}

/// Write through a uniquely named sibling temp file, then rename over `path`.
///
/// Readers never see a half-written file, and concurrent writers never share a temp file.
fn write_atomic(path: &Path, body: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn is_filename_safe(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.starts_with('.')
        && identifier.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn memory_key(endpoint: Endpoint, identifier: &str) -> String {
    md5_hex(&format!("{}|{}", endpoint.name(), identifier))
}

fn md5_hex(input: &str) -> String {
    use md5::{Digest, Md5};

    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}
