//! Template bundle resolution.
//!
//! A bundle is a directory holding the canonical boilerplate layout. Before
//! rendering, the bundle is mirrored into the per-user cache so a run always
//! reads from a stable local copy.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result, bail};
use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

/// Environment variable overriding the cache location.
pub const CACHE_DIR_ENV: &str = "SPRIG_CACHE_DIR";

/// Whether a cached bundle may be reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Reuse the cached copy when present
    #[default]
    UseCache,
    /// Discard any cached copy and fetch again
    Force,
}

impl RefreshPolicy {
    pub fn from_no_cache(no_cache: bool) -> Self {
        if no_cache {
            RefreshPolicy::Force
        } else {
            RefreshPolicy::UseCache
        }
    }
}

/// Resolves a template bundle to a local directory.
pub trait TemplateSource {
    /// Stable identifier of the bundle.
    fn id(&self) -> &str;

    /// Make the bundle available locally and return its path.
    fn fetch(&self, policy: RefreshPolicy) -> Result<PathBuf>;
}

/// A bundle read from a local directory and mirrored into a cache.
#[derive(Debug, Clone)]
pub struct LocalBundle {
    id: String,
    source: PathBuf,
    cache_root: PathBuf,
}

impl LocalBundle {
    /// Create a bundle for `source`, cached under `cache_root`.
    pub fn new(source: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self {
            id: bundle_id(&source),
            source,
            cache_root: cache_root.into(),
        }
    }

    /// The per-user bundle cache: `$SPRIG_CACHE_DIR`, else `<cache dir>/sprig/bundles`.
    pub fn default_cache_root() -> PathBuf {
        if let Some(dir) = std::env::var_os(CACHE_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".sprig-cache"))
            .join("sprig")
            .join("bundles")
    }

    /// Where this bundle lives in the cache.
    pub fn cache_path(&self) -> PathBuf {
        self.cache_root.join(&self.id)
    }
}

impl TemplateSource for LocalBundle {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self, policy: RefreshPolicy) -> Result<PathBuf> {
        if !self.source.is_dir() {
            bail!("template bundle '{}' is not a directory", self.source.display());
        }

        let target = self.cache_path();
        if target.exists() {
            if policy == RefreshPolicy::UseCache {
                debug!(bundle = %self.id, "using cached bundle");
                return Ok(target);
            }
            fs::remove_dir_all(&target)
                .wrap_err_with(|| format!("failed to clear cache '{}'", target.display()))?;
        }

        // Copy next to the target and rename, so an interrupted copy is never
        // mistaken for a cached bundle.
        let staging = self.cache_root.join(format!(".{}.partial", self.id));
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        copy_tree(&self.source, &staging)?;
        fs::rename(&staging, &target)
            .wrap_err_with(|| format!("failed to populate cache '{}'", target.display()))?;

        debug!(bundle = %self.id, path = %target.display(), "cached bundle");
        Ok(target)
    }
}

/// Cache key: the directory name plus a hash of its full path.
fn bundle_id(source: &Path) -> String {
    let canonical = source
        .canonicalize()
        .unwrap_or_else(|_| source.to_path_buf());
    let stem = canonical
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| sprig_core::derive(n).ok())
        .map(|forms| forms.file().to_string())
        .unwrap_or_else(|| "bundle".to_string());

    let digest = Sha256::digest(canonical.as_os_str().as_encoded_bytes());
    format!("{}-{}", stem, hex::encode(&digest[..8]))
}

/// Recursively copy `from` into `to`, dotfiles included.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.wrap_err_with(|| format!("failed to walk '{}'", from.display()))?;
        let relative = entry.path().strip_prefix(from)?;
        let dest = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .wrap_err_with(|| format!("failed to create '{}'", dest.display()))?;
        } else {
            fs::copy(entry.path(), &dest).wrap_err_with(|| {
                format!(
                    "failed to copy '{}' to '{}'",
                    entry.path().display(),
                    dest.display()
                )
            })?;
        }
    }
    Ok(())
}
