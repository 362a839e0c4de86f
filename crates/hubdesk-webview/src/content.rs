//! Bundled page assets with compiled-in fallbacks.
//!
//! The floating search window and the main window's error page are plain
//! HTML files under the assets directory. When a file is missing or
//! unreadable the shell uses a minimal page compiled into the binary, so a
//! broken install still gets a working window.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Minimal floating search page used when the bundled one is missing.
pub const FLOATING_FALLBACK_HTML: &str = include_str!("../assets/floating_fallback.html");

/// Minimal error page used when the bundled one is missing.
pub const ERROR_FALLBACK_HTML: &str = include_str!("../assets/error_fallback.html");

/// Source of bundled page assets.
pub trait AssetLoader {
    /// Read a text asset by relative name. `None` when absent or unreadable.
    fn load_text(&self, name: &str) -> Option<String>;
}

/// Assets read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskAssets {
    base_dir: PathBuf,
}

impl DiskAssets {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `name` under the base directory, refusing anything that
    /// escapes it (including through symlinks).
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let clean = name.trim_start_matches('/');
        let file_path = self.base_dir.join(clean);

        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            warn!(name, "asset path escapes the assets directory");
            return None;
        }
        Some(canonical_file)
    }
}

impl AssetLoader for DiskAssets {
    fn load_text(&self, name: &str) -> Option<String> {
        let path = self.resolve(name)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read asset");
                None
            }
        }
    }
}

/// In-memory assets.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    files: HashMap<String, String>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(name.into(), text.into());
        self
    }
}

impl AssetLoader for StaticAssets {
    fn load_text(&self, name: &str) -> Option<String> {
        self.files.get(name.trim_start_matches('/')).cloned()
    }
}

fn load_or(loader: &dyn AssetLoader, name: &str, fallback: &str) -> String {
    match loader.load_text(name) {
        Some(text) => {
            debug!(name, "loaded bundled page");
            text
        }
        None => {
            warn!(name, "bundled page missing; using built-in fallback");
            fallback.to_string()
        }
    }
}

/// HTML for the floating window.
pub fn floating_page(loader: &dyn AssetLoader, name: &str) -> String {
    load_or(loader, name, FLOATING_FALLBACK_HTML)
}

/// HTML for the main window's error state.
pub fn error_page(loader: &dyn AssetLoader, name: &str) -> String {
    load_or(loader, name, ERROR_FALLBACK_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path to the assets directory at the workspace root.
    fn assets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent() // crates/
            .unwrap()
            .parent() // workspace root
            .unwrap()
            .join("assets")
    }

    #[test]
    fn bundled_pages_resolve() {
        let assets = DiskAssets::new(assets_dir());
        let floating = assets.load_text("floating.html").unwrap();
        assert!(floating.contains("search-term"));
        let error = assets.load_text("error.html").unwrap();
        assert!(error.contains("<html"));
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DiskAssets::new(dir.path());
        assert!(assets.load_text("floating.html").is_none());
        assert_eq!(floating_page(&assets, "floating.html"), FLOATING_FALLBACK_HTML);
        assert_eq!(error_page(&assets, "error.html"), ERROR_FALLBACK_HTML);
    }

    #[test]
    fn missing_base_dir_falls_back() {
        let assets = DiskAssets::new("/nonexistent/hubdesk/assets");
        assert_eq!(floating_page(&assets, "floating.html"), FLOATING_FALLBACK_HTML);
    }

    #[test]
    fn traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("assets");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(dir.path().join("secret.html"), "secret").unwrap();

        let assets = DiskAssets::new(&inner);
        assert!(assets.load_text("../secret.html").is_none());
        assert!(assets.resolve("../secret.html").is_none());
    }

    #[test]
    fn disk_file_preferred_over_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("floating.html"), "<p>custom</p>").unwrap();
        let assets = DiskAssets::new(dir.path());
        assert_eq!(floating_page(&assets, "floating.html"), "<p>custom</p>");
        assert_eq!(floating_page(&assets, "/floating.html"), "<p>custom</p>");
    }

    #[test]
    fn static_assets_lookup() {
        let assets = StaticAssets::new().with("error.html", "<p>down</p>");
        assert_eq!(error_page(&assets, "error.html"), "<p>down</p>");
        assert_eq!(floating_page(&assets, "floating.html"), FLOATING_FALLBACK_HTML);
    }

    #[test]
    fn fallback_pages_use_bridge_channels() {
        assert!(FLOATING_FALLBACK_HTML.contains("window.api.send"));
        assert!(FLOATING_FALLBACK_HTML.contains("search-term"));
        assert!(FLOATING_FALLBACK_HTML.contains("search-focus"));
        assert!(ERROR_FALLBACK_HTML.contains("<html"));
    }
}
