//! Locating message documents inside an export tree.
//!
//! Export archives have moved their inbox around between versions, so
//! discovery is a list of [`LayoutProbe`]s tried in order; the first probe
//! that finds any file wins. New layouts are supported by adding a probe.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the messages tree in recent "Download Your
/// Information" archives.
pub const EXPORT_ROOT_MARKER: &str = "your_facebook_activity";

/// A strategy for finding message documents under an export root.
pub trait LayoutProbe: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Returns candidate files under `root`, sorted by path.
    ///
    /// An empty result means the layout does not apply.
    fn discover(&self, root: &Path) -> Vec<PathBuf>;
}

/// Finds every `.html` file below `<root>/<prefix>/messages/inbox`.
#[derive(Debug, Clone)]
pub struct InboxProbe {
    name: String,
    prefix: PathBuf,
}

impl InboxProbe {
    /// Inbox below the export root marker directory.
    pub fn export_root() -> Self {
        Self {
            name: format!("{EXPORT_ROOT_MARKER}/messages/inbox"),
            prefix: PathBuf::from(EXPORT_ROOT_MARKER),
        }
    }

    /// Inbox directly below the root (older archives).
    pub fn bare() -> Self {
        Self {
            name: "messages/inbox".to_string(),
            prefix: PathBuf::new(),
        }
    }

    /// Inbox below an arbitrary sub-directory.
    pub fn under(prefix: impl Into<PathBuf>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{}/messages/inbox", prefix.display()),
            prefix,
        }
    }
}

impl LayoutProbe for InboxProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let inbox = root.join(&self.prefix).join("messages").join("inbox");
        if !inbox.is_dir() {
            return Vec::new();
        }
        let mut files = Vec::new();
        collect_files(&inbox, &mut files, &|path| has_html_extension(path));
        files.sort();
        files
    }
}

/// Finds any `.html` file under the root whose name contains a needle.
#[derive(Debug, Clone)]
pub struct FileNameProbe {
    needle: String,
}

impl FileNameProbe {
    /// Creates a probe matching file names containing `needle`.
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl Default for FileNameProbe {
    fn default() -> Self {
        Self::new("message")
    }
}

impl LayoutProbe for FileNameProbe {
    fn name(&self) -> &str {
        "file name fallback"
    }

    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_files(root, &mut files, &|path| {
            has_html_extension(path)
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.contains(self.needle.as_str()))
        });
        files.sort();
        files
    }
}

/// Returns the built-in probes in priority order.
pub fn default_probes() -> Vec<Box<dyn LayoutProbe>> {
    vec![
        Box::new(InboxProbe::export_root()),
        Box::new(InboxProbe::bare()),
        Box::new(FileNameProbe::default()),
    ]
}

/// Runs `probes` in order and returns the first non-empty result.
pub fn discover_files(root: &Path, probes: &[Box<dyn LayoutProbe>]) -> Vec<PathBuf> {
    for probe in probes {
        let files = probe.discover(root);
        if !files.is_empty() {
            tracing::info!(layout = probe.name(), files = files.len(), "found message files");
            return files;
        }
        tracing::debug!(layout = probe.name(), "layout did not match");
    }
    Vec::new()
}

fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

// Symlinked directories are not followed.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>, accept: &dyn Fn(&Path) -> bool) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), "failed to read directory: {e}");
            return;
        }
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_files(&path, out, accept);
        } else if file_type.is_file() && accept(&path) {
            out.push(path);
        }
    }
}
