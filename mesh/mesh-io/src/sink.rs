//! Write targets for exported documents.
//!
//! A [`Sink`] receives the complete document in one call and must store it
//! all-or-nothing: after a failed [`Sink::commit`] the destination looks
//! exactly as it did before.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name used by [`FileSink::in_dir`].
pub const DEFAULT_FILE_NAME: &str = "scan.obj";

/// A durable destination for an exported document.
pub trait Sink {
    /// What the caller gets back to find the stored document again.
    type Location;

    /// Store `document`, replacing any previous contents atomically.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the document could not be stored.
    /// The destination must be left unmodified in that case.
    fn commit(&mut self, document: &[u8]) -> io::Result<Self::Location>;

    /// Human-readable description of the destination, for logs and errors.
    fn describe(&self) -> String;
}

/// Writes the document to a file through a temporary file and an atomic
/// rename.
///
/// The temporary file is created next to the destination so the rename never
/// crosses a filesystem boundary. If anything fails the temporary file is
/// removed and an existing destination keeps its previous contents.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{FileSink, Sink};
///
/// let mut sink = FileSink::in_dir("/var/scans");
/// let path = sink.commit(b"v 0 0 0\n").unwrap();
/// assert!(path.ends_with("scan.obj"));
/// ```
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    sync: bool,
}

impl FileSink {
    /// Target `path`, syncing to disk before the rename.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync: true,
        }
    }

    /// Target [`DEFAULT_FILE_NAME`] inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Sets whether file contents are flushed to stable storage before the
    /// rename (default: true).
    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// The destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Sink for FileSink {
    type Location = PathBuf;

    fn commit(&mut self, document: &[u8]) -> io::Result<PathBuf> {
        if self.path.file_name().is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "destination path has no file name",
            ));
        }

        let existing = fs::metadata(&self.path).ok().map(|m| m.permissions());

        let mut builder = tempfile::Builder::new();
        builder.prefix(".scan-").suffix(".tmp");
        #[cfg(unix)]
        {
            // Same mode `fs::write` would use; the umask still applies.
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut temp = builder.tempfile_in(self.parent_dir())?;
        temp.write_all(document)?;
        temp.flush()?;
        if let Some(permissions) = existing {
            temp.as_file().set_permissions(permissions)?;
        }
        if self.sync {
            temp.as_file().sync_all()?;
        }

        // Dropping the returned handle on failure removes the temp file.
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(self.path.clone())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the last committed document in memory.
///
/// # Example
///
/// ```
/// use mesh_io::{MemorySink, Sink};
///
/// let mut sink = MemorySink::new();
/// assert_eq!(sink.commit(b"v 1 2 3\n").unwrap(), 8);
/// assert_eq!(sink.as_str(), Some("v 1 2 3\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    document: Option<Vec<u8>>,
    commits: usize,
}

impl MemorySink {
    /// Create a sink that holds nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            document: None,
            commits: 0,
        }
    }

    /// The last committed document, if any.
    #[must_use]
    pub fn contents(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }

    /// The last committed document as text, if any and if valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.contents().and_then(|d| std::str::from_utf8(d).ok())
    }

    /// Number of successful commits.
    #[must_use]
    pub const fn commits(&self) -> usize {
        self.commits
    }

    /// Take the last committed document.
    #[must_use]
    pub fn into_inner(self) -> Option<Vec<u8>> {
        self.document
    }
}

impl Sink for MemorySink {
    type Location = usize;

    fn commit(&mut self, document: &[u8]) -> io::Result<usize> {
        self.document = Some(document.to_vec());
        self.commits += 1;
        Ok(document.len())
    }

    fn describe(&self) -> String {
        "in-memory buffer".to_string()
    }
}
