//! Recursive source file discovery
//!
//! Yields, for each root in order, either the root itself (when it is a file)
//! or every regular file below it whose name ends with an allowed extension.
//! Directory entries are visited sorted by file name so that two runs over the
//! same tree see the files in the same order.
//!
//! Symlinks to files are yielded like regular files; symlinked directories are
//! not descended into. A directory below a root that cannot be listed is
//! skipped with a warning and recorded in [`SourceWalker::skipped`]. Errors on
//! the root itself (e.g. it does not exist) are returned to the caller.

use crate::config::ScanConfig;
use crate::types::{EventsError, Result};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Lazy iterator over eligible source files
pub struct SourceWalker {
    roots: std::vec::IntoIter<PathBuf>,
    config: ScanConfig,
    current: Option<walkdir::IntoIter>,
    skipped: Vec<PathBuf>,
}

impl SourceWalker {
    /// Create a walker over the given roots
    pub fn new<I, P>(roots: I, config: &ScanConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        Self {
            roots: roots.into_iter(),
            config: config.clone(),
            current: None,
            skipped: Vec::new(),
        }
    }

    /// Paths below a root that could not be listed, in the order met
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    fn is_eligible(&self, entry: &walkdir::DirEntry) -> bool {
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        is_file
            && self
                .config
                .matches_file_name(&entry.file_name().to_string_lossy())
    }
}

impl Iterator for SourceWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(walk) = self.current.as_mut() {
                match walk.next() {
                    Some(Ok(entry)) => {
                        if self.is_eligible(&entry) {
                            return Some(Ok(entry.into_path()));
                        }
                    }
                    Some(Err(e)) if e.depth() == 0 => return Some(Err(EventsError::Walk(e))),
                    Some(Err(e)) => {
                        log::warn!("Skipping unreadable directory entry: {}", e);
                        if let Some(path) = e.path() {
                            self.skipped.push(path.to_path_buf());
                        }
                    }
                    None => self.current = None,
                }
                continue;
            }

            let root = self.roots.next()?;

            // Explicitly named files skip the extension filter
            if root.is_file() {
                log::trace!("Yielding explicit file root: {:?}", root);
                return Some(Ok(root));
            }

            log::debug!("Walking directory: {:?}", root);
            self.current = Some(
                WalkDir::new(root)
                    .follow_links(false)
                    .sort_by_file_name()
                    .into_iter(),
            );
        }
    }
}
