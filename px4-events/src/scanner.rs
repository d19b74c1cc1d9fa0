//! Main scanner API
//!
//! The SourceScanner walks the given roots, reads every eligible file and
//! hands its content to a parser, which records events into the model.

use crate::config::ScanConfig;
use crate::model::EventModel;
use crate::parser::{EventParser, ParseFlow};
use crate::source::{read_source, SourceWalker};
use crate::types::{EventsError, Result};
use std::path::{Path, PathBuf};

/// Outcome of a completed scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of files handed to the parser
    pub files_scanned: usize,
    /// Files whose content could not be read and was replaced by empty text
    pub unreadable: Vec<PathBuf>,
    /// Directories below a root that could not be listed and were skipped
    pub unlistable: Vec<PathBuf>,
    /// False when the parser asked to stop before every file was seen
    pub completed: bool,
}

/// Entry point for scanning source trees
#[derive(Debug, Clone, Default)]
pub struct SourceScanner {
    config: ScanConfig,
}

impl SourceScanner {
    /// Create a scanner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with a custom configuration
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every root and feed each eligible file to `parser`
    ///
    /// Roots are processed in order. A root that is a file is always parsed;
    /// directories are searched recursively for files with an allowed
    /// extension. Unreadable files are parsed as empty content and listed in
    /// the summary, as are subdirectories that cannot be listed. A root that
    /// cannot be accessed is an error. Any parser error stops the scan and is returned wrapped
    /// with the path of the offending file.
    ///
    /// # Example
    /// ```no_run
    /// use px4_events::{AnnotationParser, EventModel, SourceScanner};
    /// use std::path::PathBuf;
    ///
    /// let mut model = EventModel::new();
    /// let summary = SourceScanner::new()
    ///     .scan(&[PathBuf::from("src")], &mut AnnotationParser::new(), &mut model)
    ///     .unwrap();
    /// println!("{} files scanned", summary.files_scanned);
    /// ```
    pub fn scan<P, E>(&self, roots: &[P], parser: &mut E, model: &mut EventModel) -> Result<ScanSummary>
    where
        P: AsRef<Path>,
        E: EventParser + ?Sized,
    {
        if roots.is_empty() {
            return Err(EventsError::NoInputs);
        }

        log::info!("Scanning {} input path(s)", roots.len());

        let mut summary = ScanSummary::default();
        let mut walker =
            SourceWalker::new(roots.iter().map(|r| r.as_ref().to_path_buf()), &self.config);

        for path in walker.by_ref() {
            let path = path?;
            match self.scan_file(&path, parser, model, &mut summary)? {
                ParseFlow::Continue => {}
                ParseFlow::Stop => {
                    log::info!("Parser stopped the scan after {:?}", path);
                    summary.unlistable = walker.skipped().to_vec();
                    return Ok(summary);
                }
            }
        }

        summary.unlistable = walker.skipped().to_vec();
        summary.completed = true;
        let stats = model.stats();
        log::info!(
            "Scan complete: {} file(s), {} group(s), {} event(s)",
            summary.files_scanned,
            stats.num_groups,
            stats.num_events
        );
        Ok(summary)
    }

    fn scan_file<E>(
        &self,
        path: &Path,
        parser: &mut E,
        model: &mut EventModel,
        summary: &mut ScanSummary,
    ) -> Result<ParseFlow>
    where
        E: EventParser + ?Sized,
    {
        log::debug!("Scanning file: {:?}", path);

        let source = read_source(path);
        if !source.readable {
            summary.unreadable.push(path.to_path_buf());
        }
        summary.files_scanned += 1;

        parser
            .parse(&source.content, path, model)
            .map_err(|e| {
                log::error!("Exception while parsing file {:?}", path);
                EventsError::Parse {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                }
            })
    }
}
