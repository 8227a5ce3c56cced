//! Event Loader - bulk ingestion from tab-separated files
//!
//! Each line holds one event: `user_id \t timestamp \t event_type`, with the
//! timestamp as an ISO-8601 local date-time. Malformed lines are logged and
//! skipped; one bad record never aborts a load.
//!
//! Files in a directory are read concurrently on tokio's blocking pool, and
//! the lines of each file are parsed and inserted in parallel with rayon.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::event_store::EventStore;
use crate::types::{Event, EventsError, EventsResult};
use crate::utils::parse_local_datetime;

/// Field separator of event records
const FIELD_SEPARATOR: char = '\t';

/// Outcome of a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Files read successfully
    pub files: usize,
    /// Records handed to the store (overwrites included)
    pub inserted: usize,
    /// Records skipped as malformed
    pub rejected: usize,
}

impl LoadReport {
    /// Accumulate another report into this one
    pub fn merge(&mut self, other: LoadReport) {
        self.files += other.files;
        self.inserted += other.inserted;
        self.rejected += other.rejected;
    }
}

/// Parse one record; `line_num` is 1-based and only used for error reporting
pub fn parse_line(line_num: usize, line: &str) -> EventsResult<Event> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

    let [user_id, timestamp, event_type] = fields.as_slice() else {
        return Err(EventsError::invalid_record(
            line_num,
            format!("expected 3 tab-separated fields, got {}", fields.len()),
        ));
    };

    if user_id.is_empty() {
        return Err(EventsError::invalid_record(line_num, "empty user id"));
    }
    if event_type.is_empty() {
        return Err(EventsError::invalid_record(line_num, "empty event type"));
    }

    let timestamp = parse_local_datetime(timestamp)
        .map_err(|e| EventsError::invalid_record(line_num, e.to_string()))?;

    Ok(Event::new(*user_id, timestamp, *event_type))
}

/// Feeds parsed records into a shared store
#[derive(Debug, Clone)]
pub struct EventLoader {
    store: Arc<EventStore>,
}

impl EventLoader {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Parse and insert every non-blank line of `content`
    pub fn load_str(&self, content: &str) -> LoadReport {
        self.load_bytes(content.as_bytes())
    }

    /// Parse and insert every non-blank line of raw file content.
    ///
    /// Lines are decoded one by one, so a line that is not valid UTF-8 is
    /// rejected on its own and the rest of the content still loads.
    pub fn load_bytes(&self, content: &[u8]) -> LoadReport {
        let lines: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();

        let (inserted, rejected) = lines
            .par_iter()
            .enumerate()
            .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
            .map(|(idx, line)| match decode_line(idx + 1, line) {
                Ok(event) => {
                    self.store.insert(event);
                    (1, 0)
                }
                Err(e) => {
                    warn!("Skipping record: {}", e);
                    (0, 1)
                }
            })
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

        LoadReport {
            files: 0,
            inserted,
            rejected,
        }
    }

    /// Load a single file of UTF-8 records
    pub fn load_file(&self, path: &Path) -> EventsResult<LoadReport> {
        info!("Processing file: {}", path.display());

        let content = fs::read(path)?;
        let report = LoadReport {
            files: 1,
            ..self.load_bytes(&content)
        };

        info!(
            "Loaded {}: {} inserted, {} rejected",
            path.display(),
            report.inserted,
            report.rejected
        );
        Ok(report)
    }

    /// Load every regular file of `dir` concurrently.
    ///
    /// A missing directory yields an empty report.
    pub async fn load_dir(&self, dir: &Path) -> EventsResult<LoadReport> {
        info!("Start loading events from {}", dir.display());

        if !dir.is_dir() {
            info!("Data folder not found: {}", dir.display());
            return Ok(LoadReport::default());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        Ok(self.load_paths(paths).await)
    }

    /// Load the given files concurrently on the blocking pool.
    ///
    /// A file that cannot be read is logged and skipped.
    pub async fn load_paths(&self, paths: Vec<PathBuf>) -> LoadReport {
        let tasks = paths.into_iter().map(|path| {
            let loader = self.clone();
            tokio::task::spawn_blocking(move || {
                let result = loader.load_file(&path);
                (path, result)
            })
        });

        let mut report = LoadReport::default();
        for joined in futures::future::join_all(tasks).await {
            match joined {
                Ok((_, Ok(file_report))) => report.merge(file_report),
                Ok((path, Err(e))) => warn!("Failed to load {}: {}", path.display(), e),
                Err(e) => warn!("Loader task failed: {}", e),
            }
        }

        info!(
            "Finished loading {} files: {} inserted, {} rejected",
            report.files, report.inserted, report.rejected
        );
        report
    }
}

fn decode_line(line_num: usize, line: &[u8]) -> EventsResult<Event> {
    let line = std::str::from_utf8(line)
        .map_err(|e| EventsError::invalid_record(line_num, format!("invalid UTF-8: {}", e)))?;
    parse_line(line_num, line)
}
