//! Ordered status report and result aggregation.

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::filespec::{FileSpec, StatusCode};
use crate::transfer::DispatchOutcome;

use super::error_info::extract_error_info;

/// Reserved key carrying the single global error slot.
pub const ERROR_KEY: &str = "error";

/// One report value: `[status, status_code, turl]`.
///
/// For the reserved `error` key the first slot carries the error message and
/// the third is always null.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEntry {
    pub status: Option<String>,
    pub status_code: Option<StatusCode>,
    pub turl: Option<String>,
}

impl StatusEntry {
    /// Snapshot of one descriptor's outcome fields.
    pub fn from_spec(spec: &FileSpec) -> Self {
        Self {
            status: spec.status.clone(),
            status_code: spec.status_code.clone(),
            turl: spec.turl.clone(),
        }
    }

    /// The global error slot value.
    pub fn error(message: String, code: StatusCode) -> Self {
        Self {
            status: Some(message),
            status_code: Some(code),
            turl: None,
        }
    }
}

impl Serialize for StatusEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.status)?;
        tuple.serialize_element(&self.status_code)?;
        tuple.serialize_element(&self.turl)?;
        tuple.end()
    }
}

/// The consolidated status mapping, ordered by first insertion.
///
/// Keys are logical file names plus the reserved `error` key. Insertion of an
/// existing key overwrites its value in place: duplicate lfns collapse
/// last-write-wins, keeping the position of the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    entries: Vec<(String, StatusEntry)>,
}

impl StatusReport {
    /// Fold the (possibly partially populated) descriptors and the dispatch
    /// outcome into a report. Always adds exactly one `error` entry:
    /// `("", 0, null)` when the dispatch was clean.
    pub fn from_transfers(files: &[FileSpec], outcome: &DispatchOutcome) -> Self {
        let mut report = StatusReport::default();

        if !files.is_empty() {
            info!("stage-in summary of transferred files:");
            for spec in files {
                report.insert(spec.lfn.clone(), StatusEntry::from_spec(spec));
                let status = spec.status.as_deref().unwrap_or("(not transferred)");
                info!(
                    " -- lfn={}, status_code={}, status={}",
                    spec.lfn,
                    spec.status_code
                        .as_ref()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "None".to_string()),
                    status
                );
            }
        }

        let (code, message) = if outcome.is_error() {
            extract_error_info(&outcome.error)
        } else {
            (StatusCode::Int(0), String::new())
        };
        report.insert(ERROR_KEY.to_string(), StatusEntry::error(message, code));

        report
    }

    /// Insert or overwrite an entry. Overwrite keeps the original position.
    pub fn insert(&mut self, key: String, entry: StatusEntry) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *existing = entry;
        } else {
            self.entries.push((key, entry));
        }
    }

    pub fn get(&self, key: &str) -> Option<&StatusEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, e)| e)
    }

    /// The extracted global error message, empty when the run is reportable
    /// as a success. This is the string the exit policy keys on: a captured
    /// dispatch failure without a recoverable `details:` substring aggregates
    /// to an empty message and the run exits clean.
    pub fn error_message(&self) -> &str {
        self.get(ERROR_KEY)
            .and_then(|e| e.status.as_deref())
            .unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StatusReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}
