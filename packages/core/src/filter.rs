//! Gate deciding which filesystem events are finished label exports

use crate::asset_id::{IMAGE_SUFFIX, LABEL_MARKER};
use crate::event::{EventKind, RawEvent};
use std::fmt;

/// Why an event was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingMarker,
    WrongSuffix,
    Directory,
    Synthetic,
    /// Only content modifications trigger a job; the exporter creates the
    /// file first and fills it in a second write.
    NotModified(EventKind),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingMarker => write!(f, "file name lacks {:?}", LABEL_MARKER),
            Rejection::WrongSuffix => write!(f, "path does not end with {:?}", IMAGE_SUFFIX),
            Rejection::Directory => write!(f, "directory event"),
            Rejection::Synthetic => write!(f, "synthetic event"),
            Rejection::NotModified(kind) => write!(f, "ignored {:?} event", kind),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventFilter;

impl EventFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn accept(&self, event: &RawEvent) -> bool {
        self.check(event).is_ok()
    }

    /// Like [`EventFilter::accept`] but reports the first rule that failed.
    pub fn check(&self, event: &RawEvent) -> Result<(), Rejection> {
        let file_name = event
            .path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        if !file_name.contains(LABEL_MARKER) {
            return Err(Rejection::MissingMarker);
        }
        if !file_name.ends_with(IMAGE_SUFFIX) {
            return Err(Rejection::WrongSuffix);
        }
        if event.is_directory {
            return Err(Rejection::Directory);
        }
        if event.is_synthetic {
            return Err(Rejection::Synthetic);
        }
        if event.kind != EventKind::Modified {
            return Err(Rejection::NotModified(event.kind));
        }

        Ok(())
    }
}
