//! Filesystem events as seen by the label filter

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use std::path::PathBuf;

/// What happened to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Created,
    Modified,
    Deleted,
    Moved,
    Other,
}

/// One filesystem change for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub path: PathBuf,
    pub kind: EventKind,
    pub is_directory: bool,
    /// Raised by the notification layer itself (e.g. a rescan request)
    /// rather than by a write on disk.
    pub is_synthetic: bool,
}

impl RawEvent {
    pub fn new(path: impl Into<PathBuf>, kind: EventKind) -> Self {
        Self {
            path: path.into(),
            kind,
            is_directory: false,
            is_synthetic: false,
        }
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EventKind::Modified)
    }

    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EventKind::Created)
    }

    pub fn directory(mut self) -> Self {
        self.is_directory = true;
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    /// Split a native notification into one event per affected path.
    pub fn from_notify(event: &notify::Event) -> Vec<RawEvent> {
        let kind = match event.kind {
            notify::EventKind::Create(_) => EventKind::Created,
            notify::EventKind::Modify(ModifyKind::Name(_)) => EventKind::Moved,
            notify::EventKind::Modify(_) => EventKind::Modified,
            notify::EventKind::Remove(_) => EventKind::Deleted,
            notify::EventKind::Access(_) | notify::EventKind::Any | notify::EventKind::Other => {
                EventKind::Other
            }
        };
        let folder_kind = matches!(
            event.kind,
            notify::EventKind::Create(CreateKind::Folder)
                | notify::EventKind::Remove(RemoveKind::Folder)
        );
        let is_synthetic = event.need_rescan();

        event
            .paths
            .iter()
            .map(|path| RawEvent {
                path: path.clone(),
                kind,
                is_directory: folder_kind || path.is_dir(),
                is_synthetic,
            })
            .collect()
    }
}
