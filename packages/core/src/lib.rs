//! # Labelwatch
//!
//! Watches a directory for label images exported by a home inventory system,
//! crops and annotates each one with its asset identifier, and sends the
//! result to a label printer.
//!
//! Events flow strictly forward:
//!
//! ```text
//! notify -> WatchLoop -> EventFilter -> AssetId::resolve -> LabelPipeline
//! ```
//!
//! External binaries (ImageMagick, ptouch-print) sit behind the
//! [`LabelTools`] trait so the pipeline can be exercised with
//! [`RecordingTools`] in tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use labelwatch_core::{CommandTools, LabelPipeline, PipelineOptions, ToolConfig, WatchLoop};
//! use std::path::Path;
//!
//! let tools = CommandTools::new(ToolConfig::default());
//! let pipeline = LabelPipeline::new(tools, PipelineOptions::default());
//! let handle = WatchLoop::start(Path::new("/srv/labels"), false, pipeline).unwrap();
//! // ... wait for a shutdown signal ...
//! handle.stop();
//! ```

mod asset_id;
mod config;
mod error;
mod event;
mod filter;
mod pipeline;
mod tools;
mod watch;

pub use asset_id::{AssetId, IMAGE_SUFFIX, LABEL_MARKER};
pub use config::{PrinterConfig, ToolConfig, TransformConfig};
pub use error::{LabelError, Result};
pub use event::{EventKind, RawEvent};
pub use filter::{EventFilter, Rejection};
pub use pipeline::{
    JobReport, JobStatus, LabelJob, LabelPipeline, PipelineOptions, DEFAULT_CABLE_PAD, DEFAULT_FONT,
};
pub use tools::{
    CommandTools, LabelTools, PrintRequest, RecordingTools, ScriptedOutcome, TransformRequest,
};
pub use watch::{EventConsumer, WatchHandle, WatchLoop};
