//! Transform, print and cleanup for a single accepted label event
//!
//! Every stage failure is logged and ends the job; nothing escapes
//! [`LabelPipeline::run`]. Once the transform has produced an image the
//! pipeline removes it again on every exit path.

use crate::asset_id::AssetId;
use crate::error::LabelError;
use crate::tools::{LabelTools, PrintRequest, TransformRequest};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const DEFAULT_FONT: &str = "Noto-Sans-Bold";
pub const DEFAULT_CABLE_PAD: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Font for the asset id caption
    pub font: String,

    /// Delete the exported image once the transform succeeded. Applies even
    /// when printing fails afterwards.
    pub remove_originals: bool,

    /// Print the label twice with a blank gap so it wraps around a cable
    pub cable: bool,

    /// Gap used in cable mode
    pub cable_pad: u32,

    /// Cut the tape right after this label instead of chaining
    pub cut: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            remove_originals: false,
            cable: false,
            cable_pad: DEFAULT_CABLE_PAD,
            cut: false,
        }
    }
}

/// One label being processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelJob {
    pub source_path: PathBuf,
    pub asset_id: AssetId,
    /// Processed image, written next to the source and owned by the job
    pub target_path: PathBuf,
}

impl LabelJob {
    pub fn new(source_path: &Path, asset_id: AssetId) -> Self {
        let target_path = source_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(asset_id.processed_file_name());

        Self {
            source_path: source_path.to_path_buf(),
            asset_id,
            target_path,
        }
    }
}

/// Where a job ended
#[derive(Debug)]
pub enum JobStatus {
    Printed,
    /// The path did not yield an asset id; nothing was touched.
    Rejected(LabelError),
    /// No image was produced; nothing was cleaned up.
    TransformFailed(LabelError),
    /// The image was produced and cleaned up but never printed.
    PrintFailed(LabelError),
}

#[derive(Debug)]
pub struct JobReport {
    pub source_path: PathBuf,
    pub job: Option<LabelJob>,
    pub status: JobStatus,
    pub cleanup_errors: Vec<LabelError>,
}

impl JobReport {
    fn ended(source_path: &Path, job: Option<LabelJob>, status: JobStatus) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            job,
            status,
            cleanup_errors: Vec::new(),
        }
    }

    pub fn is_printed(&self) -> bool {
        matches!(self.status, JobStatus::Printed)
    }

    pub fn asset_id(&self) -> Option<&AssetId> {
        self.job.as_ref().map(|job| &job.asset_id)
    }
}

pub struct LabelPipeline<T> {
    tools: T,
    options: PipelineOptions,
}

impl<T: LabelTools> LabelPipeline<T> {
    pub fn new(tools: T, options: PipelineOptions) -> Self {
        Self { tools, options }
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn print_request(&self, image_path: &Path) -> PrintRequest {
        PrintRequest {
            image_path: image_path.to_path_buf(),
            pad_count: if self.options.cable {
                self.options.cable_pad
            } else {
                0
            },
            cut_after: self.options.cut,
        }
    }

    /// Process one label image end to end.
    pub fn run(&self, source_path: &Path) -> JobReport {
        let asset_id = match AssetId::resolve(source_path) {
            Ok(asset_id) => asset_id,
            Err(e) => {
                error!("Skipping {}: {}", source_path.display(), e);
                return JobReport::ended(source_path, None, JobStatus::Rejected(e));
            }
        };

        let file_name = source_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        info!("Detected asset {} at {}", asset_id, file_name);

        let job = LabelJob::new(source_path, asset_id);
        let request = TransformRequest {
            source_path: job.source_path.clone(),
            font: self.options.font.clone(),
            label: job.asset_id.clone(),
            target_path: job.target_path.clone(),
        };

        let image_path = match self.tools.transform(&request) {
            Ok(image_path) => {
                info!("- Processing with ImageMagick...done");
                image_path
            }
            Err(e) => {
                error!("- Processing with ImageMagick...failed");
                error!("Error: {}", e);
                return JobReport::ended(source_path, Some(job), JobStatus::TransformFailed(e));
            }
        };

        let status = match self.tools.print(&self.print_request(&image_path)) {
            Ok(()) => {
                info!("- Printing with ptouch-print...done");
                JobStatus::Printed
            }
            Err(e) => {
                error!("- Printing with ptouch-print...failed");
                error!("Error: {}", e);
                JobStatus::PrintFailed(e)
            }
        };

        let cleanup_errors = self.cleanup(&image_path, source_path);
        JobReport {
            cleanup_errors,
            ..JobReport::ended(source_path, Some(job), status)
        }
    }

    fn cleanup(&self, image_path: &Path, source_path: &Path) -> Vec<LabelError> {
        let mut doomed = vec![image_path];
        if self.options.remove_originals {
            doomed.push(source_path);
        }

        doomed
            .into_iter()
            .filter_map(|path| {
                std::fs::remove_file(path)
                    .map_err(|error| {
                        warn!("Could not remove {}: {}", path.display(), error);
                        LabelError::CleanupFailure {
                            path: path.to_path_buf(),
                            error,
                        }
                    })
                    .err()
            })
            .collect()
    }
}
