//! External tool capabilities: image transform and label printing

use crate::asset_id::AssetId;
use crate::config::ToolConfig;
use crate::error::{LabelError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Input of one transform run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub source_path: PathBuf,
    pub font: String,
    pub label: AssetId,
    pub target_path: PathBuf,
}

/// Input of one print run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    pub image_path: PathBuf,
    /// When non-zero the image is printed a second time after this many
    /// pixels of blank tape.
    pub pad_count: u32,
    pub cut_after: bool,
}

/// The two external operations the pipeline depends on
pub trait LabelTools: Send + Sync {
    /// Produce the annotated label image, returning its path.
    fn transform(&self, request: &TransformRequest) -> Result<PathBuf>;

    fn print(&self, request: &PrintRequest) -> Result<()>;
}

/// Runs ImageMagick and ptouch-print as subprocesses
#[derive(Debug, Clone, Default)]
pub struct CommandTools {
    config: ToolConfig,
}

impl CommandTools {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn transform_args(&self, request: &TransformRequest) -> Vec<OsString> {
        let t = &self.config.transform;
        let point_size = t.point_size.to_string();
        let resize = format!("x{}", t.height);

        let mut args: Vec<OsString> = vec![request.source_path.clone().into_os_string()];
        let flags: [&str; 26] = [
            "-crop",
            &t.crop,
            "-background",
            "white",
            "-gravity",
            "South",
            "-splice",
            &t.splice,
            "+repage",
            "-gravity",
            "South",
            "-pointsize",
            &point_size,
            "-fill",
            "black",
            "-font",
            &request.font,
            "-annotate",
            "+0+0",
            request.label.as_str(),
            "-interpolate",
            "Integer",
            "-filter",
            "point",
            "-resize",
            &resize,
        ];
        args.extend(flags.iter().map(OsString::from));
        args.push(request.target_path.clone().into_os_string());
        args
    }

    pub fn print_args(request: &PrintRequest) -> Vec<OsString> {
        let mut image_arg = OsString::from("--image=");
        image_arg.push(&request.image_path);

        let mut args = Vec::new();
        if !request.cut_after {
            args.push(OsString::from("--chain"));
        }
        args.push(image_arg.clone());
        if request.pad_count > 0 {
            args.push(OsString::from(format!("--pad={}", request.pad_count)));
            args.push(image_arg);
        }
        args
    }
}

fn run(program: &str, args: &[OsString]) -> std::result::Result<Output, String> {
    debug!(program, ?args, "Spawning");
    Command::new(program)
        .args(args)
        .output()
        .map_err(|e| format!("could not run {}: {}", program, e))
}

fn describe_failure(program: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    match output.status.code() {
        Some(code) => format!("{} failed with error code {}: {}", program, code, stderr.trim()),
        None => format!("{} was terminated by a signal: {}", program, stderr.trim()),
    }
}

impl LabelTools for CommandTools {
    fn transform(&self, request: &TransformRequest) -> Result<PathBuf> {
        let program = &self.config.transform.program;
        let failure = |message: String| LabelError::TransformFailure {
            source_path: request.source_path.clone(),
            message,
        };

        let output = run(program, &self.transform_args(request)).map_err(failure)?;
        if !output.status.success() {
            return Err(failure(describe_failure(program, &output)));
        }
        if !request.target_path.is_file() {
            return Err(failure(format!(
                "{} exited successfully but produced no {}",
                program,
                request.target_path.display()
            )));
        }

        Ok(request.target_path.clone())
    }

    fn print(&self, request: &PrintRequest) -> Result<()> {
        let program = &self.config.printer.program;
        let failure = |message: String| LabelError::PrintFailure {
            image_path: request.image_path.clone(),
            message,
        };

        let output = run(program, &Self::print_args(request)).map_err(failure)?;
        if !output.status.success() {
            return Err(failure(describe_failure(program, &output)));
        }

        Ok(())
    }
}

/// What a [`RecordingTools`] operation should do when called
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScriptedOutcome {
    #[default]
    Succeed,
    Fail(String),
    Panic,
}

#[derive(Debug, Default)]
struct Recording {
    transforms: Vec<TransformRequest>,
    prints: Vec<PrintRequest>,
    transform_outcome: ScriptedOutcome,
    print_outcome: ScriptedOutcome,
}

/// In-memory tools for tests
///
/// A successful transform writes a placeholder file at the requested target
/// so cleanup can be observed on disk. Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingTools {
    state: Arc<Mutex<Recording>>,
}

impl RecordingTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_transform_outcome(&self, outcome: ScriptedOutcome) {
        self.with(|state| state.transform_outcome = outcome);
    }

    pub fn set_print_outcome(&self, outcome: ScriptedOutcome) {
        self.with(|state| state.print_outcome = outcome);
    }

    pub fn transforms(&self) -> Vec<TransformRequest> {
        self.with(|state| state.transforms.clone())
    }

    pub fn prints(&self) -> Vec<PrintRequest> {
        self.with(|state| state.prints.clone())
    }

    fn with<R>(&self, f: impl FnOnce(&mut Recording) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

fn write_placeholder(path: &Path) -> std::io::Result<()> {
    std::fs::write(path, b"\x89PNG\r\n\x1a\n")
}

impl LabelTools for RecordingTools {
    fn transform(&self, request: &TransformRequest) -> Result<PathBuf> {
        let outcome = self.with(|state| {
            state.transforms.push(request.clone());
            state.transform_outcome.clone()
        });

        match outcome {
            ScriptedOutcome::Succeed => {
                write_placeholder(&request.target_path)?;
                Ok(request.target_path.clone())
            }
            ScriptedOutcome::Fail(message) => Err(LabelError::TransformFailure {
                source_path: request.source_path.clone(),
                message,
            }),
            ScriptedOutcome::Panic => panic!("scripted transform panic"),
        }
    }

    fn print(&self, request: &PrintRequest) -> Result<()> {
        let outcome = self.with(|state| {
            state.prints.push(request.clone());
            state.print_outcome.clone()
        });

        match outcome {
            ScriptedOutcome::Succeed => Ok(()),
            ScriptedOutcome::Fail(message) => Err(LabelError::PrintFailure {
                image_path: request.image_path.clone(),
                message,
            }),
            ScriptedOutcome::Panic => panic!("scripted print panic"),
        }
    }
}
