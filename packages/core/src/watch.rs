//! Directory watch loop feeding accepted events into the pipeline

use crate::error::Result;
use crate::event::RawEvent;
use crate::filter::EventFilter;
use crate::pipeline::{JobReport, LabelPipeline};
use crate::tools::LabelTools;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, trace};

enum Message {
    Notify(notify::Result<Event>),
    Stop,
}

/// Filter plus pipeline: everything that happens to one delivered event
pub struct EventConsumer<T> {
    filter: EventFilter,
    pipeline: LabelPipeline<T>,
}

impl<T: LabelTools> EventConsumer<T> {
    pub fn new(filter: EventFilter, pipeline: LabelPipeline<T>) -> Self {
        Self { filter, pipeline }
    }

    pub fn pipeline(&self) -> &LabelPipeline<T> {
        &self.pipeline
    }

    /// Run the pipeline for `event` if the filter accepts it.
    ///
    /// Returns `None` for rejected events and for jobs that panicked.
    pub fn handle(&self, event: &RawEvent) -> Option<JobReport> {
        if let Err(reason) = self.filter.check(event) {
            trace!("Ignoring {}: {}", event.path.display(), reason);
            return None;
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.pipeline.run(&event.path))) {
            Ok(report) => Some(report),
            Err(_) => {
                error!("Label job for {} panicked", event.path.display());
                None
            }
        }
    }

    pub fn handle_notify(&self, result: notify::Result<Event>) -> Vec<JobReport> {
        match result {
            Ok(event) => RawEvent::from_notify(&event)
                .iter()
                .filter_map(|raw| self.handle(raw))
                .collect(),
            Err(e) => {
                error!("Watch error: {}", e);
                Vec::new()
            }
        }
    }
}

pub struct WatchLoop;

impl WatchLoop {
    /// Start watching `directory` and processing label events on a
    /// dedicated worker thread.
    pub fn start<T>(directory: &Path, recursive: bool, pipeline: LabelPipeline<T>) -> Result<WatchHandle>
    where
        T: LabelTools + 'static,
    {
        Self::start_with_filter(directory, recursive, EventFilter::new(), pipeline)
    }

    pub fn start_with_filter<T>(
        directory: &Path,
        recursive: bool,
        filter: EventFilter,
        pipeline: LabelPipeline<T>,
    ) -> Result<WatchHandle>
    where
        T: LabelTools + 'static,
    {
        let (tx, rx) = channel();
        let notify_tx = tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = notify_tx.send(Message::Notify(res));
            },
            Config::default(),
        )?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(directory, mode)?;

        let consumer = EventConsumer::new(filter, pipeline);
        let worker = thread::Builder::new()
            .name("label-worker".to_string())
            .spawn(move || run_worker(consumer, rx))?;

        info!(
            "Watching {} ({})",
            directory.display(),
            if recursive { "recursive" } else { "non-recursive" }
        );

        Ok(WatchHandle {
            directory: directory.to_path_buf(),
            watcher: Some(watcher),
            sender: tx,
            worker: Some(worker),
        })
    }
}

fn run_worker<T: LabelTools>(consumer: EventConsumer<T>, receiver: Receiver<Message>) {
    while let Ok(Message::Notify(result)) = receiver.recv() {
        consumer.handle_notify(result);
    }
    debug!("Label worker stopped");
}

/// A running watch registration
///
/// Dropping the handle releases it the same way [`WatchHandle::stop`] does.
pub struct WatchHandle {
    directory: PathBuf,
    watcher: Option<RecommendedWatcher>,
    sender: Sender<Message>,
    worker: Option<JoinHandle<()>>,
}

impl WatchHandle {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Stop receiving notifications, let the in-flight job finish and join
    /// the worker thread.
    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            if let Err(e) = watcher.unwatch(&self.directory) {
                debug!("Unwatch {} failed: {}", self.directory.display(), e);
            }
        }

        let _ = self.sender.send(Message::Stop);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Label worker terminated abnormally");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.release();
    }
}
