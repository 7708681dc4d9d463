/// Scenario tests for the filter → resolve → transform → print → cleanup flow
use labelwatch_core::{
    EventConsumer, EventFilter, JobStatus, LabelPipeline, PipelineOptions, PrintRequest, RawEvent,
    RecordingTools, ScriptedOutcome,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Harness {
    dir: TempDir,
    tools: RecordingTools,
    consumer: EventConsumer<RecordingTools>,
}

impl Harness {
    fn new(options: PipelineOptions) -> Self {
        let tools = RecordingTools::new();
        let consumer = EventConsumer::new(
            EventFilter::new(),
            LabelPipeline::new(tools.clone(), options),
        );
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            tools,
            consumer,
        }
    }

    fn export(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, b"exported label").expect("Failed to write label");
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[test]
fn test_written_then_modified_label_prints_once() {
    let harness = Harness::new(PipelineOptions::default());
    let source = harness.export("label-99.png");

    // The exporter creates the file first; only the later modification counts
    assert!(harness.consumer.handle(&RawEvent::created(&source)).is_none());
    let report = harness
        .consumer
        .handle(&RawEvent::modified(&source))
        .expect("Modified label should be processed");

    assert!(report.is_printed());
    assert_eq!(report.asset_id().map(|id| id.as_str()), Some("99"));

    let transforms = harness.tools.transforms();
    assert_eq!(transforms.len(), 1);
    assert_eq!(transforms[0].target_path, harness.path("99-processed.png"));

    assert_eq!(
        harness.tools.prints(),
        vec![PrintRequest {
            image_path: harness.path("99-processed.png"),
            pad_count: 0,
            cut_after: false,
        }]
    );
    assert!(!harness.path("99-processed.png").exists());
    assert!(source.exists());
}

#[test]
fn test_cable_mode_pads_second_copy() {
    let harness = Harness::new(PipelineOptions {
        cable: true,
        ..Default::default()
    });
    let source = harness.export("label-99.png");

    harness.consumer.handle(&RawEvent::modified(&source));

    let prints = harness.tools.prints();
    assert_eq!(prints.len(), 1);
    assert_eq!(prints[0].pad_count, 80);
    assert_eq!(prints[0].image_path, harness.path("99-processed.png"));
}

#[test]
fn test_duplicate_copy_reuses_asset_id() {
    let harness = Harness::new(PipelineOptions::default());
    let source = harness.export("label-42(1).png");

    let report = harness
        .consumer
        .handle(&RawEvent::modified(&source))
        .expect("Copy should be processed");

    assert_eq!(report.asset_id().map(|id| id.as_str()), Some("42"));
    assert_eq!(harness.tools.transforms()[0].label.as_str(), "42");
    assert_eq!(
        harness.tools.transforms()[0].target_path,
        harness.path("42-processed.png")
    );
}

#[test]
fn test_repeated_modifications_rerun_the_job() {
    let harness = Harness::new(PipelineOptions::default());
    let source = harness.export("label-7.png");

    harness.consumer.handle(&RawEvent::modified(&source));
    harness.consumer.handle(&RawEvent::modified(&source));

    assert_eq!(harness.tools.prints().len(), 2);
    assert!(!harness.path("7-processed.png").exists());
}

#[test]
fn test_remove_originals_deletes_source() {
    let harness = Harness::new(PipelineOptions {
        remove_originals: true,
        ..Default::default()
    });
    let source = harness.export("label-12.png");

    let report = harness.consumer.handle(&RawEvent::modified(&source)).unwrap();

    assert!(report.is_printed());
    assert!(!source.exists());
    assert!(!harness.path("12-processed.png").exists());
}

#[test]
fn test_remove_originals_survives_print_failure_policy() {
    let harness = Harness::new(PipelineOptions {
        remove_originals: true,
        ..Default::default()
    });
    harness
        .tools
        .set_print_outcome(ScriptedOutcome::Fail("ptouch-print failed with error code 1".into()));
    let source = harness.export("label-12.png");

    let report = harness.consumer.handle(&RawEvent::modified(&source)).unwrap();

    assert!(matches!(report.status, JobStatus::PrintFailed(_)));
    assert!(!source.exists());
    assert!(!harness.path("12-processed.png").exists());
}

#[test]
fn test_source_kept_without_remove_option() {
    let harness = Harness::new(PipelineOptions::default());
    harness
        .tools
        .set_print_outcome(ScriptedOutcome::Fail("printer offline".into()));
    let source = harness.export("label-12.png");

    harness.consumer.handle(&RawEvent::modified(&source));

    assert!(source.exists());
    assert!(!harness.path("12-processed.png").exists());
}

#[test]
fn test_failed_job_does_not_block_next_event() {
    let harness = Harness::new(PipelineOptions::default());
    let broken = harness.export("label-1.png");
    let good = harness.export("label-2.png");

    harness
        .tools
        .set_transform_outcome(ScriptedOutcome::Fail("magick: unable to open image".into()));
    let report = harness.consumer.handle(&RawEvent::modified(&broken)).unwrap();
    assert!(matches!(report.status, JobStatus::TransformFailed(_)));
    assert!(harness.tools.prints().is_empty());

    harness.tools.set_transform_outcome(ScriptedOutcome::Succeed);
    let report = harness.consumer.handle(&RawEvent::modified(&good)).unwrap();
    assert!(report.is_printed());
    assert_eq!(harness.tools.prints().len(), 1);
}

#[test]
fn test_filtered_events_never_reach_tools() {
    let harness = Harness::new(PipelineOptions::default());
    let label = harness.export("label-3.png");
    let other = harness.export("holiday.png");

    let ignored = [
        RawEvent::modified(&other),
        RawEvent::modified(harness.path("label-3.jpg")),
        RawEvent::modified(&label).directory(),
        RawEvent::modified(&label).synthetic(),
        RawEvent::created(&label),
    ];
    for event in &ignored {
        assert!(harness.consumer.handle(event).is_none(), "{:?}", event);
    }
    assert!(harness.tools.transforms().is_empty());
}
