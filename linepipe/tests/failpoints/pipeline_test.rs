use std::time::Duration;

use linepipe::error::ErrorKind;
use linepipe::failpoints::{SINK_WRITER_BEFORE_WRITE, SOURCE_READER_BEFORE_LINE};
use linepipe::pipeline::Pipeline;
use linepipe::sink::memory::MemorySink;
use linepipe::source::memory::MemorySource;
use linepipe::test_utils::failpoints::CustomFailScenario;
use linepipe::test_utils::lines::{numbered_lines, sorted, sorted_upper};
use linepipe::test_utils::pipeline::{bounded_pipeline_config, create_pipeline};
use linepipe::test_utils::test_sink_wrapper::TestSinkWrapper;
use linepipe::transform::CaseTransform;
use telemetry::tracing::init_test_tracing;
use tokio::time::timeout;

const PIPELINE_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::test(flavor = "multi_thread")]
async fn read_failure_after_two_lines_keeps_them() {
    init_test_tracing();
    let _scenario =
        CustomFailScenario::setup(&[(SOURCE_READER_BEFORE_LINE, "2*off->return(source_read)")]);

    let input = numbered_lines(10);
    let sink = TestSinkWrapper::wrap(MemorySink::new());
    let pipeline = create_pipeline(3, MemorySource::new(input.clone()), sink.clone());

    let err = timeout(PIPELINE_TIMEOUT, pipeline.run())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kinds(), vec![ErrorKind::SourceReadFailed]);
    assert_eq!(sorted(sink.lines().await), sorted_upper(&input[..2]));
    assert!(sink.finish_called().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn write_failure_shuts_down_blocked_producers() {
    init_test_tracing();
    let _scenario =
        CustomFailScenario::setup(&[(SINK_WRITER_BEFORE_WRITE, "5*off->return(sink_write)")]);

    let sink = TestSinkWrapper::wrap(MemorySink::new());
    let pipeline = Pipeline::new(
        bounded_pipeline_config(4, 1),
        MemorySource::new(numbered_lines(1000)),
        sink.clone(),
        CaseTransform::default(),
    );

    let err = timeout(PIPELINE_TIMEOUT, pipeline.run())
        .await
        .unwrap()
        .unwrap_err();

    let kinds = err.kinds();
    assert!(kinds.contains(&ErrorKind::SinkWriteFailed));
    assert!(
        kinds
            .iter()
            .all(|kind| matches!(kind, ErrorKind::SinkWriteFailed | ErrorKind::TaskInterrupted))
    );
    assert_eq!(sink.lines().await.len(), 5);
    assert!(!sink.finish_called().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn writer_panic_is_reported_without_hanging() {
    init_test_tracing();
    let _scenario = CustomFailScenario::setup(&[(SINK_WRITER_BEFORE_WRITE, "panic")]);

    let pipeline = create_pipeline(2, MemorySource::new(numbered_lines(50)), MemorySink::new());

    let err = timeout(PIPELINE_TIMEOUT, pipeline.run())
        .await
        .unwrap()
        .unwrap_err();

    assert!(err.kinds().contains(&ErrorKind::WriterPanic));
}
