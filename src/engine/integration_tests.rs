// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end scenarios: chain address in, one outcome out.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::backends::stub::{test_snapshot, RecordingInvoker};
use crate::chain::{ExecutionResult, Payload, Phase, PositionState};
use crate::config::{ChainLimits, RegistrySnapshot};
use crate::debug::DebugFormat;
use crate::engine::{ChainOutcome, ChainRunner};
use crate::errors::ChainError;
use crate::traits::{InvokeContext, UnitRecord};

const PYTHON_TWO_PHASE: &str = "def main(request, response=None):\n    return response or request\n";
const PYTHON_SINGLE: &str = "def main(request):\n    return request\n";

fn runner(snapshot: RegistrySnapshot, invoker: Arc<RecordingInvoker>) -> ChainRunner {
    ChainRunner::new(snapshot.into_registries(), invoker)
}

fn completed(outcome: ChainOutcome) -> ExecutionResult {
    match outcome {
        ChainOutcome::Completed(result) => result,
        other => panic!("expected a completed chain, got {:?}", other),
    }
}

fn failed(outcome: ChainOutcome) -> ChainError {
    match outcome {
        ChainOutcome::Failed(error) => error,
        other => panic!("expected a failed chain, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pipeline_upper_echo_hello() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let result = completed(runner.run("/pipeline/upper/echo/hello", Payload::default()).await);

    assert_eq!(result.text(), "HELLO");
    assert_eq!(result.status, 200);
    assert_eq!(invoker.sources(), vec!["echo", "change_text_case_upper"]);
}

#[tokio::test]
async fn test_pipeline_echo_hello() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let result = completed(runner.run("/pipeline/echo/hello", Payload::default()).await);

    assert_eq!(result.text(), "hello");
    assert_eq!(invoker.calls().len(), 1);
}

#[tokio::test]
async fn test_circuit_and_io_modes_agree() {
    for address in ["/circuit/upper/reverse", "/io/upper/reverse"] {
        let invoker = Arc::new(RecordingInvoker::builtin());
        let runner = runner(test_snapshot(&[]), invoker.clone());

        let result = completed(runner.run(address, Payload::new("hello")).await);

        assert_eq!(result.text(), "OLLEH", "address {}", address);
        let phases: Vec<Phase> = invoker.calls().iter().map(|c| c.phase).collect();
        assert_eq!(phases, vec![Phase::Request, Phase::Invoke, Phase::Response]);
    }
}

#[tokio::test]
async fn test_circuit_request_phases_precede_response_phases() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let result = completed(
        runner
            .run("/circuit/wrap/</>/upper/reverse/echo/abc", Payload::default())
            .await,
    );

    // echo answers "abc"; reverse, upper and wrap each work on the way back
    assert_eq!(result.text(), "<CBA>");
    let calls: Vec<(String, Phase)> = invoker
        .calls()
        .into_iter()
        .map(|c| (c.source, c.phase))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("prefix_suffix_adder".to_string(), Phase::Request),
            ("change_text_case_upper".to_string(), Phase::Request),
            ("reverse_text".to_string(), Phase::Request),
            ("echo".to_string(), Phase::Invoke),
            ("reverse_text".to_string(), Phase::Response),
            ("change_text_case_upper".to_string(), Phase::Response),
            ("prefix_suffix_adder".to_string(), Phase::Response),
        ]
    );
}

#[tokio::test]
async fn test_interior_unit_with_language_extension() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let result = completed(runner.run("/circuit/upper/reverse.py", Payload::new("hello")).await);

    assert_eq!(result.text(), "OLLEH");
    assert_eq!(
        invoker.sources(),
        vec!["change_text_case_upper", "reverse_text", "change_text_case_upper"]
    );
}

#[tokio::test]
async fn test_parameter_with_language_extension_is_rejected() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let error = failed(runner.run("/pipeline/echo/main.py", Payload::default()).await);
    assert_eq!(error.kind(), "address_format_error");
    assert_eq!(error.position(), Some(1));
    assert!(invoker.calls().is_empty());

    let result = completed(runner.run("/pipeline/echo/main.txt", Payload::default()).await);
    assert_eq!(result.text(), "main.txt");
}

#[tokio::test]
async fn test_alias_resolves_to_unit() {
    let mut snapshot = test_snapshot(&[]);
    snapshot.insert_alias("shout", "loud");
    snapshot.insert_alias("loud", "upper");
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(snapshot, invoker.clone());

    let result = completed(runner.run("/pipeline/shout/echo/hi", Payload::default()).await);

    assert_eq!(result.text(), "HI");
    assert_eq!(invoker.sources(), vec!["echo", "change_text_case_upper"]);
}

#[tokio::test]
async fn test_disabled_unit_falls_through_to_parameter() {
    let mut snapshot = test_snapshot(&[]);
    snapshot.insert_unit("retired", UnitRecord::new("reverse_text").disabled());
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(snapshot, invoker.clone());

    let result = completed(runner.run("/pipeline/echo/retired", Payload::default()).await);

    assert_eq!(result.text(), "retired");
    assert_eq!(invoker.sources(), vec!["echo"]);
}

#[tokio::test]
async fn test_content_address_runs_stored_source() {
    let mut snapshot = test_snapshot(&[]);
    let address = snapshot.insert_content(PYTHON_TWO_PHASE.as_bytes().to_vec());
    let invoker = Arc::new(
        RecordingInvoker::builtin().returning(PYTHON_TWO_PHASE, ExecutionResult::ok("stored")),
    );
    let runner = runner(snapshot, invoker.clone());

    let pipeline = completed(
        runner
            .run(&format!("/pipeline/{}.py", address), Payload::default())
            .await,
    );
    assert_eq!(pipeline.text(), "stored");
    assert_eq!(invoker.sources(), vec![PYTHON_TWO_PHASE]);

    // two-phase signature detected from the stored source
    let circuit = completed(
        runner
            .run(&format!("/circuit/{}/reverse", address), Payload::new("x"))
            .await,
    );
    assert_eq!(circuit.text(), "stored");
}

#[tokio::test]
async fn test_invoke_context_is_passed_through() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let context = InvokeContext::new(BTreeMap::from([("tenant".to_string(), "acme".to_string())]));
    let runner = runner(test_snapshot(&[]), invoker.clone()).with_invoke_context(context.clone());

    completed(runner.run("/circuit/upper/echo/hi", Payload::default()).await);

    let calls = invoker.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.context == context));
    assert_eq!(calls[0].context.get("tenant"), Some("acme"));
}

#[tokio::test]
async fn test_rejections_happen_before_any_invocation() {
    struct TestCase {
        address: &'static str,
        expected_kind: &'static str,
    }

    let test_cases = vec![
        TestCase { address: "/pipeline/upper/INVALIDADDR.py", expected_kind: "address_format_error" },
        TestCase { address: "/circuit/upper/count/echo", expected_kind: "chaining_not_supported" },
        TestCase { address: "/pipeline/hello/echo", expected_kind: "unbound_parameter" },
        TestCase { address: "/pipeline/upper/ring", expected_kind: "cycle_error" },
        TestCase { address: "/pipeline/upper/ghost", expected_kind: "dangling_alias" },
        TestCase { address: "/pipeline", expected_kind: "empty_chain" },
        TestCase { address: "/bogus/upper", expected_kind: "address_error" },
        TestCase { address: "pipeline/upper", expected_kind: "address_error" },
    ];

    for test_case in test_cases {
        let mut snapshot = test_snapshot(&[]);
        snapshot.insert_alias("ring", "around");
        snapshot.insert_alias("around", "ring");
        snapshot.insert_alias("ghost", "nowhere");
        let invoker = Arc::new(RecordingInvoker::builtin());
        let runner = runner(snapshot, invoker.clone());

        let error = failed(runner.run(test_case.address, Payload::new("x")).await);

        assert_eq!(error.kind(), test_case.expected_kind, "address {}: {}", test_case.address, error);
        assert!(invoker.calls().is_empty(), "address {}", test_case.address);
    }
}

#[tokio::test]
async fn test_chaining_not_supported_names_the_position() {
    let mut snapshot = test_snapshot(&[]);
    let address = snapshot.insert_content(PYTHON_SINGLE.as_bytes().to_vec());
    snapshot.insert_alias("plain", address.as_str());
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(snapshot, invoker.clone());

    let error = failed(runner.run("/circuit/upper/plain/echo/x", Payload::default()).await);

    assert_eq!(
        error,
        ChainError::ChainingNotSupported {
            index: 1,
            segment: "plain".to_string()
        }
    );
}

#[tokio::test]
async fn test_chain_length_limit() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone()).with_limits(ChainLimits {
        max_chain_length: Some(2),
        ..ChainLimits::default()
    });

    let error = failed(runner.run("/pipeline/upper/echo/hi", Payload::default()).await);
    assert_eq!(error, ChainError::ChainTooLong { length: 3, max: 2 });

    let ok = completed(runner.run("/pipeline/upper/echo", Payload::new("a")).await);
    assert_eq!(ok.text(), "A");
}

#[tokio::test]
async fn test_alias_depth_limit() {
    let mut snapshot = test_snapshot(&[]);
    snapshot.insert_alias("a", "b");
    snapshot.insert_alias("b", "c");
    snapshot.insert_alias("c", "upper");
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(snapshot, invoker).with_limits(ChainLimits {
        max_alias_depth: Some(2),
        ..ChainLimits::default()
    });

    let error = failed(runner.run("/pipeline/a/echo/x", Payload::default()).await);
    assert_eq!(error.kind(), "alias_depth_exceeded");
    assert_eq!(error.position(), Some(0));
}

#[tokio::test]
async fn test_unit_failure_is_terminal() {
    let invoker = Arc::new(RecordingInvoker::builtin().failing("broken", "out of ink"));
    let runner = runner(test_snapshot(&["broken"]), invoker.clone());

    let error = failed(runner.run("/pipeline/upper/broken/echo/x", Payload::default()).await);

    assert_eq!(error.kind(), "execution_error");
    assert_eq!(error.position(), Some(1));
    assert!(error.to_string().contains("out of ink"));
    assert_eq!(invoker.sources(), vec!["echo", "broken"]);
}

#[tokio::test]
async fn test_malformed_result_is_terminal() {
    let mut no_output = ExecutionResult::ok("");
    no_output.output = None;
    let invoker = Arc::new(RecordingInvoker::builtin().returning("silent", no_output));
    let runner = runner(test_snapshot(&["silent"]), invoker);

    let error = failed(runner.run("/pipeline/upper/silent", Payload::default()).await);

    assert!(matches!(
        error,
        ChainError::MalformedResult { index: 1, field: "output", .. }
    ));
}

#[tokio::test]
async fn test_slow_unit_times_out() {
    let invoker = Arc::new(RecordingInvoker::builtin().slow("slow", Duration::from_secs(5)));
    let runner = runner(test_snapshot(&["slow"]), invoker.clone()).with_limits(ChainLimits {
        invoke_timeout_ms: Some(20),
        ..ChainLimits::default()
    });

    let started = Instant::now();
    let error = failed(runner.run("/pipeline/upper/slow", Payload::new("x")).await);

    assert_eq!(error.kind(), "timeout");
    assert_eq!(error.position(), Some(1));
    assert!(started.elapsed() < Duration::from_secs(5));
    // no retry and nothing further left of the failure
    assert_eq!(invoker.sources(), vec!["slow"]);
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());
    let token = CancellationToken::new();
    token.cancel();

    let error = failed(
        runner
            .run_with_cancellation("/pipeline/upper/echo/x", Payload::default(), token)
            .await,
    );

    assert_eq!(error, ChainError::Cancelled { index: 1 });
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn test_cancelled_while_waiting() {
    let invoker = Arc::new(RecordingInvoker::builtin().slow("slow", Duration::from_secs(5)));
    let runner = runner(test_snapshot(&["slow"]), invoker.clone());
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let error = failed(
        runner
            .run_with_cancellation("/pipeline/upper/slow", Payload::new("x"), token)
            .await,
    );

    assert_eq!(error, ChainError::Cancelled { index: 1 });
    assert!(started.elapsed() < Duration::from_secs(5));
    // the left neighbour is never started
    assert_eq!(invoker.sources(), vec!["slow"]);
}

#[tokio::test]
async fn test_debug_formats() {
    struct TestCase {
        address: &'static str,
        format: DebugFormat,
        content_type: &'static str,
    }

    let test_cases = vec![
        TestCase {
            address: "/circuit/upper/reverse?debug=true",
            format: DebugFormat::Structured,
            content_type: "application/json",
        },
        TestCase {
            address: "/circuit/upper.json/reverse?debug=1",
            format: DebugFormat::Json,
            content_type: "application/json",
        },
        TestCase {
            address: "/circuit/upper.html/reverse?debug=yes",
            format: DebugFormat::Html,
            content_type: "text/html",
        },
        TestCase {
            address: "/circuit/upper.txt/reverse?debug=ON",
            format: DebugFormat::Text,
            content_type: "text/plain",
        },
    ];

    for test_case in test_cases {
        let invoker = Arc::new(RecordingInvoker::builtin());
        let runner = runner(test_snapshot(&[]), invoker.clone());

        let debug = match runner.run(test_case.address, Payload::new("hello")).await {
            ChainOutcome::Debug(debug) => debug,
            other => panic!("expected a debug trace for {}, got {:?}", test_case.address, other),
        };

        assert_eq!(debug.format, test_case.format, "address {}", test_case.address);
        assert_eq!(debug.report.outcome.as_ref().map(|r| r.text().into_owned()), Ok("OLLEH".to_string()));
        assert_eq!(debug.report.trace.invocation_count(), 3);
        assert_eq!(invoker.calls().len(), 3);
        assert_eq!(debug.report.trace.segments[0].raw, "upper");

        let rendered = debug.render().unwrap();
        assert!(
            rendered.content_type.starts_with(test_case.content_type),
            "address {}: {}",
            test_case.address,
            rendered.content_type
        );
        assert!(String::from_utf8_lossy(&rendered.body).contains("OLLEH"));
    }
}

#[tokio::test]
async fn test_debug_json_is_parseable() {
    let runner = runner(test_snapshot(&[]), Arc::new(RecordingInvoker::builtin()));

    let debug = match runner.run("/pipeline/upper.json/echo/hi?debug=true", Payload::default()).await {
        ChainOutcome::Debug(debug) => debug,
        other => panic!("expected a debug trace, got {:?}", other),
    };

    let rendered = debug.render().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&rendered.body).unwrap();
    assert_eq!(value["mode"], "pipeline");
    assert_eq!(value["phases"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["result"]["output"], "HI");
}

#[tokio::test]
async fn test_debug_off_values_run_live() {
    for address in ["/pipeline/echo/hi?debug=false", "/pipeline/echo/hi?debug=", "/pipeline/echo/hi?verbose=1"] {
        let runner = runner(test_snapshot(&[]), Arc::new(RecordingInvoker::builtin()));
        let result = completed(runner.run(address, Payload::default()).await);
        assert_eq!(result.text(), "hi", "address {}", address);
    }
}

#[tokio::test]
async fn test_percent_encoded_debug_toggle() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let debug = match runner.run("/pipeline/echo/hi?debug=tru%65", Payload::default()).await {
        ChainOutcome::Debug(debug) => debug,
        other => panic!("expected a debug trace, got {:?}", other),
    };

    assert_eq!(debug.format, DebugFormat::Structured);
    assert_eq!(debug.report.outcome.as_ref().map(|r| r.text().into_owned()), Ok("hi".to_string()));
    assert_eq!(invoker.calls().len(), 1);
}

#[tokio::test]
async fn test_debug_records_rejections() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let debug = match runner.run("/pipeline/upper/INVALIDADDR.py?debug=true", Payload::default()).await {
        ChainOutcome::Debug(debug) => debug,
        other => panic!("expected a debug trace, got {:?}", other),
    };

    assert!(debug.report.outcome.is_err());
    assert!(debug.report.trace.failed());
    let error = debug.report.trace.error.as_ref().unwrap();
    assert_eq!(error.kind, "address_format_error");
    assert_eq!(error.position, Some(1));
    assert!(debug.report.trace.phases.is_empty());
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn test_debug_failure_keeps_partial_trace() {
    let invoker = Arc::new(RecordingInvoker::builtin().failing("broken", "out of ink"));
    let runner = runner(test_snapshot(&["broken"]), invoker);

    let debug = match runner.run("/circuit/upper/broken?debug=true", Payload::new("x")).await {
        ChainOutcome::Debug(debug) => debug,
        other => panic!("expected a debug trace, got {:?}", other),
    };

    assert_eq!(debug.report.trace.invocation_count(), 2);
    assert_eq!(debug.report.trace.positions[0].state, PositionState::RequestDone);
    assert_eq!(debug.report.trace.positions[1].state, PositionState::Failed);
    assert!(debug.report.trace.phases[1].error.as_deref().unwrap().contains("out of ink"));
}

#[tokio::test]
async fn test_concurrent_evaluations_share_registries() {
    let invoker = Arc::new(RecordingInvoker::builtin());
    let runner = runner(test_snapshot(&[]), invoker.clone());

    let (a, b, c) = tokio::join!(
        runner.run("/pipeline/upper/echo/one", Payload::default()),
        runner.run("/circuit/upper/reverse", Payload::new("two")),
        runner.run("/pipeline/count", Payload::new("three words here")),
    );

    assert_eq!(completed(a).text(), "ONE");
    assert_eq!(completed(b).text(), "OWT");
    assert_eq!(completed(c).text(), "3");
    assert_eq!(invoker.calls().len(), 6);
}
