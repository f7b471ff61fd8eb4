// tests/streaming.rs

mod common;

use std::time::{Duration, Instant};

use common::{fixture_request, init_tracing, with_timeout, TestResult};
use procexec::errors::ProcExecError;
use procexec::exec::execute_and_read;
use procexec::ExecRequest;

#[tokio::test]
async fn yields_stdout_lines_in_order() -> TestResult {
    init_tracing();

    let lines = execute_and_read(&fixture_request(&[]), None).await?;
    let collected = with_timeout(lines.collect_lines()).await?;

    assert_eq!(collected, vec!["aaa", "bbb", "", "ccc"]);
    Ok(())
}

#[tokio::test]
async fn unexpected_exit_code_fails_after_the_lines() -> TestResult {
    init_tracing();

    let mut lines = execute_and_read(&fixture_request(&["99"]), None).await?;

    let first = with_timeout(lines.next_line()).await?;
    assert_eq!(first.as_deref(), Some("arg0: 99"));

    match with_timeout(lines.next_line()).await {
        Err(ProcExecError::ProcessExecutionFailed(result)) => {
            assert_eq!(result.exit_code, 99);
            assert_eq!(result.standard_output, "arg0: 99\n");
            assert!(result.command_line.contains("procexec-fixture"));
        }
        other => panic!("expected ProcessExecutionFailed, got {other:?}"),
    }

    assert_eq!(with_timeout(lines.next_line()).await?, None);
    Ok(())
}

#[tokio::test]
async fn failure_carries_the_captured_stderr() -> TestResult {
    init_tracing();

    let lines = execute_and_read(&fixture_request(&[]), Some(&[1])).await?;

    match with_timeout(lines.collect_lines()).await {
        Err(err) => {
            let result = err.result().expect("failure should carry a result");
            assert_eq!(result.exit_code, 0);
            assert_eq!(result.error_output, "ddd\neee\n\nfff\n");
            assert_eq!(result.standard_output, "aaa\nbbb\n\nccc\n");
        }
        Ok(lines) => panic!("expected failure, got {lines:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn custom_success_codes_are_accepted() -> TestResult {
    init_tracing();

    let lines = execute_and_read(&fixture_request(&["3"]), Some(&[0, 3])).await?;
    let collected = with_timeout(lines.collect_lines()).await?;

    assert_eq!(collected, vec!["arg0: 3"]);
    Ok(())
}

#[tokio::test]
async fn invalid_request_fails_before_reading() {
    init_tracing();

    let request = ExecRequest::new("").working_dir("relative");
    match execute_and_read(&request, None).await {
        Err(ProcExecError::InvalidArgument { name, .. }) => assert_eq!(name, "working_dir"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[tokio::test]
async fn lines_arrive_while_the_process_is_still_running() -> TestResult {
    init_tracing();
    let started = Instant::now();

    let mut lines = execute_and_read(&fixture_request(&["pause", "3000"]), None).await?;

    let first = with_timeout(lines.next_line()).await?;
    assert_eq!(first.as_deref(), Some("first"));
    assert!(
        started.elapsed() < Duration::from_millis(2000),
        "first line took {:?}",
        started.elapsed()
    );

    let rest = with_timeout(lines.collect_lines()).await?;
    assert_eq!(rest, vec!["second"]);
    assert!(started.elapsed() >= Duration::from_millis(3000));
    Ok(())
}
