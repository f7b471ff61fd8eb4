// tests/wrappers.rs

mod common;

use common::{fixture_request, init_tracing, with_timeout, TestResult};
use procexec::errors::ProcExecError;
use procexec::exec::{execute_any_captured, execute_host_captured};
use procexec::ExecRequest;

#[cfg(unix)]
#[tokio::test]
async fn any_finds_programs_on_path() -> TestResult {
    init_tracing();

    let request = ExecRequest::new("echo").args(["hello", "big world"]);
    let result = with_timeout(execute_any_captured(&request)).await?;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.standard_output, "hello big world\n");
    assert!(result.command_line.starts_with("env echo"));
    Ok(())
}

#[tokio::test]
async fn any_runs_absolute_programs_too() -> TestResult {
    init_tracing();

    let result = with_timeout(execute_any_captured(&fixture_request(&["4"]))).await?;

    assert_eq!(result.exit_code, 4);
    assert_eq!(result.standard_output, "arg0: 4\n");
    Ok(())
}

#[tokio::test]
async fn any_still_rejects_an_empty_program() {
    init_tracing();

    match execute_any_captured(&ExecRequest::new("")).await {
        Err(ProcExecError::InvalidArgument { name, .. }) => assert_eq!(name, "program"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[tokio::test]
async fn host_without_a_host_program_runs_directly() -> TestResult {
    init_tracing();

    let result = with_timeout(execute_host_captured(&fixture_request(&["2"]), None)).await?;

    assert_eq!(result.exit_code, 2);
    assert!(!result.command_line.starts_with("env"));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn host_program_receives_the_target_as_first_argument() -> TestResult {
    init_tracing();

    // `env` stands in for a runtime host: it runs its first argument.
    let result =
        with_timeout(execute_host_captured(&fixture_request(&["8"]), Some("env"))).await?;

    assert_eq!(result.exit_code, 8);
    assert_eq!(result.standard_output, "arg0: 8\n");
    Ok(())
}
