// tests/error_handling.rs

use std::io::Write;

use procexec::config::{load_and_validate, load_or_default, ConfigFile};
use procexec::errors::ProcExecError;
use procexec_test_utils::builders::ConfigFileBuilder;
use tempfile::NamedTempFile;

#[test]
fn test_full_config_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[defaults]
echo_command_line = true
success_exit_codes = [0, 3]

[host]
program = "/usr/bin/dotnet"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert!(cfg.defaults.echo_command_line);
    assert!(!cfg.defaults.echo_output);
    assert_eq!(cfg.defaults.success_exit_codes, vec![0, 3]);
    assert_eq!(cfg.host.program.as_deref(), Some("/usr/bin/dotnet"));
    assert_eq!(cfg.host.programs, vec!["dotnet", "mono"]);
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = NamedTempFile::new().unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.defaults.success_exit_codes, vec![0]);
    assert_eq!(cfg.host.program, None);
}

#[test]
fn test_empty_success_codes_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[defaults]
success_exit_codes = []
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(ProcExecError::ConfigError(msg)) => {
            assert!(msg.contains("success_exit_codes"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_field_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[defaults]
echo_everything = true
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(ProcExecError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_explicit_config_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Procexec.toml");

    match load_or_default(Some(&missing)) {
        Err(ProcExecError::IoError(_)) => {}
        Err(e) => panic!("Expected IoError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_blank_host_program_is_rejected() {
    let raw = ConfigFileBuilder::new().host_program("  ").raw();

    match ConfigFile::try_from(raw) {
        Err(ProcExecError::ConfigError(msg)) => assert!(msg.contains("[host].program")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_builder_produces_valid_config() {
    let cfg = ConfigFileBuilder::new()
        .echo_output(true)
        .success_exit_codes(&[0, 1])
        .known_hosts(&["dotnet"])
        .build();

    assert!(cfg.defaults.echo_output);
    assert_eq!(cfg.defaults.success_exit_codes, vec![0, 1]);
    assert_eq!(cfg.host.programs, vec!["dotnet"]);
}
