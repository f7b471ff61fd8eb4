// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ProcExecError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ProcExecError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.defaults, raw.host))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_defaults(cfg)?;
    validate_host(cfg)?;
    Ok(())
}

fn validate_defaults(cfg: &RawConfigFile) -> Result<()> {
    if cfg.defaults.success_exit_codes.is_empty() {
        return Err(ProcExecError::ConfigError(
            "[defaults].success_exit_codes must list at least one exit code".to_string(),
        ));
    }
    Ok(())
}

fn validate_host(cfg: &RawConfigFile) -> Result<()> {
    if cfg.host.programs.iter().any(|p| p.trim().is_empty()) {
        return Err(ProcExecError::ConfigError(
            "[host].programs must not contain empty names".to_string(),
        ));
    }

    if let Some(program) = &cfg.host.program {
        if program.trim().is_empty() {
            return Err(ProcExecError::ConfigError(
                "[host].program must not be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg.defaults.success_exit_codes, vec![0]);
        assert_eq!(cfg.host.programs, vec!["dotnet", "mono"]);
        assert!(cfg.host.program.is_none());
    }

    #[test]
    fn empty_success_codes_are_rejected() {
        let mut raw = RawConfigFile::default();
        raw.defaults.success_exit_codes.clear();
        match ConfigFile::try_from(raw) {
            Err(ProcExecError::ConfigError(msg)) => assert!(msg.contains("success_exit_codes")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn blank_host_program_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.host.program = Some("  ".to_string());
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(ProcExecError::ConfigError(_))
        ));
    }

    #[test]
    fn configured_host_wins_over_detection() {
        let mut raw = RawConfigFile::default();
        raw.host.program = Some("/usr/bin/dotnet".to_string());
        let cfg = ConfigFile::try_from(raw).unwrap();
        assert_eq!(cfg.host.resolve().as_deref(), Some("/usr/bin/dotnet"));
    }
}
