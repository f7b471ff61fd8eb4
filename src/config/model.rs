// src/config/model.rs

use serde::Deserialize;

use crate::exec::wrappers::detect_host_program;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [defaults]
/// echo_command_line = true
/// echo_output = false
/// success_exit_codes = [0, 3]
///
/// [host]
/// programs = ["dotnet", "mono"]
/// program = "/usr/bin/dotnet"
/// ```
///
/// Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub defaults: DefaultsSection,

    #[serde(default)]
    pub host: HostSection,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub defaults: DefaultsSection,
    pub host: HostSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(defaults: DefaultsSection, host: HostSection) -> Self {
        Self { defaults, host }
    }
}

/// `[defaults]` section: applied when the CLI does not override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsSection {
    #[serde(default)]
    pub echo_command_line: bool,

    #[serde(default)]
    pub echo_output: bool,

    /// Exit codes streaming mode accepts. Must not be empty.
    #[serde(default = "default_success_exit_codes")]
    pub success_exit_codes: Vec<i32>,
}

fn default_success_exit_codes() -> Vec<i32> {
    crate::exec::DEFAULT_SUCCESS_EXIT_CODES.to_vec()
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            echo_command_line: false,
            echo_output: false,
            success_exit_codes: default_success_exit_codes(),
        }
    }
}

/// `[host]` section: how to find the runtime host program.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSection {
    /// Executable names (file stems) recognised as a runtime host.
    #[serde(default = "default_host_programs")]
    pub programs: Vec<String>,

    /// Use this host program instead of detecting one.
    #[serde(default)]
    pub program: Option<String>,
}

fn default_host_programs() -> Vec<String> {
    vec!["dotnet".to_string(), "mono".to_string()]
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            programs: default_host_programs(),
            program: None,
        }
    }
}

impl HostSection {
    /// The configured host program, or the detected one.
    pub fn resolve(&self) -> Option<String> {
        self.program.clone().or_else(|| {
            detect_host_program(self.programs.as_slice()).map(|p| p.to_string_lossy().into_owned())
        })
    }
}
