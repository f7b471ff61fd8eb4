#![allow(dead_code)]

use procexec::config::{ConfigFile, DefaultsSection, HostSection, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                defaults: DefaultsSection::default(),
                host: HostSection::default(),
            },
        }
    }

    pub fn echo_command_line(mut self, val: bool) -> Self {
        self.config.defaults.echo_command_line = val;
        self
    }

    pub fn echo_output(mut self, val: bool) -> Self {
        self.config.defaults.echo_output = val;
        self
    }

    pub fn success_exit_codes(mut self, codes: &[i32]) -> Self {
        self.config.defaults.success_exit_codes = codes.to_vec();
        self
    }

    pub fn host_program(mut self, program: &str) -> Self {
        self.config.host.program = Some(program.to_string());
        self
    }

    pub fn known_hosts(mut self, names: &[&str]) -> Self {
        self.config.host.programs = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// The raw config, without validation.
    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
