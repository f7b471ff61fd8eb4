use std::path::PathBuf;

use serde::Serialize;

/// One process invocation: what to run, where, and whether to echo.
///
/// Built per call and consumed by the execution modes in [`crate::exec`].
/// Nothing is validated here; validation happens when the request is
/// prepared, before any process is spawned.
///
/// ```rust
/// use procexec::ExecRequest;
///
/// let req = ExecRequest::new("git")
///     .arg("log")
///     .args(["--oneline", "-n", "5"])
///     .echo_command_line(true);
///
/// assert_eq!(req.args.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecRequest {
    /// Program path (or bare name when run through the shell wrapper).
    pub program: String,
    /// Arguments, in order. Quoted when composed if they contain a space.
    pub args: Vec<String>,
    /// Absolute path to an existing directory, or `None` for the caller's cwd.
    pub working_dir: Option<PathBuf>,
    /// Write the command line to stderr before starting the process.
    pub echo_command_line: bool,
    /// Copy each output line to this process's stdout/stderr as it arrives.
    pub echo_output: bool,
}

impl ExecRequest {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn echo_command_line(mut self, echo: bool) -> Self {
        self.echo_command_line = echo;
        self
    }

    #[must_use]
    pub fn echo_output(mut self, echo: bool) -> Self {
        self.echo_output = echo;
        self
    }

    /// Replace the program with `wrapper` and push the old program onto the
    /// front of the argument list, after `wrapper_args`.
    pub(crate) fn wrapped_by(mut self, wrapper: &str, wrapper_args: &[&str]) -> Self {
        let mut args: Vec<String> = wrapper_args.iter().map(|s| s.to_string()).collect();
        args.push(std::mem::replace(&mut self.program, wrapper.to_string()));
        args.append(&mut self.args);
        self.args = args;
        self
    }
}

/// Everything a finished process produced.
///
/// Built once, after the process has exited and both output pipes have been
/// drained. Each text field holds one `\n`-terminated entry per line and is
/// the empty string when nothing was written.
///
/// `combined_output` interleaves both streams in the order their lines were
/// received, which is not necessarily the order the process wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub command_line: String,
    pub standard_output: String,
    pub error_output: String,
    pub combined_output: String,
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn new(
        command_line: impl Into<String>,
        standard_output: impl Into<String>,
        error_output: impl Into<String>,
        combined_output: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        Self {
            command_line: command_line.into(),
            standard_output: standard_output.into(),
            error_output: error_output.into(),
            combined_output: combined_output.into(),
            exit_code,
        }
    }

    /// Lines written to stdout, without terminators.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.standard_output.lines()
    }

    /// Lines written to stderr, without terminators.
    pub fn stderr_lines(&self) -> impl Iterator<Item = &str> {
        self.error_output.lines()
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Output accumulated while a process runs, turned into an
/// [`ExecutionResult`] once the exit code is known.
#[derive(Debug, Default)]
pub(crate) struct OutputBuffers {
    pub standard_output: String,
    pub error_output: String,
    pub combined_output: String,
}

impl OutputBuffers {
    pub fn push_stdout(&mut self, line: &str) {
        append_line(&mut self.standard_output, line);
        append_line(&mut self.combined_output, line);
    }

    pub fn push_stderr(&mut self, line: &str) {
        append_line(&mut self.error_output, line);
        append_line(&mut self.combined_output, line);
    }

    pub fn finish(self, command_line: String, exit_code: i32) -> ExecutionResult {
        ExecutionResult {
            command_line,
            standard_output: self.standard_output,
            error_output: self.error_output,
            combined_output: self.combined_output,
            exit_code,
        }
    }
}

fn append_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_collects_everything() {
        let req = ExecRequest::new("tool")
            .arg("one")
            .args(["two", "three"])
            .working_dir("/tmp")
            .echo_command_line(true)
            .echo_output(true);

        assert_eq!(req.program, "tool");
        assert_eq!(req.args, vec!["one", "two", "three"]);
        assert_eq!(req.working_dir, Some(PathBuf::from("/tmp")));
        assert!(req.echo_command_line);
        assert!(req.echo_output);
    }

    #[test]
    fn wrapped_by_moves_program_into_args() {
        let req = ExecRequest::new("script.bat")
            .args(["x", "y"])
            .wrapped_by("cmd", &["/c"]);

        assert_eq!(req.program, "cmd");
        assert_eq!(req.args, vec!["/c", "script.bat", "x", "y"]);
    }

    #[test]
    fn buffers_terminate_every_line_including_empty_ones() {
        let mut buffers = OutputBuffers::default();
        buffers.push_stdout("aaa");
        buffers.push_stderr("");
        buffers.push_stdout("bbb");

        let result = buffers.finish("prog".to_string(), 0);
        assert_eq!(result.standard_output, "aaa\nbbb\n");
        assert_eq!(result.error_output, "\n");
        assert_eq!(result.combined_output, "aaa\n\nbbb\n");
        assert_eq!(result.stdout_lines().collect::<Vec<_>>(), vec!["aaa", "bbb"]);
        assert!(result.success());
    }

    #[test]
    fn empty_buffers_yield_empty_strings() {
        let result = OutputBuffers::default().finish(String::new(), 7);
        assert_eq!(result.standard_output, "");
        assert_eq!(result.error_output, "");
        assert_eq!(result.combined_output, "");
        assert!(!result.success());
    }
}
