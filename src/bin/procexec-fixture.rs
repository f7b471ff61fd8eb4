// src/bin/procexec-fixture.rs

//! Deterministic child process for integration tests.
//!
//! - no arguments: writes `aaa`, `bbb`, ``, `ccc` to stdout and `ddd`, `eee`,
//!   ``, `fff` to stderr, exits 0;
//! - `workingdirectory`: prints its working directory, exits 0;
//! - `pause [MILLIS]`: prints `first`, sleeps (default 2000 ms), prints
//!   `second`, exits 0;
//! - anything else: prints `arg{i}: {arg}` per argument and exits with the
//!   first argument parsed as an integer, or 99.

use std::io::Write;
use std::time::Duration;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(run(&args));
}

fn run(args: &[String]) -> i32 {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match args.first().map(String::as_str) {
        None => {
            for line in ["aaa", "bbb", "", "ccc"] {
                let _ = writeln!(out, "{line}");
            }
            let _ = out.flush();
            for line in ["ddd", "eee", "", "fff"] {
                let _ = writeln!(err, "{line}");
            }
            let _ = err.flush();
            0
        }
        Some("workingdirectory") => {
            match std::env::current_dir() {
                Ok(dir) => {
                    let _ = writeln!(out, "{}", dir.display());
                }
                Err(e) => {
                    let _ = writeln!(err, "{e}");
                    return 1;
                }
            }
            let _ = out.flush();
            0
        }
        Some("pause") => {
            let millis = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2000);
            let _ = writeln!(out, "first");
            let _ = out.flush();
            std::thread::sleep(Duration::from_millis(millis));
            let _ = writeln!(out, "second");
            let _ = out.flush();
            0
        }
        Some(first) => {
            for (i, arg) in args.iter().enumerate() {
                let _ = writeln!(out, "arg{i}: {arg}");
            }
            let _ = out.flush();
            first.parse().unwrap_or(99)
        }
    }
}
