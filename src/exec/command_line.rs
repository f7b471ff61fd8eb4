// src/exec/command_line.rs

//! Command-line composition.
//!
//! Arguments are joined into one string the way a Windows command line is
//! written: an argument containing a space is wrapped in double quotes unless
//! it already contains a quote, in which case the caller is assumed to have
//! quoted it. This is not a general escaping scheme.
//!
//! On platforms without a native command-line string the composed string is
//! split back into argv with [`split_arguments`], so the child sees the same
//! arguments it would see on Windows.

/// Join `args` with single spaces, quoting those that contain a space and no
/// quote character.
pub fn combine_arguments<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| quote_if_needed(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full command line as reported to callers: the program (quoted if it
/// contains a space) followed by the combined arguments, if any.
pub fn command_line<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let program = if program.contains(' ') {
        format!("\"{program}\"")
    } else {
        program.to_string()
    };

    let arguments = combine_arguments(args);
    if arguments.is_empty() {
        program
    } else {
        format!("{program} {arguments}")
    }
}

fn quote_if_needed(arg: &str) -> String {
    if arg.contains(' ') && !arg.contains('"') {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

/// Split a composed argument string into argv using the Microsoft C runtime
/// rules.
///
/// - Unquoted spaces and tabs separate arguments; other whitespace is part
///   of the argument.
/// - A double quote toggles quoting and is dropped.
/// - `2n` backslashes followed by a quote produce `n` backslashes and toggle
///   quoting; `2n + 1` backslashes followed by a quote produce `n`
///   backslashes and a literal quote.
/// - `""` inside a quoted region produces a literal quote.
/// - Backslashes not followed by a quote are literal.
pub fn split_arguments(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut backslashes = 1;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    backslashes += 1;
                }
                in_arg = true;
                if chars.peek() == Some(&'"') {
                    current.extend(std::iter::repeat_n('\\', backslashes / 2));
                    if backslashes % 2 == 1 {
                        chars.next();
                        current.push('"');
                    }
                } else {
                    current.extend(std::iter::repeat_n('\\', backslashes));
                }
            }
            '"' => {
                in_arg = true;
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ' ' | '\t' if !in_quotes => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }

    if in_arg {
        args.push(current);
    }

    args
}
