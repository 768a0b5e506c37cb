mod cli;

use std::env;
use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

use deriv_grep::compile_opt;

/// Splits `input` on `\n` without copying. A trailing newline does not start
/// another line.
fn split_lines(mut input: Bytes) -> Vec<Bytes> {
    let mut lines = Vec::new();
    while input.has_remaining() {
        match input.iter().position(|&b| b == b'\n') {
            Some(end) => {
                lines.push(input.split_to(end));
                input.advance(1);
            }
            None => lines.push(std::mem::take(&mut input)),
        }
    }
    lines
}

fn read_stdin() -> Result<Bytes> {
    let mut buf = BytesMut::new().writer();
    io::copy(&mut io::stdin().lock(), &mut buf).context("reading standard input")?;
    Ok(buf.into_inner().freeze())
}

/// Runs one invocation, writing results to `out` and compile errors to `err`.
/// `input` is only read in the line-filter form. Returns the exit code.
fn execute<O: Write, E: Write>(
    cfg: &cli::Config,
    input: impl FnOnce() -> Result<Bytes>,
    out: &mut O,
    err: &mut E,
) -> Result<i32> {
    let re = match compile_opt(cfg.pattern.as_deref().map(str::as_bytes)) {
        Ok(re) => re,
        Err(e) => {
            writeln!(err, "compile error: {e}")?;
            return Ok(2);
        }
    };

    if let Some(text) = &cfg.text {
        let matched = cfg.matches(&re, text.as_bytes());
        writeln!(out, "{}", if matched { "MATCH" } else { "NO MATCH" })?;
        return Ok(if matched { 0 } else { 1 });
    }

    let mut any = false;
    for (idx, line) in split_lines(input()?).iter().enumerate() {
        if !cfg.matches(&re, line) {
            continue;
        }
        any = true;
        if cfg.line_numbers {
            write!(out, "{}:", idx + 1)?;
        }
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    out.flush().context("writing matches")?;

    Ok(if any { 0 } else { 1 })
}

fn run() -> Result<i32> {
    let cfg = cli::parse_args(env::args().skip(1).collect())?;
    execute(
        &cfg,
        read_stdin,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

// Usage: deriv-grep PATTERN TEXT
//        echo <input_text> | deriv-grep [-x] [-n] -E <pattern>
fn main() {
    let code = run().unwrap_or_else(|err| {
        eprintln!("{err:#}");
        2
    });
    process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoke(argv: &[&str], stdin: &'static [u8]) -> (i32, String, String) {
        let cfg = cli::parse_args(argv.iter().map(|s| s.to_string()).collect()).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input = || -> Result<Bytes> { Ok(Bytes::from_static(stdin)) };
        let code = execute(&cfg, input, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn quiet(code: i32, out: &str) -> (i32, String, String) {
        (code, out.to_string(), String::new())
    }

    #[test]
    fn verdict_form() {
        assert_eq!(invoke(&["a*b", "xaab"], b""), quiet(0, "MATCH\n"));
        assert_eq!(invoke(&["a*b", "xaa"], b""), quiet(1, "NO MATCH\n"));
        assert_eq!(
            invoke(&["-x", "-E", "ab", "cab"], b""),
            quiet(1, "NO MATCH\n")
        );
    }

    #[test]
    fn compile_error_exits_with_two() {
        let (code, out, err) = invoke(&["(", "x"], b"");
        assert_eq!(code, 2);
        assert!(out.is_empty());
        let expect = "compile error: parse error at pos 1: expected ')'";
        assert!(err.starts_with(expect), "{err}");

        let (code, _, err) = invoke(&["-E"], b"");
        assert_eq!(code, 2);
        assert!(err.contains("pattern is missing"), "{err}");
    }

    #[test]
    fn filters_stdin_lines() {
        let stdin = b"cat\ndog\nscatter\n";
        assert_eq!(invoke(&["-E", "cat"], stdin), quiet(0, "cat\nscatter\n"));
        assert_eq!(
            invoke(&["-n", "-E", "cat"], stdin),
            quiet(0, "1:cat\n3:scatter\n")
        );
        assert_eq!(invoke(&["-n", "-x", "-E", "cat"], stdin), quiet(0, "1:cat\n"));
        assert_eq!(invoke(&["-E", "cow"], stdin), quiet(1, ""));
    }

    fn lines(input: &'static [u8]) -> Vec<Bytes> {
        split_lines(Bytes::from_static(input))
    }

    #[test]
    fn splits_on_newline() {
        assert_eq!(lines(b"a\nbc\n"), vec![&b"a"[..], &b"bc"[..]]);
        assert_eq!(lines(b"a\n\nb"), vec![&b"a"[..], &b""[..], &b"b"[..]]);
        assert!(lines(b"").is_empty());
    }

    #[test]
    fn carriage_return_is_kept() {
        assert_eq!(lines(b"a\r\n"), vec![&b"a\r"[..]]);
    }
}
