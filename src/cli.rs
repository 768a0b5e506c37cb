use anyhow::{bail, Result};

use deriv_grep::Regex;

pub const USAGE: &str = "usage: deriv-grep PATTERN TEXT\n       deriv-grep [-x] [-n] -E PATTERN [TEXT]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when `-E` was given without a pattern.
    pub pattern: Option<String>,
    /// Text to test directly; standard input is read line by line otherwise.
    pub text: Option<String>,
    /// `-x`: the whole text or line must match.
    pub full: bool,
    /// `-n`: prefix printed lines with their 1-based line number.
    pub line_numbers: bool,
}

impl Config {
    pub fn matches(&self, re: &Regex, input: &[u8]) -> bool {
        if self.full {
            re.is_full_match(input)
        } else {
            re.is_match(input)
        }
    }
}

/// Two arguments not led by `-E` are always `PATTERN TEXT`, taken verbatim.
/// Otherwise `-x` and `-n` may only appear before `-E`, and everything after
/// the pattern is the optional text.
pub fn parse_args(args: Vec<String>) -> Result<Config> {
    if let [pattern, text] = args.as_slice() {
        if pattern != "-E" {
            return Ok(Config {
                pattern: Some(pattern.clone()),
                text: Some(text.clone()),
                full: false,
                line_numbers: false,
            });
        }
    }

    let mut full = false;
    let mut line_numbers = false;
    let mut args = args.into_iter();
    loop {
        match args.next().as_deref() {
            Some("-x") => full = true,
            Some("-n") => line_numbers = true,
            Some("-E") => break,
            Some(other) => bail!("unexpected argument '{other}'\n{USAGE}"),
            None => bail!("{USAGE}"),
        }
    }

    let pattern = args.next();
    let text = args.next();
    if args.next().is_some() {
        bail!("too many arguments\n{USAGE}");
    }
    Ok(Config {
        pattern,
        text,
        full,
        line_numbers,
    })
}
