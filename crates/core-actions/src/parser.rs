//! Line-oriented command parsing.
//!
//! Grammar (each command line ends with a newline):
//!
//! | form | meaning |
//! |---|---|
//! | `a,bc` + `b - a + 1` content lines | change lines `a..=b` |
//! | `a,bd` | delete lines `a..=b` |
//! | `a,bp` | print lines `a..=b` |
//! | `ku` | queue `k` undos |
//! | `kr` | queue `k` redos |
//! | `q` | quit |
//!
//! The opcode is the last byte of the line; everything before it is decimal
//! arguments. Content blocks have no terminator line: a change consumes
//! exactly its span and nothing more.

use crate::{Command, LineSource};
use core_text::Line;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(char),
    #[error("malformed range arguments")]
    BadRange,
    #[error("malformed step count")]
    BadCount,
}

/// Parse one command line. The trailing newline (and an optional carriage
/// return before it) is ignored.
pub fn parse_command(line: &[u8]) -> Result<Command, ParseError> {
    let mut body = line;
    if let [rest @ .., b'\n'] = body {
        body = rest;
    }
    if let [rest @ .., b'\r'] = body {
        body = rest;
    }
    let (&opcode, args) = body.split_last().ok_or(ParseError::Empty)?;

    match opcode {
        b'q' if args.is_empty() => Ok(Command::Quit),
        b'c' => {
            let (from, to) = parse_range(args)?;
            if from > to {
                return Err(ParseError::BadRange);
            }
            Ok(Command::Change { from, to })
        }
        b'd' => {
            let (from, to) = parse_range(args)?;
            if from > to {
                return Err(ParseError::BadRange);
            }
            Ok(Command::Delete { from, to })
        }
        // An empty print range (`a > b`) is legal and emits nothing.
        b'p' => {
            let (from, to) = parse_range(args)?;
            Ok(Command::Print { from, to })
        }
        b'u' => Ok(Command::Undo(parse_count(args)?)),
        b'r' => Ok(Command::Redo(parse_count(args)?)),
        other => Err(ParseError::UnknownCommand(other as char)),
    }
}

fn parse_range(args: &[u8]) -> Result<(usize, usize), ParseError> {
    let comma = args
        .iter()
        .position(|&b| b == b',')
        .ok_or(ParseError::BadRange)?;
    let from = parse_number(&args[..comma]).ok_or(ParseError::BadRange)?;
    let to = parse_number(&args[comma + 1..]).ok_or(ParseError::BadRange)?;
    if from < 1 {
        return Err(ParseError::BadRange);
    }
    Ok((from, to))
}

fn parse_count(args: &[u8]) -> Result<usize, ParseError> {
    parse_number(args).ok_or(ParseError::BadCount)
}

fn parse_number(digits: &[u8]) -> Option<usize> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// Buffered reader over the command stream.
///
/// Serves double duty: it yields raw command lines for [`parse_command`] and
/// implements [`LineSource`] so a `Change` can pull its content block from
/// the same stream, in order, with nothing buffered ahead.
pub struct CommandReader<R> {
    inner: R,
    scratch: Vec<u8>,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            scratch: Vec::new(),
        }
    }

    /// Next raw command line including its newline, `None` at end of input.
    pub fn command_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        self.scratch.clear();
        let n = self.inner.read_until(b'\n', &mut self.scratch)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(self.scratch.clone()))
        }
    }
}

impl<R: BufRead> LineSource for CommandReader<R> {
    fn content_line(&mut self) -> io::Result<Option<Line>> {
        self.scratch.clear();
        let n = self.inner.read_until(b'\n', &mut self.scratch)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(Line::new(self.scratch.clone())))
        }
    }
}
