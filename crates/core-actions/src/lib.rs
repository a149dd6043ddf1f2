//! Command model, stream parser, and dispatcher.
//!
//! The command surface is deliberately tiny: five line-oriented shapes plus
//! quit (see [`parser`]). The dispatcher applies them to an
//! [`core_state::EditorState`], flushing queued undo/redo movement before
//! anything observable happens so that navigation runs coalesce.
//!
//! I/O stays at the seams: content lines enter through [`LineSource`] and
//! print output leaves through a caller-supplied writer. The command
//! handlers themselves have no failure paths; out-of-range requests degrade
//! to well-defined no-ops.

use core_text::Line;
use std::io;

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{DispatchResult, dispatch};
pub use parser::{CommandReader, ParseError, parse_command};

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Replace lines `from..=to` with the next `to - from + 1` content lines.
    Change { from: usize, to: usize },
    /// Remove lines `from..=to`, clipped against the live range.
    Delete { from: usize, to: usize },
    /// Emit lines `from..=to`, `.` for slots outside the buffer.
    Print { from: usize, to: usize },
    /// Queue backward steps.
    Undo(usize),
    /// Queue forward steps.
    Redo(usize),
    Quit,
}

/// Supplier of the content lines a `Change` consumes.
///
/// Payloads arrive exactly as read, trailing newline included, and are owned
/// by whichever buffer slot or edit record last claimed them.
pub trait LineSource {
    /// Next raw content line, `None` at end of input.
    fn content_line(&mut self) -> io::Result<Option<Line>>;
}
