//! Dispatcher applying a [`Command`] to mutable editor state.
//!
//! Decomposition:
//! * `edit` - the mutating commands (change/delete) and their record pairs
//! * this module - flush ordering, print, navigation queueing, quit
//!
//! Every observable command flushes queued navigation before running, so the
//! buffer a print sees or a mutation branches from is always the one the
//! user navigated to. The navigation commands themselves only enqueue.

use crate::{Command, LineSource};
use anyhow::Result;
use core_state::EditorState;
use std::io::Write;
use tracing::trace;

mod edit;

/// Result of dispatching a single [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self { quit: false }
    }
    pub fn quit() -> Self {
        Self { quit: true }
    }
}

/// Apply one command. Returns whether the command loop should stop.
pub fn dispatch<S, W>(
    command: Command,
    state: &mut EditorState,
    source: &mut S,
    out: &mut W,
) -> Result<DispatchResult>
where
    S: LineSource,
    W: Write,
{
    trace!(target: "actions.dispatch", command = ?command, "dispatch");
    match command {
        Command::Print { from, to } => {
            state.flush_navigation();
            print(state, from, to, out)?;
            Ok(DispatchResult::clean())
        }
        Command::Change { from, to } => {
            state.flush_navigation();
            edit::change(state, from, to, source)
        }
        Command::Delete { from, to } => {
            state.flush_navigation();
            edit::delete(state, from, to);
            Ok(DispatchResult::clean())
        }
        Command::Undo(steps) => {
            state.queue_undo(steps);
            Ok(DispatchResult::clean())
        }
        Command::Redo(steps) => {
            state.queue_redo(steps);
            Ok(DispatchResult::clean())
        }
        // Nothing observable follows, so queued navigation stays unapplied.
        Command::Quit => Ok(DispatchResult::quit()),
    }
}

/// Emit lines `from..=to`: the stored payload verbatim for live slots, the
/// placeholder `.` for anything outside the buffer. An inverted range emits
/// nothing.
fn print<W: Write>(state: &EditorState, from: usize, to: usize, out: &mut W) -> Result<()> {
    for i in from..=to {
        if i >= 1 && i <= state.buffer.len() {
            out.write_all(state.buffer.get(i).as_bytes())?;
        } else {
            out.write_all(b".\n")?;
        }
    }
    Ok(())
}
