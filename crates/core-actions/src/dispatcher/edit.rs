//! The mutating commands: change and delete.
//!
//! Both follow the same shape: flush has already run, so the current state
//! is materialized; create the successor state (truncating any forward
//! branch), build the inverse/forward record pair while applying the edit,
//! install the pair, and drop the shortcut snapshot.

use crate::{DispatchResult, LineSource};
use anyhow::Result;
use core_state::{EditRecord, EditorState};
use core_text::Line;
use tracing::trace;

/// Replace lines `from..=to` with the next `to - from + 1` content lines.
///
/// The buffer is extended up front when `to` lies beyond the end; extended
/// slots hold the placeholder until the loop writes them. Only lines that
/// existed before the command are captured for the inverse record; appended
/// slots simply cease to exist when the undo resets the length.
///
/// End of input inside the content block stops the run: the partially
/// applied state is never observable because the loop quits immediately.
pub(crate) fn change<S: LineSource>(
    state: &mut EditorState,
    from: usize,
    to: usize,
    source: &mut S,
) -> Result<DispatchResult> {
    let prev_len = state.buffer.len();
    state.buffer.set_length(prev_len.max(to));
    state.timeline.create_successor();

    let span = to - from + 1;
    let mut undo_lines = Vec::with_capacity(span);
    let mut redo_lines = Vec::with_capacity(span);
    for i in from..=to {
        let Some(line) = source.content_line()? else {
            return Ok(DispatchResult::quit());
        };
        if i <= prev_len {
            undo_lines.push(state.buffer.get(i).clone());
        }
        state.buffer.set(i, line.clone());
        redo_lines.push(line);
    }

    let post_length = state.buffer.len();
    state.timeline.install(
        EditRecord::Change {
            location: from,
            pre_length: prev_len,
            post_length,
            span,
            lines: undo_lines,
        },
        EditRecord::Change {
            location: from,
            pre_length: prev_len,
            post_length,
            span,
            lines: redo_lines,
        },
    );
    state.nav.invalidate_snapshot();
    trace!(
        target: "actions.dispatch",
        from,
        to,
        length = post_length,
        state = state.timeline.current_state(),
        "change_applied"
    );
    Ok(DispatchResult::clean())
}

/// Remove lines `from..=to`, clipping `to` against the live length.
///
/// A range that misses the buffer entirely still consumes a timeline state:
/// a Skip pair keeps commands and states 1:1 without touching the buffer.
pub(crate) fn delete(state: &mut EditorState, from: usize, to: usize) {
    let pre_length = state.buffer.len();
    if from > pre_length || to < 1 {
        state.timeline.create_successor();
        state.timeline.install(EditRecord::Skip, EditRecord::Skip);
        state.nav.invalidate_snapshot();
        trace!(
            target: "actions.dispatch",
            from,
            to,
            state = state.timeline.current_state(),
            "delete_skipped"
        );
        return;
    }

    let last = to.min(pre_length);
    let span = last - from + 1;
    state.timeline.create_successor();

    let removed: Vec<Line> = (from..=last).map(|i| state.buffer.get(i).clone()).collect();
    state.buffer.shift_left(from, span);
    state.buffer.set_length(pre_length - span);

    state.timeline.install(
        EditRecord::Delete {
            location: from,
            pre_length,
            post_length: pre_length - span,
            span,
            lines: removed,
        },
        EditRecord::Delete {
            location: from,
            pre_length,
            post_length: pre_length - span,
            span,
            lines: Vec::new(),
        },
    );
    state.nav.invalidate_snapshot();
    trace!(
        target: "actions.dispatch",
        from,
        to,
        removed = span,
        length = pre_length - span,
        state = state.timeline.current_state(),
        "delete_applied"
    );
}
