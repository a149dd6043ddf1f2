//! Editor state: the line buffer, the branching edit timeline, and the lazy
//! undo/redo navigation engine.
//!
//! History model:
//! - Every mutating command creates one timeline state carrying a pair of
//!   records: the inverse edit (step back) and the forward edit (step
//!   forward). Reversing in either direction is O(affected lines) with no
//!   recomputation.
//! - Mutating below the tip truncates the forward branch first, so the
//!   timeline is always a single line of states and the state count stays in
//!   1:1 correspondence with the mutating commands that produced it.
//! - Undo/redo commands never touch the buffer directly; they accumulate in
//!   [`NavigationEngine::queue_undo`]/[`NavigationEngine::queue_redo`] and
//!   the net movement is applied once, by [`NavigationEngine::flush`], right
//!   before the next observable command.
//! - A full-buffer snapshot ("rightmost") is captured when an undo phase
//!   first leaves the tip; a later long redo restores it in one copy instead
//!   of replaying each intermediate state. The snapshot is an optimization
//!   only and is dropped on every mutation.

mod navigation;
mod record;
mod timeline;

pub use navigation::NavigationEngine;
pub use record::EditRecord;
pub use timeline::{STATE_BLOCK_SIZE, Timeline, TimelineState};

use core_text::LineBuffer;

/// The single-owner mutable state the dispatcher drives.
#[derive(Default)]
pub struct EditorState {
    pub buffer: LineBuffer,
    pub timeline: Timeline,
    pub nav: NavigationEngine,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            buffer: LineBuffer::new(),
            timeline: Timeline::new(),
            nav: NavigationEngine::new(),
        }
    }

    /// Apply any queued undo/redo movement to the buffer.
    pub fn flush_navigation(&mut self) {
        self.nav.flush(&mut self.timeline, &mut self.buffer);
    }

    pub fn queue_undo(&mut self, steps: usize) {
        self.nav.queue_undo(steps, &self.timeline);
    }

    pub fn queue_redo(&mut self, steps: usize) {
        self.nav.queue_redo(steps, &self.timeline);
    }
}
