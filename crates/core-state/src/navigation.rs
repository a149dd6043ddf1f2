use crate::record::EditRecord;
use crate::timeline::Timeline;
use core_text::{Line, LineBuffer};
use tracing::trace;

/// Full copy of the buffer captured at the highest state reached before an
/// undo excursion, used to fast-forward in one restore instead of replaying
/// every intermediate redo.
#[derive(Debug)]
struct Snapshot {
    lines: Vec<Line>,
    origin: usize,
}

/// Deferred undo/redo bookkeeping.
///
/// Navigation commands only adjust a signed step count; the queued movement
/// is materialized exactly once, immediately before the next observable
/// command. A run like `5u 3r` therefore replays two net steps, not eight.
#[derive(Debug, Default)]
pub struct NavigationEngine {
    /// Unapplied steps: negative = undos, positive = redos.
    pending: isize,
    snapshot: Option<Snapshot>,
}

impl NavigationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> isize {
        self.pending
    }

    /// Origin state of the live shortcut snapshot, if one is held.
    pub fn snapshot_origin(&self) -> Option<usize> {
        self.snapshot.as_ref().map(|s| s.origin)
    }

    /// Queue `steps` backward steps, saturating at the origin state.
    pub fn queue_undo(&mut self, steps: usize, timeline: &Timeline) {
        self.pending = self.pending.saturating_sub_unsigned(steps);
        let current = timeline.current_state() as isize;
        if current + self.pending < 0 {
            self.pending = -current;
        }
        trace!(target: "state.nav", steps, pending = self.pending, "queue_undo");
    }

    /// Queue `steps` forward steps, saturating at the tip.
    pub fn queue_redo(&mut self, steps: usize, timeline: &Timeline) {
        self.pending = self.pending.saturating_add_unsigned(steps);
        let headroom = (timeline.tip() - timeline.current_state()) as isize;
        if self.pending > headroom {
            self.pending = headroom;
        }
        trace!(target: "state.nav", steps, pending = self.pending, "queue_redo");
    }

    /// Drop the shortcut snapshot. Called for every mutation that advances
    /// the timeline; a stale snapshot could otherwise outlive a branch
    /// truncation and restore states that no longer exist.
    pub fn invalidate_snapshot(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            trace!(target: "state.nav", origin = snapshot.origin, "snapshot_invalidated");
        }
    }

    /// Materialize the queued movement. Called at the top of every
    /// observable command; a no-op when nothing is queued.
    ///
    /// Before replaying step by step, two shortcuts are considered: when the
    /// target sits closer to the origin than to the current state the buffer
    /// is reset to empty and replay proceeds forward from state 0, and when a
    /// snapshot sits closer to the target than the current state does, the
    /// snapshot is restored and replay proceeds from its origin.
    pub fn flush(&mut self, timeline: &mut Timeline, buffer: &mut LineBuffer) {
        if self.pending == 0 {
            return;
        }
        let target = (timeline.current_state() as isize + self.pending) as usize;

        if self.pending < 0 {
            self.capture_snapshot(timeline, buffer);
            if (target as isize) < -self.pending {
                buffer.set_length(0);
                timeline.jump_to(0);
                self.pending = target as isize;
                trace!(target: "state.nav", to = target, "jump_origin");
            }
        } else if let Some(snapshot) = &self.snapshot {
            let distance = (target as isize - snapshot.origin as isize).abs();
            if distance < self.pending {
                buffer.set_length(snapshot.lines.len());
                for (i, line) in snapshot.lines.iter().enumerate() {
                    buffer.set(i + 1, line.clone());
                }
                timeline.jump_to(snapshot.origin);
                self.pending = target as isize - snapshot.origin as isize;
                trace!(
                    target: "state.nav",
                    origin = snapshot.origin,
                    to = target,
                    "jump_snapshot"
                );
            }
        }

        while self.pending < 0 && timeline.current_state() > 0 {
            apply_undo(timeline, buffer);
            self.pending += 1;
        }
        while self.pending > 0 && !timeline.at_tip() {
            apply_redo(timeline, buffer);
            self.pending -= 1;
        }
        self.pending = 0;
        trace!(
            target: "state.nav",
            current = timeline.current_state(),
            length = buffer.len(),
            "flushed"
        );
    }

    /// Copy the buffer the first time an undo phase leaves the tip. State 0
    /// has nothing worth capturing, and a live snapshot is never replaced:
    /// mutations invalidate it, so a survivor still matches the tip.
    fn capture_snapshot(&mut self, timeline: &Timeline, buffer: &LineBuffer) {
        if !timeline.at_tip() || self.snapshot.is_some() || timeline.current_state() == 0 {
            return;
        }
        let lines: Vec<Line> = (1..=buffer.len()).map(|i| buffer.get(i).clone()).collect();
        trace!(
            target: "state.nav",
            origin = timeline.current_state(),
            length = lines.len(),
            "snapshot_captured"
        );
        self.snapshot = Some(Snapshot {
            lines,
            origin: timeline.current_state(),
        });
    }
}

/// Apply one backward step: the inverse record of the current state.
fn apply_undo(timeline: &mut Timeline, buffer: &mut LineBuffer) {
    match timeline.undo_record(timeline.current_state()) {
        Some(EditRecord::Change {
            location,
            pre_length,
            lines,
            ..
        }) => {
            // Appended lines vanish with the length reset; only the
            // overwritten originals come back.
            buffer.set_length(*pre_length);
            for (i, line) in lines.iter().enumerate() {
                buffer.set(location + i, line.clone());
            }
        }
        Some(EditRecord::Delete {
            location,
            pre_length,
            span,
            lines,
            ..
        }) => {
            buffer.set_length(*pre_length);
            buffer.shift_right(*location, *span);
            for (i, line) in lines.iter().enumerate() {
                buffer.set(location + i, line.clone());
            }
        }
        Some(EditRecord::Skip) | None => {}
    }
    timeline.step_back();
}

/// Apply one forward step: the forward record of the current state.
fn apply_redo(timeline: &mut Timeline, buffer: &mut LineBuffer) {
    match timeline.redo_record(timeline.current_state()) {
        Some(EditRecord::Change {
            location,
            post_length,
            lines,
            ..
        }) => {
            buffer.set_length(*post_length);
            for (i, line) in lines.iter().enumerate() {
                buffer.set(location + i, line.clone());
            }
        }
        Some(EditRecord::Delete {
            location,
            post_length,
            span,
            ..
        }) => {
            buffer.shift_left(*location, *span);
            buffer.set_length(*post_length);
        }
        Some(EditRecord::Skip) | None => {}
    }
    timeline.step_forward();
}
