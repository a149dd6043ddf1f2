use crate::record::EditRecord;
use tracing::trace;

/// Number of timeline states allocated at a time.
pub const STATE_BLOCK_SIZE: usize = 8;

/// One point in the edit history: the inverse record that leads to the
/// previous state and the forward record that leads to the next. Both start
/// absent and are filled by the command that creates the state.
#[derive(Debug, Default)]
pub struct TimelineState {
    pub undo: Option<EditRecord>,
    pub redo: Option<EditRecord>,
}

/// Ordered sequence of states. State 0 is the empty-buffer origin and never
/// carries records; state `i` is reached by applying the first `i` mutating
/// commands from the origin.
#[derive(Debug)]
pub struct Timeline {
    states: Vec<TimelineState>,
    current: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        let mut states = Vec::with_capacity(STATE_BLOCK_SIZE);
        states.push(TimelineState::default());
        Self { states, current: 0 }
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn current_state(&self) -> usize {
        self.current
    }

    pub fn tip(&self) -> usize {
        self.states.len() - 1
    }

    pub fn at_tip(&self) -> bool {
        self.current == self.tip()
    }

    /// Append the empty state a mutation is about to fill.
    ///
    /// When the current state is not the tip the forward branch is discarded
    /// first, so the new successor always lands at `current + 1`. Truncation
    /// never moves `current`; the caller advances it via [`Timeline::install`]
    /// once the record pair is complete.
    pub fn create_successor(&mut self) {
        let discarded = self.states.len() - (self.current + 1);
        if discarded > 0 {
            self.states.truncate(self.current + 1);
            trace!(
                target: "state.timeline",
                discarded,
                current = self.current,
                "branch_truncated"
            );
        }
        if self.states.len() == self.states.capacity() {
            self.states.reserve(STATE_BLOCK_SIZE);
        }
        self.states.push(TimelineState::default());
    }

    /// Store the record pair for the mutation that just ran and step onto the
    /// new state: the inverse record belongs to the successor, the forward
    /// record to the state being left.
    pub fn install(&mut self, undo: EditRecord, redo: EditRecord) {
        self.states[self.current + 1].undo = Some(undo);
        self.states[self.current].redo = Some(redo);
        self.current += 1;
        trace!(
            target: "state.timeline",
            current = self.current,
            count = self.states.len(),
            "state_installed"
        );
    }

    /// Inverse record of `state`; `None` (never filled) applies as a no-op.
    pub fn undo_record(&self, state: usize) -> Option<&EditRecord> {
        self.states[state].undo.as_ref()
    }

    /// Forward record of `state`; `None` (never filled) applies as a no-op.
    pub fn redo_record(&self, state: usize) -> Option<&EditRecord> {
        self.states[state].redo.as_ref()
    }

    pub fn step_back(&mut self) {
        self.current -= 1;
    }

    pub fn step_forward(&mut self) {
        self.current += 1;
    }

    /// Reposition directly, used when a shortcut restores a known state.
    pub fn jump_to(&mut self, state: usize) {
        self.current = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip_pair(timeline: &mut Timeline) {
        timeline.create_successor();
        timeline.install(EditRecord::Skip, EditRecord::Skip);
    }

    #[test]
    fn starts_at_origin() {
        let timeline = Timeline::new();
        assert_eq!(timeline.state_count(), 1);
        assert_eq!(timeline.current_state(), 0);
        assert!(timeline.at_tip());
    }

    #[test]
    fn successor_at_tip_appends() {
        let mut timeline = Timeline::new();
        skip_pair(&mut timeline);
        skip_pair(&mut timeline);
        assert_eq!(timeline.state_count(), 3);
        assert_eq!(timeline.current_state(), 2);
    }

    #[test]
    fn successor_below_tip_truncates_branch() {
        let mut timeline = Timeline::new();
        skip_pair(&mut timeline);
        skip_pair(&mut timeline);
        skip_pair(&mut timeline);
        timeline.jump_to(1);
        skip_pair(&mut timeline);
        // States 2 and 3 are discarded; the new state lands at index 2.
        assert_eq!(timeline.state_count(), 3);
        assert_eq!(timeline.current_state(), 2);
        assert!(timeline.at_tip());
    }

    #[test]
    fn origin_state_has_no_records() {
        let timeline = Timeline::new();
        assert!(timeline.undo_record(0).is_none());
        assert!(timeline.redo_record(0).is_none());
    }
}
