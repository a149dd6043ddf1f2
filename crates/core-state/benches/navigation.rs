use core_state::{EditRecord, EditorState};
use core_text::Line;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const STATES: usize = 512;

/// Build a timeline of single-line rewrites, the worst case for step-by-step
/// replay (every state differs from its neighbors).
fn build_history(states: usize) -> EditorState {
    let mut state = EditorState::new();
    for n in 0..states {
        let prev_len = state.buffer.len();
        state.buffer.set_length(1);
        state.timeline.create_successor();
        let mut undo_lines = Vec::with_capacity(1);
        if prev_len >= 1 {
            undo_lines.push(state.buffer.get(1).clone());
        }
        let line = Line::new(format!("{n}\n").into_bytes());
        state.buffer.set(1, line.clone());
        state.timeline.install(
            EditRecord::Change {
                location: 1,
                pre_length: prev_len,
                post_length: 1,
                span: 1,
                lines: undo_lines,
            },
            EditRecord::Change {
                location: 1,
                pre_length: prev_len,
                post_length: 1,
                span: 1,
                lines: vec![line],
            },
        );
        state.nav.invalidate_snapshot();
    }
    state
}

fn bench_flush(c: &mut Criterion) {
    c.bench_function("undo_replay_half_history", |b| {
        b.iter_batched(
            || build_history(STATES),
            |mut state| {
                state.queue_undo(STATES / 2);
                state.flush_navigation();
                black_box(state.timeline.current_state())
            },
            criterion::BatchSize::SmallInput,
        );
    });

    c.bench_function("redo_via_snapshot", |b| {
        b.iter_batched(
            || {
                let mut state = build_history(STATES);
                state.queue_undo(STATES / 2);
                state.flush_navigation();
                state
            },
            |mut state| {
                // One step short of the snapshot origin: restores the copy
                // and replays a single undo instead of STATES/2 - 1 redos.
                state.queue_redo(STATES / 2 - 1);
                state.flush_navigation();
                black_box(state.timeline.current_state())
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_flush);
criterion_main!(benches);
