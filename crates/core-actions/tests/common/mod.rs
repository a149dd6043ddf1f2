#![allow(dead_code)] // Shared across test binaries; each uses a subset of helpers.

use core_actions::{CommandReader, dispatch, parse_command};
use core_state::EditorState;
use std::io::Cursor;

/// Run a command script end to end and collect everything it prints.
pub fn run_script(script: &str) -> String {
    run_script_with_state(script).0
}

/// Like [`run_script`], also returning the final editor state for
/// timeline/buffer assertions.
pub fn run_script_with_state(script: &str) -> (String, EditorState) {
    let mut reader = CommandReader::new(Cursor::new(script.as_bytes().to_vec()));
    let mut state = EditorState::new();
    let mut out = Vec::new();
    while let Some(raw) = reader.command_line().expect("script read failed") {
        let command = parse_command(&raw).expect("script must be well-formed");
        let result = dispatch(command, &mut state, &mut reader, &mut out).expect("dispatch failed");
        if result.quit {
            break;
        }
    }
    (String::from_utf8(out).expect("print output is utf-8"), state)
}

/// Live buffer contents as strings, newlines included.
pub fn buffer_contents(state: &EditorState) -> Vec<String> {
    (1..=state.buffer.len())
        .map(|i| String::from_utf8_lossy(state.buffer.get(i).as_bytes()).into_owned())
        .collect()
}
