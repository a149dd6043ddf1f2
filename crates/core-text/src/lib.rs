//! Line-addressed text storage: shared line payloads and the block-grown buffer.

use std::fmt;
use std::rc::Rc;

/// Number of line slots the buffer grows or shrinks by at a time.
pub const LINE_BLOCK_SIZE: usize = 32;

/// An immutable line payload: one input line, trailing newline included.
///
/// Cloning a `Line` shares the underlying bytes. The buffer, an undo record
/// and a redo record may all reference the same payload at once; moving a
/// line between slots only reassigns the handle.
#[derive(Clone, PartialEq, Eq)]
pub struct Line(Rc<[u8]>);

impl Line {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }

    /// The shared placeholder payload held by slots that were grown into
    /// existence but not yet written.
    pub fn placeholder() -> Self {
        Self(Rc::from(&b""[..]))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self(Rc::from(s.as_bytes()))
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?})", String::from_utf8_lossy(&self.0))
    }
}

/// An ordered sequence of line slots addressed from 1.
///
/// Slots `1..=len()` are live; slots beyond the length do not exist. Callers
/// enforce index preconditions, so none of these operations has a failure
/// path. Capacity moves in whole [`LINE_BLOCK_SIZE`] blocks.
#[derive(Default)]
pub struct LineBuffer {
    slots: Vec<Line>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(LINE_BLOCK_SIZE),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Requires `1 <= index <= len()`.
    pub fn get(&self, index: usize) -> &Line {
        &self.slots[index - 1]
    }

    /// Requires `1 <= index <= len()`.
    pub fn set(&mut self, index: usize, line: Line) {
        self.slots[index - 1] = line;
    }

    /// Grow or shrink the live length to `length`.
    ///
    /// Slots made live by growth hold the placeholder payload until written;
    /// every growth path must write them before they become observable.
    pub fn set_length(&mut self, length: usize) {
        if length > self.slots.len() {
            let rounded = length.div_ceil(LINE_BLOCK_SIZE) * LINE_BLOCK_SIZE;
            self.slots.reserve(rounded - self.slots.len());
            self.slots.resize(length, Line::placeholder());
        } else {
            self.slots.truncate(length);
            let rounded = length.div_ceil(LINE_BLOCK_SIZE) * LINE_BLOCK_SIZE;
            self.slots.shrink_to(rounded);
        }
    }

    /// Copy slot `i + offset` into slot `i` for each `i >= from` while the
    /// source slot is live. Used to close the gap left by a deletion.
    pub fn shift_left(&mut self, from: usize, offset: usize) {
        let mut i = from;
        while i + offset <= self.slots.len() {
            self.slots[i - 1] = self.slots[i + offset - 1].clone();
            i += 1;
        }
    }

    /// Copy slot `i - offset` into slot `i` for each `i <= len()` down to
    /// `from + offset`. Used to reopen the gap when an undo re-inserts
    /// deleted lines; iterates tail-first so sources are read before they
    /// are overwritten.
    pub fn shift_right(&mut self, from: usize, offset: usize) {
        let mut i = self.slots.len();
        while i >= from + offset {
            self.slots[i - 1] = self.slots[i - offset - 1].clone();
            i -= 1;
        }
    }
}
