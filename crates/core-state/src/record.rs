use core_text::Line;

/// Payload of a single reversible mutation.
///
/// Every mutating command produces two of these: an inverse record stored on
/// the state the command creates (applied when stepping back) and a forward
/// record stored on the state it leaves (applied when stepping forward).
/// Records are immutable once the command that created them returns.
///
/// Which lines a record carries depends on its position in the pair:
/// * `Change` applied backward carries the overwritten originals (only those
///   that existed before the command, never the appended slots); applied
///   forward it carries the new lines exactly as inserted.
/// * `Delete` applied backward carries the removed lines in original order;
///   applied forward it carries none.
#[derive(Debug)]
pub enum EditRecord {
    Change {
        /// 1-based line index where the edit begins.
        location: usize,
        /// Buffer length before the mutation; the backward direction resets to it.
        pre_length: usize,
        /// Buffer length after the mutation; the forward direction resets to it.
        post_length: usize,
        /// Number of lines overwritten or appended.
        span: usize,
        lines: Vec<Line>,
    },
    Delete {
        location: usize,
        pre_length: usize,
        post_length: usize,
        /// Number of lines removed.
        span: usize,
        lines: Vec<Line>,
    },
    /// No-op placeholder so a command that changed nothing still owns a
    /// record pair and keeps the command/state correspondence 1:1.
    Skip,
}
