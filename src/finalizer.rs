use std::io;

use tracing::debug;

use crate::sink::WordSink;
use crate::word::Word;

/// Appends zero words until the sink holds at least `min_lines` words.
/// Returns the number of words added.
///
/// The very last padding word carries no line terminator; output that is
/// already long enough is left untouched and keeps its trailing newline.
pub fn pad_to_minimum<S: WordSink>(sink: &mut S, min_lines: usize, word_size: usize) -> io::Result<usize> {
    let missing = min_lines.saturating_sub(sink.emitted());
    if missing == 0 {
        return Ok(0);
    }
    debug!(missing, min_lines, "padding output");
    let zero = Word::zero(word_size);
    for _ in 1..missing {
        sink.emit(&zero)?;
    }
    sink.emit_last(&zero)?;
    Ok(missing)
}
