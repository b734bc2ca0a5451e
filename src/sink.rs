use std::io::{self, Write};

use crate::word::Word;

/// Destination for emitted words, one per output line.
pub trait WordSink {
    fn emit(&mut self, word: &Word) -> io::Result<()>;

    /// Emits the final word of the stream. Text output leaves off the
    /// line terminator.
    fn emit_last(&mut self, word: &Word) -> io::Result<()> {
        self.emit(word)
    }

    /// Number of words emitted so far.
    fn emitted(&self) -> usize;
}

/// Writes words as `0`/`1` text, newline separated.
pub struct TextSink<W: Write> {
    inner: W,
    count: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> WordSink for TextSink<W> {
    fn emit(&mut self, word: &Word) -> io::Result<()> {
        writeln!(self.inner, "{word}")?;
        self.count += 1;
        Ok(())
    }

    fn emit_last(&mut self, word: &Word) -> io::Result<()> {
        write!(self.inner, "{word}")?;
        self.count += 1;
        Ok(())
    }

    fn emitted(&self) -> usize {
        self.count
    }
}

impl WordSink for Vec<Word> {
    fn emit(&mut self, word: &Word) -> io::Result<()> {
        self.push(word.clone());
        Ok(())
    }

    fn emitted(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sink_terminates_all_but_last() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&Word::parse("0001").unwrap()).unwrap();
        sink.emit_last(&Word::zero(4)).unwrap();
        assert_eq!(sink.emitted(), 2);
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "0001\n0000");
    }
}
