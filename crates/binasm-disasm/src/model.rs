use anyhow::Result;
use std::path::Path;

use binasm::Word;

#[derive(Debug, Clone)]
pub struct Image {
    pub words: Vec<Word>,
    pub width: usize,
    /// Padded output omits the separator after its last word.
    pub trailing_newline: bool,
}

pub fn load_image(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path)?;
    parse_image(&text)
}

pub fn parse_image(text: &str) -> Result<Image> {
    let mut words = Vec::new();
    let mut width = None;
    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let w = Word::parse(line).ok_or_else(|| anyhow::anyhow!("line {}: `{}` is not a binary word", i + 1, line))?;
        let expected = *width.get_or_insert(w.width());
        anyhow::ensure!(w.width() == expected, "line {}: word is {} bits, expected {}", i + 1, w.width(), expected);
        words.push(w);
    }
    Ok(Image { words, width: width.unwrap_or(0), trailing_newline: text.ends_with('\n') })
}
