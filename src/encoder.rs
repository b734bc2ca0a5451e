use crate::word::Word;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("`{token}` is not a binary literal")]
    NotBinary { token: String },
    #[error("`{token}` is {len} bits wide, a word holds {word_size}")]
    TooWide { token: String, len: usize, word_size: usize },
}

/// Validates an argument token and left-pads it with zeros to `word_size`.
///
/// A token exactly `word_size` long is returned unchanged.
pub fn encode(token: &str, word_size: usize) -> Result<Word, EncodingError> {
    let bits = Word::parse(token).ok_or_else(|| EncodingError::NotBinary { token: token.to_string() })?;
    if bits.width() > word_size {
        return Err(EncodingError::TooWide { token: token.to_string(), len: bits.width(), word_size });
    }
    Ok(Word::left_padded(&bits, word_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pads_on_the_left() {
        assert_eq!(encode("101", 8).unwrap().to_string(), "00000101");
        assert_eq!(encode("0", 8).unwrap().to_string(), "00000000");
        assert_eq!(encode("1", 4).unwrap().to_string(), "0001");
    }

    #[test]
    fn exact_width_is_untouched() {
        assert_eq!(encode("11111111", 8).unwrap().to_string(), "11111111");
    }

    #[test]
    fn one_bit_too_wide() {
        assert_eq!(
            encode("100000000", 8),
            Err(EncodingError::TooWide { token: "100000000".into(), len: 9, word_size: 8 })
        );
    }

    #[test]
    fn rejects_non_binary() {
        assert_eq!(encode("", 8), Err(EncodingError::NotBinary { token: "".into() }));
        assert_eq!(encode("102", 8), Err(EncodingError::NotBinary { token: "102".into() }));
        assert_eq!(encode("0x1", 8), Err(EncodingError::NotBinary { token: "0x1".into() }));
        // non-binary wins over width
        assert!(matches!(encode("2222222222", 8), Err(EncodingError::NotBinary { .. })));
    }

    #[test]
    fn stripping_padding_gives_token_back() {
        for token in ["1", "10", "1101", "1000000", "11111111"] {
            let w = encode(token, 8).unwrap();
            assert_eq!(w.width(), 8);
            let s = w.to_string();
            assert_eq!(s.trim_start_matches('0'), token);
        }
    }
}
