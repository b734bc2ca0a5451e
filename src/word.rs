use std::fmt;

use bitvec::{order::Msb0, vec::BitVec};
use num_traits::PrimInt;

/// A fixed-width bitstring: one line of assembler output.
///
/// The most significant bit comes first, matching the textual form
/// written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    bits: BitVec<u8, Msb0>,
}

impl Word {
    /// All-zero word of the given width.
    pub fn zero(width: usize) -> Self {
        Self { bits: BitVec::repeat(false, width) }
    }

    /// Parses a bitstring exactly as written, without padding.
    /// Returns `None` for an empty string or any character other than '0'/'1'.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let mut bits = BitVec::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return None,
            }
        }
        Some(Self { bits })
    }

    /// Builds a word of `width` bits with `low` right-aligned and zeros in front.
    /// Callers guarantee `low.width() <= width`.
    pub(crate) fn left_padded(low: &Word, width: usize) -> Self {
        let mut bits: BitVec<u8, Msb0> = BitVec::repeat(false, width - low.width());
        bits.extend_from_bitslice(low.bits.as_bitslice());
        Self { bits }
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    /// Numeric value of the word, or `None` if it does not fit in `T`.
    pub fn value<T: PrimInt>(&self) -> Option<T> {
        let two = T::one() + T::one();
        self.bits.iter().by_vals().try_fold(T::zero(), |acc, bit| {
            let acc = acc.checked_mul(&two)?;
            if bit {
                acc.checked_add(&T::one())
            } else {
                Some(acc)
            }
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        for bit in self.bits.iter().by_vals() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let w = Word::parse("0101").unwrap();
        assert_eq!(w.width(), 4);
        assert_eq!(w.to_string(), "0101");
        assert!(Word::parse("").is_none());
        assert!(Word::parse("012").is_none());
        assert!(Word::parse("1 0").is_none());
    }

    #[test]
    fn zero_word() {
        let z = Word::zero(8);
        assert!(z.is_zero());
        assert_eq!(z.to_string(), "00000000");
        assert!(!Word::parse("00000100").unwrap().is_zero());
    }

    #[test]
    fn value_checks_overflow() {
        let w = Word::parse("11000000").unwrap();
        assert_eq!(w.value::<u8>(), Some(0xC0));
        assert_eq!(w.value::<u32>(), Some(192));
        let wide = Word::parse("100000000").unwrap();
        assert_eq!(wide.value::<u8>(), None);
        assert_eq!(wide.value::<u16>(), Some(256));
    }
}
