use serde::Serialize;

use binasm::{InstructionSet, Word};

use crate::model::Image;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    /// `values` holds each argument as an unsigned number, `None` when it
    /// is wider than 64 bits.
    Instr { index: usize, mnemonic: String, opcode: String, args: Vec<String>, values: Vec<Option<u64>> },
    /// Instruction whose argument words run past the end of the image.
    Truncated { index: usize, mnemonic: String, args: Vec<String>, missing: usize },
    Data { index: usize, word: String },
    Padding { index: usize, count: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub width: usize,
    pub entries: Vec<Entry>,
}

/// Walks the image in order, pairing each opcode with its argument words.
pub fn decode(img: &Image, table: &InstructionSet) -> Listing {
    let words = &img.words;
    // Zero words at the tail that are not opcodes are padding.
    let zero_is_opcode = table.by_opcode(&Word::zero(img.width)).is_some();
    let body_end = if zero_is_opcode {
        words.len()
    } else {
        words.iter().rposition(|w| !w.is_zero()).map_or(0, |p| p + 1)
    };

    let mut entries = Vec::new();
    let mut pc = 0usize;
    while pc < body_end {
        let w = &words[pc];
        let Some(insn) = table.by_opcode(w) else {
            entries.push(Entry::Data { index: pc, word: w.to_string() });
            pc += 1;
            continue;
        };
        let avail = words.len() - (pc + 1);
        let take = insn.arity.min(avail);
        let operands = &words[pc + 1..pc + 1 + take];
        let args: Vec<String> = operands.iter().map(Word::to_string).collect();
        if take < insn.arity {
            entries.push(Entry::Truncated { index: pc, mnemonic: insn.mnemonic.clone(), args, missing: insn.arity - take });
        } else {
            let values = operands.iter().map(Word::value::<u64>).collect();
            entries.push(Entry::Instr { index: pc, mnemonic: insn.mnemonic.clone(), opcode: w.to_string(), args, values });
        }
        pc += 1 + take;
    }
    if pc < words.len() {
        entries.push(Entry::Padding { index: pc, count: words.len() - pc });
    }
    Listing { width: img.width, entries }
}

pub fn fmt_entry(e: &Entry) -> String {
    match e {
        Entry::Instr { index, mnemonic, args, values, .. } => {
            if args.is_empty() {
                format!("{index:4}: {mnemonic}")
            } else {
                let shown: Vec<String> = args
                    .iter()
                    .zip(values)
                    .map(|(a, v)| match v {
                        Some(v) => format!("{a} ({v})"),
                        None => a.clone(),
                    })
                    .collect();
                format!("{index:4}: {mnemonic} {}", shown.join(", "))
            }
        }
        Entry::Truncated { index, mnemonic, args, missing } => {
            format!("{index:4}: {mnemonic} {} <{missing} missing>", args.join(", "))
        }
        Entry::Data { index, word } => format!("{index:4}: .word {word}"),
        Entry::Padding { index, count } => format!("{index:4}: .zero x{count}"),
    }
}
