use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::word::Word;

/// Built-in table entry.
#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: &'static str,
    pub arity: usize,
}

/// Table entry as read from a JSON instruction file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub mnemonic: String,
    pub opcode: String,
    pub arity: usize,
}

impl From<&InstrDesc> for TableEntry {
    fn from(d: &InstrDesc) -> Self {
        Self { mnemonic: d.mnemonic.to_string(), opcode: d.opcode.to_string(), arity: d.arity }
    }
}

/// A resolved instruction: mnemonic, opcode word and the number of
/// argument lines that follow it in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub opcode: Word,
    pub arity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isa {
    Basic,
    Extended,
}

impl Isa {
    pub fn table(self) -> &'static [InstrDesc] {
        match self {
            Isa::Basic => crate::isa::basic::TABLE,
            Isa::Extended => crate::isa::extended::TABLE,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("mnemonic `{mnemonic}` must be non-empty and free of spaces")]
    BadMnemonic { mnemonic: String },
    #[error("opcode `{opcode}` of {mnemonic} is not a binary literal")]
    BadOpcode { mnemonic: String, opcode: String },
    #[error("opcode `{opcode}` of {mnemonic} is {width} bits, expected {word_size}")]
    OpcodeWidth { mnemonic: String, opcode: String, width: usize, word_size: usize },
    #[error("mnemonic {mnemonic} is defined twice")]
    DuplicateMnemonic { mnemonic: String },
    #[error("opcode {opcode} is shared by {first} and {second}")]
    DuplicateOpcode { opcode: String, first: String, second: String },
}

/// Immutable mnemonic table. Lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct InstructionSet {
    word_size: usize,
    by_name: BTreeMap<String, Instruction>,
    by_opcode: HashMap<Word, String>,
}

impl InstructionSet {
    pub fn new<I>(entries: I, word_size: usize) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = TableEntry>,
    {
        let mut by_name = BTreeMap::new();
        let mut by_opcode: HashMap<Word, String> = HashMap::new();
        for e in entries {
            if e.mnemonic.is_empty() || e.mnemonic.contains(' ') {
                return Err(TableError::BadMnemonic { mnemonic: e.mnemonic });
            }
            let opcode = Word::parse(&e.opcode)
                .ok_or_else(|| TableError::BadOpcode { mnemonic: e.mnemonic.clone(), opcode: e.opcode.clone() })?;
            if opcode.width() != word_size {
                return Err(TableError::OpcodeWidth {
                    mnemonic: e.mnemonic,
                    opcode: e.opcode,
                    width: opcode.width(),
                    word_size,
                });
            }
            if by_name.contains_key(&e.mnemonic) {
                return Err(TableError::DuplicateMnemonic { mnemonic: e.mnemonic });
            }
            if let Some(first) = by_opcode.get(&opcode) {
                return Err(TableError::DuplicateOpcode {
                    opcode: e.opcode,
                    first: first.clone(),
                    second: e.mnemonic,
                });
            }
            by_opcode.insert(opcode.clone(), e.mnemonic.clone());
            by_name.insert(e.mnemonic.clone(), Instruction { mnemonic: e.mnemonic, opcode, arity: e.arity });
        }
        Ok(Self { word_size, by_name, by_opcode })
    }

    /// One of the compiled-in tables. These use 8-bit opcodes.
    pub fn builtin(isa: Isa) -> Self {
        Self::new(isa.table().iter().map(TableEntry::from), 8)
            .unwrap_or_else(|e| unreachable!("built-in table is malformed: {e}"))
    }

    /// Loads a JSON array of `{ "mnemonic", "opcode", "arity" }` objects.
    pub fn from_json_file(path: &Path, word_size: usize) -> anyhow::Result<Self> {
        let txt = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let entries: Vec<TableEntry> =
            serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::new(entries, word_size)?)
    }

    pub fn resolve(&self, name: &str) -> Option<&Instruction> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn by_opcode(&self, opcode: &Word) -> Option<&Instruction> {
        self.by_opcode.get(opcode).and_then(|m| self.by_name.get(m))
    }

    /// Entries in mnemonic order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.by_name.values()
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
