use crate::instructions::InstrDesc;

/// Three-instruction set: two binary ops and a negation.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc { mnemonic: "ADD", opcode: "00000001", arity: 2 },
    InstrDesc { mnemonic: "SUB", opcode: "00000010", arity: 2 },
    InstrDesc { mnemonic: "NOT", opcode: "11111111", arity: 1 },
];
