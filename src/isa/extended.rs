use crate::instructions::InstrDesc;

/// Unary ops live in the low nibble, binary ops in the high nibble.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc { mnemonic: "INC", opcode: "00000001", arity: 1 },
    InstrDesc { mnemonic: "DEC", opcode: "00000010", arity: 1 },
    InstrDesc { mnemonic: "NOT", opcode: "00000011", arity: 1 },
    // skips forward, ignoring the instructions in between
    InstrDesc { mnemonic: "JMP", opcode: "00000100", arity: 1 },
    InstrDesc { mnemonic: "ADD", opcode: "00010000", arity: 2 },
    InstrDesc { mnemonic: "SUB", opcode: "00100000", arity: 2 },
    InstrDesc { mnemonic: "MUL", opcode: "00110000", arity: 2 },
    InstrDesc { mnemonic: "DIV", opcode: "01000000", arity: 2 },
    InstrDesc { mnemonic: "MOD", opcode: "01010000", arity: 2 },
    InstrDesc { mnemonic: "AND", opcode: "01100000", arity: 2 },
    InstrDesc { mnemonic: "OR", opcode: "01110000", arity: 2 },
    InstrDesc { mnemonic: "XOR", opcode: "10000000", arity: 2 },
    InstrDesc { mnemonic: "NAND", opcode: "10010000", arity: 2 },
    InstrDesc { mnemonic: "NOR", opcode: "10100000", arity: 2 },
    InstrDesc { mnemonic: "XNOR", opcode: "10110000", arity: 2 },
    InstrDesc { mnemonic: "COMP", opcode: "11000000", arity: 2 },
];
