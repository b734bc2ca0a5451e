pub mod config;
pub mod driver;
pub mod encoder;
pub mod finalizer;
pub mod instructions;
pub mod normalize;
pub mod sink;
pub mod word;

pub mod isa {
    pub mod basic; // ADD/SUB/NOT
    pub mod extended; // unary + binary ALU ops
}

pub use config::{AssemblerConfig, ConfigError};
pub use driver::{AsmError, Assembler, Summary};
pub use encoder::{encode, EncodingError};
pub use instructions::{InstrDesc, Instruction, InstructionSet, Isa, TableEntry, TableError};
pub use sink::{TextSink, WordSink};
pub use word::Word;
