use std::io::{self, BufRead};

use tracing::{debug, trace};

use crate::config::{AssemblerConfig, ConfigError};
use crate::encoder::{encode, EncodingError};
use crate::finalizer::pad_to_minimum;
use crate::instructions::{Instruction, InstructionSet};
use crate::normalize::normalize;
use crate::sink::WordSink;

/// Fatal assembly errors. Words emitted before the error stay in the sink.
#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("command {command} is undefined")]
    UndefinedCommand { command: String, line: usize },
    #[error("end of input reached before expected arguments of {command} ({missing} of {arity} missing)")]
    PrematureEof { command: String, arity: usize, missing: usize },
    #[error("invalid argument {token} for command {command}, expected binary argument of size {word_size}")]
    InvalidArgument {
        token: String,
        command: String,
        word_size: usize,
        line: usize,
        #[source]
        source: EncodingError,
    },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl AsmError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AsmError::Io(_) => 2,
            AsmError::UndefinedCommand { .. } => 3,
            AsmError::PrematureEof { .. } => 4,
            AsmError::InvalidArgument { .. } => 5,
        }
    }

    /// 1-based source line the error was detected on, where one exists.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::UndefinedCommand { line, .. } | AsmError::InvalidArgument { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Diagnostic text for the error channel.
    pub fn render(&self, line_numbers: bool) -> String {
        let at = match self.line() {
            Some(n) if line_numbers => format!(" in line {n}"),
            _ => String::new(),
        };
        match self {
            AsmError::UndefinedCommand { .. } => format!("semantic error{at}: {self}"),
            AsmError::InvalidArgument { source, .. } => format!("syntactic error{at}: {self} ({source})"),
            AsmError::PrematureEof { .. } | AsmError::Io(_) => self.to_string(),
        }
    }
}

/// Counters for a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub source_lines: usize,
    pub instructions: usize,
    /// Opcode and argument words, padding excluded.
    pub words: usize,
    pub padding: usize,
}

enum State<'t> {
    ScanningCommand,
    CollectingArgument { insn: &'t Instruction, remaining: usize },
    Done,
}

/// Reads raw source lines. `number` counts physical lines, blank and
/// comment-only lines included.
struct SourceLines<R> {
    input: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> SourceLines<R> {
    fn new(input: R) -> Self {
        Self { input, buf: Vec::new(), number: 0 }
    }

    /// Next line without its `\n` or `\r\n` terminator. Bytes that are not
    /// UTF-8 become U+FFFD, so they only matter when they land in a token.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Single forward pass over the source: each command line emits its opcode
/// at once, then exactly `arity` non-blank lines are encoded as arguments.
pub struct Assembler {
    table: InstructionSet,
    cfg: AssemblerConfig,
}

impl Assembler {
    pub fn new(table: InstructionSet, cfg: AssemblerConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        if table.word_size() != cfg.word_size {
            return Err(ConfigError::WidthMismatch { table: table.word_size(), config: cfg.word_size });
        }
        if let Some(insn) = table.iter().find(|i| i.mnemonic.contains(cfg.comment_marker)) {
            return Err(ConfigError::MarkerInMnemonic { mnemonic: insn.mnemonic.clone(), marker: cfg.comment_marker });
        }
        Ok(Self { table, cfg })
    }

    pub fn table(&self) -> &InstructionSet {
        &self.table
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.cfg
    }

    /// Assembles `input` into `sink`, then pads to the configured minimum.
    pub fn assemble<R: BufRead, S: WordSink>(&self, input: R, sink: &mut S) -> Result<Summary, AsmError> {
        let mut summary = self.translate(input, sink)?;
        if self.cfg.min_lines > 0 {
            summary.padding = pad_to_minimum(sink, self.cfg.min_lines, self.cfg.word_size)?;
        }
        Ok(summary)
    }

    /// The command/argument state machine without the padding step.
    pub fn translate<R: BufRead, S: WordSink>(&self, input: R, sink: &mut S) -> Result<Summary, AsmError> {
        let mut src = SourceLines::new(input);
        let mut summary = Summary::default();
        let marker = self.cfg.comment_marker;
        let mut state = State::ScanningCommand;

        loop {
            state = match state {
                State::Done => break,
                State::ScanningCommand => match src.next_line()? {
                    None => State::Done,
                    Some(raw) => {
                        let token = normalize(&raw, marker);
                        if token.is_empty() {
                            trace!(line = src.number, "skipping blank line");
                            State::ScanningCommand
                        } else {
                            let insn = self
                                .table
                                .resolve(&token)
                                .ok_or(AsmError::UndefinedCommand { command: token, line: src.number })?;
                            debug!(line = src.number, mnemonic = %insn.mnemonic, arity = insn.arity, "command");
                            sink.emit(&insn.opcode)?;
                            summary.instructions += 1;
                            summary.words += 1;
                            State::CollectingArgument { insn, remaining: insn.arity }
                        }
                    }
                },
                State::CollectingArgument { remaining: 0, .. } => State::ScanningCommand,
                State::CollectingArgument { insn, remaining } => {
                    let Some(raw) = src.next_line()? else {
                        return Err(AsmError::PrematureEof {
                            command: insn.mnemonic.clone(),
                            arity: insn.arity,
                            missing: remaining,
                        });
                    };
                    let token = normalize(&raw, marker);
                    if token.is_empty() {
                        trace!(line = src.number, "skipping blank line");
                        State::CollectingArgument { insn, remaining }
                    } else {
                        let word = encode(&token, self.cfg.word_size).map_err(|source| AsmError::InvalidArgument {
                            token,
                            command: insn.mnemonic.clone(),
                            word_size: self.cfg.word_size,
                            line: src.number,
                            source,
                        })?;
                        trace!(line = src.number, %word, "argument");
                        sink.emit(&word)?;
                        summary.words += 1;
                        State::CollectingArgument { insn, remaining: remaining - 1 }
                    }
                }
            };
        }

        summary.source_lines = src.number;
        Ok(summary)
    }
}
