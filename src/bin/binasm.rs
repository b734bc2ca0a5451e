use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use binasm::{AsmError, Assembler, AssemblerConfig, InstructionSet, Isa, Summary, TextSink};

const EXIT_USAGE: u8 = 1;
const EXIT_OPEN: u8 = 2;
const EXIT_CONFIG: u8 = 6;

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble mnemonic source into fixed-width binary words")]
struct Opts {
    /// Assembly source (one mnemonic or argument per line, `;` starts a comment)
    #[arg(value_name = "ASMFILE")]
    input: PathBuf,
    /// Output file, one binary word per line
    #[arg(value_name = "BINFILE")]
    output: PathBuf,
    /// Built-in instruction set and defaults to start from
    #[arg(long, value_enum, default_value_t = Profile::Extended)]
    profile: Profile,
    /// Load assembler settings from JSON (replaces the profile defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Load the instruction table from JSON (Vec<{ mnemonic, opcode, arity }>)
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,
    /// Word width in bits
    #[arg(long)]
    word_size: Option<usize>,
    /// Pad output with zero words up to this many lines (0 disables)
    #[arg(long)]
    min_lines: Option<usize>,
    /// Leave source line numbers out of diagnostics
    #[arg(long)]
    no_line_numbers: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Basic,
    Extended,
}

impl Profile {
    fn isa(self) -> Isa {
        match self {
            Profile::Basic => Isa::Basic,
            Profile::Extended => Isa::Extended,
        }
    }

    fn config(self) -> AssemblerConfig {
        match self {
            Profile::Basic => AssemblerConfig::basic(),
            Profile::Extended => AssemblerConfig::extended(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum Failure {
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: std::io::Error },
    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
    #[error("{}", render(.err, .line_numbers))]
    Assemble { err: AsmError, line_numbers: bool },
}

fn render(err: &AsmError, line_numbers: &bool) -> String {
    err.render(*line_numbers)
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::Open { .. } => EXIT_OPEN,
            Failure::Config(_) => EXIT_CONFIG,
            Failure::Assemble { err, .. } => err.exit_code(),
        }
    }
}

fn build(opts: &Opts) -> anyhow::Result<Assembler> {
    let mut cfg = match &opts.config {
        Some(path) => AssemblerConfig::from_json_file(path)?,
        None => opts.profile.config(),
    };
    if let Some(w) = opts.word_size {
        cfg.word_size = w;
    }
    if let Some(n) = opts.min_lines {
        cfg.min_lines = n;
    }
    if opts.no_line_numbers {
        cfg.line_numbers = false;
    }
    let table = match &opts.table {
        Some(path) => InstructionSet::from_json_file(path, cfg.word_size)?,
        None => InstructionSet::builtin(opts.profile.isa()),
    };
    Ok(Assembler::new(table, cfg)?)
}

fn run(opts: &Opts) -> Result<Summary, Failure> {
    let asm = build(opts).map_err(Failure::Config)?;
    let line_numbers = asm.config().line_numbers;

    let input = File::open(&opts.input).map_err(|source| Failure::Open { path: opts.input.clone(), source })?;
    let output = File::create(&opts.output).map_err(|source| Failure::Open { path: opts.output.clone(), source })?;

    let mut sink = TextSink::new(BufWriter::new(output));
    let result = asm.assemble(BufReader::new(input), &mut sink);
    // words emitted before a failure stay in the output file
    let flushed = sink.flush();
    let summary = result.map_err(|err| Failure::Assemble { err, line_numbers })?;
    flushed.map_err(|e| Failure::Assemble { err: AsmError::Io(e), line_numbers })?;
    Ok(summary)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    match run(&opts) {
        Ok(summary) => {
            info!(
                input = %opts.input.display(),
                output = %opts.output.display(),
                instructions = summary.instructions,
                words = summary.words,
                padding = summary.padding,
                "assembled"
            );
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{failure}");
            ExitCode::from(failure.exit_code())
        }
    }
}
