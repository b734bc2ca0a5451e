use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use std::path::PathBuf;

use binasm::{InstructionSet, Isa};
use binasm_disasm::listing::fmt_entry;
use binasm_disasm::{decode, load_image};

#[derive(Parser, Debug)]
#[command(author, version, about = "binasm word-file listing CLI", long_about=None)]
struct Cli {
    /// Input word file (one bitstring per line)
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Built-in instruction set used to name opcodes
    #[arg(long, value_enum, default_value_t = IsaArg::Extended)]
    isa: IsaArg,
    /// Instruction table JSON (Vec<{ mnemonic, opcode, arity }>), overrides --isa
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the word file
    Words,
    /// Pair opcodes with their argument words
    List {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IsaArg { Basic, Extended }

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    let cli = Cli::parse();
    let img = load_image(&cli.input)?;

    match cli.cmd {
        Command::Words => {
            let zeros = img.words.iter().filter(|w| w.is_zero()).count();
            println!("{:<16} {}", "words", img.words.len());
            println!("{:<16} {}", "width", img.width);
            println!("{:<16} {}", "zero words", zeros);
            println!("{:<16} {}", "final newline", img.trailing_newline);
        }
        Command::List { format, out } => {
            let table = match &cli.table {
                Some(path) => InstructionSet::from_json_file(path, img.width)?,
                None => {
                    let isa = match cli.isa { IsaArg::Basic => Isa::Basic, IsaArg::Extended => Isa::Extended };
                    let t = InstructionSet::builtin(isa);
                    anyhow::ensure!(
                        img.words.is_empty() || t.word_size() == img.width,
                        "image has {}-bit words, table expects {}",
                        img.width,
                        t.word_size()
                    );
                    t
                }
            };
            let listing = decode(&img, &table);
            let text = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&listing)?,
                OutputFormat::Text => {
                    let mut buf = String::new();
                    for e in &listing.entries {
                        buf.push_str(&fmt_entry(e));
                        buf.push('\n');
                    }
                    buf
                }
            };
            if let Some(path) = out { std::fs::write(path, text)?; } else { print!("{}", text); }
        }
    }

    Ok(())
}
