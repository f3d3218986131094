use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use disarmv4t::{disassemble, Mode};
use disarmv4t_cli::{load_raw_bin, write_json, write_text, Template, DEFAULT_TEMPLATE};

#[derive(Parser, Debug)]
#[command(author, version, about = "ARMv4T (ARM/Thumb) disassembler", long_about = None)]
struct Cli {
    /// Load address of the first byte (hex or dec)
    #[arg(short, long, default_value = "0", value_parser = parse_u32)]
    base: u32,
    /// Decode as 16-bit Thumb instead of 32-bit ARM
    #[arg(short, long)]
    thumb: bool,
    /// Line template; fields are {addr}, {instr} and {mnemonic}
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    format: String,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    emit: OutputFormat,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Write the listing here instead of stdout
    #[arg(value_name = "OUTFILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.thumb {
            Mode::Thumb
        } else {
            Mode::Arm
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    // Reject a bad template before touching the input file.
    let template = Template::parse(&cli.format).context("invalid --format template")?;
    let img = load_raw_bin(&cli.input, cli.base, cli.skip, cli.len)?;
    let config = img.config(cli.mode());
    let lines = disassemble(&img.bytes, &config);
    info!(mode = ?config.mode, base = config.base, count = lines.len(), "disassembled");

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    match cli.emit {
        OutputFormat::Text => write_text(&mut out, &template, &lines)?,
        OutputFormat::Json => write_json(&mut out, &lines)?,
    }
    out.flush()?;
    Ok(())
}
