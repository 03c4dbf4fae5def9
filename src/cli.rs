use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use lrc_transformer::KeyMode;

#[derive(Debug, Parser)]
#[command(name = "lrcx")]
#[command(about = "Compress, expand, and inspect LRC lyric files.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Group timestamps that share a lyric onto one line
    Compress(WriteCmd),
    /// Write one timestamp per line, sorted by time
    Decompress(WriteCmd),
    /// Print the lyric mapping as JSON
    Dump(DumpCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, ClapArgs)]
pub struct WriteCmd {
    /// Input LRC path, or '-' for stdin
    pub input: String,

    /// Output file path (optional)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, ClapArgs)]
pub struct DumpCmd {
    /// Input LRC path, or '-' for stdin
    pub input: String,

    /// Key the mapping by `MM:SS.CC` text or by milliseconds
    #[arg(long, value_enum, default_value_t = Mode::Normal)]
    pub mode: Mode,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Mode {
    Normal,
    Msecond,
}

impl From<Mode> for KeyMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => KeyMode::Normal,
            Mode::Msecond => KeyMode::Msecond,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    Compressed,
    Expanded,
}

impl Shape {
    pub fn suffix(self) -> &'static str {
        match self {
            Shape::Compressed => "compressed.lrc",
            Shape::Expanded => "expanded.lrc",
        }
    }
}
