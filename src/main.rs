use anyhow::Result;
use clap::Parser;

use lrc_transformer::config;

mod cli;
mod pipeline;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = config::Config::load(args.config.as_deref())?;
    config::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "lrcx starting");

    match args.command {
        cli::Command::Compress(cmd) => pipeline::run_write(cmd, cli::Shape::Compressed, &cfg),
        cli::Command::Decompress(cmd) => pipeline::run_write(cmd, cli::Shape::Expanded, &cfg),
        cli::Command::Dump(cmd) => pipeline::run_dump(cmd, &cfg),
        cli::Command::PrintDefaultConfig => {
            let s = cfg.to_toml_pretty()?;
            print!("{s}");
            Ok(())
        }
    }
}
