use anyhow::{Context, Result, anyhow};
use std::path::Path;

use lrc_transformer::{
    ExpandedMap, LrcEntries, LrcTransformer, config::Config, render_lrc, store_to_file,
};

use crate::cli::{DumpCmd, Shape, WriteCmd};

pub fn run_write(cmd: WriteCmd, shape: Shape, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("write", input = cmd.input.as_str(), shape = ?shape);
    let _g = span.enter();

    let lrc = load(&cmd.input, cfg)?;
    log_summary(&lrc.expand(), cfg);

    match shape {
        Shape::Compressed => emit(&lrc.compress(), &cmd, shape, cfg),
        Shape::Expanded => emit(&lrc.decompress(), &cmd, shape, cfg),
    }
}

pub fn run_dump(cmd: DumpCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("dump", input = cmd.input.as_str(), mode = ?cmd.mode);
    let _g = span.enter();

    let lrc = load(&cmd.input, cfg)?;
    let array = lrc.get_array_by_lrc(cmd.mode.into());
    let json = serde_json::to_string_pretty(&array).context("failed serializing lyrics as JSON")?;
    println!("{json}");
    tracing::info!(entries = array.len(), "dumped lyrics");
    Ok(())
}

fn load(input: &str, cfg: &Config) -> Result<LrcTransformer> {
    let options = cfg.transform_options();
    let lrc = if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        LrcTransformer::from_content_with(buf, options)
    } else {
        LrcTransformer::open_with(input, options)
    }
    .with_context(|| format!("failed loading LRC from {input}"))?;

    tracing::info!(bytes = lrc.content().len(), "read input");
    if !lrc.diagnostics().is_empty() {
        tracing::warn!(
            skipped = lrc.diagnostics().len(),
            "some timestamps were malformed and skipped"
        );
    }
    Ok(lrc)
}

fn emit<M: LrcEntries>(map: &M, cmd: &WriteCmd, shape: Shape, cfg: &Config) -> Result<()> {
    if cmd.stdout {
        print!("{}", render_lrc(map)?);
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let out_path = derive_output_path(cmd, shape)?;
    let overwrite = cmd.overwrite || cfg.output.overwrite;
    if Path::new(&out_path).exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {out_path}"
        ));
    }

    let bytes = store_to_file(map, &out_path)?;
    tracing::info!(path = out_path.as_str(), bytes, "wrote output file");
    Ok(())
}

fn log_summary(expanded: &ExpandedMap, cfg: &Config) {
    tracing::info!(
        entries = expanded.len(),
        duration_ms = expanded.duration_ms(),
        "lyrics summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_line_samples;
        for (i, (ms, lyric)) in expanded.iter().take(n).enumerate() {
            tracing::debug!(idx = i, ms, chars = lyric.chars().count(), "line sample");
        }
    }
}

pub(crate) fn derive_output_path(cmd: &WriteCmd, shape: Shape) -> Result<String> {
    if let Some(o) = &cmd.output {
        return Ok(o.clone());
    }

    if cmd.input == "-" {
        return Err(anyhow!(
            "output path required when input is stdin and --stdout is not set"
        ));
    }

    let p = Path::new(&cmd.input);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad input filename"))?;

    let parent = p.parent().unwrap_or_else(|| Path::new("."));
    let out = parent.join(format!("{stem}.{}", shape.suffix()));
    Ok(out.to_string_lossy().to_string())
}
