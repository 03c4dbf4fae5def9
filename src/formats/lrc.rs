use std::{fs, path::Path};

use crate::{
    error::{Error, ParseError, Result},
    formats::time::{RAW_TIMESTAMP_LEN, scan_timestamp},
    model::LrcEntries,
};

/// A run of bracketed timestamps and the lyric text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup<'a> {
    pub timestamps: &'a str,
    pub lyric: &'a str,
}

/// A timestamp token skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the source text.
    pub line: usize,
    pub error: ParseError,
}

/// Split raw LRC text into timestamp groups and lyric text.
///
/// Each line contributes at most one group: the first maximal run of valid
/// `[MM:SS.CC]` tokens, followed by the rest of the line. Lines without such
/// a run are dropped. Tokens that look like timestamps but fail validation
/// are returned as diagnostics; one that cuts a run short stays in the lyric.
///
/// Nothing is logged here, callers decide how loudly to report diagnostics.
pub fn parse_lrc_text(raw: &str) -> (Vec<LineGroup<'_>>, Vec<Diagnostic>) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut groups = Vec::new();
    let mut diagnostics = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        match scan_line(line) {
            (Some(group), errors) => {
                groups.push(group);
                push_diagnostics(&mut diagnostics, line_no + 1, errors);
            }
            (None, errors) => {
                if errors.is_empty() && !line.trim().is_empty() {
                    tracing::debug!(line = line_no + 1, "skipping line without timestamps");
                }
                push_diagnostics(&mut diagnostics, line_no + 1, errors);
            }
        }
    }

    (groups, diagnostics)
}

fn push_diagnostics(out: &mut Vec<Diagnostic>, line: usize, errors: Vec<ParseError>) {
    out.extend(errors.into_iter().map(|error| Diagnostic { line, error }));
}

fn scan_line(line: &str) -> (Option<LineGroup<'_>>, Vec<ParseError>) {
    let b = line.as_bytes();
    let mut errors = Vec::new();

    for (start, _) in line.match_indices('[') {
        match scan_timestamp(b, start) {
            Ok(Some((_, mut end))) => {
                loop {
                    match scan_timestamp(b, end) {
                        Ok(Some((_, next))) => end = next,
                        Ok(None) => break,
                        Err(e) => {
                            errors.push(e);
                            break;
                        }
                    }
                }
                let group = LineGroup {
                    timestamps: &line[start..end],
                    lyric: &line[end..],
                };
                return (Some(group), errors);
            }
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }

    (None, errors)
}

/// Every bracketed timestamp in `group`, in order of appearance.
pub fn extract_timestamps(group: &str) -> Vec<&str> {
    let b = group.as_bytes();
    group
        .match_indices('[')
        .filter_map(|(start, _)| match scan_timestamp(b, start) {
            Ok(Some((_, end))) => Some(&group[start + 1..end - 1]),
            _ => None,
        })
        .collect()
}

/// True when any timing key is longer than a bare `MM:SS.CC`, meaning the
/// keys are already runs of bracketed tags.
pub fn is_compressed(entries: &[(String, &str)]) -> bool {
    entries.iter().any(|(k, _)| k.len() > RAW_TIMESTAMP_LEN)
}

/// Render a mapping as LRC text, lines joined by `\n` with no trailing newline.
pub fn render_lrc<M: LrcEntries + ?Sized>(map: &M) -> Result<String> {
    let entries = map.lrc_entries()?;
    let compressed = is_compressed(&entries);

    Ok(entries
        .iter()
        .map(|(k, v)| {
            if compressed {
                format!("{k}{v}")
            } else {
                format!("[{k}]{v}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Serialize `map` to `path`, returning the number of bytes written.
pub fn store_to_file<M: LrcEntries + ?Sized>(map: &M, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let data = render_lrc(map)?;
    fs::write(path, &data).map_err(|e| Error::io(e, path))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "stored LRC file");
    Ok(data.len())
}
