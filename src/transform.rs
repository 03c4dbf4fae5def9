use std::{fs, path::Path};

use crate::{
    error::{Error, Result},
    formats::{
        lrc::{self, Diagnostic},
        time::{MAX_TIMESTAMP_MS, bracket, format_time, parse_timestamp},
    },
    model::{CompressedMap, ExpandedMap, KeyMode, LrcEntries, LyricArray, Millis, NormalMap},
};

/// Knobs applied while expanding and compressing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Shift applied to every timestamp; results clamp to `00:00.00..=24:59.99`.
    pub timestamp_offset_ms: i64,
    pub trim_lyrics: bool,
    /// Reproduce the legacy compressor, which stopped collecting a lyric's
    /// timestamps at `00:00.00` and dropped that lyric.
    pub zero_timestamp_breaks_compression: bool,
}

/// Owns one LRC source and derives every view of it on demand.
#[derive(Debug, Clone)]
pub struct LrcTransformer {
    content: String,
    options: TransformOptions,
    diagnostics: Vec<Diagnostic>,
}

impl LrcTransformer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, TransformOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: TransformOptions) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::Init("empty LRC file path".to_string()));
        }

        let bytes = fs::read(path).map_err(|e| Error::io(e, path))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read LRC source");

        let content = String::from_utf8(bytes).map_err(|_| Error::Encoding {
            path: Some(path.to_path_buf()),
        })?;
        Self::from_content_with(content, options)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let content = String::from_utf8(bytes).map_err(|_| Error::Encoding { path: None })?;
        Self::from_content(content)
    }

    pub fn from_content(content: impl Into<String>) -> Result<Self> {
        Self::from_content_with(content, TransformOptions::default())
    }

    pub fn from_content_with(content: impl Into<String>, options: TransformOptions) -> Result<Self> {
        let content = content.into();
        if content.is_empty() {
            return Err(Error::Init("LRC content is empty".to_string()));
        }

        let (_, diagnostics) = lrc::parse_lrc_text(&content);
        for d in &diagnostics {
            tracing::warn!(line = d.line, error = %d.error, "skipping malformed timestamp");
        }
        Ok(Self {
            content,
            options,
            diagnostics,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Timestamp tokens that were skipped while parsing the source.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Lyrics keyed by `MM:SS.CC` text or by milliseconds, ascending.
    pub fn get_array_by_lrc(&self, mode: KeyMode) -> LyricArray {
        match mode {
            KeyMode::Normal => LyricArray::Normal(self.decompress()),
            KeyMode::Msecond => LyricArray::Msecond(self.expand()),
        }
    }

    /// One entry per timestamp, keyed by milliseconds.
    ///
    /// Timestamps that land on the same millisecond keep the lyric parsed last.
    pub fn expand(&self) -> ExpandedMap {
        let span = tracing::debug_span!("expand");
        let _g = span.enter();

        let (groups, _) = lrc::parse_lrc_text(&self.content);
        let mut out = ExpandedMap::new();

        for group in &groups {
            let lyric = if self.options.trim_lyrics {
                group.lyric.trim()
            } else {
                group.lyric
            };

            for raw in lrc::extract_timestamps(group.timestamps) {
                let Ok(ms) = parse_timestamp(raw) else {
                    continue;
                };
                let ms = shift(ms, self.options.timestamp_offset_ms);
                if let Some(prev) = out.insert(ms, lyric) {
                    tracing::debug!(at = %format_time(ms), replaced = prev.as_str(), "timestamp collision");
                }
            }
        }

        tracing::debug!(groups = groups.len(), entries = out.len(), "expanded");
        out
    }

    /// One entry per timestamp, keyed by `MM:SS.CC` text, ascending.
    pub fn decompress(&self) -> NormalMap {
        self.expand().to_normal()
    }

    /// One entry per distinct lyric text with all of its timestamps.
    pub fn compress(&self) -> CompressedMap {
        compress_expanded(&self.expand(), &self.options)
    }

    /// Render any mapping as LRC text.
    pub fn render<M: LrcEntries + ?Sized>(map: &M) -> Result<String> {
        lrc::render_lrc(map)
    }

    /// Serialize `map` to `path`, returning the number of bytes written.
    pub fn store_to_file<M: LrcEntries + ?Sized>(map: &M, path: impl AsRef<Path>) -> Result<usize> {
        lrc::store_to_file(map, path)
    }
}

/// Group an expanded mapping by lyric text.
///
/// Lyrics come out in order of first appearance; each lyric's tags are in
/// ascending time order.
pub fn compress_expanded(expanded: &ExpandedMap, options: &TransformOptions) -> CompressedMap {
    let mut order: Vec<&str> = Vec::new();
    for (_, lyric) in expanded.iter() {
        if !order.contains(&lyric) {
            order.push(lyric);
        }
    }

    let mut working: Vec<Option<(Millis, &str)>> = expanded.iter().map(Some).collect();
    let mut out = CompressedMap::default();

    for lyric in order {
        let mut tags = String::new();

        while let Some(slot) = working
            .iter_mut()
            .find(|slot| matches!(slot, Some((_, l)) if *l == lyric))
        {
            let Some((ms, _)) = slot.take() else {
                break;
            };
            if ms == 0 && options.zero_timestamp_breaks_compression {
                break;
            }
            tags.push_str(&bracket(&format_time(ms)));
        }

        if tags.is_empty() {
            tracing::warn!(lyric, "lyric dropped from compression");
            continue;
        }
        out.push(lyric.to_string(), tags);
    }

    out
}

fn shift(ms: Millis, offset: i64) -> Millis {
    let shifted = if offset >= 0 {
        ms.saturating_add(offset.unsigned_abs())
    } else {
        ms.saturating_sub(offset.unsigned_abs())
    };
    if shifted > MAX_TIMESTAMP_MS {
        tracing::debug!(ms, offset, "offset timestamp clamped to 24:59.99");
    }
    shifted.min(MAX_TIMESTAMP_MS)
}
