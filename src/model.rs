use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::{
    error::ParseError,
    formats::time::{format_time, format_time_checked},
};

/// Offset from the start of the track, in milliseconds.
pub type Millis = u64;

/// Key shape requested from [`crate::LrcTransformer::get_array_by_lrc`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Keys are `MM:SS.CC` text.
    #[default]
    Normal,
    /// Keys are integer milliseconds.
    Msecond,
}

/// One timestamp per lyric, keyed and ordered by milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpandedMap(BTreeMap<Millis, String>);

impl ExpandedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lyric previously stored at `ms`, if any.
    pub fn insert(&mut self, ms: Millis, lyric: impl Into<String>) -> Option<String> {
        self.0.insert(ms, lyric.into())
    }

    pub fn get(&self, ms: Millis) -> Option<&str> {
        self.0.get(&ms).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Millis, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn duration_ms(&self) -> Millis {
        self.0.keys().next_back().copied().unwrap_or(0)
    }

    /// Re-key every entry by its `MM:SS.CC` text.
    pub fn to_normal(&self) -> NormalMap {
        NormalMap(
            self.iter()
                .map(|(ms, lyric)| (format_time(ms), lyric.to_string()))
                .collect(),
        )
    }
}

impl FromIterator<(Millis, String)> for ExpandedMap {
    fn from_iter<I: IntoIterator<Item = (Millis, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One timestamp per lyric, keyed by `MM:SS.CC` text in ascending time order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalMap(Vec<(String, String)>);

impl NormalMap {
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == raw)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for NormalMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Lyric text mapped to the concatenated `[MM:SS.CC]` tags it is shown at.
///
/// Lyrics are unique keys: two lines with identical text at different times
/// end up under one entry. Entries keep the order in which each lyric first
/// appears on the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedMap(Vec<CompressedLine>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressedLine {
    pub lyric: String,
    pub timestamps: String,
}

impl CompressedMap {
    pub(crate) fn push(&mut self, lyric: String, timestamps: String) {
        self.0.push(CompressedLine { lyric, timestamps });
    }

    /// Bracketed timestamps stored for `lyric`.
    pub fn get(&self, lyric: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|l| l.lyric == lyric)
            .map(|l| l.timestamps.as_str())
    }

    pub fn lines(&self) -> &[CompressedLine] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CompressedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|l| (&l.lyric, &l.timestamps)))
    }
}

/// Result of [`crate::LrcTransformer::get_array_by_lrc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LyricArray {
    Normal(NormalMap),
    Msecond(ExpandedMap),
}

impl LyricArray {
    pub fn len(&self) -> usize {
        match self {
            LyricArray::Normal(m) => m.len(),
            LyricArray::Msecond(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A mapping the serializer can render: timing key first, lyric second.
///
/// The timing key is either a bare `MM:SS.CC` or a run of bracketed tags;
/// the serializer tells them apart by length.
pub trait LrcEntries {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError>;
}

impl LrcEntries for NormalMap {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError> {
        Ok(self.iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Fails on times past `24:59.99`, which have no `MM:SS.CC` form.
impl LrcEntries for ExpandedMap {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError> {
        self.iter()
            .map(|(ms, v)| Ok((format_time_checked(ms)?, v)))
            .collect()
    }
}

impl LrcEntries for CompressedMap {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError> {
        Ok(self
            .0
            .iter()
            .map(|l| (l.timestamps.clone(), l.lyric.as_str()))
            .collect())
    }
}

impl LrcEntries for LyricArray {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError> {
        match self {
            LyricArray::Normal(m) => m.lrc_entries(),
            LyricArray::Msecond(m) => m.lrc_entries(),
        }
    }
}

impl LrcEntries for [(String, String)] {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError> {
        Ok(self.iter().map(|(k, v)| (k.clone(), v.as_str())).collect())
    }
}

impl LrcEntries for Vec<(String, String)> {
    fn lrc_entries(&self) -> Result<Vec<(String, &str)>, ParseError> {
        self.as_slice().lrc_entries()
    }
}

impl FromIterator<(String, String)> for NormalMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
