//! Parse, compress, expand and re-serialize LRC lyric files.
//!
//! ```no_run
//! use lrc_transformer::{KeyMode, LrcTransformer};
//!
//! let lrc = LrcTransformer::open("song.lrc")?;
//! let compressed = lrc.compress();
//! LrcTransformer::store_to_file(&compressed, "song.compressed.lrc")?;
//! let by_ms = lrc.get_array_by_lrc(KeyMode::Msecond);
//! # let _ = by_ms;
//! # Ok::<(), lrc_transformer::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod model;
pub mod transform;

pub use error::{Error, ParseError, Result};
pub use formats::lrc::{Diagnostic, render_lrc, store_to_file};
pub use formats::time::{MAX_TIMESTAMP_MS, format_time, format_time_checked, parse_timestamp};
pub use model::{CompressedMap, ExpandedMap, KeyMode, LrcEntries, LyricArray, Millis, NormalMap};
pub use transform::{LrcTransformer, TransformOptions, compress_expanded};
