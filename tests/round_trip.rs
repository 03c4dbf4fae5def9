//! File-level round trips through `LrcTransformer`.

use std::fs;

use lrc_transformer::{
    Error, ExpandedMap, KeyMode, LrcTransformer, LyricArray, TransformOptions, compress_expanded,
    parse_timestamp,
};

const SONG: &str = "\u{feff}[ti:Test Song]
[ar:Nobody]
[00:00.00]Intro
[00:12.30][01:02.40]Chorus line
[00:20.05]Verse one
[00:45.99]Bridge
[01:30.00][00:12.30]Chorus line
[02:00.00]
";

#[test]
fn open_rejects_empty_path_and_empty_file() {
    assert!(matches!(LrcTransformer::open(""), Err(Error::Init(_))));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.lrc");
    fs::write(&path, "").unwrap();
    assert!(matches!(LrcTransformer::open(&path), Err(Error::Init(_))));
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LrcTransformer::open(dir.path().join("missing.lrc")).unwrap_err();
    assert!(matches!(err, Error::Io { path: Some(_), .. }));
}

#[test]
fn decompress_orders_and_dedupes_timestamps() {
    let lrc = LrcTransformer::from_content(SONG).unwrap();
    let normal = lrc.decompress();

    assert_eq!(
        normal.keys().collect::<Vec<_>>(),
        vec![
            "00:00.00", "00:12.30", "00:20.05", "00:45.99", "01:02.40", "01:30.00", "02:00.00",
        ]
    );
    assert_eq!(normal.get("00:20.05"), Some("Verse one"));
    assert_eq!(normal.get("02:00.00"), Some(""));

    let ms: Vec<_> = normal.keys().map(|k| parse_timestamp(k).unwrap()).collect();
    assert!(ms.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn msecond_view_matches_normal_view() {
    let lrc = LrcTransformer::from_content(SONG).unwrap();
    let LyricArray::Msecond(by_ms) = lrc.get_array_by_lrc(KeyMode::Msecond) else {
        panic!("expected millisecond keys");
    };
    let LyricArray::Normal(by_text) = lrc.get_array_by_lrc(KeyMode::Normal) else {
        panic!("expected text keys");
    };
    assert_eq!(by_ms.len(), by_text.len());
    assert_eq!(by_ms.get(62_400), Some("Chorus line"));
    assert_eq!(by_ms.to_normal(), by_text);
}

#[test]
fn compress_groups_every_timestamp_of_a_lyric() {
    let lrc = LrcTransformer::from_content(SONG).unwrap();
    let c = lrc.compress();

    assert_eq!(
        c.lines().iter().map(|l| l.lyric.as_str()).collect::<Vec<_>>(),
        vec!["Intro", "Chorus line", "Verse one", "Bridge", ""]
    );
    assert_eq!(c.get("Chorus line"), Some("[00:12.30][01:02.40][01:30.00]"));
    assert_eq!(c.get("Intro"), Some("[00:00.00]"));
}

#[test]
fn stored_files_reload_to_the_same_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("song.lrc");
    fs::write(&src, SONG).unwrap();

    let lrc = LrcTransformer::open(&src).unwrap();
    let expected = lrc.decompress();

    let packed = dir.path().join("packed.lrc");
    let n = LrcTransformer::store_to_file(&lrc.compress(), &packed).unwrap();
    let text = fs::read_to_string(&packed).unwrap();
    assert_eq!(n, text.len());
    assert!(text.starts_with("[00:00.00]Intro\n[00:12.30][01:02.40][01:30.00]Chorus line"));
    assert!(!text.ends_with('\n'));
    assert_eq!(LrcTransformer::open(&packed).unwrap().decompress(), expected);

    let flat = dir.path().join("flat.lrc");
    LrcTransformer::store_to_file(&expected, &flat).unwrap();
    let text = fs::read_to_string(&flat).unwrap();
    assert_eq!(text.lines().count(), expected.len());
    assert_eq!(LrcTransformer::open(&flat).unwrap().decompress(), expected);
}

#[test]
fn millisecond_maps_store_as_valid_lrc() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ms.lrc");
    let m: ExpandedMap = [(1000, "Hello".to_string()), (5000, "Hello".to_string())]
        .into_iter()
        .collect();

    LrcTransformer::store_to_file(&m, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[00:01.00]Hello\n[00:05.00]Hello");

    let c = compress_expanded(&m, &TransformOptions::default());
    assert_eq!(c.get("Hello"), Some("[00:01.00][00:05.00]"));
}

#[test]
fn legacy_zero_timestamp_mode_loses_the_intro() {
    let opts = TransformOptions {
        zero_timestamp_breaks_compression: true,
        ..Default::default()
    };
    let lrc = LrcTransformer::from_content_with(SONG, opts).unwrap();
    let c = lrc.compress();
    assert_eq!(c.get("Intro"), None);
    assert_eq!(c.len(), 4);
}
