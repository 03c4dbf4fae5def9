use crate::{error::ParseError, model::Millis};

/// Length of a textual `MM:SS.CC` timestamp.
pub const RAW_TIMESTAMP_LEN: usize = 8;

const MAX_MINUTES: u32 = 24;
const MAX_SECONDS: u32 = 59;

/// Latest time a `MM:SS.CC` timestamp can express (`24:59.99`).
pub const MAX_TIMESTAMP_MS: Millis = 24 * 60_000 + 59_990;

/// Parse `MM:SS.CC` (optionally wrapped in brackets) into milliseconds.
pub fn parse_timestamp(s: &str) -> Result<Millis, ParseError> {
    let t = s.trim();
    let inner = t
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(t);

    let b = inner.as_bytes();
    if b.len() != RAW_TIMESTAMP_LEN || b[2] != b':' || b[5] != b'.' {
        return Err(ParseError::MalformedTimestamp(t.to_string()));
    }

    let min = two_digits(b, 0).ok_or_else(|| ParseError::MalformedTimestamp(t.to_string()))?;
    let sec = two_digits(b, 3).ok_or_else(|| ParseError::MalformedTimestamp(t.to_string()))?;
    let cs = two_digits(b, 6).ok_or_else(|| ParseError::MalformedTimestamp(t.to_string()))?;

    check_range("minutes", min, MAX_MINUTES)?;
    check_range("seconds", sec, MAX_SECONDS)?;

    Ok(to_ms(min, sec, cs))
}

/// Validate one bracketed `[MM:SS.CC]` token starting at `pos`.
///
/// Returns the token's milliseconds and the index just past its closing
/// bracket. `Ok(None)` means there is no timestamp-shaped token at `pos`
/// at all (e.g. a `[ti:...]` tag), as opposed to a malformed one.
pub fn scan_timestamp(b: &[u8], pos: usize) -> Result<Option<(Millis, usize)>, ParseError> {
    if b.get(pos) != Some(&b'[') || !b.get(pos + 1).is_some_and(u8::is_ascii_digit) {
        return Ok(None);
    }

    let end = pos + RAW_TIMESTAMP_LEN + 1;
    if b.get(end) != Some(&b']') {
        let close = b[pos..]
            .iter()
            .position(|&c| c == b']')
            .map_or(b.len(), |i| pos + i + 1);
        let token = String::from_utf8_lossy(&b[pos..close]).into_owned();
        return Err(ParseError::MalformedTimestamp(token));
    }

    // Both ends are ASCII brackets, so this slice sits on char boundaries.
    let token = String::from_utf8_lossy(&b[pos..=end]);
    let ms = parse_timestamp(&token)?;
    Ok(Some((ms, end + 1)))
}

/// Render milliseconds as `MM:SS.CC`.
///
/// The sub-second remainder is rendered as three digits and cut to the
/// first two, so anything below a centisecond is truncated.
pub fn format_time(ms: Millis) -> String {
    let min = ms / 60_000;
    let sec = (ms - min * 60_000) / 1000;
    let rem = (ms - min * 60_000 - sec * 1000) % 1000;

    let rem = format!("{rem:03}");
    format!("{min:02}:{sec:02}.{}", &rem[..2])
}

/// Like [`format_time`], but refuses times that would not parse back.
pub fn format_time_checked(ms: Millis) -> Result<String, ParseError> {
    let min = ms / 60_000;
    if min > Millis::from(MAX_MINUTES) {
        let min = u32::try_from(min).unwrap_or(u32::MAX);
        return Err(ParseError::OutOfRange {
            field: "minutes",
            value: min,
            max: MAX_MINUTES,
        });
    }
    Ok(format_time(ms))
}

/// Wrap a textual timestamp in brackets.
pub fn bracket(raw: &str) -> String {
    format!("[{raw}]")
}

fn to_ms(min: u32, sec: u32, cs: u32) -> Millis {
    Millis::from(min) * 60_000 + Millis::from(sec) * 1000 + Millis::from(cs) * 10
}

fn two_digits(b: &[u8], at: usize) -> Option<u32> {
    let hi = b.get(at).filter(|c| c.is_ascii_digit())?;
    let lo = b.get(at + 1).filter(|c| c.is_ascii_digit())?;
    Some(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), ParseError> {
    if value > max {
        return Err(ParseError::OutOfRange { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_bracketed() {
        assert_eq!(parse_timestamp("00:01.00").unwrap(), 1000);
        assert_eq!(parse_timestamp("[01:02.03]").unwrap(), 62_030);
        assert_eq!(parse_timestamp(" 24:59.99 ").unwrap(), 24 * 60_000 + 59_990);
    }

    #[test]
    fn rejects_bad_shapes() {
        for s in ["", "0:01.00", "00:01,00", "00-01.00", "00:01.0a", "[00:01.00", "00:01.000"] {
            assert!(
                matches!(parse_timestamp(s), Err(ParseError::MalformedTimestamp(_))),
                "{s} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            parse_timestamp("25:00.00").unwrap_err(),
            ParseError::OutOfRange { field: "minutes", value: 25, max: 24 }
        );
        assert_eq!(
            parse_timestamp("00:60.00").unwrap_err(),
            ParseError::OutOfRange { field: "seconds", value: 60, max: 59 }
        );
    }

    #[test]
    fn format_pads_fields() {
        assert_eq!(format_time(0), "00:00.00");
        assert_eq!(format_time(1000), "00:01.00");
        assert_eq!(format_time(62_030), "01:02.03");
        assert_eq!(format_time(24 * 60_000 + 59_990), "24:59.99");
    }

    #[test]
    fn format_truncates_sub_centisecond_remainders() {
        assert_eq!(format_time(1005), "00:01.00");
        assert_eq!(format_time(1009), "00:01.00");
        assert_eq!(format_time(1099), "00:01.09");
        assert_eq!(format_time(1100), "00:01.10");
        assert_eq!(format_time(1999), "00:01.99");
    }

    #[test]
    fn codec_round_trips_every_centisecond_in_a_second() {
        for cs in 0..100 {
            let s = format!("03:07.{cs:02}");
            assert_eq!(format_time(parse_timestamp(&s).unwrap()), s);
        }
    }

    #[test]
    fn checked_format_stops_at_the_last_expressible_time() {
        assert_eq!(format_time_checked(MAX_TIMESTAMP_MS).unwrap(), "24:59.99");
        assert_eq!(format_time_checked(MAX_TIMESTAMP_MS + 9).unwrap(), "24:59.99");
        assert_eq!(
            format_time_checked(6_000_000).unwrap_err(),
            ParseError::OutOfRange { field: "minutes", value: 100, max: 24 }
        );
        assert!(format_time_checked(25 * 60_000).is_err());
    }

    #[test]
    fn scan_distinguishes_tags_from_bad_timestamps() {
        let line = b"[ti:Song][00:61.00][00:02.50]x";
        assert_eq!(scan_timestamp(line, 0).unwrap(), None);
        assert!(matches!(scan_timestamp(line, 9), Err(ParseError::OutOfRange { .. })));
        assert_eq!(scan_timestamp(line, 19).unwrap(), Some((2500, 29)));
    }

    #[test]
    fn scan_reports_whole_token_when_too_long() {
        let err = scan_timestamp(b"[00:01.005]x", 0).unwrap_err();
        assert_eq!(err, ParseError::MalformedTimestamp("[00:01.005]".to_string()));
    }
}
