//! Signed seconds-from-UTC offset codec (spec §4.2).
//!
//! Bounded to ±24h in practice (real UTC offsets never reach that), but
//! nothing here assumes a narrower range than `i32` in the encoder.

use crate::cursor::Cursor;
use crate::int;

/// How an offset should be rendered.
///
/// Mirrors the spec's three-character mode string (`sep`, `'*'`, `':'`)
/// without the C string encoding: `separator` is `sep`, `full_resolution` is
/// the `'*'` flag, `elide_zero` is the trailing `':'` flag (only meaningful
/// when `full_resolution` is set).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Mode {
    /// `None` for `%z` (`±HHMM`, no separator). `Some(b':')` for the `%…z`
    /// family.
    pub(crate) separator: Option<u8>,
    /// `%::z`/`%:::z`/`%E*z`: render minutes *and* seconds.
    pub(crate) full_resolution: bool,
    /// `%:::z`: elide `:SS` when zero, and further elide `:MM` when both
    /// minutes and seconds are zero.
    pub(crate) elide_zero: bool,
}

impl Mode {
    /// `%z`: `±HHMM`.
    pub(crate) const HHMM: Mode = Mode {
        separator: None,
        full_resolution: false,
        elide_zero: false,
    };
    /// `%:z`/`%Ez`: `±HH:MM`.
    pub(crate) const HH_MM: Mode = Mode {
        separator: Some(b':'),
        full_resolution: false,
        elide_zero: false,
    };
    /// `%::z`/`%E*z`: `±HH:MM:SS`.
    pub(crate) const HH_MM_SS: Mode = Mode {
        separator: Some(b':'),
        full_resolution: true,
        elide_zero: false,
    };
    /// `%:::z`: `±HH[:MM[:SS]]`, eliding zero trailing components.
    pub(crate) const HH_MM_SS_ELIDE: Mode = Mode {
        separator: Some(b':'),
        full_resolution: true,
        elide_zero: true,
    };
}

/// Encodes `offset_seconds` (bounded to ±24h) under `mode`, writing into
/// `buf` (must be at least 9 bytes: `+HH:MM:SS`) and returning the written
/// subslice.
pub(crate) fn encode<'a>(offset_seconds: i32, mode: Mode, buf: &'a mut [u8; 9]) -> &'a str {
    let magnitude = offset_seconds.unsigned_abs();
    let hours = magnitude / 3600;
    let minutes = (magnitude / 60) % 60;
    let seconds = magnitude % 60;

    let (show_minutes, show_seconds) = if !mode.full_resolution {
        (true, false)
    } else if !mode.elide_zero {
        (true, true)
    } else if seconds != 0 {
        (true, true)
    } else if minutes != 0 {
        (true, false)
    } else {
        (false, false)
    };

    // A negative offset with every shown component at zero still renders as
    // "+00:00": there is no meaningful negative zero offset.
    let negative = offset_seconds < 0 && (hours != 0 || (show_minutes && minutes != 0) || (show_seconds && seconds != 0));

    let mut pos = 0usize;
    buf[pos] = if negative { b'-' } else { b'+' };
    pos += 1;

    let mut two = [0u8; 2];
    int::encode2(hours, &mut two);
    buf[pos..pos + 2].copy_from_slice(&two);
    pos += 2;

    if show_minutes {
        if let Some(sep) = mode.separator {
            buf[pos] = sep;
            pos += 1;
        }
        int::encode2(minutes, &mut two);
        buf[pos..pos + 2].copy_from_slice(&two);
        pos += 2;
    }

    if show_seconds {
        if let Some(sep) = mode.separator {
            buf[pos] = sep;
            pos += 1;
        }
        int::encode2(seconds, &mut two);
        buf[pos..pos + 2].copy_from_slice(&two);
        pos += 2;
    }

    core::str::from_utf8(&buf[..pos]).expect("offset rendering is ASCII")
}

/// Decodes a signed offset in seconds from the front of `cursor`.
///
/// Accepts a literal `Z` for zero, otherwise a required sign, two hour
/// digits in `00..=23`, then an optional `sep`-qualified two-digit minute
/// field, then an optional `sep`-qualified two-digit second field.
pub(crate) fn decode(cursor: &mut Cursor<'_>, separator: Option<u8>) -> Option<i32> {
    let mut probe = *cursor;

    if probe.consume(b'Z') {
        *cursor = probe;
        return Some(0);
    }

    let negative = if probe.consume(b'-') {
        true
    } else if probe.consume(b'+') {
        false
    } else {
        return None;
    };

    let hours = int::decode2(&mut probe, 0, 23)?;
    let mut total = i32::try_from(hours).ok()? * 3600;

    if let Some(minutes) = decode_component(&mut probe, separator, 0, 59) {
        total += minutes * 60;

        if let Some(seconds) = decode_component(&mut probe, separator, 0, 59) {
            total += seconds;
        }
    }

    *cursor = probe;
    Some(if negative { -total } else { total })
}

/// Decodes an optional `sep`-qualified two-digit component, leaving the
/// cursor untouched if it is absent.
fn decode_component(cursor: &mut Cursor<'_>, separator: Option<u8>, lo: u32, hi: u32) -> Option<i32> {
    let mut probe = *cursor;
    if let Some(sep) = separator {
        if !probe.consume(sep) {
            return None;
        }
    }
    let value = int::decode2(&mut probe, lo, hi)?;
    *cursor = probe;
    Some(value as i32)
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::string::String;

    use super::*;

    fn enc(offset_seconds: i32, mode: Mode) -> String {
        let mut buf = [0u8; 9];
        encode(offset_seconds, mode, &mut buf).to_owned()
    }

    #[test]
    fn test_offset_shape_table() {
        let cases: [(i32, &str, &str, &str, &str); 6] = [
            (0, "+0000", "+00:00", "+00:00:00", "+00"),
            (3600, "+0100", "+01:00", "+01:00:00", "+01"),
            (-3600, "-0100", "-01:00", "-01:00:00", "-01"),
            (5400, "+0130", "+01:30", "+01:30:00", "+01:30"),
            (5445, "+0130", "+01:30", "+01:30:45", "+01:30:45"),
            (-5445, "-0130", "-01:30", "-01:30:45", "-01:30:45"),
        ];

        for (seconds, z, colon_z, full_z, elide_z) in cases {
            assert_eq!(enc(seconds, Mode::HHMM), z, "HHMM for {seconds}");
            assert_eq!(enc(seconds, Mode::HH_MM), colon_z, "HH_MM for {seconds}");
            assert_eq!(enc(seconds, Mode::HH_MM_SS), full_z, "HH_MM_SS for {seconds}");
            assert_eq!(
                enc(seconds, Mode::HH_MM_SS_ELIDE),
                elide_z,
                "HH_MM_SS_ELIDE for {seconds}"
            );
        }
    }

    #[test]
    fn test_negative_offset_rendering_as_zero_forces_positive_sign() {
        // A slightly-negative offset that rounds to all-zero shown fields
        // must never render as "-00:00".
        assert_eq!(enc(-10, Mode::HH_MM_SS_ELIDE), "+00");
    }

    #[test]
    fn test_decode_roundtrip() {
        for seconds in [0, 3600, -3600, 5400, 5445, -5445] {
            for (mode, sep) in [
                (Mode::HHMM, None),
                (Mode::HH_MM, Some(b':')),
                (Mode::HH_MM_SS, Some(b':')),
            ] {
                let rendered = enc(seconds, mode);
                let mut cursor = Cursor::new(rendered.as_bytes());
                assert_eq!(decode(&mut cursor, sep), Some(seconds), "{rendered}");
                assert!(cursor.is_empty());
            }
        }
    }

    #[test]
    fn test_decode_z_literal() {
        let mut cursor = Cursor::new(b"Zrest");
        assert_eq!(decode(&mut cursor, Some(b':')), Some(0));
        assert_eq!(cursor.remaining(), b"rest");
    }

    #[test]
    fn test_decode_requires_sign() {
        let mut cursor = Cursor::new(b"0000");
        assert_eq!(decode(&mut cursor, None), None);
    }

    #[test]
    fn test_decode_shorter_trailing_component_absent() {
        let mut cursor = Cursor::new(b"+05rest");
        assert_eq!(decode(&mut cursor, Some(b':')), Some(5 * 3600));
        assert_eq!(cursor.remaining(), b"rest");
    }

    #[test]
    fn test_decode_malformed_minute_fails_whole_decode() {
        // A trailing separator without two valid digits after it is simply
        // not consumed; the hour-only value still decodes.
        let mut cursor = Cursor::new(b"+05:6x");
        assert_eq!(decode(&mut cursor, Some(b':')), Some(5 * 3600));
        assert_eq!(cursor.remaining(), b":6x");
    }

    #[quickcheck_macros::quickcheck]
    fn prop_encode_decode_round_trip(raw_seconds: i32) -> bool {
        let offset_seconds = raw_seconds.rem_euclid(2 * 86_399) - 86_399;
        [
            (Mode::HHMM, None),
            (Mode::HH_MM, Some(b':')),
            (Mode::HH_MM_SS, Some(b':')),
            (Mode::HH_MM_SS_ELIDE, Some(b':')),
        ]
        .into_iter()
        .all(|(mode, sep)| {
            let rendered = enc(offset_seconds, mode);
            let mut cursor = Cursor::new(rendered.as_bytes());
            decode(&mut cursor, sep) == Some(offset_seconds) && cursor.is_empty()
        })
    }
}
