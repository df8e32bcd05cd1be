//! The parse engine (spec §4.8): walks the format string and the input
//! string in lockstep, using the same internal codecs and broken-down-time
//! delegate the format engine renders with, then folds the collected fields
//! into a single civil second and resolves it against a zone.

use crate::broken_down::{self, PartialBrokenDownTime};
use crate::civil::{CivilSecond, Femtoseconds, Instant};
use crate::cursor::Cursor;
use crate::error::Error;
use crate::format::Modifier;
use crate::zone::Zone;
use crate::{int, offset, subsecond};

/// Accumulates the fields a parse walk has collected so far.
#[derive(Debug, Default)]
struct ParseState {
    partial: PartialBrokenDownTime,
    offset_seconds: Option<i32>,
    percent_s: Option<i64>,
    subsecond_fs: i64,
    /// Set by `%I`/`%l`/`%r` (and cleared by `%H`/`%R`/`%T`/`%X`/`%c`):
    /// whether `partial.hour` is a 12-hour value needing `%p`/`%P`
    /// disambiguation, or already an absolute 24-hour value.
    twelve_hour: bool,
}

/// Parses `input` under `fmt` in `zone`, returning the instant and
/// femtosecond fraction it names.
pub fn parse(fmt: &str, input: &str, zone: &impl Zone) -> Result<(Instant, Femtoseconds), Error> {
    let mut fmt_cursor = Cursor::new(fmt.as_bytes());
    let mut in_cursor = Cursor::new(input.as_bytes());
    let mut state = ParseState::default();

    loop {
        match fmt_cursor.peek() {
            None => break,
            Some(b) if b.is_ascii_whitespace() => {
                fmt_cursor.strip_leading_whitespace();
                in_cursor.strip_leading_whitespace();
            }
            Some(b'%') => {
                fmt_cursor.next();

                // A run of `%`s: every matched pair requires one literal `%`
                // in the input.
                if fmt_cursor.consume(b'%') {
                    if !in_cursor.consume(b'%') {
                        return Err(Error::FailedToParse);
                    }
                    continue;
                }

                let modifier = if fmt_cursor.consume(b'E') {
                    Modifier::Extended
                } else if fmt_cursor.consume(b'O') {
                    Modifier::Origin
                } else {
                    Modifier::None
                };

                parse_one(&mut fmt_cursor, &mut in_cursor, modifier, &mut state)?;
            }
            Some(b) => {
                fmt_cursor.next();
                if in_cursor.next() != Some(b) {
                    return Err(Error::FailedToParse);
                }
            }
        }
    }

    in_cursor.strip_leading_whitespace();
    if !in_cursor.is_empty() {
        return Err(Error::TrailingInput);
    }

    finalize(state, zone)
}

/// Dispatches a single specifier (the format cursor is positioned just past
/// any `E`/`O` modifier), consuming from `in_cursor` and folding the result
/// into `state`.
fn parse_one(
    fmt_cursor: &mut Cursor<'_>,
    in_cursor: &mut Cursor<'_>,
    modifier: Modifier,
    state: &mut ParseState,
) -> Result<(), Error> {
    // `%E4Y` — exactly four signed digits.
    if modifier.is_extended() && fmt_cursor.has_prefix(b"4Y") {
        fmt_cursor.consume_prefix(b"4Y");
        state.partial.year = Some(decode_exact(in_cursor, 4, -999, 9999)?);
        return Ok(());
    }

    // `%E*S` / `%E*f` / `%E#S` / `%E#f` — subsecond-qualified seconds. The
    // width digits only constrain rendering, so parsing treats `*` and any
    // explicit width identically.
    if modifier.is_extended() {
        if fmt_cursor.consume(b'*') {
            if fmt_cursor.consume(b'S') {
                return parse_seconds_with_fraction(in_cursor, state);
            }
            if fmt_cursor.consume(b'f') {
                return parse_bare_fraction(in_cursor, state);
            }
        }

        let width_start = *fmt_cursor;
        let width_digits = fmt_cursor.read_while(u8::is_ascii_digit);
        if !width_digits.is_empty() {
            if fmt_cursor.consume(b'S') {
                return parse_seconds_with_fraction(in_cursor, state);
            }
            if fmt_cursor.consume(b'f') {
                return parse_bare_fraction(in_cursor, state);
            }
        }
        *fmt_cursor = width_start;
    }

    // Offset family: `%z`, `%:z`, `%::z`, `%:::z`, `%Ez`, `%E*z`.
    if let Some(separator) = offset_separator(fmt_cursor, modifier) {
        let offset_seconds = offset::decode(in_cursor, separator).ok_or(Error::FailedToParse)?;
        state.offset_seconds = Some(offset_seconds);
        return Ok(());
    }

    let Some(spec) = fmt_cursor.next() else {
        // The format ended right after `%`, or right after a lone `%E`/`%O`
        // modifier with no following specifier: match what would have been
        // consumed literally.
        return consume_literal(in_cursor, modifier, None);
    };

    match spec {
        b'Y' => {
            state.partial.year = Some(decode(in_cursor, 0, i64::MIN, i64::MAX)?);
            Ok(())
        }
        b'm' => {
            state.partial.month = Some(decode(in_cursor, 2, 1, 12)? as u8);
            Ok(())
        }
        b'd' => {
            state.partial.day = Some(decode(in_cursor, 2, 1, 31)? as u8);
            Ok(())
        }
        b'e' => {
            in_cursor.consume(b' ');
            state.partial.day = Some(decode(in_cursor, 2, 1, 31)? as u8);
            Ok(())
        }
        b'H' => {
            state.partial.hour = Some(decode(in_cursor, 2, 0, 23)? as u8);
            state.twelve_hour = false;
            Ok(())
        }
        b'M' => {
            state.partial.minute = Some(decode(in_cursor, 2, 0, 59)? as u8);
            Ok(())
        }
        b'S' => {
            state.partial.second = Some(decode(in_cursor, 2, 0, 60)? as u8);
            Ok(())
        }
        b'Z' => {
            in_cursor.read_while(|b| !b.is_ascii_whitespace());
            Ok(())
        }
        b's' => {
            state.percent_s = Some(decode(in_cursor, 0, i64::MIN, i64::MAX)?);
            Ok(())
        }
        b'%' => {
            if in_cursor.consume(b'%') {
                Ok(())
            } else {
                Err(Error::FailedToParse)
            }
        }
        other => match broken_down::parse_delegate(other, in_cursor, &mut state.partial) {
            Some(true) => {
                match other {
                    b'I' | b'l' | b'r' => state.twelve_hour = true,
                    b'R' | b'T' | b'X' | b'c' => state.twelve_hour = false,
                    _ => {}
                }
                Ok(())
            }
            Some(false) => Err(Error::FailedToParse),
            None => consume_literal(in_cursor, modifier, Some(other)),
        },
    }
}

/// Matches the literal bytes an unrecognized (or spec-less) `%`-escape would
/// have introduced — the `%`, the modifier letter if any, and `spec` if
/// given — against `in_cursor`.
fn consume_literal(in_cursor: &mut Cursor<'_>, modifier: Modifier, spec: Option<u8>) -> Result<(), Error> {
    if !in_cursor.consume(b'%') {
        return Err(Error::FailedToParse);
    }
    for b in modifier.as_str().bytes() {
        if !in_cursor.consume(b) {
            return Err(Error::FailedToParse);
        }
    }
    if let Some(spec) = spec {
        if !in_cursor.consume(spec) {
            return Err(Error::FailedToParse);
        }
    }
    Ok(())
}

/// Recognizes the `%z`-family offset specifiers at `fmt_cursor` (positioned
/// just past any `E`/`O` modifier), returning the separator `%z` decoding
/// should use and advancing `fmt_cursor` past the specifier. The rendering
/// differences between e.g. `%:z` and `%::z` don't affect parsing, which
/// always accepts an optional minute and second component.
fn offset_separator(fmt_cursor: &mut Cursor<'_>, modifier: Modifier) -> Option<Option<u8>> {
    if modifier.is_extended() {
        let mut probe = *fmt_cursor;
        probe.consume(b'*');
        if probe.consume(b'z') {
            *fmt_cursor = probe;
            return Some(Some(b':'));
        }
        return None;
    }

    for (prefix, separator) in [
        (b":::z".as_slice(), Some(b':')),
        (b"::z".as_slice(), Some(b':')),
        (b":z".as_slice(), Some(b':')),
        (b"z".as_slice(), None),
    ] {
        let mut probe = *fmt_cursor;
        if probe.consume_prefix(prefix) {
            *fmt_cursor = probe;
            return Some(separator);
        }
    }

    None
}

/// `%E*S`/`%E#S`: two-digit (leap-second-inclusive) seconds, then an
/// optional `.`-qualified fraction.
fn parse_seconds_with_fraction(cursor: &mut Cursor<'_>, state: &mut ParseState) -> Result<(), Error> {
    state.partial.second = Some(decode(cursor, 2, 0, 60)? as u8);
    if cursor.consume(b'.') {
        state.subsecond_fs = subsecond::decode(cursor).ok_or(Error::FailedToParse)?;
    }
    Ok(())
}

/// `%E*f`/`%E#f`: a subsecond run, present iff the next input byte is a
/// digit.
fn parse_bare_fraction(cursor: &mut Cursor<'_>, state: &mut ParseState) -> Result<(), Error> {
    if matches!(cursor.peek(), Some(b) if b.is_ascii_digit()) {
        state.subsecond_fs = subsecond::decode(cursor).ok_or(Error::FailedToParse)?;
    }
    Ok(())
}

/// Decodes a variable-width signed field, distinguishing "no digit present"
/// (`FailedToParse`, a structural failure) from "digits present but the
/// value left the documented range" (`OutOfRangeField`).
fn decode(cursor: &mut Cursor<'_>, width: usize, min: i64, max: i64) -> Result<i64, Error> {
    match cursor.peek() {
        Some(b) if b.is_ascii_digit() || b == b'-' => {}
        _ => return Err(Error::FailedToParse),
    }
    int::decode(cursor, width, min, max).ok_or(Error::OutOfRangeField)
}

/// Like [`decode`], but requires exactly `width` digits (the sign, if any,
/// counts against `width`) rather than accepting a shorter run.
fn decode_exact(cursor: &mut Cursor<'_>, width: usize, min: i64, max: i64) -> Result<i64, Error> {
    let mut probe = *cursor;
    let negative = probe.consume(b'-');
    let budget = if negative { width.saturating_sub(1) } else { width };
    let available = probe.remaining().iter().take_while(|b| b.is_ascii_digit()).count();
    if available < budget {
        return Err(Error::FailedToParse);
    }
    int::decode(cursor, width, min, max).ok_or(Error::OutOfRangeField)
}

/// Folds a completed [`ParseState`] into the `(Instant, Femtoseconds)` pair
/// it names, per the finalization order: `%s` overrides everything else;
/// otherwise a civil second is built strictly from the collected fields,
/// leap seconds carry forward a second, and the result is resolved against
/// either `zone` or the literal parsed offset.
fn finalize(state: ParseState, zone: &impl Zone) -> Result<(Instant, Femtoseconds), Error> {
    if let Some(seconds) = state.percent_s {
        return Ok((Instant::from_unix_seconds(seconds), Femtoseconds::ZERO));
    }

    let leap = state.partial.second == Some(60);
    let second = if leap { 59 } else { i64::from(state.partial.second.unwrap_or(0)) };

    let year = resolve_year(&state.partial)?;
    let month = i64::from(state.partial.month.unwrap_or(1));
    let day = i64::from(state.partial.day.unwrap_or(1));
    let hour = i64::from(resolve_hour(&state));
    let minute = i64::from(state.partial.minute.unwrap_or(0));

    let cs = CivilSecond::from_fields_strict(year, month, day, hour, minute, second).ok_or(Error::OutOfRangeField)?;

    let mut instant = match state.offset_seconds {
        Some(offset_seconds) => {
            let utc_seconds = cs
                .unix_seconds_as_utc()
                .checked_sub(i64::from(offset_seconds))
                .ok_or(Error::OutOfRangeField)?;
            Instant::from_unix_seconds(utc_seconds)
        }
        None => zone.lookup_civil(cs).pre,
    };

    if leap {
        instant = instant.saturating_add_seconds(1);
    }

    Ok((instant, Femtoseconds::new_unchecked(state.subsecond_fs)))
}

/// Resolves the year from whichever of `%Y`/`%E4Y`/`%F`/`%c`/`%G` (a full
/// year), `%C` (century) and `%y` (two-digit year) were parsed, widening a
/// bare two-digit year by `+1900`. Defaults to `1970` if nothing named a
/// year at all.
fn resolve_year(partial: &PartialBrokenDownTime) -> Result<i64, Error> {
    if let Some(year) = partial.year {
        return Ok(year);
    }

    match (partial.century, partial.two_digit_year) {
        (Some(century), Some(two_digit)) => century
            .checked_mul(100)
            .and_then(|c| c.checked_add(two_digit))
            .ok_or(Error::OutOfRangeYear),
        (None, Some(two_digit)) => two_digit.checked_add(1900).ok_or(Error::OutOfRangeYear),
        (Some(century), None) => century.checked_mul(100).ok_or(Error::OutOfRangeYear),
        (None, None) => Ok(1970),
    }
}

/// Resolves the absolute 24-hour value of `state.partial.hour`, applying
/// `%p`/`%P` disambiguation when a 12-hour specifier (`%I`/`%l`/`%r`) set it.
fn resolve_hour(state: &ParseState) -> u8 {
    if !state.twelve_hour {
        return state.partial.hour.unwrap_or(0);
    }

    let mut hour = state.partial.hour.unwrap_or(0);
    if state.partial.afternoon.unwrap_or(false) {
        if hour < 12 {
            hour += 12;
        }
    } else if hour == 12 {
        hour = 0;
    }
    hour
}
