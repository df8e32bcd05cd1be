//! The format engine (spec §4.7): walks a format string, dispatching
//! numerically-critical specifiers to the internal codecs and batching
//! everything else through the broken-down-time collaborator.

use crate::civil::{CivilSecond, Femtoseconds, Instant};
use crate::cursor::Cursor;
use crate::write::Write;
use crate::zone::Zone;
use crate::{broken_down, int, offset, subsecond};

/// The `E`/`O` modifier consumed between `%` and the final specifier byte,
/// if any. Only `E` is meaningful to this crate (locale-free, so `O` has
/// nothing to alter); both are accepted and consumed so a caller's format
/// string round-trips through systems that do distinguish them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Modifier {
    None,
    Extended,
    Origin,
}

impl Modifier {
    pub(crate) fn is_extended(self) -> bool {
        matches!(self, Modifier::Extended)
    }

    /// The literal text this modifier would have consumed, for
    /// verbatim-copy fallback.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Extended => "E",
            Modifier::Origin => "O",
        }
    }
}

/// Renders `instant` (with a femtosecond fraction `fs`) under `fmt` in
/// `zone`, appending the result to `out`.
///
/// Never fails to interpret the format string: a `%` not followed by a
/// recognized specifier is copied through verbatim, byte for byte, along
/// with the `%`. `out` can still reject the write (a fixed-size buffer
/// running out of room), which is the only way this returns `Err`.
pub(crate) fn format<W: Write + ?Sized>(
    fmt: &str,
    instant: Instant,
    fs: Femtoseconds,
    zone: &impl Zone,
    out: &mut W,
) -> Result<(), crate::write::WriteZero> {
    let lookup = zone.lookup_instant(instant);
    let cs = lookup.cs;
    let mut cursor = Cursor::new(fmt.as_bytes());

    loop {
        let literal = cursor.read_until(|&b| b == b'%');
        if !literal.is_empty() {
            out.write_all(literal)?;
        }

        if !cursor.consume(b'%') {
            break;
        }

        // Collapse a run of `%`s: every matched pair renders one `%`; a
        // lone trailing `%` at end-of-format also renders one `%`.
        if cursor.consume(b'%') {
            out.write_fmt(format_args!("%"))?;
            continue;
        }

        let modifier = if cursor.consume(b'E') {
            Modifier::Extended
        } else if cursor.consume(b'O') {
            Modifier::Origin
        } else {
            Modifier::None
        };

        format_one(&mut cursor, modifier, cs, lookup.offset, lookup.abbr, instant, fs, out)?;
    }

    Ok(())
}

/// Dispatches a single specifier (the cursor is positioned just past any
/// `E`/`O` modifier) and writes its rendering to `out`.
#[allow(clippy::too_many_arguments)]
fn format_one<W: Write + ?Sized>(
    cursor: &mut Cursor<'_>,
    modifier: Modifier,
    cs: CivilSecond,
    offset_seconds: i32,
    abbr: &str,
    instant: Instant,
    fs: Femtoseconds,
    out: &mut W,
) -> Result<(), crate::write::WriteZero> {
    // `%E4Y` — width-4 signed year, sign-aware zero padding.
    if modifier.is_extended() && cursor.has_prefix(b"4Y") {
        cursor.consume_prefix(b"4Y");
        let mut buf = [0u8; int::MAX_DIGITS];
        let pos = int::encode(cs.year(), 4, &mut buf);
        return out.write_fmt(format_args!("{}", core::str::from_utf8(&buf[pos..]).expect("ascii")));
    }

    // `%E*S` / `%E*f` / `%E#S` / `%E#f` — subsecond-qualified seconds.
    if modifier.is_extended() {
        if cursor.consume(b'*') {
            if cursor.consume(b'S') {
                return format_seconds_with_fraction(cs, fs, None, out);
            }
            if cursor.consume(b'f') {
                return format_trimmed_fraction(fs, out);
            }
        }

        let width_start = *cursor;
        let width_digits = cursor.read_while(u8::is_ascii_digit);
        if !width_digits.is_empty() {
            if cursor.consume(b'S') {
                let width = parse_width(width_digits);
                return format_seconds_with_fraction(cs, fs, Some(width), out);
            }
            if cursor.consume(b'f') {
                let width = parse_width(width_digits);
                return format_fixed_fraction(fs, width, out);
            }
        }
        *cursor = width_start;
    }

    // Offset family: `%z`, `%:z`, `%::z`, `%:::z`, `%Ez`, `%E*z`.
    if let Some(mode) = offset_mode(cursor, modifier) {
        let mut buf = [0u8; 9];
        let rendered = offset::encode(offset_seconds, mode, &mut buf);
        return out.write_fmt(format_args!("{rendered}"));
    }

    let Some(spec) = cursor.next() else {
        // The format ended right after `%`, or right after a lone `%E`/`%O`
        // modifier with no following specifier: emit what was consumed.
        return out.write_fmt(format_args!("%{}", modifier.as_str()));
    };

    match spec {
        b'Y' => {
            let mut buf = [0u8; int::MAX_DIGITS];
            let pos = int::encode(cs.year(), 0, &mut buf);
            out.write_fmt(format_args!("{}", core::str::from_utf8(&buf[pos..]).expect("ascii")))
        }
        b'm' => out.write_fmt(format_args!("{:02}", cs.month())),
        b'd' => out.write_fmt(format_args!("{:02}", cs.day())),
        b'e' => out.write_fmt(format_args!("{:2}", cs.day())),
        b'H' => out.write_fmt(format_args!("{:02}", cs.hour())),
        b'M' => out.write_fmt(format_args!("{:02}", cs.minute())),
        b'S' => out.write_fmt(format_args!("{:02}", cs.second())),
        b'Z' => out.write_fmt(format_args!("{abbr}")),
        b's' => out.write_fmt(format_args!("{}", instant.to_unix_seconds())),
        b'%' => out.write_fmt(format_args!("%")),
        other => match broken_down::format_delegate(other, cs, out) {
            Some(result) => result,
            None => {
                // Unrecognized: copy the introducing byte(s) through
                // verbatim, including any consumed `E`/`O` modifier.
                out.write_fmt(format_args!("%{}{}", modifier.as_str(), other as char))
            }
        },
    }
}

/// Recognizes the `%z`-family offset specifiers at the cursor (after any
/// `E` modifier has already been consumed), returning the matching
/// [`offset::Mode`] and advancing the cursor past the specifier.
fn offset_mode(cursor: &mut Cursor<'_>, modifier: Modifier) -> Option<offset::Mode> {
    if modifier.is_extended() {
        let mut probe = *cursor;
        if probe.consume(b'*') && probe.consume(b'z') {
            *cursor = probe;
            return Some(offset::Mode::HH_MM_SS);
        }

        let mut probe = *cursor;
        if probe.consume(b'z') {
            *cursor = probe;
            return Some(offset::Mode::HH_MM);
        }

        return None;
    }

    for (prefix, mode) in [
        (b":::z".as_slice(), offset::Mode::HH_MM_SS_ELIDE),
        (b"::z".as_slice(), offset::Mode::HH_MM_SS),
        (b":z".as_slice(), offset::Mode::HH_MM),
        (b"z".as_slice(), offset::Mode::HHMM),
    ] {
        let mut probe = *cursor;
        if probe.consume_prefix(prefix) {
            *cursor = probe;
            return Some(mode);
        }
    }

    None
}

/// Parses a decimal width digit run (already known non-empty), saturating
/// at a value no `u32` computation downstream needs to worry about
/// overflowing.
fn parse_width(digits: &[u8]) -> u32 {
    let mut value: u32 = 0;
    for &b in digits {
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    value
}

/// `%E*S`: two-digit seconds, then `.` and the trimmed fraction (suppressed
/// when the fraction is zero). `%E#S` with an explicit width renders
/// exactly that many fractional digits (and omits the `.` when the width is
/// zero).
fn format_seconds_with_fraction<W: Write + ?Sized>(
    cs: CivilSecond,
    fs: Femtoseconds,
    width: Option<u32>,
    out: &mut W,
) -> Result<(), crate::write::WriteZero> {
    out.write_fmt(format_args!("{:02}", cs.second()))?;

    match width {
        None => format_trimmed_fraction_with_dot(fs, out),
        Some(0) => Ok(()),
        Some(width) => {
            let mut buf = [0u8; subsecond::MAX_WIDTH as usize];
            let rendered = subsecond::encode_fixed_width(fs.get(), width, &mut buf);
            out.write_fmt(format_args!(".{rendered}"))
        }
    }
}

/// Renders `.` plus the trimmed fraction, or nothing at all when the
/// fraction is zero.
fn format_trimmed_fraction_with_dot<W: Write + ?Sized>(
    fs: Femtoseconds,
    out: &mut W,
) -> Result<(), crate::write::WriteZero> {
    let mut buf = [0u8; 15];
    let rendered = subsecond::encode_trimmed(fs.get(), &mut buf);
    if rendered.is_empty() {
        Ok(())
    } else {
        out.write_fmt(format_args!(".{rendered}"))
    }
}

/// `%E*f`: the trimmed fraction alone, rendering `0` when it is empty.
fn format_trimmed_fraction<W: Write + ?Sized>(fs: Femtoseconds, out: &mut W) -> Result<(), crate::write::WriteZero> {
    let mut buf = [0u8; 15];
    let rendered = subsecond::encode_trimmed(fs.get(), &mut buf);
    if rendered.is_empty() {
        out.write_fmt(format_args!("0"))
    } else {
        out.write_fmt(format_args!("{rendered}"))
    }
}

/// `%E#f`: exactly `width` fractional digits (nothing at all when `width`
/// is zero).
fn format_fixed_fraction<W: Write + ?Sized>(
    fs: Femtoseconds,
    width: u32,
    out: &mut W,
) -> Result<(), crate::write::WriteZero> {
    if width == 0 {
        return Ok(());
    }
    let mut buf = [0u8; subsecond::MAX_WIDTH as usize];
    let rendered = subsecond::encode_fixed_width(fs.get(), width, &mut buf);
    out.write_fmt(format_args!("{rendered}"))
}
