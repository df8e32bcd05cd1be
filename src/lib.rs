#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(unknown_lints)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_alias))]

/*!
This crate formats and parses civil (zone-naive) calendar times using
`strftime`/`strptime`-style format strings, with femtosecond subsecond
resolution and RFC 3339-compatible zone offset encoding.

A civil time ([`CivilSecond`]) only becomes an absolute [`Instant`] (Unix-epoch
seconds) once it is resolved against a [`Zone`]; this crate ships [`Utc`] and
[`FixedOffset`], two total, unambiguous zones, and the [`Zone`] trait so a
caller can plug in a real time zone database without this crate depending on
one.

Directives begin with a `%` character; any other byte is copied through
literally. A directive may carry an `E` or `O` modifier (both are accepted for
compatibility with locale-aware `strftime` dialects; neither changes rendering
here, since this crate has no locale).

```text
%<E|O><conversion>
```

## Specifiers

| Specifier    | Example         | Description                                                                                      |
|--------------|-----------------|---------------------------------------------------------------------------------------------------|
| `%Y`         | `-2001`         | Year with century, signed, no padding.                                                            |
| `%E4Y`       | `-2001`         | Year with century, signed, zero-padded to at least 4 digits plus a possible sign.                 |
| `%C`         | `-21`           | `Year / 100` (Euclidean), zero-padded to 2 digits.                                                |
| `%y`         | `99`            | `Year % 100` (Euclidean), zero-padded to 2 digits.                                                |
| `%m`         | `01`            | Month of the year in `01..=12`.                                                                   |
| `%B`         | `July`          | Full month name.                                                                                   |
| `%b`, `%h`   | `Jul`           | Abbreviated month name.                                                                            |
| `%d`         | `01`            | Day of the month in `01..=31`, zero-padded.                                                       |
| `%e`         | ` 1`            | Day of the month in ` 1..=31`, blank-padded.                                                      |
| `%j`         | `001`           | Day of the year in `001..=366`.                                                                   |
| `%H`         | `00`            | Hour in `00..=23`.                                                                                 |
| `%k`         | ` 0`            | Hour in ` 0..=23`, blank-padded.                                                                   |
| `%I`         | `01`            | Hour on a 12-hour clock in `01..=12`.                                                              |
| `%l`         | ` 1`            | Hour on a 12-hour clock in ` 1..=12`, blank-padded.                                                |
| `%P`, `%p`   | `am`, `AM`      | Meridian indicator.                                                                                |
| `%M`         | `00`            | Minute in `00..=59`.                                                                               |
| `%S`         | `00`            | Second in `00..=60` (`60` for a leap second).                                                      |
| `%E*S`       | `00.5`          | Seconds plus the trimmed femtosecond fraction (omitted entirely when zero).                        |
| `%E#S`       | `00.500`        | Seconds plus exactly `#` fractional digits (`#` a decimal width; `0` omits the fraction).           |
| `%E*f`       | `5`             | The trimmed femtosecond fraction alone (`0` when it is empty).                                    |
| `%E#f`       | `500`           | Exactly `#` fractional digits alone (nothing when `#` is `0`).                                     |
| `%z`         | `+0200`         | Zone offset, `±HHMM`.                                                                               |
| `%:z`        | `+02:00`        | Zone offset, `±HH:MM`.                                                                              |
| `%::z`       | `+02:00:00`     | Zone offset, `±HH:MM:SS`.                                                                           |
| `%:::z`      | `+02`           | Zone offset, `±HH[:MM[:SS]]`, eliding zero trailing components.                                    |
| `%Z`         | `UTC`           | Zone abbreviation.                                                                                 |
| `%A`, `%a`   | `Sunday`, `Sun` | Weekday name.                                                                                       |
| `%u`         | `1`             | ISO weekday, Monday is `1`.                                                                         |
| `%w`         | `0`             | Weekday, Sunday is `0`.                                                                             |
| `%G`, `%g`   | `-2001`, `99`   | ISO 8601 week-based year (full, two-digit).                                                        |
| `%V`         | `01`            | ISO 8601 week number in `01..=53`.                                                                  |
| `%U`         | `00`            | Week number, weeks start on Sunday.                                                                |
| `%W`         | `00`            | Week number, weeks start on Monday.                                                                |
| `%s`         | `86400`         | Seconds since the Unix epoch; overrides every other parsed field.                                   |
| `%n`, `%t`   | `\n`, `\t`      | Newline, tab.                                                                                       |
| `%%`         | `%`             | Literal `%`.                                                                                        |
| `%c`         | `Sun Jul  8 00:23:45 2001` | `"%a %b %e %H:%M:%S %Y"`.                                                               |
| `%D`, `%x`   | `07/08/01`      | `"%m/%d/%y"`.                                                                                       |
| `%F`         | `2001-07-08`    | `"%Y-%m-%d"`.                                                                                       |
| `%v`         | ` 8-Jul-2001`   | `"%e-%b-%E4Y"`.                                                                                     |
| `%r`         | `12:23:45 AM`   | `"%I:%M:%S %p"`.                                                                                    |
| `%R`         | `00:23`         | `"%H:%M"`.                                                                                          |
| `%T`, `%X`   | `00:23:45`      | `"%H:%M:%S"`.                                                                                       |

When parsing, `%H`/`%R`/`%T`/`%X`/`%c` set the hour in absolute 24-hour form;
`%I`/`%l`/`%r` set it as a 12-hour value that a later `%p`/`%P` disambiguates.
A two-digit `%y` with no `%C`/`%Y`/`%E4Y`/`%G` present is widened by `+1900`.
`%S == 60` (a leap second) carries the civil second forward by one.
*/

#[cfg(feature = "alloc")]
extern crate alloc;

mod broken_down;
mod civil;
mod cursor;
mod error;
mod format;
mod int;
mod offset;
mod parse;
mod subsecond;
mod write;
mod zone;

pub use crate::civil::{CivilSecond, Femtoseconds, Instant};
pub use crate::error::Error;
pub use crate::zone::{AbsoluteLookup, CivilLookup, FixedOffset, Utc, Zone};

/// Renders `instant` (with a femtosecond fraction `fs`) under `fmt` in
/// `zone`.
///
/// Never fails: a `%` not followed by a recognized specifier is copied
/// through verbatim, byte for byte, along with the `%`.
///
/// # Examples
///
/// ```
/// use civil_strftime::{format, Femtoseconds, Instant, Utc};
///
/// let instant = Instant::from_unix_seconds(1_583_297_167);
/// let rendered = format("%Y-%m-%dT%H:%M:%S%:z", instant, Femtoseconds::ZERO, &Utc);
/// assert_eq!(rendered, "2020-03-04T05:06:07+00:00");
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub fn format(fmt: &str, instant: Instant, fs: Femtoseconds, zone: &impl Zone) -> alloc::string::String {
    let mut out = alloc::string::String::new();
    crate::format::format(fmt, instant, fs, zone, &mut out).expect("String never reports WriteZero");
    out
}

/// Parses `input` under `fmt` in `zone`, returning the instant and
/// femtosecond fraction it names.
///
/// # Errors
///
/// Returns [`Error`] if `input` does not match `fmt`, a field left its
/// documented range, or the civil time or its zone-adjusted instant
/// overflowed the representable range.
///
/// # Examples
///
/// ```
/// use civil_strftime::{parse, Utc};
///
/// let (instant, fs) = parse("%Y-%m-%dT%H:%M:%S", "2020-03-04T05:06:07", &Utc).unwrap();
/// assert_eq!(instant.to_unix_seconds(), 1_583_297_167);
/// assert_eq!(fs.get(), 0);
/// ```
pub fn parse(fmt: &str, input: &str, zone: &impl Zone) -> Result<(Instant, Femtoseconds), Error> {
    crate::parse::parse(fmt, input, zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse_round_trip() {
        let instant = Instant::from_unix_seconds(1_583_297_167);
        let fs = Femtoseconds::new(250_000_000_000_000).unwrap();
        let rendered = format("%Y-%m-%dT%H:%M:%E*S%:z", instant, fs, &Utc);
        let (parsed_instant, parsed_fs) = parse("%Y-%m-%dT%H:%M:%E*S%:z", &rendered, &Utc).unwrap();
        assert_eq!(parsed_instant, instant);
        assert_eq!(parsed_fs, fs);
    }

    #[test]
    fn test_parse_error_on_mismatched_literal() {
        assert_eq!(
            parse("%Y-%m-%d", "2020/03/04", &Utc),
            Err(Error::FailedToParse)
        );
    }

    #[test]
    fn test_fixed_offset_round_trip() {
        let zone = FixedOffset::new(5 * 3600 + 30 * 60);
        let instant = Instant::from_unix_seconds(1_583_297_167);
        let rendered = format("%Y-%m-%dT%H:%M:%S%:z", instant, Femtoseconds::ZERO, &zone);
        assert_eq!(rendered, "2020-03-04T10:36:07+05:30");
        let (parsed_instant, _) = parse("%Y-%m-%dT%H:%M:%S%:z", &rendered, &Utc).unwrap();
        assert_eq!(parsed_instant, instant);
    }
}
