//! The zone collaborator (spec §4.5): the `Zone` trait and its `Utc`/
//! `FixedOffset` implementations.
//!
//! The original design treats the time-zone database as an external,
//! out-of-scope collaborator. This module ships that seam plus two total,
//! unambiguous implementations so the crate is usable standalone; a
//! DST-aware zone backed by real zoneinfo data can implement the same trait
//! without an API change.

use crate::civil::{CivilSecond, Instant};
use crate::offset;

/// The result of resolving an [`Instant`] against a [`Zone`]: the civil
/// time it names in that zone, the offset east of UTC that produced it, a
/// DST flag, and a short abbreviation.
///
/// Borrows from the zone that produced it, since a zone with a synthesized
/// abbreviation (like [`FixedOffset`]) has nowhere `'static` to store it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AbsoluteLookup<'a> {
    /// The civil calendar time `instant` names in this zone.
    pub cs: CivilSecond,
    /// Signed seconds east of UTC in effect at `instant`.
    pub offset: i32,
    /// Whether daylight saving (or some other non-standard adjustment) is in
    /// effect.
    pub is_dst: bool,
    /// A short, locale-independent zone abbreviation (e.g. `"UTC"`,
    /// `"+0530"`). Never used for further zone resolution — only for
    /// display (`%Z`).
    pub abbr: &'a str,
}

/// The result of resolving a [`CivilSecond`] against a [`Zone`].
///
/// Every civil time maps to at least the `pre` instant. For a zone whose
/// offset never changes (every implementation shipped here), `pre` is the
/// unique answer; a DST-aware zone would additionally need to report
/// skipped (spring-forward) and repeated (fall-back) civil times, but that
/// refinement is left to such a zone's own trait implementation since this
/// crate does not model DST transitions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CivilLookup {
    /// The (unique, for these implementations) instant this civil time
    /// names.
    pub pre: Instant,
}

/// Translates between [`Instant`]s and [`CivilSecond`]s.
///
/// Implementations must be total (every input produces a result) and pure
/// (the same input always produces the same output).
pub trait Zone {
    /// Resolves an absolute instant to its civil representation in this
    /// zone.
    fn lookup_instant(&self, instant: Instant) -> AbsoluteLookup<'_>;

    /// Resolves a civil time to the instant(s) it names in this zone.
    fn lookup_civil(&self, cs: CivilSecond) -> CivilLookup;
}

/// The UTC zone: zero offset, never DST, abbreviation `"UTC"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Utc;

impl Zone for Utc {
    fn lookup_instant(&self, instant: Instant) -> AbsoluteLookup<'_> {
        let total_seconds = instant.to_unix_seconds();
        let days = total_seconds.div_euclid(86_400);
        let time_of_day = total_seconds.rem_euclid(86_400);
        let cs = civil_second_from_day_count_and_time_of_day(days, time_of_day);

        AbsoluteLookup {
            cs,
            offset: 0,
            is_dst: false,
            abbr: "UTC",
        }
    }

    fn lookup_civil(&self, cs: CivilSecond) -> CivilLookup {
        CivilLookup {
            pre: Instant::from_unix_seconds(cs.unix_seconds_as_utc()),
        }
    }
}

/// A zone with a constant offset from UTC and no DST, such as a fixed
/// `+05:30`. The abbreviation is synthesized from the offset itself, e.g.
/// `"+0530"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FixedOffset {
    seconds: i32,
    abbr_buf: [u8; 9],
    abbr_len: usize,
}

impl FixedOffset {
    /// Constructs a zone with a constant offset of `seconds` east of UTC.
    pub fn new(seconds: i32) -> Self {
        let mut abbr_buf = [0u8; 9];
        let abbr_len = offset::encode(seconds, offset::Mode::HHMM, &mut abbr_buf).len();
        FixedOffset {
            seconds,
            abbr_buf,
            abbr_len,
        }
    }

    /// The constant offset in seconds east of UTC.
    pub fn offset_seconds(&self) -> i32 {
        self.seconds
    }

    /// The synthesized `±HHMM` abbreviation.
    pub fn abbreviation(&self) -> &str {
        core::str::from_utf8(&self.abbr_buf[..self.abbr_len]).expect("offset rendering is ASCII")
    }
}

impl Zone for FixedOffset {
    fn lookup_instant(&self, instant: Instant) -> AbsoluteLookup<'_> {
        let shifted = instant.saturating_add_seconds(i64::from(self.seconds));
        let total_seconds = shifted.to_unix_seconds();
        let days = total_seconds.div_euclid(86_400);
        let time_of_day = total_seconds.rem_euclid(86_400);
        let cs = civil_second_from_day_count_and_time_of_day(days, time_of_day);

        AbsoluteLookup {
            cs,
            offset: self.seconds,
            is_dst: false,
            abbr: self.abbreviation(),
        }
    }

    fn lookup_civil(&self, cs: CivilSecond) -> CivilLookup {
        let utc_seconds = cs.unix_seconds_as_utc() - i64::from(self.seconds);
        CivilLookup {
            pre: Instant::from_unix_seconds(utc_seconds),
        }
    }
}

/// Builds a `CivilSecond` from a day count (days since the Unix epoch) and a
/// time-of-day in `[0, 86400)` seconds, via the shared civil normalization
/// path.
fn civil_second_from_day_count_and_time_of_day(days: i64, time_of_day: i64) -> CivilSecond {
    CivilSecond::new_unchecked(1970, 1, 1, 0, 0, 0)
        .checked_shift(days * 86_400 + time_of_day)
        .unwrap_or_else(|| {
            if days > 0 {
                CivilSecond::MAX
            } else {
                CivilSecond::MIN
            }
        })
}
