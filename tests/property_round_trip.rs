//! Property tests for the round-trip laws and the offset codec (spec §8).

use civil_strftime::{format, parse, Femtoseconds, FixedOffset, Instant, Utc};
use quickcheck_macros::quickcheck;

/// Bounds `Instant` generation to a span both `Utc` and `FixedOffset` can
/// resolve without overflowing `CivilSecond`'s representable range.
fn clamp_unix_seconds(raw: i64) -> i64 {
    const MIN: i64 = -62_135_596_800; // year 0001-01-01
    const MAX: i64 = 253_402_300_799; // year 9999-12-31
    raw.rem_euclid(MAX - MIN) + MIN
}

#[quickcheck]
fn round_trip_seconds_through_utc(raw_seconds: i64) -> bool {
    let instant = Instant::from_unix_seconds(clamp_unix_seconds(raw_seconds));
    let fmt = "%E4Y-%m-%dT%H:%M:%S%:z";
    let rendered = format(fmt, instant, Femtoseconds::ZERO, &Utc);
    parse(fmt, &rendered, &Utc) == Ok((instant, Femtoseconds::ZERO))
}

#[quickcheck]
fn round_trip_subseconds_through_utc(raw_seconds: i64, raw_fs: i64) -> bool {
    let instant = Instant::from_unix_seconds(clamp_unix_seconds(raw_seconds));
    let fs = Femtoseconds::new(raw_fs.rem_euclid(1_000_000_000_000_000)).unwrap();
    let fmt = "%E4Y-%m-%dT%H:%M:%E*S%:z";
    let rendered = format(fmt, instant, fs, &Utc);
    parse(fmt, &rendered, &Utc) == Ok((instant, fs))
}

#[quickcheck]
fn round_trip_through_fixed_offset(raw_seconds: i64, raw_offset: i32) -> bool {
    let offset_seconds = raw_offset.rem_euclid(86_400) - 43_200;
    let zone = FixedOffset::new(offset_seconds);
    let instant = Instant::from_unix_seconds(clamp_unix_seconds(raw_seconds));
    let fmt = "%E4Y-%m-%dT%H:%M:%S%:z";
    let rendered = format(fmt, instant, Femtoseconds::ZERO, &zone);
    parse(fmt, &rendered, &zone) == Ok((instant, Femtoseconds::ZERO))
}
