//! Exercises the `Zone` trait seam against a real IANA zoneinfo database,
//! confirming `FixedOffset` (this crate's own, DST-naive zone) agrees with
//! `tzdb`/`tz-rs`'s offset for a handful of concrete instants where the
//! target zone happens to be in a stable (non-transitioning) period.

use civil_strftime::{format, parse, Femtoseconds, FixedOffset, Instant};
use tzdb::time_zone::america::NEW_YORK;
use tzdb::time_zone::europe::PARIS;
use tz::TimeZoneRef;

fn offset_at(tz: TimeZoneRef<'_>, unix_seconds: i64) -> i32 {
    tz.find_local_time_type(unix_seconds)
        .expect("instant within the zone's tabulated range")
        .ut_offset()
}

#[test]
fn test_fixed_offset_matches_new_york_in_winter() {
    // 2020-01-15T12:00:00Z, well clear of any DST transition: EST, UTC-5.
    let unix_seconds = 1_579_089_600;
    let offset_seconds = offset_at(NEW_YORK, unix_seconds);
    assert_eq!(offset_seconds, -5 * 3600);

    let zone = FixedOffset::new(offset_seconds);
    let instant = Instant::from_unix_seconds(unix_seconds);
    let rendered = format("%Y-%m-%dT%H:%M:%S%:z", instant, Femtoseconds::ZERO, &zone);
    assert_eq!(rendered, "2020-01-15T07:00:00-05:00");

    let (parsed, fs) = parse("%Y-%m-%dT%H:%M:%S%:z", &rendered, &zone).unwrap();
    assert_eq!(parsed, instant);
    assert_eq!(fs, Femtoseconds::ZERO);
}

#[test]
fn test_fixed_offset_matches_new_york_in_summer() {
    // 2020-07-15T12:00:00Z, well clear of any DST transition: EDT, UTC-4.
    let unix_seconds = 1_594_814_400;
    let offset_seconds = offset_at(NEW_YORK, unix_seconds);
    assert_eq!(offset_seconds, -4 * 3600);

    let zone = FixedOffset::new(offset_seconds);
    let instant = Instant::from_unix_seconds(unix_seconds);
    let rendered = format("%Y-%m-%dT%H:%M:%S%:z", instant, Femtoseconds::ZERO, &zone);
    assert_eq!(rendered, "2020-07-15T08:00:00-04:00");

    let (parsed, _) = parse("%Y-%m-%dT%H:%M:%S%:z", &rendered, &zone).unwrap();
    assert_eq!(parsed, instant);
}

#[test]
fn test_fixed_offset_matches_paris_in_winter() {
    // 2021-12-01T00:00:00Z: CET, UTC+1.
    let unix_seconds = 1_638_316_800;
    let offset_seconds = offset_at(PARIS, unix_seconds);
    assert_eq!(offset_seconds, 3600);

    let zone = FixedOffset::new(offset_seconds);
    let instant = Instant::from_unix_seconds(unix_seconds);
    let rendered = format("%Y-%m-%dT%H:%M:%S%::z", instant, Femtoseconds::ZERO, &zone);
    assert_eq!(rendered, "2021-12-01T01:00:00+01:00:00");

    let (parsed, _) = parse("%Y-%m-%dT%H:%M:%S%::z", &rendered, &zone).unwrap();
    assert_eq!(parsed, instant);
}

#[test]
fn test_zone_abbreviation_is_synthesized_from_offset() {
    let zone = FixedOffset::new(5 * 3600 + 30 * 60);
    let instant = Instant::from_unix_seconds(0);
    let rendered = format("%Z", instant, Femtoseconds::ZERO, &zone);
    assert_eq!(rendered, "+0530");
}
