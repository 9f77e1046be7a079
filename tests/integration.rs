use qtty::{Second, Seconds};
use utopian::calendar::{is_long_mir, sol_of_mir, sols_in_mir, sols_in_mirs_from_1, sols_in_month};
use utopian::{
    epoch_timestamp, CivilDateTime, EarthTime, JulianDate, MarsDateTime, MarsTime, Scale,
    TimeZone, EPOCH, TT,
};

const REFERENCE_TIMESTAMP: f64 = 1_501_508_122.0;

fn fields(dt: &MarsDateTime) -> (i64, u32, u32, f64) {
    (dt.mir(), dt.month(), dt.sol(), dt.millisols())
}

#[test]
fn epoch_civil_moment_is_mir_zero() {
    let earth = EarthTime::from_civil(&EPOCH).unwrap();
    let mars = MarsTime::from_earth_time(&earth).to_date_time(TimeZone::MTC);
    assert_eq!(fields(&mars), (0, 1, 1, 0.0));
    assert_eq!(mars.time_zone(), TimeZone::MTC);
    assert_eq!(earth.timestamp(), epoch_timestamp());
}

#[test]
fn reference_civil_moment_matches_golden_value() {
    let civil = CivilDateTime::new(2017, 7, 31, 13, 35, 22, 0).unwrap();
    let earth = EarthTime::from_civil(&civil).unwrap();
    assert_eq!(earth.timestamp(), REFERENCE_TIMESTAMP);
    let mars = MarsTime::from_earth_time(&earth).to_date_time(TimeZone::MTC);
    assert_eq!(fields(&mars), (217, 4, 1, 886.888));
    assert_eq!(mars.to_string(), "M217/04/01:886.888+000");
}

#[test]
fn long_mir_rule() {
    assert!(is_long_mir(0));
    assert!(is_long_mir(1));
    assert!(is_long_mir(10));
    assert!(!is_long_mir(100));
    assert!(is_long_mir(1000));
    assert!(!is_long_mir(2));
}

#[test]
fn month_lengths() {
    assert_eq!(sols_in_month(0, 24), 28);
    assert_eq!(sols_in_month(100, 24), 27);
    assert_eq!(sols_in_month(0, 6), 27);
}

#[test]
fn sols_in_mirs_matches_summation() {
    let mut total = 0;
    for n in 1..=5000_i64 {
        total += sols_in_mir(n);
        assert_eq!(sols_in_mirs_from_1(n as u64), total, "n = {n}");
    }
}

#[test]
fn sol_of_mir_covers_the_mir_in_order() {
    for mir in [0_i64, 2, 100, 217, -3] {
        let mut expected = 1;
        for month in 1..=24 {
            for sol in 1..=sols_in_month(mir, month) {
                assert_eq!(sol_of_mir(month, sol), expected);
                expected += 1;
            }
        }
        assert_eq!(i64::from(expected - 1), sols_in_mir(mir));
    }
}

#[test]
fn timestamps_roundtrip_within_a_millisecond() {
    let start = epoch_timestamp() * 3.0;
    let step = 7_777_777.7;
    let mut ts = start;
    while ts < 4.0e10 {
        let back = MarsTime::from_timestamp(ts).timestamp();
        assert!((back - ts).abs() < 1e-3, "{ts}: {back}");
        ts += step;
    }
}

#[test]
fn calendar_dates_roundtrip_within_a_millisol() {
    for mir in (-2000..=2000).step_by(37) {
        for month in [1_u32, 6, 13, 24] {
            let sol = sols_in_month(mir, month);
            for &slot in &[-5_i64, 0, 4] {
                let zone = TimeZone::new(slot).unwrap();
                let dt = MarsDateTime::new(mir, month, sol, 432.1, zone).unwrap();
                let back = MarsDateTime::from_timestamp(dt.timestamp(), zone);
                assert_eq!((back.mir(), back.month(), back.sol()), (mir, month, sol));
                assert!((back.millisols() - 432.1).abs() < 1.0);
            }
        }
    }
}

#[test]
fn civil_to_julian_date_roundtrip_years_1_to_9999() {
    for year in (1..=9999).step_by(53) {
        let civil = CivilDateTime::new(year, (year % 12 + 1) as u32, 28, 21, 4, 9, 0).unwrap();
        let earth = EarthTime::from_civil(&civil).unwrap();
        let jd = earth.to_julian_date(Scale::Utc);
        let back = EarthTime::from_julian_date(jd, Scale::Utc).unwrap();
        let c = back.utc_civil();
        assert_eq!((c.year(), c.month(), c.day()), (year, civil.month(), 28));
        assert!((back.timestamp() - earth.timestamp()).abs() < 2e-4, "year {year}");
    }
}

#[test]
fn julian_date_scales_roundtrip_through_earth_time() {
    let earth = EarthTime::from_timestamp(REFERENCE_TIMESTAMP).unwrap();
    for scale in [Scale::Utc, Scale::Tai, Scale::Tt] {
        let back = EarthTime::from_julian_date(earth.to_julian_date(scale), scale).unwrap();
        assert!((back.timestamp() - REFERENCE_TIMESTAMP).abs() < 1e-3, "{scale}");
    }
}

#[test]
fn leap_second_count_steps_once_per_table_entry() {
    let mut previous = 0;
    let mut steps = 0;
    let mut earth = EarthTime::from_civil(&CivilDateTime::date(1970, 1, 15).unwrap()).unwrap();
    while earth.year() < 2030 {
        let count = earth.leap_second_count();
        assert!(count == previous || count == previous + 1);
        if count > previous {
            steps += 1;
        }
        previous = count;
        earth = earth.add_months(1).unwrap();
    }
    assert_eq!(steps, 27);
    assert_eq!(previous, 27);
}

#[test]
fn tt_minus_utc_in_2017() {
    let earth = EarthTime::from_timestamp(REFERENCE_TIMESTAMP).unwrap();
    assert_eq!(earth.tt_minus_utc(), Seconds::new(69.184));
    let jd: JulianDate = earth.to_time();
    let tt = jd.to::<TT>();
    let offset = (tt.quantity() - jd.quantity()).to::<Second>();
    assert!((offset - Seconds::new(69.184)).abs() < Seconds::new(1e-4));
}

#[test]
fn mars_sol_date_near_the_calendar_clock() {
    let mars = MarsTime::from_timestamp(REFERENCE_TIMESTAMP);
    assert!((mars.mars_sol_date() - 51_040.886_297_5).abs() < 1e-6);
    let jd = mars.to_time::<TT>();
    assert!((jd.mars_sol_date() - mars.mars_sol_date()).abs() < 1e-6);
}

#[cfg(feature = "serde")]
#[test]
fn serde_values_are_plain_numbers_and_fields() {
    use utopian::FormatOptions;

    let zone = TimeZone::new(-3).unwrap();
    assert_eq!(serde_json::to_string(&zone).unwrap(), "-3");
    assert!(serde_json::from_str::<TimeZone>("9").is_err());

    let dt = MarsDateTime::new(217, 4, 1, 886.888, TimeZone::MTC).unwrap();
    let json = serde_json::to_string(&dt).unwrap();
    assert!(json.contains("\"mir\":217"));
    assert_eq!(serde_json::from_str::<MarsDateTime>(&json).unwrap(), dt);

    let jd = JulianDate::new(2_451_545.0);
    assert_eq!(serde_json::to_string(&jd).unwrap(), "2451545.0");

    let options: FormatOptions = serde_json::from_str("{\"prefix\":false}").unwrap();
    assert!(!options.prefix && options.time_zone);

    let scale: Scale = serde_json::from_str(&serde_json::to_string(&Scale::Tt).unwrap()).unwrap();
    assert_eq!(scale, Scale::Tt);
}

#[cfg(feature = "serde")]
#[test]
fn deserialization_rejects_invalid_dates() {
    let bad_mars = r#"{"mir":0,"month":0,"sol":99,"millisols":5000.0,"time_zone":0}"#;
    assert!(serde_json::from_str::<MarsDateTime>(bad_mars).is_err());
    let far_mir = r#"{"mir":92233720368547758,"month":1,"sol":1,"millisols":0.0,"time_zone":0}"#;
    assert!(serde_json::from_str::<MarsDateTime>(far_mir).is_err());

    let feb_31 = r#"{"year":2021,"month":2,"day":31,"hour":0,"minute":0,"second":0,"microsecond":0,"offset":null}"#;
    assert!(serde_json::from_str::<CivilDateTime>(feb_31).is_err());
    let bad_offset = r#"{"year":2021,"month":2,"day":1,"hour":0,"minute":0,"second":0,"microsecond":0,"offset":90000}"#;
    assert!(serde_json::from_str::<CivilDateTime>(bad_offset).is_err());

    let ok = CivilDateTime::new(2016, 12, 31, 23, 59, 60, 0).unwrap();
    let json = serde_json::to_string(&ok).unwrap();
    assert_eq!(serde_json::from_str::<CivilDateTime>(&json).unwrap(), ok);
}
