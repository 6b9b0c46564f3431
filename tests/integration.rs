use chrono::{DateTime, Utc};
use jdcal::{
    gregorian_to_jdn, jdn_to_gregorian, timestamp_to_julian_pair, AmbientOffset, CalendarUnit,
    ConfigPatch, Error, GregorianFields, JulianPair, Moment, MomentConfig, J2000,
};
use qtty::{Day, Days, Hours};

const CST: AmbientOffset = AmbientOffset::from_minutes(480);

fn utc() -> MomentConfig {
    MomentConfig::utc().with_ambient(CST)
}

fn local() -> MomentConfig {
    MomentConfig::local().with_ambient(CST)
}

#[test]
fn j2000_is_a_fixed_point() {
    let noon = GregorianFields::new(2000, 1, 1).and_hms(12, 0, 0);
    assert_eq!(gregorian_to_jdn(&noon, true, CST), J2000);
    assert_eq!(jdn_to_gregorian(J2000, true, CST, None), noon);
}

#[test]
fn gregorian_noon_and_midnight_julian_days() {
    let noon = Moment::from_gregorian(&GregorianFields::new(2023, 4, 14).and_hms(12, 0, 0), utc());
    assert_eq!(noon.jdn(), 2_460_049.0);
    let midnight = Moment::from_gregorian(&GregorianFields::new(2023, 4, 26), utc());
    assert_eq!(midnight.jdn(), 2_460_060.5);
}

#[test]
fn bc_and_year_zero_render_signed() {
    assert_eq!(Moment::parse("BC100/1/1", local()).format("YYYY-MM-DD"), "-0099-01-01");
    assert_eq!(Moment::parse("0/04/09", local()).format("YYYY-MM-DD"), "0000-04-09");
}

#[test]
fn month_addition_crosses_year_end() {
    let m = Moment::parse("2023-12-01", local()).add(1, CalendarUnit::Month);
    assert_eq!(m.format_default(), "2024-01-01 00:00:00");
    assert_eq!(m, Moment::parse("2024-01-01", local()));
    assert_eq!(
        m,
        Moment::from_gregorian(&GregorianFields::new(2024, 1, 1), local())
    );
}

#[test]
fn units_parse_from_strings() {
    let m = Moment::from_julian_day_number(J2000, utc());
    let unit: CalendarUnit = "weeks".parse().unwrap();
    assert_eq!(m.add(2, unit).format("YYYY-MM-DD"), "2000-01-15");
    assert_eq!("decade".parse::<CalendarUnit>(), Err(Error::UnknownUnit("decade".into())));
}

#[test]
fn reinterpretation_keeps_the_instant() {
    let m = Moment::parse("2023-06-06 08:15:00", local());
    let there_and_back = m.utc().local();
    assert_eq!(there_and_back.jdn(), m.jdn());
    assert_eq!(there_and_back.jdms(), m.jdms());
    assert_eq!(m.utc().format("HH:mm"), "00:15");
}

#[test]
fn patched_config_resets_absent_fields() {
    let m = Moment::from_julian_day_number(J2000, utc().with_offset(120));
    let patched = Moment::from_moment(&m, ConfigPatch::default());
    assert!(!patched.is_utc());
    assert_eq!(patched.timezone_offset(), 480);
    assert_eq!(patched.format("HH:mm"), "20:00");

    let shifted = Moment::from_moment(&m, ConfigPatch::offset(-60));
    assert_eq!(shifted.format("HH:mm Z"), "19:00 +07:00");
}

#[test]
fn epoch_millis_and_chrono_agree() {
    let datetime: DateTime<Utc> = DateTime::from_timestamp(946_728_000, 0).unwrap();
    let m = Moment::from_datetime(&datetime, utc());
    assert_eq!(m.jdn(), J2000);
    assert_eq!(m.timestamp(), datetime.timestamp_millis());
    assert_eq!(m.to_datetime(), Some(datetime));

    let pair = timestamp_to_julian_pair(datetime.timestamp_millis());
    assert_eq!(pair, JulianPair::new(J2000, 43_200_000));
}

#[test]
fn hours_carry_into_the_julian_day() {
    let m = Moment::from_julian_day_number(J2000, utc());
    let later = m.add(36, CalendarUnit::Hour);
    let elapsed = (later.julian_day() - m.julian_day()).to::<Day>();
    assert!((elapsed - Hours::new(36.0).to::<Day>()).abs() < Days::new(1e-9));
    assert_eq!(later.format("YYYY-MM-DD HH:mm"), "2000-01-03 00:00");
}

#[test]
fn host_style_strings() {
    let m = Moment::from_gregorian(
        &GregorianFields::new(2023, 6, 5).and_hms(12, 0, 0),
        local(),
    );
    assert_eq!(m.to_iso_string(), "2023-06-05T04:00:00.000Z");
    assert_eq!(m.to_utc_string(), "Mon, 05 Jun 2023 04:00:00 GMT");
    assert_eq!(m.to_string(), "Mon Jun 05 2023 12:00:00 GMT+0800");
}

#[test]
fn strict_parse_uses_the_host_zone() {
    let m: Moment = "2023-06-05T12:00:00Z".parse().unwrap();
    assert_eq!(m.jdn(), 2_460_101.0);
    assert!(matches!("junk".parse::<Moment>(), Err(Error::Unparseable(_))));
}

#[cfg(feature = "serde")]
#[test]
fn serde_moment_keeps_jdms_and_config() {
    let m = Moment::from_epoch_millis(1_686_000_123_457, local().with_offset(30));
    let json = serde_json::to_string(&m).unwrap();
    assert!(json.contains("\"jdms\""));
    let back: Moment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
    assert_eq!(back.format("HH:mm:ss.SSS"), m.format("HH:mm:ss.SSS"));
}

#[cfg(feature = "serde")]
#[test]
fn serde_moment_accepts_bare_jdn() {
    let m: Moment = serde_json::from_str(r#"{"jdn": 2451545.0}"#).unwrap();
    assert_eq!(m.jdms(), 43_200_000);
    assert!(!m.is_utc());
}
