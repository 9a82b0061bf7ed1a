mod utils;

use chrono::{Datelike, Timelike};
use metfor::HectoPascal;
use sounding_bulletin::{
    decode_bulletin, split_reports, DecodeError, Decoder, Qualifier, WindUnit,
};
use utils::{approx_equal, load_test_file, load_test_text, reference_time};

fn decoder() -> Decoder {
    Decoder::new().with_reference_time(reference_time())
}

#[test]
fn station_table() {
    let text = load_test_text("bulletin.txt");
    let table = decoder().decode_bulletin(&text).unwrap();

    let mut stations: Vec<i32> = table.keys().cloned().collect();
    stations.sort();
    assert_eq!(stations, vec![72250, 72376, 72469]);

    // NIL report
    assert!(!table.contains_key(&72201));
    // Bad tropopause group
    assert!(!table.contains_key(&72520));

    for profile in table.values() {
        let valid_time = profile.valid_time();
        assert_eq!(valid_time.year(), 2021);
        assert_eq!(valid_time.month(), 3);
        assert_eq!(valid_time.day(), 15);
        assert_eq!(valid_time.hour(), 12);
        assert_eq!(valid_time.minute(), 0);

        let pressures: Vec<f64> = profile.data_points().iter().map(|pt| pt.pressure.0).collect();
        assert!(pressures.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(pressures.iter().all(|&p| p > 0.0));
    }
}

#[test]
fn later_report_wins() {
    let text = load_test_text("bulletin.txt");
    let table = decoder().decode_bulletin(&text).unwrap();

    let profile = &table[&72469];
    assert_eq!(profile.wind_unit(), WindUnit::MetersPerSecond);
    assert_eq!(profile.data_points().len(), 1);
    assert_eq!(profile.surface().unwrap().pressure, HectoPascal(1012.0));
}

#[test]
fn first_report_values() {
    let text = load_test_text("bulletin.txt");
    let chunk = split_reports(&text).next().unwrap();
    let report = decoder().decode_report(chunk).unwrap();

    assert_eq!(report.header().station(), "KWBC");
    assert_eq!(report.profiles().len(), 1);

    let profile = &report.profiles()[0];
    assert_eq!(profile.station(), 72469);
    assert_eq!(profile.wind_unit(), WindUnit::Knots);

    let pressures: Vec<f64> = profile.data_points().iter().map(|pt| pt.pressure.0).collect();
    assert_eq!(pressures, vec![1005.0, 1000.0, 925.0, 850.0, 250.0]);

    let sfc = profile.surface().unwrap();
    assert_eq!(sfc, &profile.data_points()[0]);
    assert!(approx_equal(sfc.temperature.unwrap().0, 10.4, 1.0e-9));
    assert!(approx_equal(sfc.dew_point.unwrap().0, 4.4, 1.0e-9));
    assert_eq!(sfc.wind_direction.unwrap(), 270.0);
    assert_eq!(sfc.wind_speed.unwrap(), 10.0);

    let p850 = &profile.data_points()[3];
    assert_eq!(p850.height.unwrap().0, 1472.0);
    assert!(approx_equal(p850.dew_point.unwrap().0, -8.0, 1.0e-9));

    let trop = &profile.data_points()[4];
    assert!(trop.height.is_none());
    assert!(approx_equal(trop.temperature.unwrap().0, -52.3, 1.0e-9));
    assert!(approx_equal(trop.dew_point.unwrap().0, -63.3, 1.0e-9));
    assert_eq!(trop.wind_speed.unwrap(), 45.0);
}

#[test]
fn report_headers() {
    let text = load_test_text("bulletin.txt");
    let decoder = decoder();

    let qualifiers: Vec<Option<Qualifier>> = split_reports(&text)
        .filter_map(|chunk| decoder.decode_report(chunk).ok())
        .map(|report| report.header().qualifier())
        .collect();

    assert_eq!(
        qualifiers,
        vec![None, None, None, Some(Qualifier::Correction('A'))]
    );
}

#[test]
fn pilot_only_profile_is_empty() {
    let text = load_test_text("bulletin.txt");
    let table = decoder().decode_bulletin(&text).unwrap();

    let profile = &table[&72376];
    assert!(profile.data_points().is_empty());
    assert!(profile.surface().is_none());
}

#[test]
fn decoding_is_repeatable() {
    let text = load_test_text("bulletin.txt");

    let first = decode_bulletin(&text, reference_time());
    let second = decode_bulletin(&text, reference_time());
    assert_eq!(first, second);

    let decoder = decoder();
    assert_eq!(decoder.decode_bulletin(&text).unwrap(), first);
}

#[test]
fn noisy_bytes() {
    let clean = load_test_file("bulletin.txt");
    let mut noisy = clean.clone();
    noisy.extend_from_slice(
        b"\x01\r\r\nUSUS01 KWBC 151200\r\r\nTTAA 65121 72999 99012 \xff\xfe 15010=\r\r\n\x03",
    );
    noisy.extend_from_slice(b"\x01\x00\x00\x9f\x03");

    let decoder = decoder();
    let expected = decoder.decode_bulletin(&load_test_text("bulletin.txt")).unwrap();
    assert_eq!(decoder.decode_bulletin_bytes(&clean).unwrap(), expected);
    assert_eq!(decoder.decode_bulletin_bytes(&noisy).unwrap(), expected);
}

#[test]
fn single_surface_level() {
    let text = "\x01\r\r\nUSUS01 KWBC 151200\r\r\nTTAA 65121 72469 99005 10456 27010=\r\r\n\x03";
    let table = decoder().decode_bulletin(text).unwrap();

    let profile = &table[&72469];
    assert_eq!(profile.data_points().len(), 1);
    assert_eq!(profile.surface(), profile.data_points().first());
    assert_eq!(profile.surface().unwrap().pressure, HectoPascal(1005.0));
}

#[test]
fn size_limit() {
    let text = load_test_text("bulletin.txt");

    let decoder = decoder().with_max_bulletin_len(text.len() - 1);
    assert_eq!(
        decoder.decode_bulletin(&text),
        Err(DecodeError::BulletinTooLarge {
            len: text.len(),
            limit: text.len() - 1,
        })
    );

    let decoder = decoder.with_max_bulletin_len(text.len());
    assert_eq!(decoder.decode_bulletin(&text).unwrap().len(), 3);
}
