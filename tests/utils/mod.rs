use chrono::{DateTime, TimeZone, Utc};
use std::{fs::File, io::Read, path::PathBuf};

#[allow(dead_code)]
pub fn load_test_file(fname: &str) -> Vec<u8> {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);

    let mut f =
        File::open(&test_path).unwrap_or_else(|_| panic!("Error opening file: {:#?}", test_path));

    let mut contents = Vec::new();
    f.read_to_end(&mut contents)
        .unwrap_or_else(|_| panic!("Error reading file: {:#?}", test_path));

    contents
}

#[allow(dead_code)]
pub fn load_test_text(fname: &str) -> String {
    String::from_utf8(load_test_file(fname)).expect("Test file is not UTF-8")
}

/// The fixtures are all 12Z soundings from the 15th.
#[allow(dead_code)]
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, 15, 14, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
    assert!(eps > 0.0);

    (val1 - val2).abs() < eps
}
