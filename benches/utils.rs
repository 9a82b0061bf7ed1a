use chrono::{DateTime, TimeZone, Utc};
use std::{fs::File, io::Read, path::PathBuf};

/// The test bulletin repeated enough times to look like a full hourly file.
pub fn load_large_bulletin() -> String {
    load_test_file("bulletin.txt").repeat(200)
}

pub fn load_test_file(fname: &str) -> String {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);

    let mut f = File::open(&test_path).expect(&format!("Error opening file: {:#?}", test_path));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", test_path));

    contents
}

pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, 15, 14, 0, 0).unwrap()
}
