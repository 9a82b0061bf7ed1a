//! Helpers shared by the unit tests.

pub mod test_tools {
    use chrono::{DateTime, TimeZone, Utc};

    pub fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
        assert!(eps > 0.0);

        (val1 - val2).abs() < eps
    }

    /// A fixed "now" so tests do not depend on the clock.
    pub fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 20, 14, 37, 12).unwrap()
    }

    /// Part A of a 12Z sounding from Brownsville, TX, winds in knots.
    pub const BRO_TTAA: &str = "TTAA 70121 72250 99012 24656 15010 00119 24060 15015 \
        92799 21258 17025 85511 17057 19030 70144 08060 24020 50583 07581 26035 \
        40749 17980 26545 30953 33360 26560 25075 42759 26570 20223 52757 26580 \
        15411 63959 27065 10664 75958 28040 88195 71559 27080 77240 26590 41205 \
        31313 58708 81103 51515 10164 00090 10194 26025 26530=";

    /// Part B of the same sounding.
    pub const BRO_TTBB: &str = "TTBB 7012/ 72250 00012 24656 11998 23858 22925 21258 \
        33850 17057 44720 09258 55500 07581 66195 71559 21212 00012 15010 11985 16520 \
        22850 19030 33700 24020 44240 26590 31313 58708 81103 41414 45///=";
}
