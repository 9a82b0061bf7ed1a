//! The abbreviated heading that starts every bulletin, `TTAAii CCCC YYGGgg [BBB]`.
//!
//! The data type designators follow table B1 of the WMO Manual on the Global Telecommunication
//! System for `T1 = U`, upper air data.
use crate::error::{DecodeError, Result};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Kind of data announced by the first two letters of the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `T1 = U`, one of the upper air designators.
    UpperAir(UpperAirType),
    /// Any other `T1`. These headings are accepted but carry no sounding data.
    Other,
}

/// Upper air data type designators, `T2` when `T1 = U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, PartialOrd, Ord)]
pub enum UpperAirType {
    /// `UA`, aircraft reports (ICAO).
    AircraftIcao,
    /// `UD`, aircraft reports (AMDAR).
    AircraftAmdar,
    /// `UE`, TEMP Part D.
    TempPartD,
    /// `UF`, TEMP Parts C and D.
    TempPartsCD,
    /// `UG`, PILOT Part B.
    PilotPartB,
    /// `UH`, PILOT Part C.
    PilotPartC,
    /// `UI`, PILOT Parts A and B.
    PilotPartsAB,
    /// `UK`, TEMP Part B.
    TempPartB,
    /// `UL`, TEMP Part C.
    TempPartC,
    /// `UM`, TEMP Parts A and B.
    TempPartsAB,
    /// `UN`, rocketsonde reports.
    Rocketsonde,
    /// `UP`, PILOT Part A.
    PilotPartA,
    /// `UQ`, PILOT Part D.
    PilotPartD,
    /// `US`, TEMP Part A.
    TempPartA,
    /// `UU`, monthly statistics from upper air stations.
    MonthlyStatistics,
    /// `UX`, miscellaneous.
    Miscellaneous,
    /// `UY`, PILOT Parts C and D.
    PilotPartsCD,
    /// `UZ`, TEMP DROP from a sonde released by balloon or aircraft.
    TempDrop,
}

impl UpperAirType {
    /// The `T2` letter for this designator.
    pub fn code(self) -> char {
        use self::UpperAirType::*;

        match self {
            AircraftIcao => 'A',
            AircraftAmdar => 'D',
            TempPartD => 'E',
            TempPartsCD => 'F',
            PilotPartB => 'G',
            PilotPartC => 'H',
            PilotPartsAB => 'I',
            TempPartB => 'K',
            TempPartC => 'L',
            TempPartsAB => 'M',
            Rocketsonde => 'N',
            PilotPartA => 'P',
            PilotPartD => 'Q',
            TempPartA => 'S',
            MonthlyStatistics => 'U',
            Miscellaneous => 'X',
            PilotPartsCD => 'Y',
            TempDrop => 'Z',
        }
    }

    /// Look up a designator by its `T2` letter.
    pub fn from_code(code: char) -> Option<Self> {
        Self::iter().find(|tp| tp.code() == code)
    }
}

/// Day, hour and minute of issue. The heading carries no month or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletinTime {
    /// Day of the month, UTC
    pub day: u32,
    /// Hour, UTC
    pub hour: u32,
    /// Minute
    pub minute: u32,
}

/// The optional `BBB` group marking a retransmitted or split bulletin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `RRx`, delayed.
    Delayed(char),
    /// `CCx`, correction.
    Correction(char),
    /// `AAx`, amendment.
    Amendment(char),
    /// `Pxx`, one segment of a bulletin split into several.
    Segment(char, char),
}

impl Qualifier {
    /// Decode a `BBB` group, `None` if it is not one of the known forms.
    pub fn parse(token: &str) -> Option<Self> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() != 3 {
            return None;
        }

        match (chars[0], chars[1], chars[2]) {
            ('R', 'R', idx) => Some(Qualifier::Delayed(idx)),
            ('C', 'C', idx) => Some(Qualifier::Correction(idx)),
            ('A', 'A', idx) => Some(Qualifier::Amendment(idx)),
            ('P', a, b) => Some(Qualifier::Segment(a, b)),
            _ => None,
        }
    }
}

/// A decoded bulletin heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    data_type: DataType,
    station: String,
    time: BulletinTime,
    qualifier: Option<Qualifier>,
}

impl Header {
    /// Decode a heading line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bulletin::{DataType, Header, Qualifier, UpperAirType};
    ///
    /// let hdr = Header::parse("USUS01 KWBC 201200 RRA").unwrap();
    /// assert_eq!(hdr.data_type(), DataType::UpperAir(UpperAirType::TempPartA));
    /// assert_eq!(hdr.station(), "KWBC");
    /// assert_eq!(hdr.time().day, 20);
    /// assert_eq!(hdr.time().hour, 12);
    /// assert_eq!(hdr.qualifier(), Some(Qualifier::Delayed('A')));
    ///
    /// assert!(Header::parse("TTAA 70121 72250 99012").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 && tokens.len() != 4 {
            return Err(DecodeError::HeaderTokenCount(tokens.len()));
        }

        let data_type = parse_data_type(tokens[0])?;
        let station = tokens[1].to_owned();
        let time = parse_ddhhmm(tokens[2])?;
        let qualifier = tokens.get(3).and_then(|tkn| Qualifier::parse(tkn));

        Ok(Header {
            data_type,
            station,
            time,
            qualifier,
        })
    }

    /// The kind of data in the bulletin.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The originating center, eg `KWBC`.
    #[inline]
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Time of issue.
    #[inline]
    pub fn time(&self) -> BulletinTime {
        self.time
    }

    /// Delayed, corrected, amended or segmented, if it was any of those.
    #[inline]
    pub fn qualifier(&self) -> Option<Qualifier> {
        self.qualifier
    }
}

impl FromStr for Header {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        Header::parse(s)
    }
}

fn parse_data_type(token: &str) -> Result<DataType> {
    let mut chars = token.chars();

    match chars.next() {
        Some('U') => chars
            .next()
            .and_then(UpperAirType::from_code)
            .map(DataType::UpperAir)
            .ok_or_else(|| DecodeError::UnknownDataType(token.to_owned())),
        _ => Ok(DataType::Other),
    }
}

fn parse_ddhhmm(token: &str) -> Result<BulletinTime> {
    let err = || DecodeError::InvalidTimestamp(token.to_owned());

    if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let field = |range: std::ops::Range<usize>| token[range].parse::<u32>().map_err(|_| err());

    Ok(BulletinTime {
        day: field(0..2)?,
        hour: field(2..4)?,
        minute: field(4..6)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_upper_air_codes() {
        assert_eq!(UpperAirType::iter().count(), 18);

        for tp in UpperAirType::iter() {
            assert_eq!(UpperAirType::from_code(tp.code()), Some(tp));
        }

        assert!(UpperAirType::from_code('B').is_none());
        assert!(UpperAirType::from_code('s').is_none());
    }

    #[test]
    fn test_data_type() {
        let hdr = Header::parse("UKUS42 KWBC 201200").unwrap();
        assert_eq!(hdr.data_type(), DataType::UpperAir(UpperAirType::TempPartB));

        let hdr = Header::parse("SAUS70 KWBC 201200").unwrap();
        assert_eq!(hdr.data_type(), DataType::Other);

        match Header::parse("UBUS01 KWBC 201200") {
            Err(DecodeError::UnknownDataType(tkn)) => assert_eq!(tkn, "UBUS01"),
            res => panic!("unexpected result {:?}", res),
        }

        assert!(Header::parse("U KWBC 201200").is_err());
    }

    #[test]
    fn test_token_count() {
        assert_eq!(
            Header::parse("USUS01 KWBC"),
            Err(DecodeError::HeaderTokenCount(2))
        );
        assert_eq!(
            Header::parse("USUS01 KWBC 201200 RRA EXTRA"),
            Err(DecodeError::HeaderTokenCount(5))
        );
        assert_eq!(Header::parse(""), Err(DecodeError::HeaderTokenCount(0)));
    }

    #[test]
    fn test_ddhhmm() {
        for &(token, day, hour, minute) in &[
            ("010000", 1, 0, 0),
            ("201230", 20, 12, 30),
            ("312359", 31, 23, 59),
            ("999999", 99, 99, 99),
        ] {
            let hdr = Header::parse(&format!("USUS01 KWBC {}", token)).unwrap();
            assert_eq!(hdr.time(), BulletinTime { day, hour, minute });
        }

        for token in &["20120", "2012000", "2O1200", "20-200", "//////"] {
            assert!(Header::parse(&format!("USUS01 KWBC {}", token)).is_err());
        }
    }

    #[test]
    fn test_qualifier() {
        let q = |line: &str| Header::parse(line).unwrap().qualifier();

        assert_eq!(q("USUS01 KWBC 201200"), None);
        assert_eq!(q("USUS01 KWBC 201200 RRB"), Some(Qualifier::Delayed('B')));
        assert_eq!(q("USUS01 KWBC 201200 CCA"), Some(Qualifier::Correction('A')));
        assert_eq!(q("USUS01 KWBC 201200 AAC"), Some(Qualifier::Amendment('C')));
        assert_eq!(q("USUS01 KWBC 201200 PAB"), Some(Qualifier::Segment('A', 'B')));

        // Unknown qualifiers leave a valid header with no qualifier.
        assert_eq!(q("USUS01 KWBC 201200 XYZ"), None);
        assert_eq!(q("USUS01 KWBC 201200 RR"), None);
    }

    #[test]
    fn test_equality() {
        let a: Header = "USUS01 KWBC 201200 CCA".parse().unwrap();
        let b = Header::parse("  USUS01   KWBC 201200 CCA ").unwrap();
        let c = Header::parse("USUS01 KWBC 201200 CCB").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.station(), "KWBC");
    }
}
