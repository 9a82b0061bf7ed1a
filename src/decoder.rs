use crate::{
    bulletin::{self, Report, StationTable},
    error::{DecodeError, Result},
};
use chrono::{DateTime, Utc};

/// Decoding options and the entry point for decoding bulletin files.
///
/// The day and hour in a message only make sense relative to some reference time. By default
/// that is the current time, read once per call so every profile in a bulletin is resolved
/// against the same instant.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use sounding_bulletin::{DecodeError, Decoder};
///
/// let decoder = Decoder::new()
///     .with_reference_time(Utc.with_ymd_and_hms(2021, 3, 20, 14, 0, 0).unwrap())
///     .with_max_bulletin_len(64_usize);
///
/// let table = decoder
///     .decode_bulletin("\x01USUS01 KWBC 201200\nTTAA 70121 72250 99012 24656 15010=\x03")
///     .unwrap();
/// assert_eq!(table[&72250].data_points().len(), 1);
///
/// let too_big = "\x01USUS01 KWBC 201200\n\x03".repeat(10);
/// assert_eq!(
///     decoder.decode_bulletin(&too_big),
///     Err(DecodeError::BulletinTooLarge { len: 210, limit: 64 })
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Decoder {
    reference_time: Option<DateTime<Utc>>,
    max_bulletin_len: Option<usize>,
}

impl Decoder {
    /// Create a decoder that uses the current time and accepts bulletins of any size.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to fix the reference time used to place message days and hours on the
    /// calendar.
    #[inline]
    pub fn with_reference_time<T>(self, reference_time: T) -> Self
    where
        Option<DateTime<Utc>>: From<T>,
    {
        Decoder {
            reference_time: Option::from(reference_time),
            ..self
        }
    }

    /// Builder method to set the largest bulletin, in bytes, the decoder will accept.
    #[inline]
    pub fn with_max_bulletin_len<T>(self, max_bulletin_len: T) -> Self
    where
        Option<usize>: From<T>,
    {
        Decoder {
            max_bulletin_len: Option::from(max_bulletin_len),
            ..self
        }
    }

    /// The fixed reference time, if one was set.
    #[inline]
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    /// The size limit, if one was set.
    #[inline]
    pub fn max_bulletin_len(&self) -> Option<usize> {
        self.max_bulletin_len
    }

    /// Decode a bulletin file into a station table.
    ///
    /// The only error is a bulletin over the size limit. Anything inside the bulletin that
    /// cannot be decoded is skipped.
    pub fn decode_bulletin(&self, text: &str) -> Result<StationTable> {
        self.check_len(text.len())?;
        Ok(bulletin::decode_bulletin(text, self.now()))
    }

    /// Decode a bulletin file that is not known to be UTF-8. Report chunks that are not valid
    /// UTF-8 are skipped.
    pub fn decode_bulletin_bytes(&self, bytes: &[u8]) -> Result<StationTable> {
        self.check_len(bytes.len())?;
        Ok(bulletin::decode_bulletin_bytes(bytes, self.now()))
    }

    /// Decode a single report chunk, without the start and end of report characters.
    pub fn decode_report(&self, chunk: &str) -> Result<Report> {
        self.check_len(chunk.len())?;
        Report::parse(chunk, self.now())
    }

    fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }

    fn check_len(&self, len: usize) -> Result<()> {
        match self.max_bulletin_len {
            Some(limit) if len > limit => Err(DecodeError::BulletinTooLarge { len, limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utility::test_tools::*;

    #[test]
    fn test_builder() {
        let decoder = Decoder::new();
        assert!(decoder.reference_time().is_none());
        assert!(decoder.max_bulletin_len().is_none());

        let decoder = decoder
            .with_reference_time(reference_time())
            .with_max_bulletin_len(1024_usize);
        assert_eq!(decoder.reference_time(), Some(reference_time()));
        assert_eq!(decoder.max_bulletin_len(), Some(1024));

        let decoder = decoder.with_max_bulletin_len(None::<usize>);
        assert!(decoder.max_bulletin_len().is_none());
        assert_eq!(decoder.reference_time(), Some(reference_time()));
    }

    #[test]
    fn test_size_limit() {
        let text = format!("\x01USUS01 KWBC 201200\n{}\n\x03", BRO_TTAA);
        let limit = text.len();

        let decoder = Decoder::new()
            .with_reference_time(reference_time())
            .with_max_bulletin_len(limit);
        assert_eq!(decoder.decode_bulletin(&text).unwrap().len(), 1);
        assert_eq!(decoder.decode_bulletin_bytes(text.as_bytes()).unwrap().len(), 1);

        let decoder = decoder.with_max_bulletin_len(limit - 1);
        assert_eq!(
            decoder.decode_bulletin(&text),
            Err(DecodeError::BulletinTooLarge {
                len: limit,
                limit: limit - 1
            })
        );
        assert!(decoder.decode_bulletin_bytes(text.as_bytes()).is_err());
    }

    #[test]
    fn test_decode_report() {
        let chunk = format!("USUS01 KWBC 201200\n{}\n{}", BRO_TTAA, BRO_TTBB);
        let decoder = Decoder::new().with_reference_time(reference_time());

        let rpt = decoder.decode_report(&chunk).unwrap();
        assert_eq!(rpt.profiles().len(), 1);
        assert_eq!(rpt.profiles()[0].station(), 72250);

        assert_eq!(
            decoder.decode_report(BRO_TTAA),
            Err(DecodeError::MissingHeader)
        );
    }

    #[test]
    fn test_current_time_default() {
        // Whatever day it is, the current day of the month resolves to this month.
        let now = Utc::now();
        let day = now.format("%d").to_string();
        let text = format!(
            "\x01USUS01 KWBC {}0000\nTTAA {}001 72250 99012 24656 15010=\x03",
            day, day
        );

        let table = Decoder::new().decode_bulletin(&text).unwrap();
        let valid_time = table[&72250].valid_time();
        assert_eq!(valid_time.format("%d%H").to_string(), format!("{}00", day));
    }
}
