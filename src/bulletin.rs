//! Splitting a bulletin file into reports and collecting the profiles they hold.
//!
//! Nothing here fails. A report, message or level that cannot be decoded is logged at debug or
//! trace level and left out.
use crate::{
    error::{DecodeError, Result},
    header::Header,
    message::Message,
    profile::Profile,
};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;

/// The most recent profile for each station, keyed by WMO station number.
pub type StationTable = HashMap<i32, Profile>;

const START_OF_REPORT: char = '\x01';
const END_OF_REPORT: char = '\x03';

/// One report from a bulletin: its heading and the profiles of the stations in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    header: Header,
    profiles: Vec<Profile>,
}

impl Report {
    /// Decode one report chunk.
    ///
    /// The heading is the first line, before any message, that decodes as a [`Header`].
    /// A message starts at its type keyword and ends at the next keyword or at an `=`.
    /// Messages for the same station and time, typically Parts A and B, are assembled into one
    /// profile.
    ///
    /// Only a missing heading is an error. Messages and profiles that fail are left out.
    pub fn parse(chunk: &str, now: DateTime<Utc>) -> Result<Self> {
        let header = chunk
            .lines()
            .take_while(|line| !has_type_keyword(line))
            .find_map(|line| Header::parse(line).ok())
            .ok_or(DecodeError::MissingHeader)?;

        let mut groups: Vec<((i32, u32, u32), Vec<Message>)> = Vec::new();
        for text in split_messages(chunk) {
            let msg = match Message::parse(text) {
                Ok(msg) => msg,
                Err(err) => {
                    debug!(
                        "{} {}: dropping message: {}",
                        header.station(),
                        first_line(text),
                        err
                    );
                    continue;
                }
            };

            let key = (msg.station(), msg.day(), msg.hour());
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, group)) => group.push(msg),
                None => groups.push((key, vec![msg])),
            }
        }

        let profiles = groups
            .into_iter()
            .filter_map(|((station, _, _), msgs)| match Profile::assemble(&msgs, now) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    debug!("{}: dropping station {}: {}", header.station(), station, err);
                    None
                }
            })
            .collect();

        Ok(Report { header, profiles })
    }

    /// The bulletin heading of this report.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The profiles, in the order their first message appeared.
    #[inline]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Take the profiles.
    #[inline]
    pub fn into_profiles(self) -> Vec<Profile> {
        self.profiles
    }
}

/// Split a bulletin file into report chunks at the start and end of report control characters.
///
/// ```rust
/// use sounding_bulletin::split_reports;
///
/// let text = "\x01\r\r\n001\r\r\nUSUS01 KWBC 201200\r\r\n\x03\x01 \x03\x01\nUKUS01 KWBC 201200\x03";
/// let chunks: Vec<&str> = split_reports(text).collect();
/// assert_eq!(chunks, vec!["001\r\r\nUSUS01 KWBC 201200", "UKUS01 KWBC 201200"]);
/// ```
pub fn split_reports(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == START_OF_REPORT || c == END_OF_REPORT)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
}

/// Build the station table. A later profile for a station replaces an earlier one.
pub fn build_station_table<I>(profiles: I) -> StationTable
where
    I: IntoIterator<Item = Profile>,
{
    profiles
        .into_iter()
        .map(|profile| (profile.station(), profile))
        .collect()
}

/// Decode every report in a bulletin file into a station table.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use sounding_bulletin::decode_bulletin;
///
/// let now = Utc.with_ymd_and_hms(2021, 3, 20, 14, 0, 0).unwrap();
/// let text = "\x01\n001\nUSUS01 KWBC 201200\n\
///             TTAA 70121 72250 99012 24656 15010 88999 77999=\n\
///             TTAA 70121 72201 99016 25258 13012 88999 77999=\n\x03";
///
/// let table = decode_bulletin(text, now);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[&72201].data_points().len(), 1);
/// ```
pub fn decode_bulletin(text: &str, now: DateTime<Utc>) -> StationTable {
    collect_reports(split_reports(text), now)
}

/// Decode a bulletin file that may contain bytes that are not UTF-8. Report chunks that are not
/// valid UTF-8 are dropped.
pub fn decode_bulletin_bytes(bytes: &[u8], now: DateTime<Utc>) -> StationTable {
    let chunks = bytes
        .split(|&b| b == START_OF_REPORT as u8 || b == END_OF_REPORT as u8)
        .filter_map(|chunk| match std::str::from_utf8(chunk) {
            Ok(chunk) => Some(chunk.trim()),
            Err(err) => {
                debug!("dropping report that is not UTF-8: {}", err);
                None
            }
        })
        .filter(|chunk| !chunk.is_empty());

    collect_reports(chunks, now)
}

fn collect_reports<'a, I>(chunks: I, now: DateTime<Utc>) -> StationTable
where
    I: Iterator<Item = &'a str>,
{
    let mut num_reports = 0;
    let profiles = chunks
        .inspect(|_| num_reports += 1)
        .filter_map(|chunk| match Report::parse(chunk, now) {
            Ok(report) => Some(report),
            Err(err) => {
                debug!("dropping report {}: {}", first_line(chunk), err);
                None
            }
        })
        .flat_map(Report::into_profiles);

    let table = build_station_table(profiles);
    debug!("decoded {} stations from {} reports", table.len(), num_reports);

    table
}

/// Split the body of a report into messages. Each starts at a type keyword and runs to the next
/// keyword or `=`, whichever comes first. Text outside any message is dropped.
fn split_messages(chunk: &str) -> impl Iterator<Item = &str> {
    chunk.split('=').flat_map(|part| {
        let base = part.as_ptr() as usize;
        part.split_whitespace()
            .filter(|tkn| is_type_keyword(tkn))
            .map(|tkn| tkn.as_ptr() as usize - base)
            .chain(std::iter::once(part.len()))
            .tuple_windows()
            .map(move |(start, end)| part[start..end].trim_end())
            .collect::<Vec<_>>()
    })
}

fn has_type_keyword(text: &str) -> bool {
    text.split_whitespace().any(is_type_keyword)
}

fn is_type_keyword(tkn: &str) -> bool {
    matches!(tkn, "TTAA" | "TTBB" | "TTCC" | "TTDD" | "PPBB" | "PPDD")
}

fn first_line(text: &str) -> &str {
    text.trim().lines().next().unwrap_or("")
}
