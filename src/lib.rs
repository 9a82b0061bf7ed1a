#![warn(missing_docs)]
//! Functions and data types for decoding WMO FM-35 TEMP and FM-32 PILOT upper air bulletins
//! into vertical profiles.
//!
//! A bulletin file holds many reports, each starting with a heading line followed by one or more
//! station messages. Each message is a run of 5 character groups split into coded sections. The
//! decoders here work from the bottom up:
//!
//!  - the group decoders turn a single group into pressure, temperature or wind values,
//!  - [`Header`] decodes a report's heading,
//!  - [`Message`] walks the sections of one station message into a [`LevelMap`],
//!  - [`Profile`] merges the messages of one station and time into a sorted profile,
//!  - [`decode_bulletin`] and [`Decoder`] split a bulletin file and build a [`StationTable`].
//!
//! Decoding a bulletin never fails because of bad data. Anything that cannot be decoded is
//! left out, and the reason is logged with the [log](https://docs.rs/log) crate.
//!
//! # Examples
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use sounding_bulletin::Decoder;
//!
//! let bulletin = "\x01\r\r\n001 \r\r\nUSUS01 KWBC 201200\r\r\n\
//!                 TTAA 70121 72250 99012 24656 15010 00119 24060 15015 88999 77999=\r\r\n\
//!                 TTBB 7012/ 72250 00012 24656 11998 23858=\r\r\n\x03";
//!
//! let now = Utc.with_ymd_and_hms(2021, 3, 20, 14, 0, 0).unwrap();
//! let table = Decoder::new()
//!     .with_reference_time(now)
//!     .decode_bulletin(bulletin)
//!     .unwrap();
//!
//! // Surface and 1000 hPa from Part A, the surface again and 998 hPa from Part B.
//! let profile = &table[&72250];
//! assert_eq!(profile.data_points().len(), 4);
//! assert_eq!(profile.surface().unwrap().pressure.0, 1012.0);
//! ```

//
// API
//
pub use crate::{
    bulletin::{
        build_station_table, decode_bulletin, decode_bulletin_bytes, split_reports, Report,
        StationTable,
    },
    decoder::Decoder,
    error::{DecodeError, Result},
    groups::{
        decode_mandatory_pressure, decode_suffix_pressure, decode_temperature, decode_wind,
        mandatory_height, PressureGroup, TemperatureGroup, WindGroup,
    },
    header::{BulletinTime, DataType, Header, Qualifier, UpperAirType},
    level::{Level, LevelId, LevelMap},
    message::{CodeForm, Message, Part, WindUnit},
    profile::{merge_level_maps, merge_levels, resolve_valid_time, DataPoint, Profile},
};

//
// Internal use only
//
mod bulletin;
mod decoder;
mod error;
mod groups;
mod header;
mod level;
mod message;
mod profile;

#[cfg(test)]
mod utility;
