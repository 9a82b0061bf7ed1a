//! Data type and functions to merge the messages of one station into a vertical profile.

use crate::{
    error::{DecodeError, Result},
    level::{Level, LevelId, LevelMap},
    message::{Message, WindUnit},
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use itertools::Itertools;
use std::{cmp::Ordering, collections::btree_map::Entry};

pub use self::data_point::DataPoint;

/// A vertical profile from a single station, assembled from one or more messages.
///
/// The data points are sorted by pressure, surface first. Levels that were reported without a
/// pressure, like PILOT fixed altitude winds, are not included.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    // WMO station number
    station: i32,

    // Valid time of sounding
    valid_time: NaiveDateTime,

    // Unit of every wind speed in the profile
    wind_unit: WindUnit,

    // Profile, highest pressure first
    data: Vec<DataPoint>,

    // Copy of the surface point, also found in `data`
    surface: Option<DataPoint>,
}

impl Profile {
    /// Merge the messages of one station and observation time into a profile.
    ///
    /// The first message decides the station, the nominal time and the wind unit. `now` is the
    /// reference used to work out the month and year, which the messages do not carry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use metfor::HectoPascal;
    /// use sounding_bulletin::{Message, Profile};
    ///
    /// let now = Utc.with_ymd_and_hms(2021, 3, 20, 14, 0, 0).unwrap();
    /// let part_a = Message::parse("TTAA 70121 72250 99012 24656 15010 00119 24060 15015 \
    ///                              88999 77999").unwrap();
    /// let part_b = Message::parse("TTBB 7012/ 72250 00012 24656 11998 23858").unwrap();
    ///
    /// let profile = Profile::assemble(&[part_a, part_b], now).unwrap();
    /// assert_eq!(profile.station(), 72250);
    /// assert_eq!(profile.data_points().len(), 4);
    /// assert_eq!(profile.surface().unwrap().pressure, HectoPascal(1012.0));
    /// ```
    pub fn assemble(messages: &[Message], now: DateTime<Utc>) -> Result<Self> {
        let first = messages.first().ok_or(DecodeError::NoMessages)?;
        let valid_time = resolve_valid_time(first.day(), first.hour(), now)?;

        let levels = merge_level_maps(messages.iter().map(|msg| msg.levels().clone()));

        let surface = levels
            .values()
            .filter(|lvl| lvl.pressure.map_or(false, |grp| grp.is_surface))
            .find_map(DataPoint::from_level);

        let data = levels
            .values()
            .filter_map(DataPoint::from_level)
            .sorted_by(|a, b| {
                b.pressure
                    .partial_cmp(&a.pressure)
                    .unwrap_or(Ordering::Equal)
            })
            .collect();

        Ok(Profile {
            station: first.station(),
            valid_time,
            wind_unit: first.wind_unit(),
            data,
            surface,
        })
    }

    /// WMO station number, eg 72250.
    #[inline]
    pub fn station(&self) -> i32 {
        self.station
    }

    /// Valid time of the sounding, UTC.
    #[inline]
    pub fn valid_time(&self) -> NaiveDateTime {
        self.valid_time
    }

    /// Unit of the wind speeds. They are left as transmitted.
    #[inline]
    pub fn wind_unit(&self) -> WindUnit {
        self.wind_unit
    }

    /// All the data points, highest pressure first.
    #[inline]
    pub fn data_points(&self) -> &[DataPoint] {
        &self.data
    }

    /// The point reported as the surface, if there was one.
    #[inline]
    pub fn surface(&self) -> Option<&DataPoint> {
        self.surface.as_ref()
    }

    /// Get a bottom up iterator over the data points.
    #[inline]
    pub fn bottom_up<'a>(&'a self) -> impl Iterator<Item = DataPoint> + 'a {
        self.data.iter().copied()
    }

    /// Get a top down iterator over the data points.
    #[inline]
    pub fn top_down<'a>(&'a self) -> impl Iterator<Item = DataPoint> + 'a {
        self.data.iter().rev().copied()
    }
}

/// Combine two observations that were reported under the same identity.
///
/// The result is always a significant level at the first available pressure, and takes each
/// group from `left` when it has one, otherwise from `right`. If neither side has a pressure
/// `left` is returned unchanged.
pub fn merge_levels(left: Level, right: Level) -> Level {
    match left.pressure.or(right.pressure) {
        Some(pressure) => Level {
            id: LevelId::Significant(pressure.whole_hpa()),
            pressure: Some(pressure),
            temperature: left.temperature.or(right.temperature),
            wind: left.wind.or(right.wind),
        },
        None => left,
    }
}

/// Fold the level maps of several messages, in order, into one, merging levels with the same
/// identity using [`merge_levels`].
pub fn merge_level_maps<I>(maps: I) -> LevelMap
where
    I: IntoIterator<Item = LevelMap>,
{
    maps.into_iter().fold(LevelMap::new(), |mut acc, map| {
        for (id, level) in map {
            match acc.entry(id) {
                Entry::Vacant(entry) => {
                    entry.insert(level);
                }
                Entry::Occupied(mut entry) => {
                    let merged = merge_levels(*entry.get(), level);
                    entry.insert(merged);
                }
            }
        }
        acc
    })
}

/// Place a day of the month and hour on the calendar near `now`.
///
/// A day later than today's must be from last month. The minutes and seconds are zero. Days past
/// the end of the month, and hours past the end of the day, roll over the way a lenient calendar
/// does, so day 30 of February is the 2nd of March.
///
/// # Examples
///
/// ```rust
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use sounding_bulletin::resolve_valid_time;
///
/// let now = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
///
/// let vt = resolve_valid_time(2, 0, now).unwrap();
/// assert_eq!(vt, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap());
///
/// let vt = resolve_valid_time(31, 12, now).unwrap();
/// assert_eq!(vt, NaiveDate::from_ymd_opt(2020, 12, 31).unwrap().and_hms_opt(12, 0, 0).unwrap());
/// ```
pub fn resolve_valid_time(day: u32, hour: u32, now: DateTime<Utc>) -> Result<NaiveDateTime> {
    let (year, month) = if day <= now.day() {
        (now.year(), now.month())
    } else if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };

    let err = || DecodeError::InvalidValidTime { day, hour };
    let offset = Duration::days(i64::from(day) - 1) + Duration::hours(i64::from(hour));

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.and_hms_opt(0, 0, 0))
        .and_then(|start| start.checked_add_signed(offset))
        .ok_or_else(err)
}


mod data_point;
