//! Decoding of a single station message, one part of a TEMP (FM 35) or PILOT (FM 32) report.
//!
//! A message is a run of whitespace separated groups. After the type keyword come the time
//! group `YYGGI` and the station number `IIiii`, then up to five sections, each either a fixed
//! number of groups or a repeating run of groups ended by a marker group:
//!
//! | Section                 | Parts  | Groups per level       | Ends at                          |
//! |-------------------------|--------|------------------------|----------------------------------|
//! | Standard isobaric       | A, C   | pressure, temp, wind   | `88..`, `77..`, `66..`, `31313`, `51515` |
//! | Tropopause              | all    | `88ppp`, temp, wind    | one level, `88999` if none       |
//! | Maximum wind            | all    | `77ppp`, wind, [shear] | one level, `77999` if none       |
//! | Significant temperature | B, D   | pressure, temp         | `21212`, `31313` .. `61616`      |
//! | Significant wind        | all    | pressure, wind         | `31313` .. `61616`               |
//!
//! The maximum wind may also be reported with the `66` indicator when it is at the top of the
//! sounding. PILOT Parts B and D have a single section of winds at fixed altitudes instead.
//!
//! A bad group in a repeating section only drops that level. A bad group in the time, station,
//! tropopause or maximum wind groups drops the whole message.
use crate::{
    error::{DecodeError, Result},
    groups::{
        decode_mandatory_pressure, decode_suffix_pressure, decode_temperature, decode_wind,
        is_missing, parse_digits,
    },
    level::{Level, LevelId, LevelMap},
};
use log::trace;
use metfor::HectoPascal;
use optional::{none, some, Optioned};
use std::str::FromStr;

mod pilot;
mod tokens;

pub(crate) use self::tokens::Tokens;

/// The code form a message was sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeForm {
    /// FM 35 TEMP, pressure, temperature, humidity and wind.
    Temp,
    /// FM 32 PILOT, upper wind only.
    Pilot,
}

/// Which part of the report a message is.
///
/// Parts A and B cover the atmosphere up to 100 hPa, C and D above it. Parts A and C carry the
/// standard isobaric surfaces, B and D the significant levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Part {
    A,
    B,
    C,
    D,
}

/// Unit of the wind speeds in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindUnit {
    /// Meters per second
    MetersPerSecond,
    /// Knots
    Knots,
}

/// One decoded station message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    code: CodeForm,
    part: Part,
    day: u32,
    hour: u32,
    station: i32,
    wind_unit: WindUnit,
    lowest_pressure: Optioned<HectoPascal>,
    levels: LevelMap,
}

impl Message {
    /// Decode a message from its text.
    ///
    /// Anything before the first type keyword (`TTAA`, `TTBB`, `TTCC`, `TTDD`, `PPBB` or `PPDD`)
    /// is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_bulletin::{LevelId, Message, Part, WindUnit};
    ///
    /// let msg = Message::parse("TTAA 65121 72469 99005 01234 27045 88999 77999=").unwrap();
    ///
    /// assert_eq!(msg.part(), Part::A);
    /// assert_eq!(msg.station(), 72469);
    /// assert_eq!(msg.day(), 15);
    /// assert_eq!(msg.hour(), 12);
    /// assert_eq!(msg.wind_unit(), WindUnit::Knots);
    /// assert!(msg.levels().contains_key(&LevelId::Surface));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = Tokens::new(text);

        let (code, part) = tokens
            .by_ref()
            .find_map(message_type)
            .ok_or(DecodeError::MissingTypeKeyword)?;

        let yyggi = tokens.next().ok_or(DecodeError::TruncatedMessage)?;
        let station = tokens.next().ok_or(DecodeError::TruncatedMessage)?;
        if is_missing(yyggi) || station == "NIL" || tokens.peek() == Some("NIL") {
            return Err(DecodeError::NilReport);
        }

        let (day, hour, wind_unit, lowest_pressure) = parse_yyggi(yyggi, code)?;
        let station = station
            .parse::<i32>()
            .map_err(|_| DecodeError::InvalidStation(station.to_owned()))?;

        let mut levels = LevelMap::new();
        match code {
            CodeForm::Temp => {
                if part == Part::A || part == Part::C {
                    standard_isobaric_section(&mut tokens, &mut levels);
                }
                tropopause_section(&mut tokens, &mut levels)?;
                maximum_wind_section(&mut tokens, &mut levels)?;
                if part == Part::B || part == Part::D {
                    significant_temperature_section(&mut tokens, &mut levels);
                }
                significant_wind_section(&mut tokens, &mut levels);
            }
            CodeForm::Pilot => pilot::fixed_altitude_section(&mut tokens, &mut levels),
        }

        Ok(Message {
            code,
            part,
            day,
            hour,
            station,
            wind_unit,
            lowest_pressure,
            levels,
        })
    }

    /// TEMP or PILOT.
    #[inline]
    pub fn code(&self) -> CodeForm {
        self.code
    }

    /// Which part of the report this is.
    #[inline]
    pub fn part(&self) -> Part {
        self.part
    }

    /// Day of the month of the observation, UTC.
    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Nominal hour of the observation, UTC.
    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// WMO station number, eg 72250.
    #[inline]
    pub fn station(&self) -> i32 {
        self.station
    }

    /// Unit of every wind speed in this message.
    #[inline]
    pub fn wind_unit(&self) -> WindUnit {
        self.wind_unit
    }

    /// The last standard isobaric surface with winds, from the `I` digit of the time group.
    /// A digit `n` is `n × 100` hPa, except `0` which stands for 1000 hPa. Always missing for
    /// PILOT messages.
    #[inline]
    pub fn lowest_pressure(&self) -> Optioned<HectoPascal> {
        self.lowest_pressure
    }

    /// The decoded levels.
    #[inline]
    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    /// Take the decoded levels.
    #[inline]
    pub fn into_levels(self) -> LevelMap {
        self.levels
    }
}

impl FromStr for Message {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        Message::parse(s)
    }
}

fn message_type(token: &str) -> Option<(CodeForm, Part)> {
    match token {
        "TTAA" => Some((CodeForm::Temp, Part::A)),
        "TTBB" => Some((CodeForm::Temp, Part::B)),
        "TTCC" => Some((CodeForm::Temp, Part::C)),
        "TTDD" => Some((CodeForm::Temp, Part::D)),
        "PPBB" => Some((CodeForm::Pilot, Part::B)),
        "PPDD" => Some((CodeForm::Pilot, Part::D)),
        _ => None,
    }
}

/// Decode the `YYGGI` group. 50 is added to the day when winds are in knots.
fn parse_yyggi(
    token: &str,
    code: CodeForm,
) -> Result<(u32, u32, WindUnit, Optioned<HectoPascal>)> {
    let err = || DecodeError::InvalidTimestamp(token.to_owned());

    if token.len() != 5 || !token.is_ascii() {
        return Err(err());
    }

    let raw_day = parse_digits(&token[0..2]).ok_or_else(err)? as u32;
    let hour = parse_digits(&token[2..4]).ok_or_else(err)? as u32;

    let (day, wind_unit) = if raw_day >= 50 {
        (raw_day - 50, WindUnit::Knots)
    } else {
        (raw_day, WindUnit::MetersPerSecond)
    };

    let lowest_pressure = match (code, parse_digits(&token[4..5])) {
        (CodeForm::Temp, Some(0)) => some(HectoPascal(1000.0)),
        (CodeForm::Temp, Some(id)) => some(HectoPascal(f64::from(id * 100))),
        _ => none(),
    };

    Ok((day, hour, wind_unit, lowest_pressure))
}

fn standard_isobaric_section(tokens: &mut Tokens, levels: &mut LevelMap) {
    while let Some(tkn) = tokens.peek() {
        let end_of_section = tkn.starts_with("88")
            || tkn.starts_with("77")
            || tkn.starts_with("66")
            || tkn == "31313"
            || tkn == "51515";
        if end_of_section {
            break;
        }

        match standard_isobaric_level(tokens.take_group(3)) {
            Ok(level) => {
                levels.insert(level.id, level);
            }
            Err(err) => trace!("skipping standard isobaric level: {}", err),
        }
    }
}

fn standard_isobaric_level(groups: &[&str]) -> Result<Level> {
    if let [pressure, temperature, wind] = *groups {
        let pressure = decode_mandatory_pressure(pressure)?;
        let id = if pressure.is_surface {
            LevelId::Surface
        } else {
            LevelId::Mandatory(pressure.whole_hpa())
        };

        Ok(Level::new(id)
            .with_pressure(pressure)
            .with_temperature(decode_temperature(temperature)?)
            .with_wind(decode_wind(wind)?))
    } else {
        Err(DecodeError::TruncatedSection(2))
    }
}

fn tropopause_section(tokens: &mut Tokens, levels: &mut LevelMap) -> Result<()> {
    match tokens.peek() {
        Some("88999") => {
            tokens.next();
            return Ok(());
        }
        Some(tkn) if tkn.starts_with("88") => {}
        _ => return Ok(()),
    }

    if let [pressure, temperature, wind] = *tokens.take_group(3) {
        let pressure = decode_suffix_pressure(pressure)?;
        let level = Level::new(LevelId::Tropopause(pressure.whole_hpa()))
            .with_pressure(pressure)
            .with_temperature(decode_temperature(temperature)?)
            .with_wind(decode_wind(wind)?);

        levels.insert(level.id, level);
        Ok(())
    } else {
        Err(DecodeError::TruncatedSection(3))
    }
}

/// The maximum wind section has no temperature group: `77ppp` (or `66ppp`) and a wind group,
/// then an optional `4vbva` vertical wind shear group that is read and ignored.
fn maximum_wind_section(tokens: &mut Tokens, levels: &mut LevelMap) -> Result<()> {
    match tokens.peek() {
        Some("77999") | Some("66999") => {
            tokens.next();
            return Ok(());
        }
        Some(tkn) if tkn.starts_with("77") || tkn.starts_with("66") => {}
        _ => return Ok(()),
    }

    if let [pressure, wind] = *tokens.take_group(2) {
        let pressure = decode_suffix_pressure(pressure)?;
        let level = Level::new(LevelId::MaximumWind(pressure.whole_hpa()))
            .with_pressure(pressure)
            .with_wind(decode_wind(wind)?);

        levels.insert(level.id, level);
    } else {
        return Err(DecodeError::TruncatedSection(4));
    }

    // Optional vertical wind shear group, 4vbva.
    if let Some(tkn) = tokens.peek() {
        if tkn.len() == 5 && tkn.starts_with('4') && tkn != "41414" {
            tokens.next();
        }
    }

    Ok(())
}

fn significant_temperature_section(tokens: &mut Tokens, levels: &mut LevelMap) {
    const TERMINATORS: [&str; 5] = ["21212", "31313", "41414", "51515", "61616"];

    while let Some(tkn) = tokens.peek() {
        if TERMINATORS.contains(&tkn) {
            break;
        }

        match significant_temperature_level(tokens.take_group(2)) {
            Ok(level) => {
                levels.insert(level.id, level);
            }
            Err(err) => trace!("skipping significant temperature level: {}", err),
        }
    }
}

fn significant_temperature_level(groups: &[&str]) -> Result<Level> {
    if let [pressure, temperature] = *groups {
        let pressure = decode_suffix_pressure(pressure)?;
        Ok(Level::new(LevelId::Significant(pressure.whole_hpa()))
            .with_pressure(pressure)
            .with_temperature(decode_temperature(temperature)?))
    } else {
        Err(DecodeError::TruncatedSection(5))
    }
}

fn significant_wind_section(tokens: &mut Tokens, levels: &mut LevelMap) {
    const TERMINATORS: [&str; 4] = ["31313", "41414", "51515", "61616"];

    if tokens.peek() != Some("21212") {
        return;
    }
    tokens.next();

    while let Some(tkn) = tokens.peek() {
        if TERMINATORS.contains(&tkn) {
            break;
        }

        match significant_wind_level(tokens.take_group(2)) {
            Ok(level) => {
                levels.insert(level.id, level);
            }
            Err(err) => trace!("skipping significant wind level: {}", err),
        }
    }
}

fn significant_wind_level(groups: &[&str]) -> Result<Level> {
    if let [pressure, wind] = *groups {
        let pressure = decode_suffix_pressure(pressure)?;
        Ok(Level::new(LevelId::Significant(pressure.whole_hpa()))
            .with_pressure(pressure)
            .with_wind(decode_wind(wind)?))
    } else {
        Err(DecodeError::TruncatedSection(6))
    }
}
