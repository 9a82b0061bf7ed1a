//! Decoders for the fixed width, five character numeric groups that make up the body of a TEMP
//! or PILOT message.
//!
//! Each decoder is a pure function of one token. A token made entirely of `/` characters is the
//! code forms' way of saying "not observed", and decodes to missing values rather than an error.
use crate::error::{DecodeError, Result};
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use optional::{none, some, Optioned};

/// Pressure, and possibly height, of a level.
#[derive(Clone, Copy, Debug)]
pub struct PressureGroup {
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Geopotential height in meters
    pub height: Optioned<Meters>,
    /// Set when the group came from the `99PPP` surface indicator.
    pub is_surface: bool,
}

impl PressureGroup {
    /// Pressure rounded to a whole hPa, suitable for use as a map key.
    #[inline]
    pub fn whole_hpa(&self) -> i32 {
        self.pressure.unpack().round() as i32
    }
}

/// Temperature and dew point of a level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemperatureGroup {
    /// Temperature in C
    pub temperature: Optioned<Celsius>,
    /// Dew point in C, only meaningful when the temperature is present.
    pub dew_point: Optioned<Celsius>,
}

/// Wind at a level. The speed is in whatever unit the message declared, see
/// [`WindUnit`](crate::WindUnit).
#[derive(Clone, Copy, Debug, Default)]
pub struct WindGroup {
    /// Direction the wind is blowing from in whole degrees.
    pub direction: Optioned<f64>,
    /// Speed in the message's wind unit.
    pub speed: Optioned<f64>,
}

// Missing values are NaN inside `Optioned`, so equality goes through `Option`.
impl PartialEq for PressureGroup {
    fn eq(&self, other: &Self) -> bool {
        self.pressure == other.pressure
            && self.height.into_option() == other.height.into_option()
            && self.is_surface == other.is_surface
    }
}

impl PartialEq for TemperatureGroup {
    fn eq(&self, other: &Self) -> bool {
        self.temperature.into_option() == other.temperature.into_option()
            && self.dew_point.into_option() == other.dew_point.into_option()
    }
}

impl PartialEq for WindGroup {
    fn eq(&self, other: &Self) -> bool {
        self.direction.into_option() == other.direction.into_option()
            && self.speed.into_option() == other.speed.into_option()
    }
}

/// Decode a Part A/C standard isobaric surface group, `PPhhh`.
///
/// `PP` selects the pressure: `99` is the surface, `00` is 1000 hPa, `92` is 925 hPa and
/// anything else is tens of hPa. `hhh` holds the low order digits of the geopotential height,
/// which are expanded with [`mandatory_height`].
///
/// ```rust
/// use sounding_bulletin::decode_mandatory_pressure;
///
/// let grp = decode_mandatory_pressure("70012").unwrap();
/// assert_eq!(grp.whole_hpa(), 700);
/// assert_eq!(grp.height.unwrap().0, 3012.0);
/// assert!(!grp.is_surface);
/// ```
pub fn decode_mandatory_pressure(token: &str) -> Result<PressureGroup> {
    const GROUP: &str = "standard isobaric surface";
    let err = || DecodeError::invalid_group(GROUP, token);

    let (id, hhh) = split_group(token, 2).ok_or_else(err)?;
    let id = parse_digits(id).ok_or_else(err)?;
    let raw_height = if is_missing(hhh) {
        None
    } else {
        Some(parse_digits(hhh).ok_or_else(err)?)
    };

    let (pressure, is_surface) = match id {
        // The surface group reuses the trailing digits as the offset from 1000 hPa.
        99 => (1000 + raw_height.ok_or_else(err)?, true),
        0 => (1000, false),
        92 => (925, false),
        pp => (pp * 10, false),
    };

    let height = raw_height
        .map(|raw| Meters(f64::from(mandatory_height(pressure, raw))))
        .into();

    Ok(PressureGroup {
        pressure: HectoPascal(f64::from(pressure)),
        height,
        is_surface,
    })
}

/// Expand the three transmitted height digits of a standard isobaric surface into meters.
///
/// Only the low order digits are sent, the rest is implied by the typical height of each
/// surface in the standard atmosphere.
pub fn mandatory_height(pressure_hpa: i32, raw: i32) -> i32 {
    match pressure_hpa {
        1000 | 925 => raw,
        850 => raw + 1000,
        700 => raw + 3000,
        500 => raw * 10,
        p if p > 100 && p < 500 => {
            let split = (raw / 100) * 1000 + (raw % 100) * 10;
            if p <= 250 {
                split + 10_000
            } else {
                split
            }
        }
        _ => raw,
    }
}

/// Decode a group with a two character prefix followed by a three digit pressure, `xxppp`.
///
/// The prefix is an indicator (`88`, `77`) or a level sequence number and is not checked here.
/// Pressures below 100 are levels just above 1000 hPa with the thousands digit dropped.
///
/// ```rust
/// use sounding_bulletin::decode_suffix_pressure;
///
/// assert_eq!(decode_suffix_pressure("88250").unwrap().whole_hpa(), 250);
/// assert_eq!(decode_suffix_pressure("00012").unwrap().whole_hpa(), 1012);
/// ```
pub fn decode_suffix_pressure(token: &str) -> Result<PressureGroup> {
    let err = || DecodeError::invalid_group("pressure", token);

    let (_, ppp) = split_group(token, 2).ok_or_else(err)?;
    let ppp = parse_digits(ppp).ok_or_else(err)?;
    let pressure = if ppp < 100 { ppp + 1000 } else { ppp };

    Ok(PressureGroup {
        pressure: HectoPascal(f64::from(pressure)),
        height: none(),
        is_surface: false,
    })
}

/// Decode a temperature and dew point depression group, `TTTDD`.
///
/// The tenths digit of the temperature doubles as the sign: even is above zero, odd is below.
/// Depressions up to 50 are in tenths of a degree, 56 and up are whole degrees plus 50.
///
/// ```rust
/// use sounding_bulletin::decode_temperature;
///
/// let grp = decode_temperature("01334").unwrap();
/// assert!((grp.temperature.unwrap().0 - -1.3).abs() < 1.0e-9);
/// assert!((grp.dew_point.unwrap().0 - -4.7).abs() < 1.0e-9);
/// ```
pub fn decode_temperature(token: &str) -> Result<TemperatureGroup> {
    let err = || DecodeError::invalid_group("temperature", token);

    let (ttt, dd) = split_group(token, 3).ok_or_else(err)?;
    if is_missing(token) {
        return Ok(TemperatureGroup::default());
    }

    let ttt = parse_digits(ttt).ok_or_else(err)?;
    let sign = if ttt % 2 == 1 { -1.0 } else { 1.0 };
    let temperature = sign * f64::from(ttt) / 10.0;

    let dew_point = if is_missing(dd) {
        none()
    } else {
        let dd = parse_digits(dd).ok_or_else(err)?;
        let depression = if dd <= 50 {
            f64::from(dd) / 10.0
        } else {
            f64::from(dd - 50)
        };
        some(Celsius(temperature - depression))
    };

    Ok(TemperatureGroup {
        temperature: some(Celsius(temperature)),
        dew_point,
    })
}

/// Decode a wind group, `dddff`.
///
/// Directions are reported to the nearest 5 degrees, so the units digit of the direction is
/// free to carry the hundreds of the speed.
///
/// ```rust
/// use sounding_bulletin::decode_wind;
///
/// let grp = decode_wind("27245").unwrap();
/// assert_eq!(grp.direction.unwrap(), 270.0);
/// assert_eq!(grp.speed.unwrap(), 245.0);
/// ```
pub fn decode_wind(token: &str) -> Result<WindGroup> {
    let err = || DecodeError::invalid_group("wind", token);

    let (ddd, ff) = split_group(token, 3).ok_or_else(err)?;
    if is_missing(token) {
        return Ok(WindGroup::default());
    }

    let ddd = parse_digits(ddd).ok_or_else(err)?;
    let ff = parse_digits(ff).ok_or_else(err)?;

    let hundreds = ddd % 5;
    Ok(WindGroup {
        direction: some(f64::from(ddd - hundreds)),
        speed: some(f64::from(ff + hundreds * 100)),
    })
}

/// True for a non-empty string of nothing but `/`.
#[inline]
pub(crate) fn is_missing(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b == b'/')
}

/// Parse a non-empty run of ASCII digits.
#[inline]
pub(crate) fn parse_digits(s: &str) -> Option<i32> {
    if s.is_empty() || s.len() > 9 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// Every group is five ASCII characters, anything else is not a group.
#[inline]
fn split_group(token: &str, at: usize) -> Option<(&str, &str)> {
    if token.len() == 5 && token.is_ascii() {
        Some(token.split_at(at))
    } else {
        None
    }
}
