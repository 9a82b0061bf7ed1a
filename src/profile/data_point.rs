use crate::level::Level;
use metfor::{Celsius, HectoPascal, Meters};
use optional::{none, Optioned};

/// One level of an assembled profile.
#[derive(Clone, Copy, Debug)]
pub struct DataPoint {
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Geopotential Height in meters
    pub height: Optioned<Meters>,
    /// Temperature in C
    pub temperature: Optioned<Celsius>,
    /// Dew point in C
    pub dew_point: Optioned<Celsius>,
    /// Wind direction in degrees
    pub wind_direction: Optioned<f64>,
    /// Wind speed in the profile's wind unit
    pub wind_speed: Optioned<f64>,
}

impl PartialEq for DataPoint {
    fn eq(&self, other: &Self) -> bool {
        self.pressure == other.pressure
            && self.height.into_option() == other.height.into_option()
            && self.temperature.into_option() == other.temperature.into_option()
            && self.dew_point.into_option() == other.dew_point.into_option()
            && self.wind_direction.into_option() == other.wind_direction.into_option()
            && self.wind_speed.into_option() == other.wind_speed.into_option()
    }
}

impl DataPoint {
    /// Flatten a level into a data point. Levels without a pressure have no place in a
    /// profile and give `None`.
    pub fn from_level(level: &Level) -> Option<Self> {
        let pressure = level.pressure?;
        if pressure.pressure <= HectoPascal(0.0) {
            return None;
        }

        let (temperature, dew_point) = match level.temperature {
            Some(grp) if grp.temperature.is_some() => (grp.temperature, grp.dew_point),
            _ => (none(), none()),
        };
        let (wind_direction, wind_speed) = match level.wind {
            Some(grp) => (grp.direction, grp.speed),
            None => (none(), none()),
        };

        Some(DataPoint {
            pressure: pressure.pressure,
            height: pressure.height,
            temperature,
            dew_point,
            wind_direction,
            wind_speed,
        })
    }
}
