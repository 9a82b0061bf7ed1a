//! A single reported level of a message and the key that identifies it.
use crate::groups::{PressureGroup, TemperatureGroup, WindGroup};
use std::collections::BTreeMap;

/// What kind of level an observation was reported as.
///
/// Pressures are whole hPa and heights whole meters, which is all the code forms can express,
/// so the identity can be used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelId {
    /// The surface, from the `99PPP` group.
    Surface,
    /// The tropopause at the given pressure.
    Tropopause(i32),
    /// The level of maximum wind at the given pressure.
    MaximumWind(i32),
    /// A standard isobaric surface.
    Mandatory(i32),
    /// A significant level for temperature, humidity or wind.
    Significant(i32),
    /// A PILOT wind level at a fixed altitude in meters.
    FixedAltitude(i32),
}

/// All the levels of one message, keyed by their identity.
///
/// Inserting a level whose identity is already present replaces it. Later sections of a
/// message do overwrite earlier ones this way, eg a significant wind level replaces the
/// significant temperature level at the same pressure.
pub type LevelMap = BTreeMap<LevelId, Level>;

/// An observation at one level. Any of the groups may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    /// How the level was reported.
    pub id: LevelId,
    /// Pressure and height
    pub pressure: Option<PressureGroup>,
    /// Temperature and dew point
    pub temperature: Option<TemperatureGroup>,
    /// Wind
    pub wind: Option<WindGroup>,
}

impl Level {
    /// Create an empty level with the given identity.
    #[inline]
    pub fn new(id: LevelId) -> Self {
        Level {
            id,
            pressure: None,
            temperature: None,
            wind: None,
        }
    }

    /// Builder method for the pressure group.
    #[inline]
    pub fn with_pressure<T>(mut self, pressure: T) -> Self
    where
        Option<PressureGroup>: From<T>,
    {
        self.pressure = Option::from(pressure);
        self
    }

    /// Builder method for the temperature group.
    #[inline]
    pub fn with_temperature<T>(mut self, temperature: T) -> Self
    where
        Option<TemperatureGroup>: From<T>,
    {
        self.temperature = Option::from(temperature);
        self
    }

    /// Builder method for the wind group.
    #[inline]
    pub fn with_wind<T>(mut self, wind: T) -> Self
    where
        Option<WindGroup>: From<T>,
    {
        self.wind = Option::from(wind);
        self
    }

    /// Pressure rounded to whole hPa, if there is a pressure group.
    #[inline]
    pub fn whole_hpa(&self) -> Option<i32> {
        self.pressure.map(|grp| grp.whole_hpa())
    }
}
