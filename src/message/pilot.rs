//! Winds at fixed altitudes from PILOT Parts B and D.
//!
//! Each `9tuuu` group announces up to three altitudes, in units of 300 m, with `t` the tens digit
//! and each `u` a units digit (`/` for an unused slot). One wind group follows for each altitude.
use super::Tokens;
use crate::{
    error::{DecodeError, Result},
    groups::decode_wind,
    level::{Level, LevelId, LevelMap},
};
use log::trace;

const ALTITUDE_UNIT_M: i32 = 300;

pub(super) fn fixed_altitude_section(tokens: &mut Tokens, levels: &mut LevelMap) {
    const TERMINATORS: [&str; 5] = ["21212", "31313", "41414", "51515", "61616"];

    while let Some(tkn) = tokens.peek() {
        if TERMINATORS.contains(&tkn) || !tkn.starts_with('9') {
            break;
        }
        tokens.next();

        let altitudes = match altitudes(tkn) {
            Ok(altitudes) => altitudes,
            Err(err) => {
                trace!("skipping fixed altitude group: {}", err);
                continue;
            }
        };

        let winds = tokens.take_group(altitudes.len());
        for (altitude, wind) in altitudes.into_iter().zip(winds) {
            match decode_wind(wind) {
                Ok(wind) => {
                    let level = Level::new(LevelId::FixedAltitude(altitude)).with_wind(wind);
                    levels.insert(level.id, level);
                }
                Err(err) => trace!("skipping fixed altitude wind: {}", err),
            }
        }
    }
}

/// Altitudes in meters announced by a `9tuuu` group.
fn altitudes(token: &str) -> Result<Vec<i32>> {
    let err = || DecodeError::invalid_group("altitude", token);

    let digits = token.as_bytes();
    if digits.len() != 5 || digits[0] != b'9' || !digits[1].is_ascii_digit() {
        return Err(err());
    }
    let tens = i32::from(digits[1] - b'0');

    digits[2..]
        .iter()
        .filter(|&&d| d != b'/')
        .map(|&d| {
            if d.is_ascii_digit() {
                Ok((tens * 10 + i32::from(d - b'0')) * ALTITUDE_UNIT_M)
            } else {
                Err(err())
            }
        })
        .collect()
}
