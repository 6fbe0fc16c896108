//! Fixed-point compensation from the BMP180 datasheet.
//!
//! All intermediates are 32-bit and wrap exactly as the reference
//! algorithm does; `b7` in particular relies on unsigned overflow.

use core::fmt;

use crate::{ArithmeticFault, Calibration, Oversampling};

/// Standard sea level pressure in Pa.
pub const SEA_LEVEL_PA: f64 = 101_325.0;

/// A compensated measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Temperature in 0.1 °C.
    pub temperature: i32,
    /// Pressure in Pa.
    pub pressure: i32,
    /// Altitude in metres.
    pub altitude: f64,
}

impl Reading {
    pub fn celsius(&self) -> f64 {
        self.temperature as f64 / 10.0
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T: {:.1} C\tPressure: {} Pa\tAltitude: {:.1} m",
            self.celsius(),
            self.pressure,
            self.altitude
        )
    }
}

/// Temperature intermediate `b5`, shared by temperature and pressure
/// compensation.
pub fn temperature_b5(ut: u16, cal: &Calibration) -> Result<i32, ArithmeticFault> {
    let x1 = (ut as i32 - cal.ac6 as i32).wrapping_mul(cal.ac5 as i32) >> 15;
    let x2 = ((cal.mc as i32) << 11)
        .checked_div(x1.wrapping_add(cal.md as i32))
        .ok_or(ArithmeticFault::TemperatureDivisor)?;
    Ok(x1.wrapping_add(x2))
}

/// True temperature in 0.1 °C.
pub fn true_temperature(b5: i32) -> i32 {
    b5.wrapping_add(8) >> 4
}

/// True pressure in Pa.
pub fn true_pressure(
    up: u32,
    b5: i32,
    cal: &Calibration,
    oversampling: Oversampling,
) -> Result<i32, ArithmeticFault> {
    let oss = oversampling.oss() as u32;

    let b6 = b5.wrapping_sub(4000);
    let b6_sq = b6.wrapping_mul(b6) >> 12;

    let x1 = (cal.b2 as i32).wrapping_mul(b6_sq) >> 11;
    let x2 = (cal.ac2 as i32).wrapping_mul(b6) >> 11;
    let x3 = x1.wrapping_add(x2);
    let b3 = (((cal.ac1 as i32).wrapping_mul(4).wrapping_add(x3) << oss).wrapping_add(2)) >> 2;

    let x1 = (cal.ac3 as i32).wrapping_mul(b6) >> 13;
    let x2 = (cal.b1 as i32).wrapping_mul(b6_sq) >> 16;
    let x3 = x1.wrapping_add(x2).wrapping_add(2) >> 2;
    let b4 = (cal.ac4 as u32).wrapping_mul(x3.wrapping_add(32768) as u32) >> 15;
    if b4 == 0 {
        return Err(ArithmeticFault::PressureDivisor);
    }

    let b7 = up.wrapping_sub(b3 as u32).wrapping_mul(50_000 >> oss);
    let mut p = if b7 < 0x8000_0000 {
        (b7 << 1) / b4
    } else {
        (b7 / b4) << 1
    } as i32;

    let x1 = (p >> 8).wrapping_mul(p >> 8);
    let x1 = x1.wrapping_mul(3038) >> 16;
    let x2 = p.wrapping_mul(-7357) >> 16;
    p = p.wrapping_add(x1.wrapping_add(x2).wrapping_add(3791) >> 4);
    Ok(p)
}

/// Altitude in metres above the standard sea level pressure.
pub fn altitude(pressure: i32) -> f64 {
    altitude_with_reference(pressure, SEA_LEVEL_PA)
}

/// Altitude in metres relative to the reference pressure `p0`.
pub fn altitude_with_reference(pressure: i32, p0: f64) -> f64 {
    44_330.0 * (1.0 - libm::pow(pressure as f64 / p0, 1.0 / 5.255))
}

/// Pressure at sea level given a pressure measured at a known altitude.
pub fn sea_level_pressure(pressure: i32, altitude: f64) -> f64 {
    pressure as f64 / libm::pow(1.0 - altitude / 44_330.0, 5.255)
}

/// Run the whole compensation for one temperature and one pressure sample.
///
/// The same `b5` feeds both results.
pub fn compensate(
    ut: u16,
    up: u32,
    cal: &Calibration,
    oversampling: Oversampling,
    p0: f64,
) -> Result<Reading, ArithmeticFault> {
    let b5 = temperature_b5(ut, cal)?;
    let pressure = true_pressure(up, b5, cal, oversampling)?;
    Ok(Reading {
        temperature: true_temperature(b5),
        pressure,
        altitude: altitude_with_reference(pressure, p0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::datasheet;
    use std::string::ToString;

    #[test]
    fn datasheet_example() {
        let cal = datasheet();
        let b5 = temperature_b5(27898, &cal).unwrap();
        // truncating division gives 2400 where the datasheet rounds to 2399
        assert_eq!(b5, 2400);
        assert_eq!(true_temperature(b5), 150);
        assert_eq!(true_pressure(23843, b5, &cal, Oversampling::O1), Ok(69964));
    }

    #[test]
    fn compensate_combines_results() {
        let reading = compensate(27898, 23843, &datasheet(), Oversampling::O1, SEA_LEVEL_PA).unwrap();
        assert_eq!(reading.temperature, 150);
        assert_eq!(reading.celsius(), 15.0);
        assert_eq!(reading.pressure, 69964);
        assert!((reading.altitude - 3016.66).abs() < 0.01);
    }

    #[test]
    fn compensation_is_deterministic() {
        let cal = datasheet();
        for oversampling in [Oversampling::O1, Oversampling::O2, Oversampling::O4, Oversampling::O8] {
            let up = 23843 << oversampling.oss();
            let first = compensate(27898, up, &cal, oversampling, SEA_LEVEL_PA);
            let second = compensate(27898, up, &cal, oversampling, SEA_LEVEL_PA);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn zero_temperature_divisor_is_reported() {
        let cal = Calibration {
            md: -4743,
            ..datasheet()
        };
        assert_eq!(
            temperature_b5(27898, &cal),
            Err(ArithmeticFault::TemperatureDivisor)
        );
        // only MD differs, so the untouched set still compensates
        assert!(temperature_b5(27898, &datasheet()).is_ok());
    }

    #[test]
    fn zero_pressure_divisor_is_reported() {
        let cal = Calibration {
            ac4: 0,
            ..datasheet()
        };
        assert_eq!(
            true_pressure(23843, 2400, &cal, Oversampling::O1),
            Err(ArithmeticFault::PressureDivisor)
        );
    }

    #[test]
    fn b7_overflow_takes_divide_first_branch() {
        // up far below b3 wraps b7 above 0x8000_0000
        let cal = datasheet();
        assert!(0u32.wrapping_sub(422).wrapping_mul(50_000) >= 0x8000_0000);
        assert_eq!(true_pressure(0, 2400, &cal, Oversampling::O1), Ok(252712));

        // b3 = 3378 at oss = 3
        assert!(0u32.wrapping_sub(3378).wrapping_mul(50_000 >> 3) >= 0x8000_0000);
        assert_eq!(true_pressure(0, 2400, &cal, Oversampling::O8), Ok(252710));
        assert_eq!(true_pressure(1000, 2400, &cal, Oversampling::O8), Ok(253093));
        // below the wrap: multiply-first branch
        assert_eq!(true_pressure(300_000, 2400, &cal, Oversampling::O8), Ok(110822));
    }

    #[test]
    fn altitude_at_sea_level_is_zero() {
        assert_eq!(altitude(101_325), 0.0);
    }

    #[test]
    fn altitude_rises_as_pressure_falls() {
        let mut previous = altitude(101_325);
        for pressure in (1..101_325).rev().step_by(97) {
            let current = altitude(pressure);
            assert!(current > previous, "altitude({}) = {}", pressure, current);
            previous = current;
        }
        assert!(altitude(1) > previous);
    }

    #[test]
    fn sea_level_pressure_inverts_altitude() {
        let alt = altitude(69964);
        assert!((sea_level_pressure(69964, alt) - SEA_LEVEL_PA).abs() < 0.5);
    }

    #[test]
    fn reading_line() {
        let reading = Reading {
            temperature: -5,
            pressure: 100_012,
            altitude: 12.34,
        };
        assert_eq!(reading.to_string(), "T: -0.5 C\tPressure: 100012 Pa\tAltitude: 12.3 m");
    }
}
