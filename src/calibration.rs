//! Factory calibration coefficients stored in the sensor EEPROM.

use byteorder::{BigEndian, ByteOrder};
use embedded_hal::i2c::I2c;

use crate::{Error, ADDRESS};

/// First calibration register (AC1 MSB).
pub const CALIBRATION_REGISTER: u8 = 0xAA;
/// Eleven 16-bit coefficients, `0xAA..=0xBF`.
pub const CALIBRATION_LEN: usize = 22;

/// One snapshot of the eleven calibration coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl Calibration {
    /// Parse the raw EEPROM dump. Each coefficient is stored MSB first.
    ///
    /// Returns `None` if any word reads as `0x0000` or `0xFFFF`, which the
    /// device never stores and which indicates a broken transfer.
    pub fn from_bytes(buf: &[u8; CALIBRATION_LEN]) -> Option<Self> {
        if buf
            .chunks_exact(2)
            .map(BigEndian::read_u16)
            .any(|word| word == 0x0000 || word == 0xFFFF)
        {
            return None;
        }

        Some(Calibration {
            ac1: BigEndian::read_i16(&buf[0..2]),
            ac2: BigEndian::read_i16(&buf[2..4]),
            ac3: BigEndian::read_i16(&buf[4..6]),
            ac4: BigEndian::read_u16(&buf[6..8]),
            ac5: BigEndian::read_u16(&buf[8..10]),
            ac6: BigEndian::read_u16(&buf[10..12]),
            b1: BigEndian::read_i16(&buf[12..14]),
            b2: BigEndian::read_i16(&buf[14..16]),
            mb: BigEndian::read_i16(&buf[16..18]),
            mc: BigEndian::read_i16(&buf[18..20]),
            md: BigEndian::read_i16(&buf[20..22]),
        })
    }
}

/// Read the full calibration set in a single burst.
pub fn load<I2C: I2c>(i2c: &mut I2C) -> Result<Calibration, Error<I2C::Error>> {
    let mut buf = [0u8; CALIBRATION_LEN];
    i2c.write_read(ADDRESS, &[CALIBRATION_REGISTER], &mut buf)
        .map_err(Error::I2c)?;

    let calibration = Calibration::from_bytes(&buf).ok_or(Error::InvalidCalibration)?;
    log::debug!("calibration loaded: {:?}", calibration);
    Ok(calibration)
}
