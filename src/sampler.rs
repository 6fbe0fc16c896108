//! Trigger, wait and read sequences for raw ADC codes.

use byteorder::{BigEndian, ByteOrder};
use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{Error, Oversampling, ADDRESS};

pub const CONTROL_REGISTER: u8 = 0xF4;
pub const RESULT_REGISTER: u8 = 0xF6;
pub const TEMPERATURE_COMMAND: u8 = 0x2E;
/// Temperature conversion does not depend on oversampling.
pub const TEMPERATURE_CONVERSION_US: u32 = 4_500;

/// Start a temperature conversion and read the uncompensated value.
pub fn read_raw_temperature<I2C, D>(i2c: &mut I2C, delay: &mut D) -> Result<u16, Error<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    i2c.write(ADDRESS, &[CONTROL_REGISTER, TEMPERATURE_COMMAND])
        .map_err(Error::I2c)?;
    delay.delay_us(TEMPERATURE_CONVERSION_US);

    let mut buf = [0u8; 2];
    i2c.write_read(ADDRESS, &[RESULT_REGISTER], &mut buf)
        .map_err(Error::I2c)?;
    let ut = BigEndian::read_u16(&buf);
    log::debug!("raw temperature: {}", ut);
    Ok(ut)
}

/// Start a pressure conversion and read the uncompensated value, already
/// shifted down to `16 + oss` bits.
pub fn read_raw_pressure<I2C, D>(
    i2c: &mut I2C,
    delay: &mut D,
    oversampling: Oversampling,
) -> Result<u32, Error<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    i2c.write(ADDRESS, &[CONTROL_REGISTER, oversampling.command()])
        .map_err(Error::I2c)?;
    delay.delay_us(oversampling.conversion_time_us());

    let mut buf = [0u8; 3];
    i2c.write_read(ADDRESS, &[RESULT_REGISTER], &mut buf)
        .map_err(Error::I2c)?;
    let up = BigEndian::read_u24(&buf) >> oversampling.shift();
    log::debug!("raw pressure: {} ({:?})", up, oversampling);
    Ok(up)
}
