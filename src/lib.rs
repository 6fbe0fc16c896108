//! Driver for the Bosch BMP180 barometric pressure and temperature sensor.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] bus and
//! [`embedded_hal::delay::DelayNs`] source.
//!
//! ```no_run
//! use bmp180::{Oversampling, BMP180};
//! use linux_embedded_hal::{Delay, I2cdev};
//!
//! let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! let mut bmp180 = BMP180::new(dev, Delay, Oversampling::O2).unwrap();
//! let reading = bmp180.measure().unwrap();
//! println!("{}", reading);
//! ```

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use embedded_hal::{delay::DelayNs, i2c::I2c};

pub mod calibration;
pub mod compensation;
mod error;
pub mod monitor;
mod oversampling;
pub mod sampler;

pub use calibration::Calibration;
pub use compensation::Reading;
pub use error::{ArithmeticFault, Error, InvalidOversampling};
pub use monitor::{CalibrationPolicy, FailurePolicy, Monitor, Summary};
pub use oversampling::Oversampling;

/// Fixed 7-bit I2C address.
pub const ADDRESS: u8 = 0x77;

const CHIP_ID_REGISTER: u8 = 0xD0;
const CHIP_ID: u8 = 0x55;

pub struct BMP180<I2C, D> {
    i2c: I2C,
    delay: D,
    oversampling: Oversampling,
    calibration: Calibration,
    sea_level_pa: f64,
}

impl<I2C, D> BMP180<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Check the chip id and load the calibration coefficients.
    pub fn new(mut i2c: I2C, delay: D, oversampling: Oversampling) -> Result<Self, Error<I2C::Error>> {
        let mut id = [0u8; 1];
        i2c.write_read(ADDRESS, &[CHIP_ID_REGISTER], &mut id)
            .map_err(Error::I2c)?;
        if id[0] != CHIP_ID {
            return Err(Error::ChipId(id[0]));
        }

        let calibration = calibration::load(&mut i2c)?;
        Ok(BMP180 {
            i2c,
            delay,
            oversampling,
            calibration,
            sea_level_pa: compensation::SEA_LEVEL_PA,
        })
    }

    /// Reference pressure used for altitude, in Pa.
    pub fn with_sea_level_pressure(mut self, pa: f64) -> Self {
        self.sea_level_pa = pa;
        self
    }

    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    /// The calibration snapshot used by every following measurement.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Reload the calibration coefficients. On failure the previous
    /// snapshot stays in use.
    pub fn recalibrate(&mut self) -> Result<(), Error<I2C::Error>> {
        self.calibration = calibration::load(&mut self.i2c)?;
        Ok(())
    }

    pub fn read_raw_temperature(&mut self) -> Result<u16, Error<I2C::Error>> {
        sampler::read_raw_temperature(&mut self.i2c, &mut self.delay)
    }

    pub fn read_raw_pressure(&mut self) -> Result<u32, Error<I2C::Error>> {
        sampler::read_raw_pressure(&mut self.i2c, &mut self.delay, self.oversampling)
    }

    /// Sample temperature then pressure and compensate both with the same
    /// temperature sample. Nothing is returned unless every step succeeds.
    pub fn measure(&mut self) -> Result<Reading, Error<I2C::Error>> {
        let ut = self.read_raw_temperature()?;
        let up = self.read_raw_pressure()?;
        let reading = compensation::compensate(
            ut,
            up,
            &self.calibration,
            self.oversampling,
            self.sea_level_pa,
        )?;
        log::debug!("{:?}", reading);
        Ok(reading)
    }

    pub(crate) fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}
