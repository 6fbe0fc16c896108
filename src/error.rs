use core::fmt;

/// Errors returned by the driver.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A register read or write failed.
    I2c(E),
    /// The device at the sensor address did not identify as a BMP180.
    ChipId(u8),
    /// The calibration EEPROM returned an all-zero or all-one word.
    InvalidCalibration,
    /// Compensation would have divided by zero.
    Arithmetic(ArithmeticFault),
}

/// The divisor that came out as zero during compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    /// `x1 + MD` in the temperature formula.
    TemperatureDivisor,
    /// `b4` in the pressure formula.
    PressureDivisor,
}

/// Oversampling setting outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOversampling(pub u8);

impl<E> From<ArithmeticFault> for Error<E> {
    fn from(fault: ArithmeticFault) -> Self {
        Error::Arithmetic(fault)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "i2c transfer failed: {:?}", e),
            Error::ChipId(id) => write!(f, "unexpected chip id {:#04x}", id),
            Error::InvalidCalibration => f.write_str("calibration data is invalid"),
            Error::Arithmetic(fault) => fmt::Display::fmt(fault, f),
        }
    }
}

impl fmt::Display for ArithmeticFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticFault::TemperatureDivisor => {
                f.write_str("temperature compensation divisor is zero")
            }
            ArithmeticFault::PressureDivisor => f.write_str("pressure compensation divisor is zero"),
        }
    }
}

impl fmt::Display for InvalidOversampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oversampling setting {} is not in 0..=3", self.0)
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
impl core::error::Error for ArithmeticFault {}
impl core::error::Error for InvalidOversampling {}
