use crate::InvalidOversampling;

/// Pressure oversampling: number of internal samples per conversion.
///
/// Higher settings trade conversion time for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Oversampling {
    /// Ultra low power, oss = 0.
    O1 = 0,
    /// Standard, oss = 1.
    #[default]
    O2 = 1,
    /// High resolution, oss = 2.
    O4 = 2,
    /// Ultra high resolution, oss = 3.
    O8 = 3,
}

impl Oversampling {
    /// The `oss` field value, `0..=3`.
    pub fn oss(self) -> u8 {
        self as u8
    }

    /// Control register command that starts a pressure conversion.
    pub fn command(self) -> u8 {
        0x34 + (self.oss() << 6)
    }

    /// Maximum conversion time in microseconds.
    pub fn conversion_time_us(self) -> u32 {
        match self {
            Oversampling::O1 => 4_500,
            Oversampling::O2 => 7_500,
            Oversampling::O4 => 13_500,
            Oversampling::O8 => 25_500,
        }
    }

    /// Right shift that normalises the 24-bit result register.
    pub fn shift(self) -> u32 {
        8 - self.oss() as u32
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = InvalidOversampling;

    fn try_from(oss: u8) -> Result<Self, Self::Error> {
        match oss {
            0 => Ok(Oversampling::O1),
            1 => Ok(Oversampling::O2),
            2 => Ok(Oversampling::O4),
            3 => Ok(Oversampling::O8),
            other => Err(InvalidOversampling(other)),
        }
    }
}
