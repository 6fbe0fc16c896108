//! Measurement loop.
//!
//! Each cycle either produces one complete [`Reading`] or nothing. What
//! happens after a failed cycle is decided by [`FailurePolicy`].

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{error, info, warn};

use crate::{Error, Reading, BMP180};

/// What the loop does when a cycle fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the loop and return the error.
    Abort,
    /// Log the error and continue with the next cycle.
    #[default]
    Skip,
}

/// When calibration coefficients are reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalibrationPolicy {
    /// Keep the snapshot read at startup.
    #[default]
    Once,
    /// Reload before every cycle.
    EveryCycle,
}

/// Counters for one call to [`Monitor::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub cycles: u64,
    pub reported: u64,
    pub failed: u64,
}

pub struct Monitor<I2C, D> {
    sensor: BMP180<I2C, D>,
    on_error: FailurePolicy,
    calibration: CalibrationPolicy,
    interval_ms: u32,
}

impl<I2C, D> Monitor<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(sensor: BMP180<I2C, D>) -> Self {
        Monitor {
            sensor,
            on_error: FailurePolicy::default(),
            calibration: CalibrationPolicy::default(),
            interval_ms: 0,
        }
    }

    pub fn on_error(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn calibration(mut self, policy: CalibrationPolicy) -> Self {
        self.calibration = policy;
        self
    }

    /// Pause between cycles.
    pub fn interval_ms(mut self, ms: u32) -> Self {
        self.interval_ms = ms;
        self
    }

    /// One full cycle.
    pub fn cycle(&mut self) -> Result<Reading, Error<I2C::Error>> {
        if self.calibration == CalibrationPolicy::EveryCycle {
            self.sensor.recalibrate()?;
        }
        self.sensor.measure()
    }

    /// Run cycles until `stop` is set or `max_cycles` have run, handing each
    /// reading to `report`.
    ///
    /// `stop` is checked before every cycle. With [`FailurePolicy::Abort`]
    /// the first failure ends the loop with that error.
    pub fn run<F>(
        &mut self,
        stop: &AtomicBool,
        max_cycles: Option<u64>,
        mut report: F,
    ) -> Result<Summary, Error<I2C::Error>>
    where
        F: FnMut(&Reading),
    {
        let mut summary = Summary::default();

        while !stop.load(Ordering::Relaxed) {
            if max_cycles.map_or(false, |max| summary.cycles >= max) {
                break;
            }
            summary.cycles += 1;

            match self.cycle() {
                Ok(reading) => {
                    summary.reported += 1;
                    report(&reading);
                }
                Err(e) => {
                    summary.failed += 1;
                    match self.on_error {
                        FailurePolicy::Abort => {
                            error!("cycle {} failed, stopping: {}", summary.cycles, e);
                            return Err(e);
                        }
                        FailurePolicy::Skip => {
                            warn!("cycle {} failed, skipping: {}", summary.cycles, e);
                        }
                    }
                }
            }

            if self.interval_ms > 0 {
                self.sensor.pause_ms(self.interval_ms);
            }
        }

        info!(
            "stopped after {} cycles ({} reported, {} failed)",
            summary.cycles, summary.reported, summary.failed
        );
        Ok(summary)
    }

    pub fn release(self) -> BMP180<I2C, D> {
        self.sensor
    }
}
