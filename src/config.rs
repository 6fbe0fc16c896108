use anyhow::{anyhow, Context, Result};

use bmp180::{compensation::SEA_LEVEL_PA, CalibrationPolicy, FailurePolicy, Oversampling};

/// Startup settings, read from `BMP180_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bus: String,
    pub oversampling: Oversampling,
    pub cycles: Option<u64>,
    pub interval_ms: u32,
    pub on_error: FailurePolicy,
    pub calibration: CalibrationPolicy,
    pub sea_level_pa: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus: "/dev/i2c-1".to_string(),
            oversampling: Oversampling::O2,
            cycles: None,
            interval_ms: 0,
            on_error: FailurePolicy::Skip,
            calibration: CalibrationPolicy::Once,
            sea_level_pa: SEA_LEVEL_PA,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(bus) = lookup("BMP180_BUS") {
            config.bus = bus;
        }
        if let Some(oss) = lookup("BMP180_OSS") {
            let oss: u8 = oss
                .trim()
                .parse()
                .with_context(|| format!("BMP180_OSS must be 0..=3, got {:?}", oss))?;
            config.oversampling = Oversampling::try_from(oss).context("BMP180_OSS")?;
        }
        if let Some(cycles) = lookup("BMP180_CYCLES") {
            config.cycles = Some(
                cycles
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid BMP180_CYCLES {:?}", cycles))?,
            );
        }
        if let Some(interval) = lookup("BMP180_INTERVAL_MS") {
            config.interval_ms = interval
                .trim()
                .parse()
                .with_context(|| format!("invalid BMP180_INTERVAL_MS {:?}", interval))?;
        }
        if let Some(policy) = lookup("BMP180_ON_ERROR") {
            config.on_error = match policy.trim() {
                "skip" => FailurePolicy::Skip,
                "abort" => FailurePolicy::Abort,
                other => return Err(anyhow!("BMP180_ON_ERROR must be skip or abort, got {:?}", other)),
            };
        }
        if let Some(policy) = lookup("BMP180_CALIBRATION") {
            config.calibration = match policy.trim() {
                "once" => CalibrationPolicy::Once,
                "every-cycle" => CalibrationPolicy::EveryCycle,
                other => {
                    return Err(anyhow!(
                        "BMP180_CALIBRATION must be once or every-cycle, got {:?}",
                        other
                    ))
                }
            };
        }
        if let Some(pa) = lookup("BMP180_SEA_LEVEL_PA") {
            let pa: f64 = pa
                .trim()
                .parse()
                .with_context(|| format!("invalid BMP180_SEA_LEVEL_PA {:?}", pa))?;
            if !(pa.is_finite() && pa > 0.0) {
                return Err(anyhow!("BMP180_SEA_LEVEL_PA must be positive, got {}", pa));
            }
            config.sea_level_pa = pa;
        }

        Ok(config)
    }
}
