use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use bmp180::{Monitor, BMP180};
use linux_embedded_hal::{Delay, I2cdev};
use log::{error, info, warn, LevelFilter};

mod config;

use config::Config;

const EXIT_SENSOR_FAILURE: u8 = 1;
const EXIT_BUS_UNAVAILABLE: u8 = 2;
const EXIT_BAD_CONFIG: u8 = 3;

/// Set on SIGINT/SIGTERM; the monitor finishes its cycle and returns.
static STOP: AtomicBool = AtomicBool::new(false);

fn request_stop(stop: &AtomicBool) {
    if !stop.swap(true, Ordering::Relaxed) {
        info!("stop requested, finishing current cycle");
    }
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_BAD_CONFIG);
        }
    };
    info!("starting with {:?}", config);

    if let Err(e) = ctrlc::set_handler(|| request_stop(&STOP)) {
        warn!("cannot install signal handler: {}", e);
    }

    let dev = match I2cdev::new(&config.bus) {
        Ok(dev) => dev,
        Err(e) => {
            error!("cannot open {}: {}", config.bus, e);
            return ExitCode::from(EXIT_BUS_UNAVAILABLE);
        }
    };
    let bmp180 = match BMP180::new(dev, Delay, config.oversampling) {
        Ok(bmp180) => bmp180.with_sea_level_pressure(config.sea_level_pa),
        Err(e) => {
            error!("no BMP180 on {}: {}", config.bus, e);
            return ExitCode::from(EXIT_BUS_UNAVAILABLE);
        }
    };

    let mut monitor = Monitor::new(bmp180)
        .on_error(config.on_error)
        .calibration(config.calibration)
        .interval_ms(config.interval_ms);

    match monitor.run(&STOP, config.cycles, |reading| println!("{}", reading)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(EXIT_SENSOR_FAILURE),
    }
}
