use {
    crate::{
        aggregator::Aggregator,
        config::{Config, Output},
        report::{keyed_values, text_report, Document},
        sensors::{init_scd4x, AnalogVoc, Pmsa003i},
        snapshot::Snapshot,
    },
    anyhow::{Context, Result},
    linux_embedded_hal::I2cdev,
    log::{debug, info, warn},
    tokio::time::{interval, MissedTickBehavior},
};

pub mod aggregator;
pub mod config;
pub mod report;
pub mod sensors;
pub mod snapshot;

/// Brings up the board and samples the sensors forever.
pub async fn client() -> Result<()> {
    pretty_env_logger::init();
    color_backtrace::install();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("{:?}", config);

    let particulates = Pmsa003i::new(
        I2cdev::new(&config.i2c_dev)
            .with_context(|| format!("Failed to open {}", config.i2c_dev))?,
    );
    let climate = init_scd4x(&config.i2c_dev)?;
    let voc = AnalogVoc::initialize(&config.voc_adc_path)?;

    let mut aggregator = Aggregator::new(voc, particulates, climate);

    info!("Initialization complete");

    let mut interval = interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;

        aggregator.read_cycle();
        publish(&config, aggregator.snapshot());
    }
}

/// Writes the configured representations of `snapshot` to stdout.
fn publish(config: &Config, snapshot: &Snapshot) {
    if !snapshot.is_complete() {
        info!("Snapshot incomplete, waiting for CO2, temperature and humidity");
        return;
    }

    debug!("{:?}", keyed_values(snapshot));

    if matches!(config.output, Output::Text | Output::Both) {
        println!("{}", text_report(snapshot));
    }

    if matches!(config.output, Output::Json | Output::Both) {
        match Document::from_snapshot(config.device_id, snapshot).to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Failed to serialize sensor document: {}", e),
        }
    }
}
