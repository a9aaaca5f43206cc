use {
    crate::sensors::{Climate, Sensor},
    anyhow::{anyhow, Result},
    linux_embedded_hal::{Delay, I2cdev},
    scd4x::Scd4x,
};

/// Opens the SCD4x on `i2c_dev` and puts it into periodic measurement mode.
///
/// The sensor keeps measuring across process restarts, so any running
/// measurement is stopped first; the first frame is available ~5s later.
pub fn initialize(i2c_dev: &str) -> Result<Scd4x<I2cdev, Delay>> {
    let dev = I2cdev::new(i2c_dev)?;

    let mut scd = Scd4x::new(dev, Delay);

    scd.stop_periodic_measurement()
        .map_err(|e| anyhow!("Failed to stop SCD4x measurement: {:?}", e))?;
    scd.start_periodic_measurement()
        .map_err(|e| anyhow!("Failed to initialize SCD4x: {:?}", e))?;

    Ok(scd)
}

impl Sensor for Scd4x<I2cdev, Delay> {
    type Reading = Climate;

    fn measure(&mut self) -> Result<Climate> {
        let data = self
            .measurement()
            .map_err(|e| anyhow!("Failed to read from SCD4x: {:?}", e))?;

        Ok(Climate {
            co2: data.co2,
            temperature: data.temperature,
            humidity: data.humidity,
        })
    }
}
