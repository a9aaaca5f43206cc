use {
    anyhow::{anyhow, bail, Context, Result},
    std::{env, str::FromStr, time::Duration},
};

const DEFAULT_I2C_DEV: &str = "/dev/i2c-1";
const DEFAULT_VOC_ADC_PATH: &str = "/sys/bus/iio/devices/iio:device0/in_voltage0_raw";
const DEFAULT_INTERVAL_SECS: u64 = 5;
const DEFAULT_DEVICE_ID: u32 = 1;

/// Which representations are written to stdout after each complete cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
    Both,
}

impl FromStr for Output {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Output::Text),
            "json" => Ok(Output::Json),
            "both" => Ok(Output::Both),
            other => Err(anyhow!("expected text, json or both, got {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub i2c_dev: String,
    pub voc_adc_path: String,
    pub interval: Duration,
    pub device_id: u32,
    pub output: Output,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its
    /// value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval_secs = parse(&lookup, "READ_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?;
        if interval_secs == 0 {
            bail!("READ_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            i2c_dev: lookup("I2C_DEV").unwrap_or_else(|| DEFAULT_I2C_DEV.to_string()),
            voc_adc_path: lookup("VOC_ADC_PATH")
                .unwrap_or_else(|| DEFAULT_VOC_ADC_PATH.to_string()),
            interval: Duration::from_secs(interval_secs),
            device_id: parse(&lookup, "DEVICE_ID", DEFAULT_DEVICE_ID)?,
            output: parse(&lookup, "OUTPUT", Output::Both)?,
        })
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| -> anyhow::Error { e.into() })
            .with_context(|| format!("Invalid {} value {:?}", key, raw)),
        None => Ok(default),
    }
}
