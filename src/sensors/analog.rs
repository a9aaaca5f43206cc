use {
    crate::sensors::Sensor,
    anyhow::{Context, Result},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// MiCS-5524 VOC sensor wired to an ADC channel exposed through Linux IIO.
///
/// The reading is the raw, unitless conversion count of the channel. Only
/// single-ended channels are supported: a negative raw value (differential
/// channel) is reported as a read error.
pub struct AnalogVoc {
    path: PathBuf,
}

impl AnalogVoc {
    pub fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            anyhow::bail!("ADC channel {} does not exist", path.display());
        }

        Ok(AnalogVoc { path })
    }
}

impl Sensor for AnalogVoc {
    type Reading = u16;

    fn measure(&mut self) -> Result<u16> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read ADC channel {}", self.path.display()))?;

        raw.trim()
            .parse()
            .with_context(|| format!("Malformed ADC value {:?}", raw.trim()))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write, tempfile::NamedTempFile};

    #[test]
    fn reads_raw_count() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "512").unwrap();

        let mut voc = AnalogVoc::initialize(file.path()).unwrap();
        assert_eq!(voc.measure().unwrap(), 512);
    }

    #[test]
    fn negative_raw_value_is_a_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "-3").unwrap();

        let mut voc = AnalogVoc::initialize(file.path()).unwrap();
        assert!(voc.measure().is_err());
    }

    #[test]
    fn non_numeric_value_is_a_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "busy").unwrap();

        let mut voc = AnalogVoc::initialize(file.path()).unwrap();
        assert!(voc.measure().is_err());
    }

    #[test]
    fn missing_channel_fails_bring_up() {
        assert!(AnalogVoc::initialize("/nonexistent/in_voltage0_raw").is_err());
    }
}
