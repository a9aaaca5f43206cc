use chrono::{DateTime, Utc};

/// The most recent successfully read value of every sensor field.
///
/// Fields are last-known-good: a field is only overwritten by a successful
/// read of its sensor, so after a failed read it keeps the value from an
/// earlier cycle (stale) or stays `None` if it was never read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Raw ADC count of the VOC sensor, unitless.
    pub voc_raw: Option<u16>,
    /// µg/m³
    pub pm2_5: Option<u16>,
    /// µg/m³
    pub pm10: Option<u16>,
    /// ppm
    pub co2: Option<u16>,
    /// °C
    pub temperature: Option<f32>,
    /// %RH
    pub humidity: Option<f32>,
    /// When the most recent read cycle finished.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Whether the snapshot may be published: CO2, temperature and humidity
    /// have all been read. VOC and particulates do not gate publication.
    pub fn is_complete(&self) -> bool {
        self.co2.is_some() && self.temperature.is_some() && self.humidity.is_some()
    }
}
