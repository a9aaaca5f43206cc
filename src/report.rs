//! Views of a complete snapshot.
//!
//! Every formatter is gated on [`Snapshot::is_complete`] and degrades to an
//! empty result otherwise. All of them take labels, units and rounding from
//! [`Channel`], reading the snapshot fresh each time.

use {
    crate::snapshot::Snapshot,
    indexmap::IndexMap,
    serde::Serialize,
    std::fmt,
};

/// A sensor value as published. Absent values are carried as `Option<Value>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(u16),
    /// Already rounded to one decimal place.
    Decimal(f32),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{:.1}", v),
        }
    }
}

/// Rounds the stored value to one decimal place, exact ties to even.
fn round1(v: f32) -> f32 {
    // exact: a 24-bit mantissa times ten fits in an f64
    let scaled = f64::from(v) * 10.0;
    let mut rounded = scaled.round();
    if (rounded - scaled).abs() == 0.5 {
        rounded = 2.0 * (scaled / 2.0).round();
    }
    rounded as f32 / 10.0
}

/// The published fields, in publication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Voc,
    Pm2_5,
    Pm10,
    Co2,
    Temperature,
    Humidity,
}

pub const CHANNELS: [Channel; 6] = [
    Channel::Voc,
    Channel::Pm2_5,
    Channel::Pm10,
    Channel::Co2,
    Channel::Temperature,
    Channel::Humidity,
];

impl Channel {
    /// Label used as key, text prefix and `sensor_name`. Downstream consumers
    /// match on these strings.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Voc => "VOC",
            Channel::Pm2_5 => "PM2.5",
            Channel::Pm10 => "PM10",
            Channel::Co2 => "CO2",
            Channel::Temperature => "Temperatura",
            Channel::Humidity => "Humedad",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::Voc => "",
            Channel::Pm2_5 | Channel::Pm10 => "µg/m³",
            Channel::Co2 => "ppm",
            Channel::Temperature => "°C",
            Channel::Humidity => "%",
        }
    }

    pub fn value(self, snapshot: &Snapshot) -> Option<Value> {
        match self {
            Channel::Voc => snapshot.voc_raw.map(Value::Integer),
            Channel::Pm2_5 => snapshot.pm2_5.map(Value::Integer),
            Channel::Pm10 => snapshot.pm10.map(Value::Integer),
            Channel::Co2 => snapshot.co2.map(Value::Integer),
            Channel::Temperature => snapshot.temperature.map(|v| Value::Decimal(round1(v))),
            Channel::Humidity => snapshot.humidity.map(|v| Value::Decimal(round1(v))),
        }
    }
}

/// Label to value mapping in publication order; empty for an incomplete
/// snapshot.
pub fn keyed_values(snapshot: &Snapshot) -> IndexMap<&'static str, Option<Value>> {
    if !snapshot.is_complete() {
        return IndexMap::new();
    }

    CHANNELS
        .iter()
        .map(|ch| (ch.label(), ch.value(snapshot)))
        .collect()
}

/// One `label: value unit` line per channel; an empty string for an
/// incomplete snapshot. Absent values print as `n/a` without a unit.
pub fn text_report(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    if !snapshot.is_complete() {
        return out;
    }

    for ch in CHANNELS.iter() {
        let line = match ch.value(snapshot) {
            Some(v) => format!("{}: {} {}", ch.label(), v, ch.unit()),
            None => format!("{}: n/a", ch.label()),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub sensor_name: &'static str,
    pub value: Option<Value>,
    pub unit: &'static str,
}

/// The structured document. `sensor_data` is empty for an incomplete
/// snapshot, `device_id` is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub device_id: u32,
    pub sensor_data: Vec<Entry>,
}

impl Document {
    pub fn from_snapshot(device_id: u32, snapshot: &Snapshot) -> Self {
        let sensor_data = if snapshot.is_complete() {
            CHANNELS
                .iter()
                .map(|ch| Entry {
                    sensor_name: ch.label(),
                    value: ch.value(snapshot),
                    unit: ch.unit(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Document {
            device_id,
            sensor_data,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
