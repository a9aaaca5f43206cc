use anyhow::Result;

mod analog;
mod pmsa003i;
mod scd4x;

pub use self::scd4x::initialize as init_scd4x;
pub use {analog::AnalogVoc, pmsa003i::Pmsa003i};

/// A single physical sensor that can be asked for its current value(s).
///
/// An `Err` from `measure` is treated as transient by the caller.
pub trait Sensor {
    type Reading;

    fn measure(&mut self) -> Result<Self::Reading>;
}

/// Mass concentrations in µg/m³ (environmental, not factory-standard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particulates {
    pub pm2_5: u16,
    pub pm10: u16,
}

/// One SCD4x frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    pub co2: u16,
    pub temperature: f32,
    pub humidity: f32,
}
