use {
    crate::sensors::{Particulates, Sensor},
    anyhow::{anyhow, bail, Result},
    embedded_hal::blocking::i2c::Read,
    std::fmt::Debug,
};

const ADDRESS: u8 = 0x12;
const FRAME_LEN: usize = 32;
/// Value of the length word: the 28 bytes following it.
const PAYLOAD_LEN: u16 = 28;
const START: [u8; 2] = [0x42, 0x4d];

/// PMSA003I particulate sensor on the I2C bus.
pub struct Pmsa003i<I2C> {
    i2c: I2C,
}

impl<I2C> Pmsa003i<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Pmsa003i { i2c }
    }
}

impl<I2C, E> Sensor for Pmsa003i<I2C>
where
    I2C: Read<Error = E>,
    E: Debug,
{
    type Reading = Particulates;

    fn measure(&mut self) -> Result<Particulates> {
        let mut frame = [0u8; FRAME_LEN];
        self.i2c
            .read(ADDRESS, &mut frame)
            .map_err(|e| anyhow!("Failed to read from PMSA003I: {:?}", e))?;

        decode(&frame)
    }
}

fn word(frame: &[u8; FRAME_LEN], offset: usize) -> u16 {
    u16::from_be_bytes([frame[offset], frame[offset + 1]])
}

/// Extracts the environmental PM2.5 and PM10 concentrations from a frame.
fn decode(frame: &[u8; FRAME_LEN]) -> Result<Particulates> {
    if frame[..2] != START {
        bail!(
            "PMSA003I frame has bad start bytes {:#04x} {:#04x}",
            frame[0],
            frame[1]
        );
    }

    let len = word(frame, 2);
    if len != PAYLOAD_LEN {
        bail!("PMSA003I frame length {} (expected {})", len, PAYLOAD_LEN);
    }

    let expected = word(frame, 30);
    let sum = frame[..30]
        .iter()
        .fold(0u16, |acc, b| acc.wrapping_add(u16::from(*b)));
    if sum != expected {
        bail!(
            "PMSA003I checksum mismatch: computed {:#06x}, frame says {:#06x}",
            sum,
            expected
        );
    }

    Ok(Particulates {
        pm2_5: word(frame, 12),
        pm10: word(frame, 14),
    })
}
