use {
    crate::{
        sensors::{Climate, Particulates, Sensor},
        snapshot::Snapshot,
    },
    chrono::Utc,
    log::{debug, warn},
    std::fmt,
};

/// The sensors read during a cycle, in read order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Particulates,
    Climate,
    Voc,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Particulates => "particulates",
            Source::Climate => "climate",
            Source::Voc => "voc",
        };
        f.write_str(name)
    }
}

/// Owns the sensor adapters and the snapshot they feed.
///
/// The snapshot is only mutated inside `read_cycle`, which takes `&mut self`,
/// so a `&Snapshot` obtained from `snapshot()` always reflects a finished cycle.
pub struct Aggregator<V, P, C> {
    voc: V,
    particulates: P,
    climate: C,
    snapshot: Snapshot,
    stale: Vec<Source>,
    cycles: u64,
}

impl<V, P, C> Aggregator<V, P, C>
where
    V: Sensor<Reading = u16>,
    P: Sensor<Reading = Particulates>,
    C: Sensor<Reading = Climate>,
{
    pub fn new(voc: V, particulates: P, climate: C) -> Self {
        Aggregator {
            voc,
            particulates,
            climate,
            snapshot: Snapshot::default(),
            stale: Vec::new(),
            cycles: 0,
        }
    }

    /// Reads every sensor once.
    ///
    /// A failed read is logged and leaves that sensor's fields untouched; the
    /// remaining sensors are still read. There are no retries, the next
    /// attempt is the next cycle.
    pub fn read_cycle(&mut self) {
        self.stale.clear();

        match self.particulates.measure() {
            Ok(p) => {
                debug!("particulates: {:?}", p);
                self.snapshot.pm2_5 = Some(p.pm2_5);
                self.snapshot.pm10 = Some(p.pm10);
            }
            Err(e) => self.failed(Source::Particulates, e),
        }

        match self.climate.measure() {
            Ok(c) => {
                debug!("climate: {:?}", c);
                self.snapshot.co2 = Some(c.co2);
                self.snapshot.temperature = Some(c.temperature);
                self.snapshot.humidity = Some(c.humidity);
            }
            Err(e) => self.failed(Source::Climate, e),
        }

        match self.voc.measure() {
            Ok(v) => {
                debug!("voc: {}", v);
                self.snapshot.voc_raw = Some(v);
            }
            Err(e) => self.failed(Source::Voc, e),
        }

        self.snapshot.updated_at = Some(Utc::now());
        self.cycles += 1;
    }

    fn failed(&mut self, source: Source, e: anyhow::Error) {
        warn!("{} read failed, keeping previous value: {:#}", source, e);
        self.stale.push(source);
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Sources whose read failed in the most recent cycle.
    pub fn stale_sources(&self) -> &[Source] {
        &self.stale
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
