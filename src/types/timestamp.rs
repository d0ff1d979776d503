//! # Timestamp
//!
//! Instant on the UTC timeline stored as whole seconds since the Unix epoch
//! plus a sub-second nanosecond component. This is exactly the 12-byte slot
//! layout: i64 seconds followed by u32 nanoseconds, both little-endian.
//!
//! Decoding never normalizes: a slot whose nanosecond field is out of range
//! is surfaced as-is and `is_normalized` reports it. Producers reject such
//! values before they reach a page.

use crate::config::NANOS_PER_SECOND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    pub const UNIX_EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    pub fn new(seconds: i64, nanos: u32) -> eyre::Result<Self> {
        eyre::ensure!(
            nanos < NANOS_PER_SECOND,
            "timestamp nanoseconds out of range: {}",
            nanos
        );
        Ok(Self { seconds, nanos })
    }

    /// Builds a timestamp from raw slot fields without range checks.
    pub fn from_raw_parts(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    pub fn from_epoch_second(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    pub fn from_micros(micros: i64) -> Self {
        Self {
            seconds: micros.div_euclid(1_000_000),
            nanos: (micros.rem_euclid(1_000_000) as u32) * 1_000,
        }
    }

    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanos: (millis.rem_euclid(1_000) as u32) * 1_000_000,
        }
    }

    pub fn epoch_second(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    pub fn is_normalized(&self) -> bool {
        self.nanos < NANOS_PER_SECOND
    }

    /// Microseconds since the epoch, truncating sub-microsecond precision.
    /// Returns `None` on overflow.
    pub fn to_micros(&self) -> Option<i64> {
        self.seconds
            .checked_mul(1_000_000)?
            .checked_add((self.nanos / 1_000) as i64)
    }

    pub fn to_le_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[..8].copy_from_slice(&self.seconds.to_le_bytes());
        out[8..].copy_from_slice(&self.nanos.to_le_bytes());
        out
    }

    pub fn from_le_bytes(bytes: [u8; 12]) -> Self {
        let mut seconds = [0u8; 8];
        let mut nanos = [0u8; 4];
        seconds.copy_from_slice(&bytes[..8]);
        nanos.copy_from_slice(&bytes[8..]);
        Self {
            seconds: i64::from_le_bytes(seconds),
            nanos: u32::from_le_bytes(nanos),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}
