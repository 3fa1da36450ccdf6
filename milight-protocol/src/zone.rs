use std::fmt;

use crate::error::{MilightError, Result};

/// A bulb zone on the bridge.
///
/// Zone 0 broadcasts to every paired zone, 1 to 4 address a single zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Zone(u8);

impl Zone {
    /// Broadcast to all zones.
    pub const ALL: Self = Self(0);

    /// Pseudo-zone for the iBox1 built-in lamp. Shares the `00` encoding with [`Zone::ALL`].
    pub const BRIDGE: Self = Self(0);

    /// Highest addressable zone number.
    pub const MAX: u8 = 4;

    /// Create a zone, rejecting numbers above [`Zone::MAX`].
    pub fn new(zone: u8) -> Result<Self> {
        if zone > Self::MAX {
            return Err(MilightError::InvalidZone(zone));
        }
        Ok(Self(zone))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Wire encoding (one byte).
    pub fn to_byte(self) -> u8 {
        self.0
    }

    pub fn is_all(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Zone {
    type Error = MilightError;

    fn try_from(zone: u8) -> Result<Self> {
        Self::new(zone)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}
