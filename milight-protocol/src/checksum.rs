use std::fmt;

use crate::zone::Zone;

/// Frame checksum: low byte of the sum of the command bytes, the zone byte
/// and the trailing zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Checksum(u8);

impl Checksum {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

/// Compute the checksum for one command sent to `zone`.
///
/// The trailing zero byte of the frame is part of the summed range but never
/// changes the result.
pub fn compute(command: &[u8], zone: Zone) -> Checksum {
    let sum = command
        .iter()
        .chain([zone.to_byte(), 0].iter())
        .fold(0u8, |acc, &b| acc.wrapping_add(b));
    Checksum(sum)
}
