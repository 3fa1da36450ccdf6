use std::fmt;

use crate::error::{MilightError, Result};

/// Fixed handshake request that asks the bridge for a new session.
pub const HANDSHAKE_REQUEST: [u8; 27] = [
    0x20, 0x00, 0x00, 0x00, 0x16, 0x02, 0x62, 0x3A, 0xD5, 0xED, 0xA3, 0x01, 0xAE, 0x08, 0x2D,
    0x46, 0x61, 0x41, 0xA7, 0xF6, 0xDC, 0xAF, 0xD3, 0xE6, 0x00, 0x00, 0x1E,
];

/// Offset of the first session byte in a handshake response.
pub const SESSION_ID1_OFFSET: usize = 19;
/// Offset of the second session byte in a handshake response.
pub const SESSION_ID2_OFFSET: usize = 20;

/// Minimum handshake response length that still carries both session bytes.
pub const MIN_RESPONSE_LEN: usize = SESSION_ID2_OFFSET + 1;

/// Session identifiers issued by the bridge, required on every command frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Session {
    pub id1: u8,
    pub id2: u8,
}

impl Session {
    pub fn new(id1: u8, id2: u8) -> Self {
        Self { id1, id2 }
    }

    /// Extract the session from a raw handshake response.
    ///
    /// Everything except bytes 19 and 20 is ignored.
    pub fn from_handshake_response(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_RESPONSE_LEN {
            return Err(MilightError::HandshakeTooShort {
                expected: MIN_RESPONSE_LEN,
                actual: data.len(),
            });
        }
        Ok(Self {
            id1: data[SESSION_ID1_OFFSET],
            id2: data[SESSION_ID2_OFFSET],
        })
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.id1, self.id2)
    }
}
