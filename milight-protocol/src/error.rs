use crate::checksum::Checksum;

#[derive(Debug, thiserror::Error)]
pub enum MilightError {
    #[error("invalid zone: {0} (expected 0..=4)")]
    InvalidZone(u8),

    #[error("handshake response too short: expected at least {expected}, actual {actual}")]
    HandshakeTooShort { expected: usize, actual: usize },

    #[error("frame too short: expected {expected}, actual {actual}")]
    FrameTooShort { expected: usize, actual: usize },

    #[error("invalid header byte at offset {offset}: expected {expected:#04x}, actual {actual:#04x}")]
    InvalidHeader {
        offset: usize,
        expected: u8,
        actual: u8,
    },

    #[error("checksum mismatch: expected {expected}, actual {actual}")]
    ChecksumMismatch {
        expected: Checksum,
        actual: Checksum,
    },
}

pub type Result<T> = std::result::Result<T, MilightError>;
