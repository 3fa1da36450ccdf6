use crate::checksum::{self, Checksum};
use crate::command::{COMMAND_LEN, Command};
use crate::error::{MilightError, Result};
use crate::session::Session;
use crate::zone::Zone;

/// Envelope header of a command frame. The last byte counts the bytes that follow it.
pub const HEADER: [u8; 5] = [0x80, 0x00, 0x00, 0x00, 0x11];
pub const FRAME_LEN: usize = 22;

/// The bridge accepts a repeated cycle number, so it is never incremented.
pub const CYCLE: u8 = 0x00;

const SESSION_OFFSET: usize = 5;
const CYCLE_OFFSET: usize = 8;
const COMMAND_OFFSET: usize = 10;
const ZONE_OFFSET: usize = COMMAND_OFFSET + COMMAND_LEN;
const CHECKSUM_OFFSET: usize = FRAME_LEN - 1;

/// A decoded command frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandFrame {
    pub session: Session,
    pub cycle: u8,
    pub command: [u8; COMMAND_LEN],
    pub zone: Zone,
    pub checksum: Checksum,
}

/// Build the full frame for `command` addressed to `zone`.
pub fn write(session: Session, command: &Command, zone: Zone) -> [u8; FRAME_LEN] {
    let payload = command.to_bytes();
    let checksum = checksum::compute(&payload, zone);

    let mut frame = [0u8; FRAME_LEN];
    frame[..HEADER.len()].copy_from_slice(&HEADER);
    frame[SESSION_OFFSET] = session.id1;
    frame[SESSION_OFFSET + 1] = session.id2;
    frame[CYCLE_OFFSET] = CYCLE;
    frame[COMMAND_OFFSET..ZONE_OFFSET].copy_from_slice(&payload);
    frame[ZONE_OFFSET] = zone.to_byte();
    frame[CHECKSUM_OFFSET] = checksum.value();
    frame
}

/// Parse a command frame, verifying the header and checksum.
pub fn parse(data: &[u8]) -> Result<CommandFrame> {
    if data.len() < FRAME_LEN {
        return Err(MilightError::FrameTooShort {
            expected: FRAME_LEN,
            actual: data.len(),
        });
    }

    for (offset, (&expected, &actual)) in HEADER.iter().zip(data).enumerate() {
        if expected != actual {
            return Err(MilightError::InvalidHeader {
                offset,
                expected,
                actual,
            });
        }
    }

    let mut command = [0u8; COMMAND_LEN];
    command.copy_from_slice(&data[COMMAND_OFFSET..ZONE_OFFSET]);
    let zone = Zone::new(data[ZONE_OFFSET])?;

    let expected = checksum::compute(&command, zone);
    let actual = Checksum::new(data[CHECKSUM_OFFSET]);
    if expected != actual {
        return Err(MilightError::ChecksumMismatch { expected, actual });
    }

    Ok(CommandFrame {
        session: Session::new(data[SESSION_OFFSET], data[SESSION_OFFSET + 1]),
        cycle: data[CYCLE_OFFSET],
        command,
        zone,
        checksum: actual,
    })
}
