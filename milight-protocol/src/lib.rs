//! MiLight/LimitlessLED v6 bridge protocol types, commands, and frame encoding.
//!
//! This crate is the I/O-free protocol layer for the iBox1/iBox2 Wifi bridges.
//! It builds command payloads, checksums and full UDP frames, and extracts
//! the session identifiers from a handshake response. The network side lives
//! in `milight-rs-client`.

pub mod checksum;
pub mod command;
pub mod error;
pub mod frame;
pub mod intent;
pub mod session;
pub mod zone;

pub use checksum::Checksum;
pub use command::{Command, LampCommand, SpecialMode};
pub use error::{MilightError, Result};
pub use intent::{Adjustment, LightChange};
pub use session::Session;
pub use zone::Zone;
