//! Async client for MiLight/LimitlessLED v6 Wifi bridges (iBox1/iBox2).
//!
//! Change color, brightness, saturation and modes of paired RGB+CCT bulbs,
//! drive the iBox1 built-in lamp, and link or unlink bulbs to zones.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> milight_rs_client::Result<()> {
//! use milight_rs_client::{ClientConfig, LightChange, MilightClient, Zone};
//!
//! let config = ClientConfig {
//!     host: "192.168.1.30".into(),
//!     ..ClientConfig::default()
//! };
//! let mut client = MilightClient::new(config);
//!
//! let change = LightChange::new().color(265).intensity(70);
//! client.change_light(&change, Zone::new(2)?).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub(crate) mod connection;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod state;

pub use client::MilightClient;
pub use error::{ClientError, Result};
pub use milight_rs_protocol::{Command, LampCommand, LightChange, Session, SpecialMode, Zone};
pub use state::{ClientConfig, FrameFailure, SendReport, SessionState};
