use std::time::Duration;

use milight_rs_protocol::intent::DEFAULT_HUE_SHIFT;
use milight_rs_protocol::{Command, Session};
use tokio::time::Instant;

use crate::error::ClientError;

/// Session state machine of a persistent client.
///
/// Transitions: `Idle` → (handshake) → `Active` → (TTL elapsed | host changed) → `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No usable session; the next send performs a handshake.
    Idle,
    /// Session obtained from the bridge, valid while commands keep coming.
    Active {
        session: Session,
        last_command: Instant,
    },
}

impl SessionState {
    /// Returns the state name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active { .. } => "Active",
        }
    }

    pub fn session(&self) -> Option<Session> {
        match self {
            Self::Idle => None,
            Self::Active { session, .. } => Some(*session),
        }
    }
}

/// Configuration for [`MilightClient`](crate::MilightClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Bridge address. Default: `"192.168.1.30"`.
    pub host: String,
    /// Bridge port commands are sent to. Default: 5987.
    pub send_port: u16,
    /// Local port the client socket binds to; 0 picks any free port. Default: 55054.
    pub receive_port: u16,
    /// Local address the client socket binds to. Default: `"0.0.0.0"`.
    pub bind_address: String,
    /// Calibration offset added to hue values. Default: 10.
    pub hue_shift: i32,
    /// Send and receive timeout for every datagram. Default: 1 second.
    pub timeout: Duration,
    /// Idle time after which a cached session is renegotiated. Default: 55 seconds.
    pub session_ttl: Duration,
    /// Keep the socket and session between calls. When `false`, every
    /// `send_commands` opens a fresh socket and performs its own handshake.
    /// Default: `true`.
    pub persist_session: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.30".to_owned(),
            send_port: 5987,
            receive_port: 55054,
            bind_address: "0.0.0.0".to_owned(),
            hue_shift: DEFAULT_HUE_SHIFT,
            timeout: Duration::from_secs(1),
            session_ttl: Duration::from_secs(55),
            persist_session: true,
        }
    }
}

/// A frame of a batch that could not be sent.
#[derive(Debug)]
pub struct FrameFailure {
    /// Position of the command in the batch.
    pub index: usize,
    pub command: Command,
    pub error: ClientError,
}

/// Outcome of one `send_commands` call.
///
/// Delivery is best-effort: a failed frame is recorded here and the rest of
/// the batch is still sent. Acknowledgments are counted, not validated.
#[derive(Debug, Default)]
pub struct SendReport {
    /// Session the frames were sent with; `None` if nothing was sent.
    pub session: Option<Session>,
    pub frames_sent: usize,
    pub acknowledged: usize,
    pub failures: Vec<FrameFailure>,
}

impl SendReport {
    /// True when the call had nothing to send.
    pub fn is_empty(&self) -> bool {
        self.session.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
