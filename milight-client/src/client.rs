use milight_rs_protocol::{Command, LampCommand, LightChange, Session, Zone, intent};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::connection::Connection;
use crate::error::Result;
use crate::state::{ClientConfig, SendReport, SessionState};

/// Async client for a MiLight v6 bridge.
///
/// Every operation translates into one batch of command frames for a zone.
/// Batches are sent one frame at a time, each followed by a wait for the
/// bridge's acknowledgment, so calls on one client are strictly sequential.
///
/// With [`ClientConfig::persist_session`] set, the socket and session are
/// kept between calls: `Idle` → `Active` on the first send, back to `Idle`
/// when more than [`ClientConfig::session_ttl`] passes between sends or the
/// host changes through [`set_controller()`](Self::set_controller).
///
/// # Example
///
/// ```no_run
/// # async fn example() -> milight_rs_client::Result<()> {
/// use milight_rs_client::{ClientConfig, MilightClient, Zone};
///
/// let mut client = MilightClient::new(ClientConfig::default());
/// client.link_bulb(Zone::new(1)?).await?;
/// client.change_internal_light("white", None).await?;
/// # Ok(())
/// # }
/// ```
pub struct MilightClient {
    config: ClientConfig,
    connection: Option<Connection>,
    state: SessionState,
}

impl MilightClient {
    /// Create a client. No I/O happens until the first command is sent.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            connection: None,
            state: SessionState::Idle,
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Returns the current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the cached session, if any.
    pub fn session(&self) -> Option<Session> {
        self.state.session()
    }

    // -- Intents --

    /// Change color, saturation, intensity or mode of the bulbs in `zone`.
    ///
    /// Adjustments the bridge cannot express are dropped; if nothing is
    /// left, no frame is sent and the report is empty.
    pub async fn change_light(&mut self, change: &LightChange, zone: Zone) -> Result<SendReport> {
        let commands = intent::translate(change, self.config.hue_shift);
        debug!(%zone, requested = change.len(), commands = commands.len(), "change light");
        self.send_commands(&commands, zone).await
    }

    /// Drive the lamp built into an iBox1 bridge.
    ///
    /// `mode` is one of `on`, `off`, `speedup`, `speeddown`, `white`, `disco`,
    /// `color` or `intensity`; the last three use `value` (0 when absent).
    /// Unknown modes send nothing.
    pub async fn change_internal_light(
        &mut self,
        mode: &str,
        value: Option<u8>,
    ) -> Result<SendReport> {
        match LampCommand::from_token(mode, value.unwrap_or(0)) {
            Some(lamp) => self.send_commands(&[Command::Lamp(lamp)], Zone::BRIDGE).await,
            None => Ok(SendReport::default()),
        }
    }

    /// Link the bulb that was just switched on to `zone`.
    ///
    /// The bulb only accepts pairing for about 3 seconds after it is powered
    /// on. Timing is up to the caller; the bridge gives no feedback.
    pub async fn link_bulb(&mut self, zone: Zone) -> Result<SendReport> {
        info!(%zone, "link bulb");
        self.send_commands(&[Command::Link], zone).await
    }

    /// Unlink every remote and controller paired to the bulb that was just
    /// switched on. Same 3 second window as [`link_bulb()`](Self::link_bulb).
    pub async fn unlink_bulb(&mut self, zone: Zone) -> Result<SendReport> {
        info!(%zone, "unlink bulb");
        self.send_commands(&[Command::Unlink], zone).await
    }

    /// Point the client at another bridge.
    ///
    /// Drops the socket and session; the next send performs a fresh handshake.
    pub fn set_controller(&mut self, host: impl Into<String>) {
        self.config.host = host.into();
        self.connection = None;
        self.state = SessionState::Idle;
        info!(host = %self.config.host, "controller changed");
    }

    // -- Dispatch --

    /// Send a batch of commands to `zone`.
    ///
    /// An empty batch is a no-op. Otherwise a session is negotiated when
    /// needed and every command goes out as its own frame. Handshake errors
    /// abort the call; per-frame send errors are collected in the report.
    pub async fn send_commands(&mut self, commands: &[Command], zone: Zone) -> Result<SendReport> {
        if commands.is_empty() {
            return Ok(SendReport::default());
        }

        if !self.config.persist_session {
            let connection = Connection::open(&self.config).await?;
            let session = connection.handshake().await?;
            return Ok(connection.send_batch(session, commands, zone).await);
        }

        let now = Instant::now();
        self.state = match self.state {
            SessionState::Active {
                session,
                last_command,
            } if now.duration_since(last_command) <= self.config.session_ttl => {
                SessionState::Active {
                    session,
                    last_command: now,
                }
            }
            SessionState::Active { .. } => {
                debug!(ttl = ?self.config.session_ttl, "session expired");
                SessionState::Idle
            }
            SessionState::Idle => SessionState::Idle,
        };

        // A new handshake gets a new socket, so late acks from the previous
        // session cannot be read as the handshake response.
        if self.state == SessionState::Idle {
            self.connection = None;
        }
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => Connection::open(&self.config).await?,
        };
        let connection = self.connection.insert(connection);

        let session = match self.state {
            SessionState::Active { session, .. } => session,
            SessionState::Idle => {
                let session = connection.handshake().await?;
                info!(%session, "new session");
                self.state = SessionState::Active {
                    session,
                    last_command: now,
                };
                session
            }
        };

        debug!(%zone, count = commands.len(), "sending batch");
        Ok(connection.send_batch(session, commands, zone).await)
    }
}
