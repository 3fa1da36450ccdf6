use std::time::Duration;

/// Errors that can occur while talking to a bridge.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The UDP socket could not be created or bound.
    #[error("socket unavailable: {0}")]
    SocketUnavailable(#[source] std::io::Error),

    /// Sending a datagram to the bridge failed or timed out.
    #[error("send failed: {0}")]
    SendFailure(#[source] std::io::Error),

    /// The bridge did not answer the session handshake in time.
    #[error("handshake timeout after {0:?}")]
    HandshakeTimeout(Duration),

    /// The handshake response did not carry the session bytes.
    #[error("malformed handshake response: {0}")]
    HandshakeMalformed(#[source] milight_rs_protocol::MilightError),

    /// Receive or address resolution error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol-level error (invalid zone, bad frame, etc.).
    #[error("protocol error: {0}")]
    Protocol(#[from] milight_rs_protocol::MilightError),
}

/// Convenience alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
