use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use milight_rs_protocol::session::HANDSHAKE_REQUEST;
use milight_rs_protocol::{Command, Session, Zone, frame};
use tokio::net::{UdpSocket, lookup_host};
use tracing::{debug, trace, warn};

use crate::error::{ClientError, Result};
use crate::state::{ClientConfig, FrameFailure, SendReport};

const RECV_BUF_LEN: usize = 1024;

pub struct Connection {
    socket: UdpSocket,
    bridge: SocketAddr,
    timeout: Duration,
}

impl Connection {
    pub async fn open(config: &ClientConfig) -> Result<Self> {
        let socket = UdpSocket::bind((config.bind_address.as_str(), config.receive_port))
            .await
            .map_err(ClientError::SocketUnavailable)?;

        let bridge = lookup_host((config.host.as_str(), config.send_port))
            .await?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address for {}", config.host),
                )
            })?;

        debug!(%bridge, local = ?socket.local_addr().ok(), "UDP socket open");
        Ok(Self {
            socket,
            bridge,
            timeout: config.timeout,
        })
    }

    /// Request a new session from the bridge.
    pub async fn handshake(&self) -> Result<Session> {
        debug!(bridge = %self.bridge, "session handshake");
        self.send_raw(&HANDSHAKE_REQUEST).await?;

        let mut buf = [0u8; RECV_BUF_LEN];
        let (n, _) = tokio::time::timeout(self.timeout, self.socket.recv_from(&mut buf))
            .await
            .map_err(|_| {
                warn!(timeout = ?self.timeout, "handshake timeout");
                ClientError::HandshakeTimeout(self.timeout)
            })?
            .map_err(ClientError::Io)?;

        let session =
            Session::from_handshake_response(&buf[..n]).map_err(ClientError::HandshakeMalformed)?;
        debug!(%session, "session established");
        Ok(session)
    }

    /// Send every command in order, draining one acknowledgment after each.
    pub async fn send_batch(
        &self,
        session: Session,
        commands: &[Command],
        zone: Zone,
    ) -> SendReport {
        let mut report = SendReport {
            session: Some(session),
            ..SendReport::default()
        };

        for (index, command) in commands.iter().enumerate() {
            let bytes = frame::write(session, command, zone);
            trace!(command = command.name(), %zone, frame = ?bytes, "sending");

            if let Err(error) = self.send_raw(&bytes).await {
                warn!(index, command = command.name(), %error, "frame not sent");
                report.failures.push(FrameFailure {
                    index,
                    command: *command,
                    error,
                });
                continue;
            }
            report.frames_sent += 1;

            if self.drain_ack().await {
                report.acknowledged += 1;
            }
        }

        report
    }

    pub async fn send_raw(&self, data: &[u8]) -> Result<()> {
        tokio::time::timeout(self.timeout, self.socket.send_to(data, self.bridge))
            .await
            .map_err(|_| {
                ClientError::SendFailure(io::Error::new(io::ErrorKind::TimedOut, "send timed out"))
            })?
            .map_err(ClientError::SendFailure)?;
        Ok(())
    }

    /// Read and discard one acknowledgment. Returns `false` if none arrived.
    pub async fn drain_ack(&self) -> bool {
        let mut buf = [0u8; RECV_BUF_LEN];
        match tokio::time::timeout(self.timeout, self.socket.recv_from(&mut buf)).await {
            Ok(Ok((n, _))) => {
                trace!(len = n, "ack received");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "ack receive failed");
                false
            }
            Err(_) => {
                debug!(timeout = ?self.timeout, "no ack");
                false
            }
        }
    }

    #[cfg(test)]
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milight_rs_protocol::session::MIN_RESPONSE_LEN;

    async fn peer() -> (UdpSocket, ClientConfig) {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let config = ClientConfig {
            host: "127.0.0.1".into(),
            send_port: peer.local_addr().unwrap().port(),
            receive_port: 0,
            bind_address: "127.0.0.1".into(),
            timeout: Duration::from_millis(100),
            ..ClientConfig::default()
        };
        (peer, config)
    }

    #[tokio::test]
    async fn handshake_extracts_session() {
        let (peer, config) = peer().await;
        let conn = Connection::open(&config).await.unwrap();

        let server = tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let (n, from) = peer.recv_from(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], &HANDSHAKE_REQUEST[..]);
            let mut response = [0u8; 22];
            response[19] = 0x5A;
            response[20] = 0xA5;
            peer.send_to(&response, from).await.unwrap();
        });

        let session = conn.handshake().await.unwrap();
        assert_eq!(session, Session::new(0x5A, 0xA5));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn handshake_short_response() {
        let (peer, config) = peer().await;
        let conn = Connection::open(&config).await.unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let (_, from) = peer.recv_from(&mut buf).await.unwrap();
            peer.send_to(&[0u8; MIN_RESPONSE_LEN - 1], from)
                .await
                .unwrap();
        });

        let err = conn.handshake().await.unwrap_err();
        assert!(matches!(err, ClientError::HandshakeMalformed(_)));
    }

    #[tokio::test]
    async fn handshake_timeout() {
        let (_peer, config) = peer().await;
        let conn = Connection::open(&config).await.unwrap();

        let err = conn.handshake().await.unwrap_err();
        assert!(matches!(err, ClientError::HandshakeTimeout(_)));
    }

    #[tokio::test]
    async fn drain_ack_times_out_quietly() {
        let (_peer, config) = peer().await;
        let conn = Connection::open(&config).await.unwrap();
        assert!(!conn.drain_ack().await);
    }

    #[tokio::test]
    async fn send_batch_writes_frames_in_order() {
        let (peer, config) = peer().await;
        let conn = Connection::open(&config).await.unwrap();
        let local = conn.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let mut frames = Vec::new();
            for _ in 0..2 {
                let mut buf = [0u8; 64];
                let (n, from) = peer.recv_from(&mut buf).await.unwrap();
                assert_eq!(from, local);
                frames.push(buf[..n].to_vec());
                peer.send_to(b"ack", from).await.unwrap();
            }
            frames
        });

        let session = Session::new(0x01, 0x02);
        let zone = Zone::new(2).unwrap();
        let commands = [Command::WarmWhite(10), Command::Brightness(70)];
        let report = conn.send_batch(session, &commands, zone).await;

        assert_eq!(report.session, Some(session));
        assert_eq!(report.frames_sent, 2);
        assert_eq!(report.acknowledged, 2);
        assert!(report.is_complete());

        let frames = server.await.unwrap();
        assert_eq!(
            hex::encode_upper(&frames[0]),
            "8000000011010200000031000008050A00000002004A"
        );
        assert_eq!(
            hex::encode_upper(&frames[1]),
            "80000000110102000000310000080346464646020056"
        );
    }

    #[tokio::test]
    async fn send_failures_recorded_and_batch_continues() {
        // Broadcast without SO_BROADCAST is rejected by the kernel.
        let config = ClientConfig {
            host: "255.255.255.255".into(),
            send_port: 5987,
            receive_port: 0,
            bind_address: "0.0.0.0".into(),
            timeout: Duration::from_millis(50),
            ..ClientConfig::default()
        };
        let conn = Connection::open(&config).await.unwrap();

        let commands = [Command::Link, Command::Hue(10), Command::Unlink];
        let report = conn
            .send_batch(Session::new(1, 2), &commands, Zone::ALL)
            .await;

        assert_eq!(report.frames_sent, 0);
        assert_eq!(report.acknowledged, 0);
        assert_eq!(report.failures.len(), commands.len());
        for (i, failure) in report.failures.iter().enumerate() {
            assert_eq!(failure.index, i);
            assert_eq!(failure.command, commands[i]);
            assert!(matches!(failure.error, ClientError::SendFailure(_)));
        }
    }

    #[tokio::test]
    async fn bind_unavailable_address() {
        let config = ClientConfig {
            // TEST-NET-1, never a local interface
            bind_address: "192.0.2.1".into(),
            receive_port: 0,
            ..ClientConfig::default()
        };
        let result = Connection::open(&config).await;
        assert!(matches!(result, Err(ClientError::SocketUnavailable(_))));
    }
}
