use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use milight_rs_protocol::Session;
use milight_rs_protocol::frame::{self, CommandFrame};
use milight_rs_protocol::session::{SESSION_ID1_OFFSET, SESSION_ID2_OFFSET};
use tokio::net::UdpSocket;

const HANDSHAKE_RESPONSE_LEN: usize = 22;
const ACK: [u8; 8] = [0x88, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeReply {
    Normal,
    Short,
    Silent,
}

pub struct MockConfig {
    /// First session handed out; `id2` is bumped on every further handshake.
    pub session: Session,
    pub handshake: HandshakeReply,
    pub acknowledge: bool,
    /// Delay before each ack is sent; zero answers immediately.
    pub ack_delay: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            session: Session::new(0xAB, 0xCD),
            handshake: HandshakeReply::Normal,
            acknowledge: true,
            ack_delay: Duration::ZERO,
        }
    }
}

#[derive(Default)]
struct Recorded {
    handshakes: AtomicUsize,
    frames: Mutex<Vec<CommandFrame>>,
}

/// Loopback stand-in for a bridge: answers handshakes and acknowledges frames.
pub struct MockBridge {
    addr: SocketAddr,
    recorded: Arc<Recorded>,
}

impl MockBridge {
    pub async fn start(config: MockConfig) -> Self {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        let addr = socket.local_addr().unwrap();
        let recorded = Arc::new(Recorded::default());

        let shared = Arc::clone(&recorded);
        tokio::spawn(async move {
            Self::serve(socket, config, shared).await;
        });

        Self { addr, recorded }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn handshakes(&self) -> usize {
        self.recorded.handshakes.load(Ordering::SeqCst)
    }

    pub fn frames(&self) -> Vec<CommandFrame> {
        self.recorded.frames.lock().unwrap().clone()
    }

    async fn serve(socket: Arc<UdpSocket>, config: MockConfig, recorded: Arc<Recorded>) {
        let mut buf = [0u8; 1024];
        loop {
            let Ok((n, from)) = socket.recv_from(&mut buf).await else {
                break;
            };
            let data = &buf[..n];

            match data.first() {
                Some(0x20) => {
                    let count = recorded.handshakes.fetch_add(1, Ordering::SeqCst);
                    let response = match config.handshake {
                        HandshakeReply::Normal => {
                            let mut response = vec![0x28; HANDSHAKE_RESPONSE_LEN];
                            response[SESSION_ID1_OFFSET] = config.session.id1;
                            response[SESSION_ID2_OFFSET] =
                                config.session.id2.wrapping_add(count as u8);
                            response
                        }
                        HandshakeReply::Short => vec![0x28; SESSION_ID1_OFFSET],
                        HandshakeReply::Silent => continue,
                    };
                    if socket.send_to(&response, from).await.is_err() {
                        break;
                    }
                }
                Some(0x80) => {
                    if let Ok(parsed) = frame::parse(data) {
                        recorded.frames.lock().unwrap().push(parsed);
                    }
                    if !config.acknowledge {
                        continue;
                    }
                    if config.ack_delay.is_zero() {
                        if socket.send_to(&ACK, from).await.is_err() {
                            break;
                        }
                    } else {
                        let socket = Arc::clone(&socket);
                        let delay = config.ack_delay;
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            let _ = socket.send_to(&ACK, from).await;
                        });
                    }
                }
                _ => {}
            }
        }
    }
}
