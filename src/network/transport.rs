//! Socket Primitives
//!
//! Thin wrappers over tokio sockets shaped for a once-per-frame poll loop.
//! Accepts and receives never block the frame, and sends are single
//! best-effort writes. Every failure is reported by return value rather
//! than by panicking. Readiness polling is a separate call from receive;
//! protocol logic above this layer never blocks on either.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use futures_util::FutureExt;
use tokio::io::Interest;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, warn};

/// Bytes reserved for a single inbound datagram.
pub const RECV_BUFFER_SIZE: usize = 256;

/// Outcome of a non-blocking receive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecvStatus {
    /// `n` bytes were read into the buffer.
    Data(usize),
    /// Nothing available this poll.
    Empty,
    /// The peer shut the connection down.
    Closed,
}

/// Listening socket for the host role.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Create a listening socket on all interfaces.
    ///
    /// Enables address reuse and listens with a backlog of one: the
    /// protocol supports exactly one peer.
    pub fn bind(port: u16) -> io::Result<Self> {
        let socket = TcpSocket::new_v4()?;
        socket.set_reuseaddr(true)?;
        socket.bind(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port)))?;
        let inner = socket.listen(1)?;
        Ok(Self { inner })
    }

    /// The bound local address (useful after binding port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Zero-timeout accept poll.
    ///
    /// Returns the connected peer when one is pending, `None` otherwise.
    /// Callers invoke this once per tick while no peer is recorded.
    pub fn poll_accept(&self) -> Option<Peer> {
        match self.inner.accept().now_or_never() {
            Some(Ok((stream, addr))) => {
                debug!(%addr, "accepted peer connection");
                Some(Peer { stream })
            }
            Some(Err(e)) => {
                warn!("accept failed: {e}");
                None
            }
            None => None,
        }
    }
}

/// A connected peer, either direction.
#[derive(Debug)]
pub struct Peer {
    stream: TcpStream,
}

impl Peer {
    /// Connect to a numeric IPv4 address.
    ///
    /// Malformed addresses and refused connections both surface as errors;
    /// there is no retry.
    pub async fn connect(addr: &str, port: u16) -> io::Result<Self> {
        let ip: Ipv4Addr = addr.parse().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid IPv4 address: {addr}"),
            )
        })?;
        let socket = TcpSocket::new_v4()?;
        let stream = socket
            .connect(SocketAddr::V4(SocketAddrV4::new(ip, port)))
            .await?;
        Ok(Self { stream })
    }

    /// Zero-timeout readiness poll.
    pub fn poll_readable(&self) -> bool {
        matches!(
            self.stream.ready(Interest::READABLE).now_or_never(),
            Some(Ok(ready)) if ready.is_readable() || ready.is_read_closed()
        )
    }

    /// Best-effort single write. No retry-until-complete loop and no length
    /// framing; a short write truncates the datagram.
    pub fn send(&self, payload: &[u8]) -> bool {
        match self.stream.try_write(payload) {
            Ok(n) => {
                if n < payload.len() {
                    warn!(sent = n, len = payload.len(), "short write to peer");
                }
                true
            }
            Err(e) => {
                warn!("send failed: {e}");
                false
            }
        }
    }

    /// Best-effort single read into `buf`.
    ///
    /// A read of zero bytes reports [`RecvStatus::Closed`]; transient errors
    /// are folded into [`RecvStatus::Empty`] since the caller re-polls next
    /// tick anyway.
    pub fn recv(&self, buf: &mut [u8]) -> RecvStatus {
        match self.stream.try_read(buf) {
            Ok(0) => RecvStatus::Closed,
            Ok(n) => RecvStatus::Data(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => RecvStatus::Empty,
            Err(e) => {
                debug!("recv failed: {e}");
                RecvStatus::Empty
            }
        }
    }
}
