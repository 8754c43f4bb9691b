//! Session Synchronizer
//!
//! The state machine that mirrors one game session across two processes.
//! The HOST listens, accepts at most one peer, and sends a single unlock
//! message when its player first reaches the goal. The CLIENT starts with
//! movement locked and polls for that message each tick. All polling is
//! zero-timeout: a tick is never blocked by the socket layer.
//!
//! Setup failures are non-fatal. A host that cannot bind never finds a
//! client; a client that cannot connect stays locked and disconnected.
//! Both are logged once and the session carries on degraded.

use tracing::{debug, info, warn};

use crate::network::protocol::{self, DEFAULT_TINT};
use crate::network::transport::{Listener, Peer, RecvStatus, RECV_BUFFER_SIZE};

/// Which side of the handshake this process plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Listens and accepts a single peer. Movement is free from the start.
    Host,
    /// Connects to the host. Movement starts locked.
    Client,
}

/// Session configuration.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// TCP port the host listens on and the client targets.
    pub port: u16,
    /// Numeric IPv4 address of the host (client role only).
    pub host_addr: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host_addr: "127.0.0.1".to_string(),
        }
    }
}

/// Host-side synchronizer.
pub struct HostSession {
    listener: Option<Listener>,
    peer: Option<Peer>,
    goal_reached: bool,
}

impl HostSession {
    /// Bind and listen.
    ///
    /// A bind failure leaves the session in a degraded mode that never finds
    /// a client; the host itself stays playable.
    pub fn bind(config: &SessionConfig) -> Self {
        let listener = match Listener::bind(config.port) {
            Ok(listener) => {
                info!(port = config.port, "host listening for a client");
                Some(listener)
            }
            Err(e) => {
                warn!(
                    port = config.port,
                    "bind failed, continuing without a peer link: {e}"
                );
                None
            }
        };
        Self {
            listener,
            peer: None,
            goal_reached: false,
        }
    }

    /// Actual bound port, when listening.
    pub fn local_port(&self) -> Option<u16> {
        self.listener
            .as_ref()
            .and_then(|listener| listener.local_addr().ok())
            .map(|addr| addr.port())
    }

    /// Whether a client is connected.
    pub fn peer_connected(&self) -> bool {
        self.peer.is_some()
    }

    /// Whether the goal action already fired.
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// Per-tick step.
    ///
    /// While no peer is recorded, polls the listener for a pending
    /// connection. On the first goal-proximity tick, sends the unlock
    /// message (when a peer exists) and latches `goal_reached`
    /// unconditionally so the action never fires twice.
    pub fn tick(&mut self, near_goal: bool, tint: [f32; 3]) {
        if self.peer.is_none() {
            if let Some(listener) = &self.listener {
                if let Some(peer) = listener.poll_accept() {
                    info!("client connected");
                    self.peer = Some(peer);
                }
            }
        }

        if near_goal && !self.goal_reached {
            if let Some(peer) = &self.peer {
                let message = protocol::encode_unlock(tint);
                if peer.send(message.as_bytes()) {
                    info!(%message, "goal reached, unlock sent to client");
                }
            } else {
                debug!("goal reached with no client connected, nothing to send");
            }
            self.goal_reached = true;
        }
    }
}

/// Client-side synchronizer.
pub struct ClientSession {
    peer: Option<Peer>,
    movement_locked: bool,
    goal_reached: bool,
    tint: [f32; 3],
}

impl ClientSession {
    /// Connect to the host.
    ///
    /// A connect failure is reported once and leaves the session permanently
    /// locked and disconnected; there is no automatic retry.
    pub async fn connect(config: &SessionConfig) -> Self {
        let peer = match Peer::connect(&config.host_addr, config.port).await {
            Ok(peer) => {
                info!(
                    addr = %config.host_addr,
                    port = config.port,
                    "connected to host"
                );
                Some(peer)
            }
            Err(e) => {
                warn!(
                    addr = %config.host_addr,
                    port = config.port,
                    "connect failed, movement stays locked: {e}"
                );
                None
            }
        };
        Self {
            peer,
            movement_locked: true,
            goal_reached: false,
            tint: DEFAULT_TINT,
        }
    }

    /// Whether movement is still gated on the host's unlock.
    pub fn movement_locked(&self) -> bool {
        self.movement_locked
    }

    /// Whether the goal action already fired.
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    /// Tint carried by the unlock message ([`DEFAULT_TINT`] until unlocked).
    pub fn tint(&self) -> [f32; 3] {
        self.tint
    }

    /// Per-tick step.
    ///
    /// While locked: readiness poll, receive, marker scan. The unlock is
    /// idempotent on the flag, so later unlock messages have no effect.
    /// Once unlocked the client's own goal proximity latches `goal_reached`;
    /// there is no further network exchange.
    pub fn tick(&mut self, near_goal: bool) {
        if self.movement_locked {
            self.poll_unlock();
            return;
        }

        if near_goal && !self.goal_reached {
            info!("goal reached");
            self.goal_reached = true;
        }
    }

    fn poll_unlock(&mut self) {
        let Some(peer) = &self.peer else { return };
        if !peer.poll_readable() {
            return;
        }

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        match peer.recv(&mut buf) {
            RecvStatus::Data(n) => {
                if let Some(tint) = protocol::parse_unlock(&buf[..n]) {
                    info!(?tint, "unlock received, movement enabled");
                    self.movement_locked = false;
                    self.tint = tint;
                }
            }
            // A closed socket reads the same as an idle one here: the
            // synchronizer does not distinguish peer shutdown from
            // "nothing available this tick".
            RecvStatus::Closed => debug!("peer closed the connection"),
            RecvStatus::Empty => {}
        }
    }
}

/// A role-dispatched session, as seen by the game loop.
pub enum Session {
    /// Host side.
    Host(HostSession),
    /// Client side.
    Client(ClientSession),
}

impl Session {
    /// Create a session for `role`.
    pub async fn establish(role: Role, config: &SessionConfig) -> Self {
        match role {
            Role::Host => Session::Host(HostSession::bind(config)),
            Role::Client => Session::Client(ClientSession::connect(config).await),
        }
    }

    /// Whether local movement is gated. Always free for the host.
    pub fn movement_locked(&self) -> bool {
        match self {
            Session::Host(_) => false,
            Session::Client(client) => client.movement_locked(),
        }
    }

    /// Whether the local goal action fired.
    pub fn goal_reached(&self) -> bool {
        match self {
            Session::Host(host) => host.goal_reached(),
            Session::Client(client) => client.goal_reached(),
        }
    }

    /// Per-tick step with this frame's proximity and display tint.
    pub fn tick(&mut self, near_goal: bool, tint: [f32; 3]) {
        match self {
            Session::Host(host) => host.tick(near_goal, tint),
            Session::Client(client) => client.tick(near_goal),
        }
    }
}
