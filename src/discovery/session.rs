use super::types::{BroadcastEndpoint, DiscoveryListener};

use anyhow::{Context, Result};
use dashmap::DashMap;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A live UDP listening context on a discovery group.
///
/// A session is owned by exactly one passive listener or one active probe,
/// never shared. Passive listeners keep theirs for the process lifetime;
/// probes open a fresh one every cycle and stop it unconditionally at the
/// end of the cycle.
pub struct DiscoverySession {
    id: Uuid,
    name: String,
    endpoint: BroadcastEndpoint,
    inner: Arc<SessionInner>,
    receiver: Mutex<Option<JoinHandle<()>>>,
    stopped: AtomicBool,
}

/// State shared between the session handle and its receive task.
struct SessionInner {
    name: String,
    session_timeout: Duration,
    listeners: Mutex<Vec<Arc<dyn DiscoveryListener>>>,
    /// Distinct broadcasting peers, keyed by source address, valued by the
    /// instant the peer was last heard from.
    connectors: DashMap<SocketAddr, Instant>,
    /// Flips to true once the first datagram arrives and never flips back.
    received: watch::Sender<bool>,
}

impl DiscoverySession {
    pub fn new(name: impl Into<String>, endpoint: BroadcastEndpoint, session_timeout: Duration) -> Self {
        let name = name.into();
        let (received, _) = watch::channel(false);
        Self {
            id: Uuid::new_v4(),
            name: name.clone(),
            endpoint,
            inner: Arc::new(SessionInner {
                name,
                session_timeout,
                listeners: Mutex::new(Vec::new()),
                connectors: DashMap::new(),
                received,
            }),
            receiver: Mutex::new(None),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Subscribes a listener to this session's events. Listeners registered
    /// after `start()` only see events from that point on.
    pub fn register_listener(&self, listener: Arc<dyn DiscoveryListener>) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(listener);
    }

    /// Opens the UDP socket and spawns the receive task.
    pub async fn start(&self) -> Result<()> {
        let mut receiver = self.receiver.lock().unwrap_or_else(|e| e.into_inner());
        if receiver.is_some() {
            anyhow::bail!("session {} already started", self.name);
        }

        let socket = bind_group_socket(&self.endpoint)
            .with_context(|| format!("session {} failed to bind {}", self.name, self.endpoint))?;
        let socket = UdpSocket::from_std(socket)
            .with_context(|| format!("session {} failed to register socket", self.name))?;

        tracing::debug!(
            "Session {} ({}) listening on discovery group {}",
            self.name,
            self.id,
            self.endpoint
        );

        let inner = self.inner.clone();
        *receiver = Some(tokio::spawn(inner.receive_loop(socket)));

        Ok(())
    }

    /// Blocks up to `timeout` until at least one broadcast has been received
    /// on this session. Resolves immediately when one already arrived.
    pub async fn wait_for_broadcast(&self, timeout: Duration) -> bool {
        let mut received = self.inner.received.subscribe();
        matches!(
            tokio::time::timeout(timeout, received.wait_for(|received| *received)).await,
            Ok(Ok(_))
        )
    }

    /// Number of distinct peers currently in the connector set.
    pub fn connector_count(&self) -> usize {
        self.inner.connectors.len()
    }

    /// Tears the session down. Idempotent, and a no-op on a session that was
    /// never started, so cleanup paths can call it unconditionally.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        let receiver = self
            .receiver
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(receiver) = receiver {
            receiver.abort();
            tracing::debug!("Session {} ({}) stopped", self.name, self.id);
        }
    }
}

impl SessionInner {
    async fn receive_loop(self: Arc<Self>, socket: UdpSocket) {
        let mut buf = vec![0u8; 65536];

        loop {
            match socket.recv_from(&mut buf).await {
                Ok((_len, src)) => self.on_datagram(src),
                Err(e) => {
                    tracing::error!("Session {}: failed to receive UDP packet: {}", self.name, e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Payload contents are deliberately ignored; only the fact of arrival
    /// and the source address matter to the harness.
    fn on_datagram(&self, src: SocketAddr) {
        let now = Instant::now();

        let mut changed = self.connectors.insert(src, now).is_none();
        self.connectors.retain(|_, last_heard| {
            if now.duration_since(*last_heard) > self.session_timeout {
                changed = true;
                false
            } else {
                true
            }
        });

        let listeners: Vec<Arc<dyn DiscoveryListener>> = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        if changed {
            let count = self.connectors.len();
            for listener in &listeners {
                listener.connectors_changed(count);
            }
        }

        for listener in &listeners {
            listener.broadcast_received();
        }

        self.received.send_replace(true);
    }
}

/// Builds the shared-port UDP socket for a discovery group.
///
/// Address and port reuse are required: every listener and probe in the
/// process binds the same group port.
fn bind_group_socket(endpoint: &BroadcastEndpoint) -> Result<std::net::UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, endpoint.port));
    socket.bind(&bind_addr.into())?;

    let socket: std::net::UdpSocket = socket.into();
    if endpoint.group.is_multicast() {
        socket.join_multicast_v4(&endpoint.group, &Ipv4Addr::UNSPECIFIED)?;
    } else {
        socket.set_broadcast(true)?;
    }
    socket.set_nonblocking(true)?;

    Ok(socket)
}
