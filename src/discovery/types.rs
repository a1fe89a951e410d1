use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Address of a discovery group: an IPv4 group address plus UDP port.
///
/// The group address is usually multicast (e.g. `231.7.7.7`), but a subnet
/// broadcast or plain unicast address works too; the session adjusts its
/// socket options accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastEndpoint {
    pub group: Ipv4Addr,
    pub port: u16,
}

impl BroadcastEndpoint {
    pub fn new(group: Ipv4Addr, port: u16) -> Self {
        Self { group, port }
    }

    /// The address a broadcaster sends to.
    pub fn group_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.group, self.port))
    }
}

impl std::fmt::Display for BroadcastEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.group, self.port)
    }
}

/// Callback interface a discovery session delivers its events to.
///
/// Implementations must tolerate being called from the session's receive
/// task at any time between `start()` and `stop()`.
pub trait DiscoveryListener: Send + Sync {
    /// The set of distinct broadcasting peers changed; `count` is the new
    /// size of the connector set.
    fn connectors_changed(&self, count: usize);

    /// A broadcast datagram arrived on the session's socket.
    fn broadcast_received(&self);
}
