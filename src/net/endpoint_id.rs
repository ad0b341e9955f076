//! Identifying transport endpoints by their local and remote halves.

use std::fmt;
use std::net::IpAddr;

/// Port value meaning "unset".
pub const ANY_PORT: u16 = 0;

/// Unique transport endpoint, identified by its local and remote address and
/// port.
///
/// An unset address is `None` and an unset port is [ANY_PORT]. A listening or
/// unconnected endpoint registers with its remote half unset; a connected one
/// registers the full 4-tuple. Identifiers are always compared exactly, the
/// wildcard relaxation only happens during lookup.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct EndpointId {
    /// The local port.
    pub local_port: u16,
    /// The local address, `None` if bound to any local address.
    pub local_addr: Option<IpAddr>,
    /// The remote port, [ANY_PORT] if unconnected.
    pub remote_port: u16,
    /// The remote address, `None` if unconnected.
    pub remote_addr: Option<IpAddr>,
}

impl EndpointId {
    /// Creates a fully specified identifier from (local address, local port)
    /// and (remote address, remote port) pairs.
    pub fn new(local: (IpAddr, u16), remote: (IpAddr, u16)) -> Self {
        Self {
            local_port: local.1,
            local_addr: Some(local.0),
            remote_port: remote.1,
            remote_addr: Some(remote.0),
        }
    }

    /// Creates an identifier for an endpoint listening on `port` at
    /// `local_addr` (or any local address if `None`), accepting any peer.
    pub fn listening(local_addr: Option<IpAddr>, port: u16) -> Self {
        Self {
            local_port: port,
            local_addr,
            remote_port: ANY_PORT,
            remote_addr: None,
        }
    }

    /// Returns a copy with the local address cleared.
    pub fn without_local_addr(mut self) -> Self {
        self.local_addr = None;
        self
    }

    /// Returns a copy with the remote address and port cleared.
    pub fn without_remote(mut self) -> Self {
        self.remote_addr = None;
        self.remote_port = ANY_PORT;
        self
    }

    /// Returns `true` if the remote half is unset.
    pub fn is_unconnected(&self) -> bool {
        self.remote_addr.is_none() && self.remote_port == ANY_PORT
    }
}

struct Half(Option<IpAddr>, u16);

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(IpAddr::V4(addr)) => write!(f, "{addr}")?,
            Some(IpAddr::V6(addr)) => write!(f, "[{addr}]")?,
            None => write!(f, "*")?,
        }

        match self.1 {
            ANY_PORT => write!(f, ":*"),
            port => write!(f, ":{port}"),
        }
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            Half(self.local_addr, self.local_port),
            Half(self.remote_addr, self.remote_port)
        )
    }
}
