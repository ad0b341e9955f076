//! Route descriptors handed down by the network layer.

use std::net::IpAddr;

use crate::net::NetworkProtocol;

/// The route an inbound packet arrived on, as resolved by the network layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Route {
    /// Network protocol the packet was received with.
    pub net_proto: NetworkProtocol,
    /// Local address the packet was addressed to.
    pub local_addr: Option<IpAddr>,
    /// Remote address the packet came from.
    pub remote_addr: Option<IpAddr>,
    /// Next hop for replies, if it differs from `remote_addr`.
    pub next_hop: Option<IpAddr>,
}

impl Route {
    /// Creates a route for `net_proto` between the given addresses.
    pub fn new(net_proto: NetworkProtocol, local_addr: IpAddr, remote_addr: IpAddr) -> Self {
        Self {
            net_proto,
            local_addr: Some(local_addr),
            remote_addr: Some(remote_addr),
            next_hop: None,
        }
    }

    /// Creates a route that only carries the network protocol.
    pub fn for_protocol(net_proto: NetworkProtocol) -> Self {
        Self {
            net_proto,
            local_addr: None,
            remote_addr: None,
            next_hop: None,
        }
    }
}
