//! Bootstrap configuration for the transport demultiplexer.

use crate::log::Level;
use crate::net::{NetworkProtocol, TransportProtocol};

/// The protocols enabled on the stack.
///
/// One endpoint table is built for every (network, transport) pair in the
/// cross product of the enabled protocols; the set is fixed for the lifetime
/// of the demultiplexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemuxConfig {
    /// Enabled network protocols.
    pub network_protocols: Vec<NetworkProtocol>,
    /// Enabled transport protocols.
    pub transport_protocols: Vec<TransportProtocol>,
    /// Most verbose log level emitted.
    pub log_level: Level,
}

impl DemuxConfig {
    /// A configuration with no protocols enabled.
    pub fn empty() -> Self {
        Self {
            network_protocols: Vec::new(),
            transport_protocols: Vec::new(),
            log_level: Level::Info,
        }
    }

    /// Enables `proto` as a network protocol.
    pub fn with_network_protocol(mut self, proto: NetworkProtocol) -> Self {
        if !self.network_protocols.contains(&proto) {
            self.network_protocols.push(proto);
        }
        self
    }

    /// Enables `proto` as a transport protocol.
    pub fn with_transport_protocol(mut self, proto: TransportProtocol) -> Self {
        if !self.transport_protocols.contains(&proto) {
            self.transport_protocols.push(proto);
        }
        self
    }

    /// Sets the most verbose log level emitted.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }
}

impl Default for DemuxConfig {
    /// IPv4 and IPv6, each carrying TCP and UDP.
    fn default() -> Self {
        Self::empty()
            .with_network_protocol(NetworkProtocol::IPV4)
            .with_network_protocol(NetworkProtocol::IPV6)
            .with_transport_protocol(TransportProtocol::TCP)
            .with_transport_protocol(TransportProtocol::UDP)
    }
}
