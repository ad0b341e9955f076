//! Network and transport protocol numbers used to key the demultiplexer.

use std::fmt;

/// Number identifying a network-layer protocol (an [EtherType]).
///
/// [EtherType]: https://en.wikipedia.org/wiki/EtherType
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NetworkProtocol(pub u16);

impl NetworkProtocol {
    /// Internet Protocol version 4 (RFC 791).
    pub const IPV4: NetworkProtocol = NetworkProtocol(0x0800);
    /// Internet Protocol version 6 (RFC 8200).
    pub const IPV6: NetworkProtocol = NetworkProtocol(0x86dd);
}

impl fmt::Display for NetworkProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NetworkProtocol::IPV4 => write!(f, "IPv4"),
            NetworkProtocol::IPV6 => write!(f, "IPv6"),
            NetworkProtocol(other) => write!(f, "net:{other:#06x}"),
        }
    }
}

/// Number identifying a transport-layer protocol (the IPv4 `protocol` or IPv6
/// `next header` field).
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransportProtocol(pub u8);

impl TransportProtocol {
    /// Internet Control Message Protocol (RFC 792).
    pub const ICMPV4: TransportProtocol = TransportProtocol(1);
    /// Transmission Control Protocol (RFC 793).
    pub const TCP: TransportProtocol = TransportProtocol(6);
    /// User Datagram Protocol (RFC 768).
    pub const UDP: TransportProtocol = TransportProtocol(17);
    /// Internet Control Message Protocol for IPv6 (RFC 4443).
    pub const ICMPV6: TransportProtocol = TransportProtocol(58);
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TransportProtocol::ICMPV4 => write!(f, "ICMP"),
            TransportProtocol::TCP => write!(f, "TCP"),
            TransportProtocol::UDP => write!(f, "UDP"),
            TransportProtocol::ICMPV6 => write!(f, "ICMPv6"),
            TransportProtocol(other) => write!(f, "proto:{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_display() {
        assert_eq!(NetworkProtocol::IPV4.to_string(), "IPv4");
        assert_eq!(NetworkProtocol::IPV6.to_string(), "IPv6");
        assert_eq!(NetworkProtocol(0x0806).to_string(), "net:0x0806");
        assert_eq!(TransportProtocol::UDP.to_string(), "UDP");
        assert_eq!(TransportProtocol(132).to_string(), "proto:132");
    }
}
