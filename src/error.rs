//! Error types for transport endpoint registration.

use std::{error, fmt, result};

use crate::net::{EndpointId, NetworkProtocol, TransportProtocol};

/// A convenience wrapper around `Result` for [crate::Error].
pub type Result<T> = result::Result<T, Error>;

/// Represents errors that can occur while managing transport endpoints.
///
/// Packet delivery never fails with an error; a packet nobody wants is
/// reported as not delivered instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The identifier is already registered for the protocol pair.
    AddressInUse {
        /// Network protocol whose table already holds the identifier.
        net_proto: NetworkProtocol,
        /// Transport protocol of the table.
        trans_proto: TransportProtocol,
        /// The identifier that was requested.
        id: EndpointId,
    },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::AddressInUse {
                net_proto,
                trans_proto,
                ref id,
            } => {
                write!(
                    f,
                    "address in use: {trans_proto}/{net_proto} endpoint {id} is already registered"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn address_in_use_display() {
        let err = Error::AddressInUse {
            net_proto: NetworkProtocol::IPV4,
            trans_proto: TransportProtocol::UDP,
            id: EndpointId::listening(Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))), 53),
        };

        assert_eq!(
            err.to_string(),
            "address in use: UDP/IPv4 endpoint 10.0.0.1:53 -> *:* is already registered"
        );
    }
}
