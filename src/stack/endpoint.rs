//! The capability transport protocols implement to receive packets.

use crate::net::{EndpointId, Route, VectorisedView};

/// Kind of out-of-band signal carried by a control packet (e.g. an ICMP
/// destination unreachable message) addressed to a transport endpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlType {
    /// The packet was too large for the path. `extra` carries the suggested
    /// path MTU.
    PacketTooBig,
    /// The remote port is unreachable.
    PortUnreachable,
    /// Any other control message.
    Unknown,
}

/// A transport endpoint (socket) that inbound packets can be delivered to.
///
/// Implementations are shared between their owner and the demultiplexer for as
/// long as they are registered, and may be invoked from many threads at once
/// with no ordering between concurrent calls.
pub trait TransportEndpoint: Send + Sync {
    /// Handles a data packet addressed to this endpoint.
    fn handle_packet(&self, route: &Route, id: &EndpointId, payload: &VectorisedView);

    /// Handles a control packet addressed to this endpoint. `extra` is a
    /// protocol specific auxiliary value, such as the MTU for
    /// [ControlType::PacketTooBig].
    fn handle_control_packet(
        &self,
        id: &EndpointId,
        typ: ControlType,
        extra: u32,
        payload: &VectorisedView,
    );
}
