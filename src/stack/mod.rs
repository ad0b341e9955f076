//! The transport demultiplexer and the pieces it is built from.
//!
//! Inbound packets are routed by [TransportDemuxer] to the
//! [TransportEndpoint] registered for them. Each registration is guarded by a
//! [Gate] so that unregistering an endpoint waits out deliveries already in
//! flight.

pub mod demuxer;
pub mod endpoint;
pub mod gate;
pub mod registry;

pub use demuxer::{ProtocolIds, TransportDemuxer};
pub use endpoint::{ControlType, TransportEndpoint};
pub use gate::Gate;
pub use registry::{MappedEndpoint, TransportEndpoints};
