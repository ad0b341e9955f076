//! Values the network layer hands to the transport demultiplexer.
//!
//! This module provides the protocol numbers, endpoint identifiers, routes and
//! payload views exchanged across the network/transport boundary.

mod buffer;
mod endpoint_id;
mod protocol;
mod route;

pub use buffer::VectorisedView;
pub use endpoint_id::{ANY_PORT, EndpointId};
pub use protocol::{NetworkProtocol, TransportProtocol};
pub use route::Route;
