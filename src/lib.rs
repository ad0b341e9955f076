//! Transport-layer packet demultiplexer for a user-space network stack.
//!
//! Once the network layer has parsed an inbound packet and resolved its
//! local/remote addresses and ports, [TransportDemuxer] finds the transport
//! endpoint (socket) the packet belongs to and hands it over. Lookups relax
//! the 4-tuple progressively, so a connected socket is preferred over one
//! listening on a specific address, which is preferred over one listening on
//! any address.
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//! use std::sync::Arc;
//!
//! use demux::config::DemuxConfig;
//! use demux::net::{EndpointId, NetworkProtocol, Route, TransportProtocol, VectorisedView};
//! use demux::stack::{ControlType, TransportDemuxer, TransportEndpoint};
//!
//! struct Echo;
//!
//! impl TransportEndpoint for Echo {
//!     fn handle_packet(&self, _: &Route, id: &EndpointId, payload: &VectorisedView) {
//!         println!("{id}: {} bytes", payload.size());
//!     }
//!
//!     fn handle_control_packet(&self, _: &EndpointId, _: ControlType, _: u32, _: &VectorisedView) {}
//! }
//!
//! let demux = TransportDemuxer::new(&DemuxConfig::default());
//! let local = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
//! let remote = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
//!
//! demux
//!     .register_endpoint(
//!         &[NetworkProtocol::IPV4],
//!         TransportProtocol::UDP,
//!         EndpointId::listening(Some(local), 53),
//!         Arc::new(Echo),
//!     )
//!     .unwrap();
//!
//! let route = Route::new(NetworkProtocol::IPV4, local, remote);
//! let id = EndpointId::new((local, 53), (remote, 9999));
//! let payload = VectorisedView::from(vec![0u8; 32]);
//!
//! assert!(demux.deliver_packet(&route, TransportProtocol::UDP, &payload, &id));
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

#[cfg(not(unix))]
compile_error!("This crate is only compatible with Unix systems (log timestamps use `localtime_r`).");

pub mod config;
pub mod error;
pub mod log;
pub mod net;
pub mod stack;

pub use config::DemuxConfig;
pub use error::{Error, Result};
pub use stack::TransportDemuxer;
