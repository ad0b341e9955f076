//! Demultiplexing of inbound packets to transport endpoints.
//!
//! Demultiplexing happens on two levels: first on the (network, transport)
//! protocol pair of the packet, then on its [EndpointId] within the table of
//! that pair.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::DemuxConfig;
use crate::net::{EndpointId, NetworkProtocol, Route, TransportProtocol, VectorisedView};
use crate::stack::endpoint::{ControlType, TransportEndpoint};
use crate::stack::gate::Admission;
use crate::stack::registry::{MappedEndpoint, TransportEndpoints};
use crate::{Error, Result, debug, log};

/// Key of a single endpoint table.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct ProtocolIds {
    /// The network protocol.
    pub network: NetworkProtocol,
    /// The transport protocol.
    pub transport: TransportProtocol,
}

impl ProtocolIds {
    /// Creates a key for the given protocol pair.
    pub fn new(network: NetworkProtocol, transport: TransportProtocol) -> Self {
        Self { network, transport }
    }
}

/// Routes packets parsed by the network layer to the transport endpoint they
/// are addressed to.
///
/// The set of protocol pairs is fixed at construction, so looking up the table
/// of a pair takes no lock; only the table itself is locked, and only for the
/// duration of a lookup or mutation. Endpoints are invoked and gates are closed
/// without any table lock held.
#[derive(Debug)]
pub struct TransportDemuxer {
    protocol: HashMap<ProtocolIds, TransportEndpoints>,
}

impl TransportDemuxer {
    /// Creates a demultiplexer with one endpoint table per (network,
    /// transport) pair enabled in `config`.
    pub fn new(config: &DemuxConfig) -> Self {
        log::set_max_level(config.log_level);

        let mut protocol = HashMap::new();
        for &network in &config.network_protocols {
            for &transport in &config.transport_protocols {
                protocol.insert(ProtocolIds::new(network, transport), TransportEndpoints::new());
            }
        }

        debug!("transport demuxer created with {} protocol pairs", protocol.len());

        Self { protocol }
    }

    fn endpoints(
        &self,
        network: NetworkProtocol,
        transport: TransportProtocol,
    ) -> Option<&TransportEndpoints> {
        self.protocol.get(&ProtocolIds::new(network, transport))
    }

    /// Returns `true` if a table exists for the protocol pair.
    pub fn has_protocol(&self, network: NetworkProtocol, transport: TransportProtocol) -> bool {
        self.endpoints(network, transport).is_some()
    }

    /// Number of endpoints registered for the protocol pair, or `None` if the
    /// pair is not enabled.
    pub fn endpoint_count(
        &self,
        network: NetworkProtocol,
        transport: TransportProtocol,
    ) -> Option<usize> {
        self.endpoints(network, transport).map(TransportEndpoints::len)
    }

    /// Registers `ep` so that packets matching `id` on any of `net_protos`
    /// are delivered to it.
    ///
    /// Network protocols without a table are skipped. Registration is all or
    /// nothing: if any protocol fails, the protocols already registered by
    /// this call are unregistered again.
    ///
    /// # Errors
    ///
    /// Returns [Error::AddressInUse] if `id` is already registered for one of
    /// the protocol pairs.
    pub fn register_endpoint(
        &self,
        net_protos: &[NetworkProtocol],
        trans_proto: TransportProtocol,
        id: EndpointId,
        ep: Arc<dyn TransportEndpoint>,
    ) -> Result<()> {
        for (i, &net_proto) in net_protos.iter().enumerate() {
            if let Err(err) = self.single_register_endpoint(net_proto, trans_proto, id, &ep) {
                debug!("{err}, rolling back {i} earlier registrations");
                self.unregister_endpoint(&net_protos[..i], trans_proto, &id);
                return Err(err);
            }
        }

        debug!("registered {trans_proto} endpoint {id}");

        Ok(())
    }

    fn single_register_endpoint(
        &self,
        net_proto: NetworkProtocol,
        trans_proto: TransportProtocol,
        id: EndpointId,
        ep: &Arc<dyn TransportEndpoint>,
    ) -> Result<()> {
        let Some(eps) = self.endpoints(net_proto, trans_proto) else {
            return Ok(());
        };

        eps.register(id, Arc::clone(ep))
            .map_err(|_| Error::AddressInUse {
                net_proto,
                trans_proto,
                id,
            })
    }

    /// Unregisters the endpoint registered under exactly `id` on each of
    /// `net_protos`, so that it receives no more packets.
    ///
    /// Blocks until every delivery to the endpoint that is already in flight
    /// has completed; once this returns the demultiplexer no longer touches
    /// the endpoint. Protocols on which `id` is not registered are ignored.
    pub fn unregister_endpoint(
        &self,
        net_protos: &[NetworkProtocol],
        trans_proto: TransportProtocol,
        id: &EndpointId,
    ) {
        for &net_proto in net_protos {
            let Some(eps) = self.endpoints(net_proto, trans_proto) else {
                continue;
            };

            // The table lock is released before waiting on the gate.
            if let Some(mapped) = eps.unregister(id) {
                mapped.gate().close();
                debug!("unregistered {trans_proto}/{net_proto} endpoint {id}");
            }
        }
    }

    fn find_endpoint(
        &self,
        network: NetworkProtocol,
        transport: TransportProtocol,
        id: &EndpointId,
    ) -> Option<Arc<MappedEndpoint>> {
        self.endpoints(network, transport)?.find(id)
    }

    /// Delivers a packet to the endpoint best matching `id`.
    ///
    /// Returns `false` if the protocol pair is not enabled, no endpoint
    /// matches, or the matching endpoint is being unregistered.
    pub fn deliver_packet(
        &self,
        route: &Route,
        trans_proto: TransportProtocol,
        payload: &VectorisedView,
        id: &EndpointId,
    ) -> bool {
        let Some(mapped) = self.find_endpoint(route.net_proto, trans_proto, id) else {
            return false;
        };

        let Some(_admission) = Admission::new(mapped.gate()) else {
            return false;
        };

        mapped.endpoint().handle_packet(route, id, payload);

        true
    }

    /// Delivers a control packet to the endpoint best matching `id`.
    ///
    /// Returns `false` under the same conditions as
    /// [TransportDemuxer::deliver_packet].
    pub fn deliver_control_packet(
        &self,
        net_proto: NetworkProtocol,
        trans_proto: TransportProtocol,
        typ: ControlType,
        extra: u32,
        payload: &VectorisedView,
        id: &EndpointId,
    ) -> bool {
        let Some(mapped) = self.find_endpoint(net_proto, trans_proto, id) else {
            return false;
        };

        let Some(_admission) = Admission::new(mapped.gate()) else {
            return false;
        };

        mapped
            .endpoint()
            .handle_control_packet(id, typ, extra, payload);

        true
    }
}
