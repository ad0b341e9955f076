//! Per protocol pair table of registered transport endpoints.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::net::EndpointId;
use crate::stack::endpoint::TransportEndpoint;
use crate::stack::gate::Gate;

/// A registered endpoint together with the gate guarding calls into it.
pub struct MappedEndpoint {
    ep: Arc<dyn TransportEndpoint>,
    gate: Gate,
}

impl MappedEndpoint {
    fn new(ep: Arc<dyn TransportEndpoint>) -> Self {
        Self {
            ep,
            gate: Gate::new(),
        }
    }

    /// The registered endpoint.
    pub fn endpoint(&self) -> &Arc<dyn TransportEndpoint> {
        &self.ep
    }

    /// The gate guarding calls into the endpoint.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }
}

impl fmt::Debug for MappedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedEndpoint")
            .field("ep", &Arc::as_ptr(&self.ep))
            .field("gate", &self.gate)
            .finish()
    }
}

/// Error returned by [TransportEndpoints::register] when the identifier is
/// already taken. The demultiplexer attaches the protocol pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Occupied;

/// All endpoints of a single (network, transport) protocol pair.
///
/// Each table has its own lock so that traffic of one protocol pair never
/// contends with another.
#[derive(Debug, Default)]
pub struct TransportEndpoints {
    endpoints: RwLock<HashMap<EndpointId, Arc<MappedEndpoint>>>,
}

impl TransportEndpoints {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<EndpointId, Arc<MappedEndpoint>>> {
        self.endpoints.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<EndpointId, Arc<MappedEndpoint>>> {
        self.endpoints.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `ep` under exactly `id` with a freshly opened gate.
    ///
    /// # Errors
    ///
    /// Returns [Occupied] if `id` is already registered, leaving the existing
    /// registration untouched.
    pub fn register(
        &self,
        id: EndpointId,
        ep: Arc<dyn TransportEndpoint>,
    ) -> Result<(), Occupied> {
        match self.write().entry(id) {
            Entry::Occupied(_) => Err(Occupied),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(MappedEndpoint::new(ep)));
                Ok(())
            }
        }
    }

    /// Removes the registration for exactly `id`, if any.
    ///
    /// The caller is responsible for closing the returned entry's gate once
    /// this call has returned, i.e. without the table lock held.
    pub fn unregister(&self, id: &EndpointId) -> Option<Arc<MappedEndpoint>> {
        self.write().remove(id)
    }

    /// Finds the endpoint that best matches `id`.
    ///
    /// Candidates are probed from most to least specific:
    ///
    /// 1. the identifier as given (a connected endpoint);
    /// 2. without the local address (bound to any local address, connected);
    /// 3. without the remote half (listening on one local address);
    /// 4. local port only (listening on any local address).
    ///
    /// The returned entry's gate has not been entered.
    pub fn find(&self, id: &EndpointId) -> Option<Arc<MappedEndpoint>> {
        let endpoints = self.read();

        let no_remote = id.without_remote();
        let candidates = [
            *id,
            id.without_local_addr(),
            no_remote,
            no_remote.without_local_addr(),
        ];

        let found = candidates
            .iter()
            .find_map(|candidate| endpoints.get(candidate))
            .cloned();
        found
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no endpoint is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{Route, VectorisedView};
    use crate::stack::endpoint::ControlType;
    use std::net::{IpAddr, Ipv4Addr};

    #[derive(Debug)]
    struct Nop;

    impl TransportEndpoint for Nop {
        fn handle_packet(&self, _: &Route, _: &EndpointId, _: &VectorisedView) {}
        fn handle_control_packet(
            &self,
            _: &EndpointId,
            _: ControlType,
            _: u32,
            _: &VectorisedView,
        ) {
        }
    }

    fn ip(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    fn ep() -> Arc<dyn TransportEndpoint> {
        Arc::new(Nop)
    }

    fn same(found: Option<Arc<MappedEndpoint>>, ep: &Arc<dyn TransportEndpoint>) -> bool {
        found.is_some_and(|m| Arc::ptr_eq(m.endpoint(), ep))
    }

    #[test]
    fn registry_rejects_duplicate_identifier() {
        let table = TransportEndpoints::new();
        let id = EndpointId::listening(None, 80);
        let first = ep();

        assert_eq!(table.register(id, Arc::clone(&first)), Ok(()));
        assert_eq!(table.register(id, ep()), Err(Occupied));

        assert_eq!(table.len(), 1);
        let packet = EndpointId::new((ip(1, 1, 1, 1), 80), (ip(2, 2, 2, 2), 9));
        assert!(same(table.find(&packet), &first));
    }

    #[test]
    fn registry_unregister_absent_is_noop() {
        let table = TransportEndpoints::new();
        assert!(table.unregister(&EndpointId::listening(None, 80)).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn registry_unregister_returns_entry_with_open_gate() {
        let table = TransportEndpoints::new();
        let id = EndpointId::listening(None, 80);
        table.register(id, ep()).unwrap();

        let removed = table.unregister(&id).unwrap();
        assert!(!removed.gate().is_closed());
        assert!(table.find(&id).is_none());

        removed.gate().close();
        assert!(removed.gate().is_closed());
    }

    #[test]
    fn registry_lookup_tiers() {
        let table = TransportEndpoints::new();
        let local = ip(10, 0, 0, 1);
        let remote = ip(8, 8, 8, 8);
        let packet = EndpointId::new((local, 53), (remote, 9999));

        let any_local_connected = ep();
        let listening_local = ep();
        let listening_any = ep();

        table
            .register(packet.without_local_addr(), Arc::clone(&any_local_connected))
            .unwrap();
        table
            .register(EndpointId::listening(Some(local), 53), Arc::clone(&listening_local))
            .unwrap();
        table
            .register(EndpointId::listening(None, 53), Arc::clone(&listening_any))
            .unwrap();

        assert!(same(table.find(&packet), &any_local_connected));

        table.unregister(&packet.without_local_addr());
        assert!(same(table.find(&packet), &listening_local));

        // A packet for another local address falls through to the wildcard.
        let other = EndpointId::new((ip(10, 0, 0, 2), 53), (remote, 9999));
        assert!(same(table.find(&other), &listening_any));

        // Nothing listens on another port.
        let miss = EndpointId::new((local, 54), (remote, 9999));
        assert!(table.find(&miss).is_none());
    }

    #[test]
    fn registry_local_wildcard_beats_remote_wildcard() {
        let table = TransportEndpoints::new();
        let packet = EndpointId::new((ip(10, 0, 0, 1), 53), (ip(8, 8, 8, 8), 9999));

        let listening = ep();
        let connected = ep();
        table
            .register(EndpointId::listening(Some(ip(10, 0, 0, 1)), 53), Arc::clone(&listening))
            .unwrap();
        table
            .register(packet.without_local_addr(), Arc::clone(&connected))
            .unwrap();

        assert!(same(table.find(&packet), &connected));
    }
}
