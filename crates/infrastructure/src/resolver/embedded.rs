//! In-process resolver the harness runs against when no external
//! resolver is wired in. Serves the namespaced record store over one
//! UDP socket and doubles as the definition-apply, readiness and
//! namespace collaborators.

use super::store::{LookupOutcome, RecordStore, StoredData, StoredSet};
use crate::dns::record_type_map::RecordTypeMapper;
use async_trait::async_trait;
use dnscheck_application::ports::{DefinitionApplier, NamespaceProvisioner, ReadinessWaiter};
use dnscheck_domain::{DefinitionSet, HarnessError};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, TXT};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// A reply too short to decode; what a poisoned name answers with so
/// the client sees a protocol failure instead of clean data.
const UNSERVABLE_REPLY: [u8; 2] = [0xde, 0xad];

pub struct EmbeddedResolver {
    addr: SocketAddr,
    store: Arc<RecordStore>,
    shutdown_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl EmbeddedResolver {
    /// Bind `bind` (port 0 for an ephemeral port) and start serving.
    /// The socket is bound before this returns, so the resolver is
    /// ready as soon as the caller holds it.
    pub async fn start(bind: SocketAddr) -> Result<Self, HarnessError> {
        let socket = UdpSocket::bind(bind).await.map_err(|e| {
            HarnessError::TransportUnreachable {
                server: bind.to_string(),
                detail: format!("failed to bind resolver socket: {}", e),
            }
        })?;
        let addr = socket.local_addr().map_err(|e| {
            HarnessError::TransportUnreachable {
                server: bind.to_string(),
                detail: format!("failed to read local address: {}", e),
            }
        })?;

        let store = Arc::new(RecordStore::new());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let serve_store = Arc::clone(&store);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        match result {
                            Ok((len, peer)) => {
                                if let Some(reply) = handle_query(&serve_store, &buf[..len]) {
                                    if let Err(e) = socket.send_to(&reply, peer).await {
                                        warn!(peer = %peer, error = %e, "failed to send reply");
                                    }
                                }
                            }
                            Err(e) => {
                                warn!(error = %e, "recv failed");
                            }
                        }
                    }
                }
            }
            debug!("embedded resolver stopped");
        });

        info!(addr = %addr, "embedded resolver listening");

        Ok(Self {
            addr,
            store,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for EmbeddedResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn handle_query(store: &RecordStore, bytes: &[u8]) -> Option<Vec<u8>> {
    let request = match Message::from_vec(bytes) {
        Ok(message) => message,
        Err(e) => {
            debug!(error = %e, "dropping undecodable query");
            return None;
        }
    };
    let query = request.queries().first()?.clone();
    let name = query.name().to_utf8();

    let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(request.recursion_desired());
    response.set_authoritative(true);
    response.add_query(query.clone());

    match RecordTypeMapper::from_hickory(query.query_type()) {
        None => {
            response.set_response_code(ResponseCode::NotImp);
        }
        Some(record_type) => match store.lookup(&name, record_type) {
            LookupOutcome::Poisoned => {
                warn!(name = %name, "query for unservable name");
                return Some(UNSERVABLE_REPLY.to_vec());
            }
            LookupOutcome::Records(set) => {
                for record in build_answers(query.name().clone(), &set) {
                    response.add_answer(record);
                }
            }
            LookupOutcome::NoData => {}
            LookupOutcome::NameError => {
                response.set_response_code(ResponseCode::NXDomain);
            }
        },
    }

    serialize(&response)
}

fn build_answers(name: Name, set: &StoredSet) -> Vec<Record> {
    match &set.data {
        StoredData::Addresses(addrs) => addrs
            .iter()
            .map(|addr| {
                let rdata = match addr {
                    IpAddr::V4(v4) => RData::A(A(*v4)),
                    IpAddr::V6(v6) => RData::AAAA(AAAA(*v6)),
                };
                Record::from_rdata(name.clone(), set.ttl, rdata)
            })
            .collect(),
        StoredData::Texts(values) => {
            vec![Record::from_rdata(
                name,
                set.ttl,
                RData::TXT(TXT::new(values.clone())),
            )]
        }
    }
}

fn serialize(message: &Message) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    match message.emit(&mut encoder) {
        Ok(_) => Some(buf),
        Err(e) => {
            warn!(error = %e, "failed to serialize reply");
            None
        }
    }
}

#[async_trait]
impl DefinitionApplier for EmbeddedResolver {
    async fn apply(&self, namespace: &str, set: &DefinitionSet) -> Result<(), HarnessError> {
        self.store.apply_document(namespace, set)?;
        info!(
            namespace = %namespace,
            set = %set.name,
            records = set.records.len(),
            "definition admitted"
        );
        Ok(())
    }

    async fn remove(&self, namespace: &str, set_name: &str) -> Result<(), HarnessError> {
        self.store.remove_document(namespace, set_name)?;
        info!(namespace = %namespace, set = %set_name, "definition removed");
        Ok(())
    }
}

#[async_trait]
impl ReadinessWaiter for EmbeddedResolver {
    /// The embedded resolver is a single replica and is serving as soon
    /// as `start` returns. Asking for more replicas can never be
    /// satisfied, so it times out within the bound instead of hanging.
    async fn wait_ready(
        &self,
        selector: &str,
        replicas: usize,
        timeout: Duration,
    ) -> Result<(), HarnessError> {
        if replicas <= 1 {
            debug!(selector = %selector, "resolver ready");
            return Ok(());
        }
        tokio::time::sleep(timeout).await;
        Err(HarnessError::ReadinessTimeout {
            selector: selector.to_string(),
            expected: replicas,
        })
    }
}

#[async_trait]
impl NamespaceProvisioner for EmbeddedResolver {
    async fn create(&self, namespace: &str) -> Result<(), HarnessError> {
        self.store.create_namespace(namespace)?;
        info!(namespace = %namespace, "namespace created");
        Ok(())
    }

    async fn delete(&self, namespace: &str) -> Result<(), HarnessError> {
        self.store.remove_namespace(namespace)?;
        info!(namespace = %namespace, "namespace deleted");
        Ok(())
    }
}
