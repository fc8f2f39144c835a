//! DNS query construction
//!
//! Builds wire-format query messages with `hickory-proto`. Every call
//! produces a fresh transaction identifier so responses can be
//! correlated even when concurrent scenarios share one resolver.

use super::record_type_map::RecordTypeMapper;
use dnscheck_domain::{HarnessError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a query for `domain`/`record_type` and serialize it.
    /// Returns the transaction id alongside the wire bytes so the
    /// caller can match the response against the request.
    pub fn build_query(
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), HarnessError> {
        let name = Name::from_str(domain).map_err(|e| {
            HarnessError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(hickory_proto::rr::DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, HarnessError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            HarnessError::DecodeFailure(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
