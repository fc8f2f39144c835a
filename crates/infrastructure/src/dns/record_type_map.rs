use dnscheck_domain::RecordType;

/// Maps between the domain record kinds and hickory wire types.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> hickory_proto::rr::RecordType {
        match record_type {
            RecordType::A => hickory_proto::rr::RecordType::A,
            RecordType::AAAA => hickory_proto::rr::RecordType::AAAA,
            RecordType::TXT => hickory_proto::rr::RecordType::TXT,
        }
    }

    /// `None` for wire types the harness does not serve or assert on.
    pub fn from_hickory(record_type: hickory_proto::rr::RecordType) -> Option<RecordType> {
        match record_type {
            hickory_proto::rr::RecordType::A => Some(RecordType::A),
            hickory_proto::rr::RecordType::AAAA => Some(RecordType::AAAA),
            hickory_proto::rr::RecordType::TXT => Some(RecordType::TXT),
            _ => None,
        }
    }
}
