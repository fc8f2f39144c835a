pub mod message_builder;
pub mod prober;
pub mod record_type_map;
pub mod response_parser;
pub mod transport;

pub use message_builder::MessageBuilder;
pub use prober::UdpProber;
pub use response_parser::{ParsedResponse, ResponseParser};
