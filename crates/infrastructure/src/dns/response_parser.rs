use dnscheck_domain::{AnswerRecord, HarnessError, ProbeResponse, ResponseStatus};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;

/// A decoded response plus the transaction id it carried.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,
    pub response: ProbeResponse,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, HarnessError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            HarnessError::DecodeFailure(format!("Failed to parse DNS response: {}", e))
        })?;

        let status = Self::classify_rcode(message.response_code());

        let mut answers = Vec::new();
        for record in message.answers() {
            let ttl = record.ttl();
            let rtype = record.record_type();

            match record.data() {
                RData::A(a) => {
                    answers.push(AnswerRecord::Address {
                        addr: a.0.into(),
                        ttl,
                    });
                }
                RData::AAAA(aaaa) => {
                    answers.push(AnswerRecord::Address {
                        addr: aaaa.0.into(),
                        ttl,
                    });
                }
                RData::TXT(txt) => {
                    let values = txt
                        .txt_data()
                        .iter()
                        .map(|data| String::from_utf8_lossy(data).into_owned())
                        .collect();
                    answers.push(AnswerRecord::Text { values, ttl });
                }
                _ => {
                    debug!(rtype = %rtype, "skipping answer record");
                }
            }
        }

        debug!(
            status = %status,
            answers = answers.len(),
            "DNS response parsed"
        );

        Ok(ParsedResponse {
            id: message.id(),
            response: ProbeResponse::new(status, answers),
        })
    }

    fn classify_rcode(rcode: ResponseCode) -> ResponseStatus {
        match rcode {
            ResponseCode::NoError => ResponseStatus::Success,
            ResponseCode::NXDomain => ResponseStatus::NameError,
            other => ResponseStatus::Other(u16::from(other)),
        }
    }
}
