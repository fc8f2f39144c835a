use super::HarnessError;
use std::fmt;
use std::net::IpAddr;

/// Classified response code. Anything that is neither NOERROR nor
/// NXDOMAIN is carried through as `Other` with the raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    NameError,
    Other(u16),
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Success => write!(f, "NOERROR"),
            ResponseStatus::NameError => write!(f, "NXDOMAIN"),
            ResponseStatus::Other(code) => write!(f, "RCODE{}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerRecord {
    Address { addr: IpAddr, ttl: u32 },
    Text { values: Vec<String>, ttl: u32 },
}

impl AnswerRecord {
    pub fn ttl(&self) -> u32 {
        match self {
            AnswerRecord::Address { ttl, .. } => *ttl,
            AnswerRecord::Text { ttl, .. } => *ttl,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnswerRecord::Address { .. } => "address",
            AnswerRecord::Text { .. } => "text",
        }
    }
}

/// A decoded resolver response: status plus the answer section in wire
/// order. Owned by the caller that issued the probe; discarded after
/// evaluation.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: ResponseStatus,
    pub answers: Vec<AnswerRecord>,
}

impl ProbeResponse {
    pub fn new(status: ResponseStatus, answers: Vec<AnswerRecord>) -> Self {
        Self { status, answers }
    }

    /// Addresses from all address answers, in answer order. Empty when
    /// the response carried none.
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.answers
            .iter()
            .filter_map(|record| match record {
                AnswerRecord::Address { addr, .. } => Some(*addr),
                AnswerRecord::Text { .. } => None,
            })
            .collect()
    }

    pub fn ttl_of(&self, index: usize) -> Result<u32, HarnessError> {
        self.answers
            .get(index)
            .map(AnswerRecord::ttl)
            .ok_or(HarnessError::AnswerIndexOutOfBounds {
                index,
                count: self.answers.len(),
            })
    }

    pub fn text_of(&self, index: usize) -> Result<&[String], HarnessError> {
        let record = self
            .answers
            .get(index)
            .ok_or(HarnessError::AnswerIndexOutOfBounds {
                index,
                count: self.answers.len(),
            })?;

        match record {
            AnswerRecord::Text { values, .. } => Ok(values),
            other => Err(HarnessError::AnswerTypeMismatch {
                index,
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    /// NODATA: the name exists but has no records of the queried type.
    /// Distinct from NXDOMAIN, where the name does not exist at all.
    pub fn is_nodata(&self) -> bool {
        self.status == ResponseStatus::Success && self.answers.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.status == ResponseStatus::NameError
    }

    /// One-line summary for assertion messages.
    pub fn summary(&self) -> String {
        if self.answers.is_empty() {
            return format!("{} with no answers", self.status);
        }

        let rendered: Vec<String> = self
            .answers
            .iter()
            .map(|record| match record {
                AnswerRecord::Address { addr, ttl } => format!("{} (ttl {})", addr, ttl),
                AnswerRecord::Text { values, ttl } => format!("{:?} (ttl {})", values, ttl),
            })
            .collect();

        format!("{} [{}]", self.status, rendered.join(", "))
    }
}
