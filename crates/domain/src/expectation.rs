use super::{HarnessError, ProbeResponse, ResponseStatus};
use std::net::IpAddr;

/// What a scenario author expects from one lookup. Exists only for the
/// duration of a single assertion.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// The lookup must fail at the transport or protocol level.
    Failure,
    /// The lookup must return a response matching every set predicate.
    Response(ResponseExpectation),
}

#[derive(Debug, Clone, Default)]
pub struct ResponseExpectation {
    pub status: Option<ResponseStatus>,
    pub contains_addresses: Vec<IpAddr>,
    pub excludes_addresses: Vec<IpAddr>,
    pub answer_count: Option<usize>,
    /// TTL of the first answer.
    pub ttl: Option<u32>,
    /// Text payload of the first answer.
    pub text: Option<Vec<String>>,
}

impl ResponseExpectation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ResponseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn containing_address(mut self, addr: IpAddr) -> Self {
        self.contains_addresses.push(addr);
        self
    }

    pub fn excluding_address(mut self, addr: IpAddr) -> Self {
        self.excludes_addresses.push(addr);
        self
    }

    pub fn with_answer_count(mut self, count: usize) -> Self {
        self.answer_count = Some(count);
        self
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_text(mut self, values: Vec<String>) -> Self {
        self.text = Some(values);
        self
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status {}", status));
        }
        for addr in &self.contains_addresses {
            parts.push(format!("answers contain {}", addr));
        }
        for addr in &self.excludes_addresses {
            parts.push(format!("answers exclude {}", addr));
        }
        if let Some(count) = self.answer_count {
            parts.push(format!("{} answers", count));
        }
        if let Some(ttl) = self.ttl {
            parts.push(format!("ttl {}", ttl));
        }
        if let Some(text) = &self.text {
            parts.push(format!("text {:?}", text));
        }
        if parts.is_empty() {
            parts.push("any response".to_string());
        }
        parts.join(", ")
    }
}

impl Expectation {
    pub fn failure() -> Self {
        Expectation::Failure
    }

    pub fn response(expectation: ResponseExpectation) -> Self {
        Expectation::Response(expectation)
    }

    /// Evaluate one observed outcome. On mismatch the returned
    /// `AssertionFailed` carries the queried name plus expected and
    /// actual renderings.
    pub fn check(
        &self,
        name: &str,
        outcome: &Result<ProbeResponse, HarnessError>,
    ) -> Result<(), HarnessError> {
        match (self, outcome) {
            (Expectation::Failure, Err(error)) if error.is_transport_failure() => Ok(()),
            (Expectation::Failure, Err(error)) => Err(HarnessError::AssertionFailed {
                name: name.to_string(),
                expected: "transport or protocol failure".to_string(),
                actual: format!("non-transport error: {}", error),
            }),
            (Expectation::Failure, Ok(response)) => Err(HarnessError::AssertionFailed {
                name: name.to_string(),
                expected: "transport or protocol failure".to_string(),
                actual: response.summary(),
            }),
            (Expectation::Response(expected), Err(error)) => {
                Err(HarnessError::AssertionFailed {
                    name: name.to_string(),
                    expected: expected.describe(),
                    actual: format!("lookup error: {}", error),
                })
            }
            (Expectation::Response(expected), Ok(response)) => {
                Self::check_response(name, expected, response)
            }
        }
    }

    fn check_response(
        name: &str,
        expected: &ResponseExpectation,
        response: &ProbeResponse,
    ) -> Result<(), HarnessError> {
        let fail = |what: String| {
            Err(HarnessError::AssertionFailed {
                name: name.to_string(),
                expected: what,
                actual: response.summary(),
            })
        };

        if let Some(status) = expected.status {
            if response.status != status {
                return fail(format!("status {}", status));
            }
        }

        let addresses = response.addresses();
        for addr in &expected.contains_addresses {
            if !addresses.contains(addr) {
                return fail(format!("answers contain {}", addr));
            }
        }
        for addr in &expected.excludes_addresses {
            if addresses.contains(addr) {
                return fail(format!("answers exclude {}", addr));
            }
        }

        if let Some(count) = expected.answer_count {
            if response.answers.len() != count {
                return fail(format!("{} answers", count));
            }
        }

        if let Some(ttl) = expected.ttl {
            let actual = response.ttl_of(0)?;
            if actual != ttl {
                return fail(format!("ttl {}", ttl));
            }
        }

        if let Some(text) = &expected.text {
            let actual = response.text_of(0)?;
            if actual != text.as_slice() {
                return fail(format!("text {:?}", text));
            }
        }

        Ok(())
    }
}
