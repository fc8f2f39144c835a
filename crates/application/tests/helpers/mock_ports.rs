#![allow(dead_code)]
use async_trait::async_trait;
use dnscheck_application::ports::{
    DefinitionApplier, DnsProber, NamespaceProvisioner, ReadinessWaiter,
};
use dnscheck_domain::{
    DefinitionSet, HarnessError, ProbeQuery, ProbeResponse, ResponseStatus,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted prober: outcomes are queued per domain and popped in order;
/// the last queued outcome is sticky. Unknown domains answer NXDOMAIN.
#[derive(Default)]
pub struct MockProber {
    responses: Mutex<HashMap<String, VecDeque<Result<ProbeResponse, HarnessError>>>>,
    log: Mutex<Vec<String>>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, domain: &str, outcome: Result<ProbeResponse, HarnessError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn probe_count(&self, domain: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.as_str() == domain)
            .count()
    }
}

#[async_trait]
impl DnsProber for MockProber {
    async fn probe(&self, query: &ProbeQuery) -> Result<ProbeResponse, HarnessError> {
        self.log.lock().unwrap().push(query.domain.to_string());

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(query.domain.as_ref()) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Ok(ProbeResponse::new(ResponseStatus::NameError, vec![])),
        }
    }
}

/// Records every apply/remove; optionally fails admission.
#[derive(Default)]
pub struct MockApplier {
    pub applied: Mutex<Vec<(String, String)>>,
    pub removed: Mutex<Vec<(String, String)>>,
    pub reject: bool,
}

impl MockApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn applied_sets(&self) -> Vec<(String, String)> {
        self.applied.lock().unwrap().clone()
    }

    pub fn removed_sets(&self) -> Vec<(String, String)> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl DefinitionApplier for MockApplier {
    async fn apply(&self, namespace: &str, set: &DefinitionSet) -> Result<(), HarnessError> {
        if self.reject {
            return Err(HarnessError::AdmissionRejected("rejected by mock".to_string()));
        }
        self.applied
            .lock()
            .unwrap()
            .push((namespace.to_string(), set.name.clone()));
        Ok(())
    }

    async fn remove(&self, namespace: &str, set_name: &str) -> Result<(), HarnessError> {
        self.removed
            .lock()
            .unwrap()
            .push((namespace.to_string(), set_name.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockReadiness {
    pub fail: bool,
    pub calls: Mutex<Vec<(String, usize)>>,
}

impl MockReadiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ReadinessWaiter for MockReadiness {
    async fn wait_ready(
        &self,
        selector: &str,
        replicas: usize,
        _timeout: Duration,
    ) -> Result<(), HarnessError> {
        self.calls
            .lock()
            .unwrap()
            .push((selector.to_string(), replicas));
        if self.fail {
            return Err(HarnessError::ReadinessTimeout {
                selector: selector.to_string(),
                expected: replicas,
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockNamespaces {
    pub created: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

impl MockNamespaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_list(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted_list(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl NamespaceProvisioner for MockNamespaces {
    async fn create(&self, namespace: &str) -> Result<(), HarnessError> {
        self.created.lock().unwrap().push(namespace.to_string());
        Ok(())
    }

    async fn delete(&self, namespace: &str) -> Result<(), HarnessError> {
        self.deleted.lock().unwrap().push(namespace.to_string());
        Ok(())
    }
}
