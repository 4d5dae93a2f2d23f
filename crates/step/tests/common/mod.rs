//! Shared fixtures for the step integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ilm_core::{AliasName, IndexName, StepKey};
use ilm_log::observability::{ObservabilityEvent, ObservabilityHook};
use ilm_step::{
    ClientError, IndexMetadata, IndexMetadataBuilder, IndicesClient, RolloverRequest,
    RolloverResponse, RolloverThresholds, WaitForRolloverReadyStep,
};
use parking_lot::Mutex;

pub const INDEX: &str = "r1";
pub const ALIAS: &str = "logs-write";

/// Coordinator double that answers every request the same way and records it.
pub struct MockClient {
    answer: Result<BTreeMap<String, bool>, ClientError>,
    dispatches: AtomicUsize,
    requests: Mutex<Vec<RolloverRequest>>,
}

impl MockClient {
    pub fn answering<I, K>(status: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Arc::new(Self {
            answer: Ok(status.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            dispatches: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ClientError) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(error),
            dispatches: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn dispatches(&self) -> usize {
        self.dispatches.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RolloverRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl IndicesClient for MockClient {
    async fn rollover(&self, request: RolloverRequest) -> Result<RolloverResponse, ClientError> {
        self.dispatches.fetch_add(1, Ordering::SeqCst);
        let dry_run = request.dry_run;
        self.requests.lock().push(request);
        self.answer.clone().map(|condition_status| RolloverResponse {
            old_index: INDEX.to_owned(),
            new_index: "r2".to_owned(),
            condition_status,
            dry_run,
            rolled_over: false,
        })
    }
}

/// Hook that keeps the names of every event it sees.
#[derive(Default)]
pub struct RecordingHook {
    names: Mutex<Vec<String>>,
}

impl RecordingHook {
    pub fn names(&self) -> Vec<String> {
        self.names.lock().clone()
    }
}

impl ObservabilityHook for RecordingHook {
    fn on_event(&self, event: &dyn ObservabilityEvent) {
        self.names.lock().push(event.name().to_owned());
    }
}

pub fn alias() -> AliasName {
    AliasName::new(ALIAS).unwrap()
}

pub fn metadata() -> IndexMetadataBuilder {
    IndexMetadata::builder(IndexName::new(INDEX).unwrap()).rollover_alias(ALIAS)
}

pub fn step(client: Arc<MockClient>, thresholds: RolloverThresholds) -> WaitForRolloverReadyStep {
    WaitForRolloverReadyStep::new(
        StepKey::new("hot", "rollover", WaitForRolloverReadyStep::NAME),
        StepKey::new("hot", "rollover", "attempt-rollover"),
        client,
        thresholds,
    )
}
