//! Dry-run rollover requests against the coordinator.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ilm_core::AliasName;

use crate::client::{ClientError, IndicesClient, RolloverRequest};
use crate::thresholds::RolloverThresholds;

/// Asks the coordinator whether any rollover threshold is currently met.
///
/// Sends exactly one request per call and never retries; failures are handed
/// back unchanged.
#[derive(Clone)]
pub struct DryRunRotationRequester {
    client: Arc<dyn IndicesClient>,
}

impl DryRunRotationRequester {
    /// Create a requester over `client`.
    pub fn new(client: Arc<dyn IndicesClient>) -> Self {
        Self { client }
    }

    /// Build the dry-run request for `alias`; only present thresholds become conditions.
    pub fn build_request(
        alias: AliasName,
        thresholds: &RolloverThresholds,
        master_timeout: Duration,
    ) -> RolloverRequest {
        thresholds
            .conditions()
            .into_iter()
            .fold(
                RolloverRequest::new(alias)
                    .dry_run(true)
                    .master_node_timeout(master_timeout),
                RolloverRequest::add_condition,
            )
    }

    /// Send a dry-run rollover and OR the per-condition results.
    pub async fn request_dry_run(
        &self,
        alias: AliasName,
        thresholds: &RolloverThresholds,
        master_timeout: Duration,
    ) -> Result<bool, ClientError> {
        let request = Self::build_request(alias, thresholds, master_timeout);
        let response = self.client.rollover(request).await?;
        Ok(response.any_condition_met())
    }
}

impl fmt::Debug for DryRunRotationRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DryRunRotationRequester").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use ilm_core::{ByteSize, TimeValue};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::RolloverResponse;
    use crate::thresholds::Condition;

    struct Canned {
        answer: Result<BTreeMap<String, bool>, ClientError>,
        seen: Mutex<Vec<RolloverRequest>>,
    }

    #[async_trait]
    impl IndicesClient for Canned {
        async fn rollover(&self, request: RolloverRequest) -> Result<RolloverResponse, ClientError> {
            self.seen.lock().push(request.clone());
            self.answer.clone().map(|condition_status| RolloverResponse {
                old_index: "logs-000001".into(),
                new_index: "logs-000002".into(),
                condition_status,
                dry_run: request.dry_run,
                rolled_over: false,
            })
        }
    }

    fn alias() -> AliasName {
        AliasName::new("logs-write").unwrap()
    }

    #[test]
    fn request_carries_only_present_thresholds() {
        let thresholds = RolloverThresholds::new()
            .with_max_size(ByteSize::from_gb(50))
            .with_max_age(TimeValue::from_days(30));

        let request =
            DryRunRotationRequester::build_request(alias(), &thresholds, Duration::from_secs(10));

        assert!(request.dry_run);
        assert_eq!(request.new_index, None);
        assert_eq!(request.master_timeout, Duration::from_secs(10));
        assert_eq!(
            request.conditions,
            vec![
                Condition::MaxAge(TimeValue::from_days(30)),
                Condition::MaxSize(ByteSize::from_gb(50))
            ]
        );
    }

    #[tokio::test]
    async fn empty_status_map_is_not_met() {
        let client = Arc::new(Canned {
            answer: Ok(BTreeMap::new()),
            seen: Mutex::new(Vec::new()),
        });
        let requester = DryRunRotationRequester::new(client.clone());

        let met = requester
            .request_dry_run(alias(), &RolloverThresholds::new(), Duration::from_secs(30))
            .await;

        assert_eq!(met, Ok(false));
        assert_eq!(client.seen.lock().len(), 1);
        assert!(client.seen.lock()[0].conditions.is_empty());
    }

    #[tokio::test]
    async fn failure_is_passed_through() {
        let client = Arc::new(Canned {
            answer: Err(ClientError::Timeout(Duration::from_secs(1))),
            seen: Mutex::new(Vec::new()),
        });
        let requester = DryRunRotationRequester::new(client.clone());

        let met = requester
            .request_dry_run(
                alias(),
                &RolloverThresholds::new().with_max_docs(1),
                Duration::from_secs(1),
            )
            .await;

        assert_eq!(met, Err(ClientError::Timeout(Duration::from_secs(1))));
        assert_eq!(client.seen.lock().len(), 1);
    }
}
