//! Property tests: every combination of rollover history, indexing-complete
//! flag and alias binding lands on the expected report.

mod common;

use chrono::Utc;
use futures::executor::block_on;
use ilm_core::{ByteSize, TimeValue};
use ilm_step::{
    AliasMetadata, Condition, ConditionStatus, IndexMetadata, RolloverInfo, RolloverThresholds,
    StepError,
};
use proptest::prelude::*;

use common::{MockClient, alias, metadata, step};

const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// `None`: alias not bound. `Some(flag)`: bound with that write flag.
fn binding() -> impl Strategy<Value = Option<Option<bool>>> {
    prop_oneof![
        Just(None),
        Just(Some(None)),
        Just(Some(Some(true))),
        Just(Some(Some(false))),
    ]
}

fn thresholds() -> impl Strategy<Value = RolloverThresholds> {
    (
        proptest::option::of(1u64..=1024),
        proptest::option::of(1u64..=90),
        proptest::option::of(1u64..=1_000_000),
    )
        .prop_map(|(gb, days, docs)| RolloverThresholds {
            max_size: gb.map(ByteSize::from_gb),
            max_age: days.map(TimeValue::from_days),
            max_docs: docs,
        })
}

fn build(rolled_over: bool, indexing_complete: bool, binding: Option<Option<bool>>) -> IndexMetadata {
    let mut builder = metadata().indexing_complete(indexing_complete);
    if let Some(flag) = binding {
        builder = builder.alias(
            alias(),
            AliasMetadata {
                is_write_index: flag,
            },
        );
    }
    if rolled_over {
        builder = builder.rollover_info(RolloverInfo::new(alias(), Vec::new(), Utc::now()));
    }
    builder.build()
}

proptest! {
    #[test]
    fn rolled_over_is_always_ready_without_dispatch(
        indexing_complete in any::<bool>(),
        binding in binding(),
        thresholds in thresholds(),
    ) {
        let client = MockClient::answering([("[max_docs: 1]", false)]);
        let step = step(client.clone(), thresholds);

        let outcome = block_on(step.evaluate(&build(true, indexing_complete, binding), TIMEOUT));

        prop_assert_eq!(outcome, Ok(ConditionStatus::ready(true)));
        prop_assert_eq!(client.dispatches(), 0);
    }

    #[test]
    fn indexing_complete_decides_locally(
        binding in binding(),
        thresholds in thresholds(),
    ) {
        let client = MockClient::answering([("[max_docs: 1]", false)]);
        let step = step(client.clone(), thresholds);

        let outcome = block_on(step.evaluate(&build(false, true, binding), TIMEOUT));

        if binding == Some(Some(true)) {
            prop_assert!(matches!(outcome, Err(StepError::IndexingCompleteConflict(_))));
        } else {
            prop_assert_eq!(outcome, Ok(ConditionStatus::ready(true)));
        }
        prop_assert_eq!(client.dispatches(), 0);
    }

    #[test]
    fn active_index_binding_errors(thresholds in thresholds(), unbound in any::<bool>()) {
        let client = MockClient::answering([("[max_docs: 1]", true)]);
        let step = step(client.clone(), thresholds);
        let binding = if unbound { None } else { Some(Some(false)) };

        let outcome = block_on(step.evaluate(&build(false, false, binding), TIMEOUT));

        if unbound {
            prop_assert!(matches!(outcome, Err(StepError::Configuration(_))));
        } else {
            prop_assert!(matches!(outcome, Err(StepError::WriteBinding(_))));
        }
        prop_assert_eq!(client.dispatches(), 0);
    }

    #[test]
    fn write_target_dispatches_once_and_ors_flags(
        explicit in any::<bool>(),
        thresholds in thresholds(),
        flags in proptest::collection::vec(any::<bool>(), 0..4),
    ) {
        let status: Vec<(String, bool)> = flags
            .iter()
            .enumerate()
            .map(|(i, met)| (format!("[condition_{i}]"), *met))
            .collect();
        let client = MockClient::answering(status);
        let step = step(client.clone(), thresholds);
        let binding = Some(if explicit { Some(true) } else { None });

        let outcome = block_on(step.evaluate(&build(false, false, binding), TIMEOUT));

        prop_assert_eq!(outcome, Ok(ConditionStatus::ready(flags.iter().any(|met| *met))));
        prop_assert_eq!(client.dispatches(), 1);

        let request = client.last_request().unwrap();
        let expected: Vec<Condition> = thresholds.conditions();
        prop_assert_eq!(request.conditions, expected);
        prop_assert!(request.dry_run);
    }
}
