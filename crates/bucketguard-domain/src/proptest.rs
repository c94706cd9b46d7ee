//! Property-based tests for the evaluator.
//!
//! These tests use proptest to verify invariants around:
//! - Deny statements never producing a public classification
//! - Qualifying Allow statements always producing one, wherever they sit
//! - Purity of `evaluate`

use crate::engine::{evaluate, evaluate_document};
use crate::model::{Effect, Names, PolicyDocument, PolicyInput, Principal, Statement};
use crate::test_support::{aws_principal, public_read};
use bucketguard_types::{ids, Classification};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for valid bucket names (lowercase, digits, dots, hyphens).
fn arb_bucket() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9][a-z0-9.-]{2,40}[a-z0-9]").unwrap()
}

fn arb_action() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        Just("s3:GetObject".to_string()),
        Just("s3:PutObject".to_string()),
        Just("s3:Get*".to_string()),
        Just("s3:*".to_string()),
        Just("s3:ListBucket".to_string()),
    ]
}

fn arb_names(inner: impl Strategy<Value = String> + Clone) -> impl Strategy<Value = Names> {
    prop_oneof![
        inner.clone().prop_map(Names::One),
        prop::collection::vec(inner, 0..4).prop_map(Names::Many),
    ]
}

fn arb_principal() -> impl Strategy<Value = Principal> {
    prop_oneof![
        Just(Principal::Wildcard),
        Just(aws_principal("*")),
        Just(aws_principal("arn:aws:iam::123456789012:root")),
        Just(Principal::Named("arn:aws:iam::123456789012:root".to_string())),
    ]
}

fn arb_resource(bucket: String) -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        Just(ids::bucket_objects_arn(&bucket)),
        Just(format!("arn:aws:s3:::{bucket}")),
        Just("*".to_string()),
        Just("arn:aws:s3:::other-bucket/*".to_string()),
    ]
}

fn arb_statement(bucket: String) -> impl Strategy<Value = Statement> {
    (
        prop::option::of(prop_oneof![Just(Effect::Allow), Just(Effect::Deny)]),
        prop::option::of(arb_principal()),
        prop::option::of(arb_names(arb_action())),
        prop::option::of(arb_names(arb_resource(bucket))),
    )
        .prop_map(|(effect, principal, action, resource)| Statement {
            sid: None,
            effect,
            principal,
            action,
            resource,
        })
}

fn arb_document() -> impl Strategy<Value = (String, PolicyDocument)> {
    arb_bucket().prop_flat_map(|bucket| {
        prop::collection::vec(arb_statement(bucket.clone()), 0..6)
            .prop_map(move |statements| (bucket.clone(), PolicyDocument { statements }))
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn non_allow_statements_never_make_a_bucket_public((bucket, mut doc) in arb_document()) {
        for s in &mut doc.statements {
            if s.effect == Some(Effect::Allow) {
                s.effect = Some(Effect::Deny);
            }
        }
        prop_assert_eq!(
            evaluate_document(&bucket, &doc),
            Classification::NotPubliclyReadable
        );
    }

    #[test]
    fn qualifying_allow_is_public_at_any_position(
        (bucket, mut doc) in arb_document(),
        position in 0usize..8,
    ) {
        let at = position.min(doc.statements.len());
        doc.statements.insert(at, public_read(&bucket));
        prop_assert_eq!(
            evaluate_document(&bucket, &doc),
            Classification::PubliclyReadable
        );
    }

    #[test]
    fn grant_for_one_bucket_never_matches_another(
        bucket in arb_bucket(),
        other in arb_bucket(),
    ) {
        prop_assume!(bucket != other);
        let doc = PolicyDocument { statements: vec![public_read(&other)] };
        prop_assert_eq!(
            evaluate_document(&bucket, &doc),
            Classification::NotPubliclyReadable
        );
    }

    #[test]
    fn evaluation_is_idempotent((bucket, doc) in arb_document()) {
        let input = PolicyInput::Document(doc);
        prop_assert_eq!(evaluate(&bucket, &input), evaluate(&bucket, &input));
    }

    #[test]
    fn no_policy_ignores_bucket(bucket in ".*") {
        prop_assert_eq!(evaluate(&bucket, &PolicyInput::NoPolicy), Classification::NoPolicy);
    }

    #[test]
    fn fetch_error_message_is_preserved(bucket in arb_bucket(), message in ".*") {
        prop_assert_eq!(
            evaluate(&bucket, &PolicyInput::FetchError(message.clone())),
            Classification::FetchError(message)
        );
    }
}
