use crate::model::{Effect, PolicyDocument, PolicyInput, Statement};
use bucketguard_types::{ids, Classification};

/// Classify one bucket from what its policy source produced.
///
/// Pure: the result depends only on `bucket` and `input`.
pub fn evaluate(bucket: &str, input: &PolicyInput) -> Classification {
    match input {
        PolicyInput::NoPolicy => Classification::NoPolicy,
        PolicyInput::FetchError(message) => Classification::FetchError(message.clone()),
        PolicyInput::Document(doc) => evaluate_document(bucket, doc),
    }
}

pub fn evaluate_document(bucket: &str, doc: &PolicyDocument) -> Classification {
    match matching_statement(bucket, doc) {
        Some(_) => Classification::PubliclyReadable,
        None => Classification::NotPubliclyReadable,
    }
}

/// Index of the first statement granting anonymous `s3:GetObject` on every
/// object of `bucket`. Later statements are not inspected, and Deny
/// statements never cancel a match.
pub fn matching_statement(bucket: &str, doc: &PolicyDocument) -> Option<usize> {
    let objects_arn = ids::bucket_objects_arn(bucket);
    doc.statements
        .iter()
        .position(|s| statement_grants_public_read(s, &objects_arn))
}

/// Exact matching only: `s3:Get*` or a bare `*` resource do not count.
pub fn statement_grants_public_read(statement: &Statement, objects_arn: &str) -> bool {
    if statement.effect != Some(Effect::Allow) {
        return false;
    }
    let Some(principal) = &statement.principal else {
        return false;
    };
    if !principal.is_anonymous() {
        return false;
    }
    let action_matches = statement
        .action
        .as_ref()
        .is_some_and(|a| a.is_or_contains(ids::ACTION_GET_OBJECT));
    let resource_matches = statement
        .resource
        .as_ref()
        .is_some_and(|r| r.is_or_contains(objects_arn));

    action_matches && resource_matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Names, Principal};
    use crate::test_support::{aws_principal, doc, public_read, statement};
    use std::collections::BTreeMap;

    #[test]
    fn wildcard_principal_get_object_on_bucket_is_public() {
        let policy = doc(vec![public_read("bucket")]);
        assert_eq!(
            evaluate("bucket", &PolicyInput::Document(policy)),
            Classification::PubliclyReadable
        );
    }

    #[test]
    fn aws_wildcard_principal_is_public() {
        let mut s = public_read("bucket");
        s.principal = Some(aws_principal("*"));
        assert_eq!(
            evaluate_document("bucket", &doc(vec![s])),
            Classification::PubliclyReadable
        );
    }

    #[test]
    fn action_list_containing_get_object_is_public() {
        let mut s = public_read("bucket");
        s.action = Some(Names::from(vec!["s3:GetObject", "s3:PutObject"]));
        assert_eq!(
            evaluate_document("bucket", &doc(vec![s])),
            Classification::PubliclyReadable
        );
    }

    #[test]
    fn resource_list_containing_bucket_arn_is_public() {
        let mut s = public_read("bucket");
        s.resource = Some(Names::from(vec![
            "arn:aws:s3:::bucket",
            "arn:aws:s3:::bucket/*",
        ]));
        assert_eq!(
            evaluate_document("bucket", &doc(vec![s])),
            Classification::PubliclyReadable
        );
    }

    #[test]
    fn other_bucket_arn_is_not_public() {
        let policy = doc(vec![public_read("other-bucket")]);
        assert_eq!(
            evaluate_document("bucket", &policy),
            Classification::NotPubliclyReadable
        );
    }

    #[test]
    fn empty_policy_is_not_public() {
        assert_eq!(
            evaluate_document("bucket", &PolicyDocument::default()),
            Classification::NotPubliclyReadable
        );
    }

    #[test]
    fn no_policy_and_fetch_error_pass_through() {
        assert_eq!(
            evaluate("anything", &PolicyInput::NoPolicy),
            Classification::NoPolicy
        );
        assert_eq!(
            evaluate("bucket", &PolicyInput::FetchError("Access Denied".into())),
            Classification::FetchError("Access Denied".into())
        );
    }

    #[test]
    fn deny_does_not_override_allow() {
        let mut deny = public_read("bucket");
        deny.effect = Some(Effect::Deny);
        let policy = doc(vec![deny.clone(), public_read("bucket"), deny]);
        assert_eq!(matching_statement("bucket", &policy), Some(1));
        assert_eq!(
            evaluate_document("bucket", &policy),
            Classification::PubliclyReadable
        );
    }

    #[test]
    fn deny_alone_is_not_public() {
        let mut deny = public_read("bucket");
        deny.effect = Some(Effect::Deny);
        assert_eq!(
            evaluate_document("bucket", &doc(vec![deny])),
            Classification::NotPubliclyReadable
        );
    }

    #[test]
    fn first_match_wins() {
        let policy = doc(vec![
            statement(Some(Effect::Allow), None, None, None),
            public_read("bucket"),
            public_read("bucket"),
        ]);
        assert_eq!(matching_statement("bucket", &policy), Some(1));
    }

    #[test]
    fn wildcards_inside_values_are_not_expanded() {
        let mut get_star = public_read("bucket");
        get_star.action = Some(Names::from("s3:Get*"));
        let mut any_resource = public_read("bucket");
        any_resource.resource = Some(Names::from("*"));
        let mut any_action = public_read("bucket");
        any_action.action = Some(Names::from("s3:*"));

        let policy = doc(vec![get_star, any_resource, any_action]);
        assert_eq!(
            evaluate_document("bucket", &policy),
            Classification::NotPubliclyReadable
        );
    }

    #[test]
    fn missing_fields_do_not_match() {
        let base = public_read("bucket");
        let cases = [
            Statement {
                effect: None,
                ..base.clone()
            },
            Statement {
                principal: None,
                ..base.clone()
            },
            Statement {
                action: None,
                ..base.clone()
            },
            Statement {
                resource: None,
                ..base.clone()
            },
        ];
        for s in cases {
            assert_eq!(
                evaluate_document("bucket", &doc(vec![s.clone()])),
                Classification::NotPubliclyReadable,
                "statement should not match: {s:?}"
            );
        }
    }

    #[test]
    fn named_and_listed_principals_are_not_anonymous() {
        let mut named = public_read("bucket");
        named.principal = Some(Principal::Named("arn:aws:iam::1:root".into()));

        let mut listed = public_read("bucket");
        let mut map = BTreeMap::new();
        map.insert("AWS".to_string(), Names::from(vec!["*"]));
        listed.principal = Some(Principal::Map(map));

        let mut service = public_read("bucket");
        let mut map = BTreeMap::new();
        map.insert("Service".to_string(), Names::from("*"));
        service.principal = Some(Principal::Map(map));

        let policy = doc(vec![named, listed, service]);
        assert_eq!(matching_statement("bucket", &policy), None);
    }

    #[test]
    fn bucket_arn_without_object_suffix_does_not_match() {
        let mut s = public_read("bucket");
        s.resource = Some(Names::from("arn:aws:s3:::bucket"));
        assert_eq!(
            evaluate_document("bucket", &doc(vec![s])),
            Classification::NotPubliclyReadable
        );
    }
}
