use crate::model::{Effect, Names, PolicyDocument, Principal, Statement};
use bucketguard_types::ids;
use std::collections::BTreeMap;

pub fn doc(statements: Vec<Statement>) -> PolicyDocument {
    PolicyDocument { statements }
}

pub fn statement(
    effect: Option<Effect>,
    principal: Option<Principal>,
    action: Option<Names>,
    resource: Option<Names>,
) -> Statement {
    Statement {
        sid: None,
        effect,
        principal,
        action,
        resource,
    }
}

/// The canonical public-read statement for `bucket`.
pub fn public_read(bucket: &str) -> Statement {
    statement(
        Some(Effect::Allow),
        Some(Principal::Wildcard),
        Some(Names::from(ids::ACTION_GET_OBJECT)),
        Some(Names::One(ids::bucket_objects_arn(bucket))),
    )
}

pub fn aws_principal(value: &str) -> Principal {
    let mut map = BTreeMap::new();
    map.insert(ids::PRINCIPAL_AWS_KEY.to_string(), Names::from(value));
    Principal::Map(map)
}
