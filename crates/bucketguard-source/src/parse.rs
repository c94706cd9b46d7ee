use crate::SourceError;
use bucketguard_domain::model::{Effect, Names, PolicyDocument, Principal, Statement};
use bucketguard_types::PublicAccessBlock;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parse a policy document.
///
/// Only text that is not JSON is an error. Everything else is decoded leniently:
/// fields with an unexpected shape become `None` and simply never match.
///
/// Accepts both the bare document and the `{"Policy": "<document>"}` wrapper
/// returned by `GetBucketPolicy`.
pub fn parse_policy_document(text: &str) -> Result<PolicyDocument, SourceError> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("Statement").is_none()
        && let Some(inner) = value.get("Policy").and_then(Value::as_str)
    {
        let inner: Value = serde_json::from_str(inner)?;
        return Ok(document_from_value(&inner));
    }
    Ok(document_from_value(&value))
}

/// Parse a public access block, bare or wrapped in `PublicAccessBlockConfiguration`.
pub fn parse_access_block(text: &str) -> Result<PublicAccessBlock, SourceError> {
    let mut value: Value = serde_json::from_str(text).map_err(SourceError::MalformedAccessBlock)?;
    if let Some(inner) = value.get_mut("PublicAccessBlockConfiguration") {
        value = inner.take();
    }
    serde_json::from_value(value).map_err(SourceError::MalformedAccessBlock)
}

fn document_from_value(value: &Value) -> PolicyDocument {
    let statements = match value.get("Statement") {
        Some(Value::Array(items)) => items.iter().map(statement_from_value).collect(),
        // A single statement object is legal IAM shorthand.
        Some(single @ Value::Object(_)) => vec![statement_from_value(single)],
        _ => Vec::new(),
    };
    PolicyDocument { statements }
}

fn statement_from_value(value: &Value) -> Statement {
    Statement {
        sid: value.get("Sid").and_then(Value::as_str).map(str::to_string),
        effect: value.get("Effect").and_then(Value::as_str).and_then(parse_effect),
        principal: value.get("Principal").and_then(principal_from_value),
        action: value.get("Action").and_then(names_from_value),
        resource: value.get("Resource").and_then(names_from_value),
    }
}

fn parse_effect(v: &str) -> Option<Effect> {
    match v {
        "Allow" => Some(Effect::Allow),
        "Deny" => Some(Effect::Deny),
        _ => None,
    }
}

fn principal_from_value(value: &Value) -> Option<Principal> {
    match value {
        Value::String(s) if s == "*" => Some(Principal::Wildcard),
        Value::String(s) => Some(Principal::Named(s.clone())),
        Value::Object(map) => {
            let entries: BTreeMap<String, Names> = map
                .iter()
                .filter_map(|(k, v)| names_from_value(v).map(|n| (k.clone(), n)))
                .collect();
            Some(Principal::Map(entries))
        }
        _ => None,
    }
}

fn names_from_value(value: &Value) -> Option<Names> {
    match value {
        Value::String(s) => Some(Names::One(s.clone())),
        // Non-string members can never equal a name, so they are dropped.
        Value::Array(items) => Some(Names::Many(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )),
        _ => None,
    }
}
