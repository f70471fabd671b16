use serde::Deserialize;
use serde_json::Value;

/// Collection envelope Dataverse wraps around list query results.
///
/// Records stay opaque `Value`s; the relay never renames or re-orders fields.
#[derive(Debug, Deserialize)]
pub struct ODataCollection {
    pub value: Vec<Value>,
}
