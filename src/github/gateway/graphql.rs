//! GraphQL envelope handling shared by every Projects operation.

use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::github::error::{FailureCause, Operation, TaskFlowError};
use crate::github::normalize::decode;
use crate::github::queries::with_fragments;

use super::error_mapping::failure_cause;

/// Top-level `{ data, errors }` response object.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Sends a document and decodes its `data` object.
///
/// A non-empty `errors` array fails the call even when partial `data` came
/// back with it.
pub(super) async fn send<T: DeserializeOwned>(
    client: &Octocrab,
    document: &str,
    variables: Value,
) -> Result<T, FailureCause> {
    let body = json!({
        "query": with_fragments(document),
        "variables": variables,
    });

    let envelope: GraphQlEnvelope = client
        .graphql(&body)
        .await
        .map_err(|error| failure_cause(&error))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope
            .errors
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        tracing::warn!("GitHub returned GraphQL errors: {}", messages.join("; "));
        return Err(FailureCause::GraphQl { messages });
    }

    let data = envelope
        .data
        .filter(|value| !value.is_null())
        .ok_or_else(|| FailureCause::Normalization {
            message: "response carried no data".to_owned(),
        })?;

    decode(data)
}

/// [`send`], attributing any failure to `operation`.
pub(super) async fn execute<T: DeserializeOwned>(
    client: &Octocrab,
    operation: Operation,
    document: &str,
    variables: Value,
) -> Result<T, TaskFlowError> {
    send(client, document, variables)
        .await
        .map_err(|cause| TaskFlowError::operation(operation, cause))
}
