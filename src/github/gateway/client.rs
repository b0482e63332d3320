//! Octocrab client construction helpers for gateway implementations.
//!
//! GitHub accepts two spellings of the token header. GraphQL requests use
//! `token <pat>` and REST requests use `Bearer <pat>` with the versioned
//! media type, so each gateway gets its own client.

use http::Uri;
use http::header::{ACCEPT, AUTHORIZATION, HeaderName};
use octocrab::Octocrab;

use crate::github::error::{TaskFlowError, ValidationError};
use crate::github::token::{ApiBase, PersonalAccessToken};

use super::error_mapping::client_build_error;

const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-github-api-version");
const API_VERSION: &str = "2022-11-28";
const REST_MEDIA_TYPE: &str = "application/vnd.github+json";

fn parse_base_uri(api_base: &ApiBase) -> Result<Uri, TaskFlowError> {
    api_base.as_str().parse::<Uri>().map_err(|error| {
        TaskFlowError::Validation(ValidationError::InvalidApiBase {
            message: error.to_string(),
        })
    })
}

/// Builds the client used for GraphQL calls.
///
/// # Errors
///
/// Returns [`TaskFlowError::Validation`] when the base URI cannot be parsed
/// or [`TaskFlowError::Configuration`] when Octocrab rejects the settings.
pub(super) fn build_graphql_client(
    token: &PersonalAccessToken,
    api_base: &ApiBase,
) -> Result<Octocrab, TaskFlowError> {
    Octocrab::builder()
        .base_uri(parse_base_uri(api_base)?)
        .map_err(|error| client_build_error(&error))?
        .add_header(AUTHORIZATION, format!("token {}", token.value()))
        .build()
        .map_err(|error| client_build_error(&error))
}

/// Builds the client used for REST calls.
///
/// # Errors
///
/// Returns [`TaskFlowError::Validation`] when the base URI cannot be parsed
/// or [`TaskFlowError::Configuration`] when Octocrab rejects the settings.
pub(super) fn build_rest_client(
    token: &PersonalAccessToken,
    api_base: &ApiBase,
) -> Result<Octocrab, TaskFlowError> {
    Octocrab::builder()
        .base_uri(parse_base_uri(api_base)?)
        .map_err(|error| client_build_error(&error))?
        .add_header(AUTHORIZATION, format!("Bearer {}", token.value()))
        .add_header(ACCEPT, REST_MEDIA_TYPE.to_owned())
        .add_header(API_VERSION_HEADER, API_VERSION.to_owned())
        .build()
        .map_err(|error| client_build_error(&error))
}
