//! Octocrab implementation of the identity gateway.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::github::error::{Operation, TaskFlowError};
use crate::github::models::UserIdentity;
use crate::github::token::{ApiBase, PersonalAccessToken};
use crate::github::wire::ApiUser;

use super::IdentityGateway;
use super::client::build_rest_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed gateway for the REST `/user` endpoint.
pub struct OctocrabIdentityGateway {
    client: Octocrab,
}

impl OctocrabIdentityGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a REST client for the given token and API base.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when the base URI cannot be
    /// parsed or [`TaskFlowError::Configuration`] when Octocrab fails to
    /// construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        api_base: &ApiBase,
    ) -> Result<Self, TaskFlowError> {
        Ok(Self::new(build_rest_client(token, api_base)?))
    }
}

#[async_trait]
impl IdentityGateway for OctocrabIdentityGateway {
    async fn authenticated_user(&self) -> Result<UserIdentity, TaskFlowError> {
        let user = self
            .client
            .get::<ApiUser, _, _>("/user", None::<&()>)
            .await
            .map_err(|error| map_octocrab_error(Operation::UserLookup, &error))?;

        Ok(UserIdentity {
            login: user.login,
            email: user.email,
            avatar_url: user.avatar_url,
        })
    }
}
