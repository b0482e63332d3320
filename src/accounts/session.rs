//! The authenticated context for one run of the tool.

use std::sync::Arc;

use super::{Account, AccountRegistry, CredentialStore};
use crate::github::error::TaskFlowError;
use crate::github::gateway::{OctocrabProjectsGateway, ProjectsGateway};
use crate::github::token::{ApiBase, PersonalAccessToken};

/// Who is calling GitHub, and the gateway that calls it for them.
///
/// Sessions are built once per invocation and handed to whatever needs to
/// reach GitHub. Switching accounts means building a new session.
#[derive(Clone)]
pub struct Session {
    login: Option<String>,
    gateway: Arc<dyn ProjectsGateway>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wraps an existing gateway.
    #[must_use]
    pub const fn new(login: Option<String>, gateway: Arc<dyn ProjectsGateway>) -> Self {
        Self { login, gateway }
    }

    /// Builds a session for a stored account.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when the stored token is no
    /// longer well formed, or the client construction error.
    pub fn for_account(account: &Account, api_base: &ApiBase) -> Result<Self, TaskFlowError> {
        let token = PersonalAccessToken::new(&account.token)?;
        let gateway = OctocrabProjectsGateway::for_token(&token, api_base)?;
        Ok(Self::new(Some(account.username.clone()), Arc::new(gateway)))
    }

    /// Builds a session for a token that is not tied to a stored account.
    ///
    /// # Errors
    ///
    /// Returns the client construction error.
    pub fn for_token(token: &PersonalAccessToken, api_base: &ApiBase) -> Result<Self, TaskFlowError> {
        let gateway = OctocrabProjectsGateway::for_token(token, api_base)?;
        Ok(Self::new(None, Arc::new(gateway)))
    }

    /// Picks the explicit token when given, else the active stored account.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Credentials`] when there is neither a token
    /// nor a stored account.
    pub fn resolve<S: CredentialStore>(
        explicit_token: Option<&PersonalAccessToken>,
        registry: &AccountRegistry<S>,
        api_base: &ApiBase,
    ) -> Result<Self, TaskFlowError> {
        if let Some(token) = explicit_token {
            return Self::for_token(token, api_base);
        }
        let account = registry.active_account()?.ok_or_else(|| TaskFlowError::Credentials {
            message: "no GitHub account configured; add one with --add-account".to_owned(),
        })?;
        tracing::debug!("using stored account {}", account.username);
        Self::for_account(&account, api_base)
    }

    /// Login of the account, when the session came from one.
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// The projects gateway bound to this session's token.
    #[must_use]
    pub fn gateway(&self) -> &dyn ProjectsGateway {
        self.gateway.as_ref()
    }
}
