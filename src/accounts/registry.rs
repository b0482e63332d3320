//! Account add, switch and remove flows over a credential store.

use chrono::Utc;

use super::{Account, CredentialStore};
use crate::github::error::TaskFlowError;
use crate::github::gateway::IdentityGateway;
use crate::github::models::UserIdentity;
use crate::github::token::PersonalAccessToken;

/// Result of registering a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddAccountOutcome {
    /// A new account was stored.
    Added(Account),
    /// The username was already known; its token was replaced and the
    /// account activated.
    TokenUpdated(Account),
}

impl AddAccountOutcome {
    /// The stored account.
    #[must_use]
    pub const fn account(&self) -> &Account {
        match self {
            Self::Added(account) | Self::TokenUpdated(account) => account,
        }
    }
}

/// Keeps usernames unique and at most one account active.
#[derive(Debug, Clone)]
pub struct AccountRegistry<S> {
    store: S,
}

impl<S: CredentialStore> AccountRegistry<S> {
    /// Wraps a credential store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Stores `token` for the user it belongs to.
    ///
    /// A new account gets the id `<username>-<unix millis>` and becomes
    /// active only when it is the first account. A known username keeps
    /// its id, receives the new token and becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the store cannot be updated.
    pub fn add_account(
        &self,
        token: &PersonalAccessToken,
        identity: &UserIdentity,
    ) -> Result<AddAccountOutcome, TaskFlowError> {
        let mut accounts = self.store.get_all_accounts()?;

        let existing_id = accounts
            .iter_mut()
            .find(|account| account.username == identity.login)
            .map(|existing| {
                existing.token = token.value().to_owned();
                existing.id.clone()
            });

        if let Some(id) = existing_id {
            self.store.save_accounts(accounts)?;
            self.store.set_active_account(&id)?;
            tracing::debug!("updated token for {}", identity.login);
            let updated = self.find_by_username(&identity.login)?;
            return Ok(AddAccountOutcome::TokenUpdated(updated));
        }

        let account = Account {
            id: format!("{}-{}", identity.login, Utc::now().timestamp_millis()),
            username: identity.login.clone(),
            token: token.value().to_owned(),
            email: identity.email.clone(),
            avatar_url: identity.avatar_url.clone(),
            is_active: accounts.is_empty(),
        };
        accounts.push(account.clone());
        self.store.save_accounts(accounts)?;
        if account.is_active {
            self.store.set_active_account(&account.id)?;
        }
        tracing::debug!("added account {}", account.username);
        Ok(AddAccountOutcome::Added(account))
    }

    /// Asks GitHub who owns `token`, then stores it as [`add_account`] does.
    ///
    /// Nothing is written when the lookup fails.
    ///
    /// [`add_account`]: Self::add_account
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the lookup fails, or
    /// [`TaskFlowError::Io`] when the store cannot be updated.
    pub async fn add_from_gateway(
        &self,
        gateway: &dyn IdentityGateway,
        token: &PersonalAccessToken,
    ) -> Result<AddAccountOutcome, TaskFlowError> {
        let identity = gateway.authenticated_user().await?;
        self.add_account(token, &identity)
    }

    /// Lists stored accounts.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the store cannot be read.
    pub fn accounts(&self) -> Result<Vec<Account>, TaskFlowError> {
        self.store.get_all_accounts()
    }

    /// Returns the active account, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the store cannot be read.
    pub fn active_account(&self) -> Result<Option<Account>, TaskFlowError> {
        self.store.get_active_account()
    }

    /// Activates the account with the given username.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Credentials`] when no account has that
    /// username, or [`TaskFlowError::Io`] when the store fails.
    pub fn switch_to(&self, username: &str) -> Result<Account, TaskFlowError> {
        let account = self.find_by_username(username)?;
        self.store.set_active_account(&account.id)?;
        Ok(Account {
            is_active: true,
            ..account
        })
    }

    /// Removes the account with the given username.
    ///
    /// When the active account is removed the first remaining account takes
    /// over. Removing the last account clears the active id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Credentials`] when no account has that
    /// username, or [`TaskFlowError::Io`] when the store fails.
    pub fn remove(&self, username: &str) -> Result<Account, TaskFlowError> {
        let removed = self.find_by_username(username)?;
        let was_active = self
            .store
            .get_active_account()?
            .is_some_and(|active| active.id == removed.id);

        let remaining: Vec<Account> = self
            .store
            .get_all_accounts()?
            .into_iter()
            .filter(|account| account.id != removed.id)
            .collect();
        let successor = remaining.first().map(|account| account.id.clone());
        self.store.save_accounts(remaining)?;

        match successor {
            Some(next_id) if was_active => self.store.set_active_account(&next_id)?,
            Some(_) => {}
            None => self.store.clear()?,
        }
        tracing::debug!("removed account {username}");
        Ok(removed)
    }

    /// Removes every account.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the store cannot be written.
    pub fn logout_all(&self) -> Result<(), TaskFlowError> {
        self.store.clear()
    }

    fn find_by_username(&self, username: &str) -> Result<Account, TaskFlowError> {
        self.store
            .get_all_accounts()?
            .into_iter()
            .find(|account| account.username == username)
            .ok_or_else(|| TaskFlowError::Credentials {
                message: format!("no stored account for '{username}'"),
            })
    }
}
