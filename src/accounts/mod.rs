//! Stored GitHub accounts and the session built from the active one.
//!
//! Accounts live in a JSON document behind the [`CredentialStore`] trait.
//! [`AccountRegistry`] implements the add, switch and remove flows on top
//! of any store, and [`Session`] pairs the active account with a projects
//! gateway for one run of the tool.

mod file_store;
mod registry;
mod session;

use serde::{Deserialize, Serialize};

use crate::github::error::TaskFlowError;

pub use file_store::FileCredentialStore;
pub use registry::{AccountRegistry, AddAccountOutcome};
pub use session::Session;

/// A GitHub account with its personal access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable id, `<username>-<unix millis>` at creation time.
    pub id: String,
    /// GitHub login.
    pub username: String,
    /// Personal access token.
    pub token: String,
    /// Public email, when GitHub reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Mirrors `AccountsStorage::active_account_id`.
    #[serde(default)]
    pub is_active: bool,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("avatar_url", &self.avatar_url)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Persisted document holding every account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsStorage {
    /// Accounts in insertion order.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Id of the active account.
    #[serde(default)]
    pub active_account_id: Option<String>,
}

/// Storage for the accounts document.
///
/// Implementors provide [`load`](Self::load) and [`store`](Self::store);
/// the account operations are built on those two.
pub trait CredentialStore: Send + Sync {
    /// Reads the stored document, or an empty one when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be read.
    fn load(&self) -> Result<AccountsStorage, TaskFlowError>;

    /// Replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be written.
    fn store(&self, storage: &AccountsStorage) -> Result<(), TaskFlowError>;

    /// Lists every stored account.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be read.
    fn get_all_accounts(&self) -> Result<Vec<Account>, TaskFlowError> {
        Ok(self.load()?.accounts)
    }

    /// Returns the active account.
    ///
    /// Without a stored active id the first account is used. A stored id
    /// that matches no account yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be read.
    fn get_active_account(&self) -> Result<Option<Account>, TaskFlowError> {
        let storage = self.load()?;
        let active = match storage.active_account_id {
            Some(active_id) => storage
                .accounts
                .into_iter()
                .find(|account| account.id == active_id),
            None => storage.accounts.into_iter().next(),
        };
        Ok(active)
    }

    /// Marks `account_id` active and rewrites every `is_active` flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be updated.
    fn set_active_account(&self, account_id: &str) -> Result<(), TaskFlowError> {
        let mut storage = self.load()?;
        for account in &mut storage.accounts {
            account.is_active = account.id == account_id;
        }
        storage.active_account_id = Some(account_id.to_owned());
        self.store(&storage)
    }

    /// Replaces the account list, keeping the stored active id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be updated.
    fn save_accounts(&self, accounts: Vec<Account>) -> Result<(), TaskFlowError> {
        let active_account_id = self.load()?.active_account_id;
        self.store(&AccountsStorage {
            accounts,
            active_account_id,
        })
    }

    /// Removes every account and the active id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Io`] when the storage cannot be written.
    fn clear(&self) -> Result<(), TaskFlowError> {
        self.store(&AccountsStorage::default())
    }
}
