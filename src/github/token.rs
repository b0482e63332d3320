//! Token, repository and endpoint wrappers validated before any request.

use url::Url;

use super::error::ValidationError;

/// Public GitHub API endpoint used when no other base is configured.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const TOKEN_PREFIXES: [&str; 2] = ["ghp_", "github_pat_"];

/// Personal access token wrapper enforcing a recognisable GitHub prefix.
///
/// The prefix check only catches obvious paste mistakes. GitHub still decides
/// whether the token is valid.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates the token and trims surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingToken`] when the token is blank,
    /// [`ValidationError::UnrecognisedTokenPrefix`] when it does not start
    /// with `ghp_` or `github_pat_`, and
    /// [`ValidationError::InvalidTokenCharacters`] when it contains
    /// characters that cannot travel in an HTTP header.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingToken);
        }
        if !TOKEN_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        {
            return Err(ValidationError::UnrecognisedTokenPrefix);
        }
        if !trimmed.chars().all(|character| character.is_ascii_graphic()) {
            return Err(ValidationError::InvalidTokenCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PersonalAccessToken")
            .field(&"<redacted>")
            .finish()
    }
}

/// Repository reference in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: String,
    name: String,
}

impl RepositorySlug {
    /// Builds a slug from its two parts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedRepositorySlug`] when either part
    /// is blank or contains a `/`.
    pub fn new(owner: &str, name: &str) -> Result<Self, ValidationError> {
        let owner_part = owner.trim();
        let name_part = name.trim();
        let is_valid = |part: &str| !part.is_empty() && !part.contains('/');
        if !is_valid(owner_part) || !is_valid(name_part) {
            return Err(ValidationError::MalformedRepositorySlug {
                input: format!("{owner}/{name}"),
            });
        }
        Ok(Self {
            owner: owner_part.to_owned(),
            name: name_part.to_owned(),
        })
    }

    /// Parses `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedRepositorySlug`] when the input
    /// does not have exactly two non-empty segments.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedRepositorySlug {
            input: input.to_owned(),
        };
        let (owner, name) = input.trim().split_once('/').ok_or_else(malformed)?;
        Self::new(owner, name).map_err(|_| malformed())
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl std::fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Base URL of the GitHub API, e.g. `https://api.github.com`.
///
/// GraphQL requests go to `<base>/graphql` and REST requests to
/// `<base>/<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Parses an HTTP(S) base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidApiBase`] when the URL does not
    /// parse or does not use an HTTP scheme.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = Url::parse(input.trim()).map_err(|error| ValidationError::InvalidApiBase {
            message: error.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidApiBase {
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self(parsed.as_str().trim_end_matches('/').to_owned()))
    }

    /// Borrow the URL without a trailing slash.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self(DEFAULT_API_BASE.to_owned())
    }
}
