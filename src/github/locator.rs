//! Repository URL parsing, credential wrapper, and the endpoint table.

use url::Url;

use super::error::StatsError;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, StatsError> {
        if value.is_empty() {
            return Err(StatsError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, StatsError> {
        let trimmed = value.strip_suffix(".git").unwrap_or(value);
        if trimmed.is_empty() {
            return Err(StatsError::MissingPathSegments);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// API key wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, StatsError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StatsError::MissingToken);
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
        f.write_str("PersonalAccessToken(***)")
    }
}

/// Provider resources the statistics pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'branch> {
    /// Paginated commit listing.
    Commits,
    /// Paginated pull request listing.
    PullRequests,
    /// Paginated issue listing (also surfaces pull requests).
    Issues,
    /// Single branch lookup, used by validation.
    Branch(&'branch str),
    /// Rate limit status, used to probe the credential.
    RateLimit,
}

/// Derives the API base URL from a host string.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, StatsError> {
    if host.eq_ignore_ascii_case("github.com") || host.eq_ignore_ascii_case("www.github.com") {
        Url::parse(GITHUB_API_BASE).map_err(|error| StatsError::InvalidUrl(error.to_string()))
    } else {
        let authority = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
            .map_err(|error| StatsError::InvalidUrl(error.to_string()))?;

        api_url
            .set_port(port)
            .map_err(|()| StatsError::InvalidUrl("invalid port".to_owned()))?;
        api_url.set_path("api/v3");
        Ok(api_url)
    }
}

/// Derives the API base URL from a parsed URL.
fn derive_api_base(parsed: &Url) -> Result<Url, StatsError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| StatsError::InvalidUrl("URL must include a host".to_owned()))?;

    derive_api_base_from_host(parsed.scheme(), host, parsed.port())
}

/// Returns the API base for any URL, falling back to the public GitHub API
/// when the input cannot be parsed.
///
/// Validation uses this to probe the credential even when the repository URL
/// itself is unusable.
///
/// # Errors
///
/// Returns `StatsError::InvalidUrl` only if the built-in API base fails to
/// parse.
pub fn api_base_or_default(input: &str) -> Result<Url, StatsError> {
    Url::parse(input)
        .ok()
        .and_then(|parsed| derive_api_base(&parsed).ok())
        .map_or_else(
            || {
                Url::parse(GITHUB_API_BASE)
                    .map_err(|error| StatsError::InvalidUrl(error.to_string()))
            },
            Ok,
        )
}

/// Appends path segments to the API base, percent-encoding each one.
fn join_api_path<'segment>(
    api_base: &Url,
    segments: impl IntoIterator<Item = &'segment str>,
) -> Result<Url, StatsError> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|()| StatsError::InvalidUrl(format!("{api_base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Parsed repository URL with derived API base.
///
/// # Example
///
/// ```
/// use repostat::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/octo/repo")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    html_url: Url,
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses a repository URL in the form `https://<host>/<owner>/<repo>`.
    ///
    /// Trailing path segments (for example `/tree/main`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidUrl` when parsing fails or
    /// `MissingPathSegments` when the URL path is not `/owner/repo`.
    pub fn parse(input: &str) -> Result<Self, StatsError> {
        let parsed =
            Url::parse(input).map_err(|error| StatsError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(StatsError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(StatsError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(StatsError::MissingPathSegments)?;

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let api_base = derive_api_base(&parsed)?;

        Ok(Self {
            html_url: parsed,
            api_base,
            owner,
            repository,
        })
    }

    /// The repository URL as supplied by the caller.
    #[must_use]
    pub const fn html_url(&self) -> &Url {
        &self.html_url
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Resolves an endpoint to an absolute API URL.
    ///
    /// Branch names are sent as a single percent-encoded segment, so `#`,
    /// `%`, and `/` stay part of the name.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidUrl` when the API base cannot carry a
    /// path.
    pub fn endpoint_url(&self, endpoint: Endpoint<'_>) -> Result<Url, StatsError> {
        let repo = [
            "repos",
            self.owner.as_str(),
            self.repository.as_str(),
        ];
        match endpoint {
            Endpoint::Commits => join_api_path(&self.api_base, repo.into_iter().chain(["commits"])),
            Endpoint::PullRequests => {
                join_api_path(&self.api_base, repo.into_iter().chain(["pulls"]))
            }
            Endpoint::Issues => join_api_path(&self.api_base, repo.into_iter().chain(["issues"])),
            Endpoint::Branch(branch) => join_api_path(
                &self.api_base,
                repo.into_iter().chain(["branches", branch]),
            ),
            Endpoint::RateLimit => rate_limit_url(&self.api_base),
        }
    }
}

/// Resolves the rate limit endpoint for an API base that has no repository
/// attached.
///
/// # Errors
///
/// Returns `StatsError::InvalidUrl` when the API base cannot carry a path.
pub fn rate_limit_url(api_base: &Url) -> Result<Url, StatsError> {
    join_api_path(api_base, ["rate_limit"])
}
