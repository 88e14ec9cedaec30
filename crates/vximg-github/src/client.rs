//! GitHub image host client.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::config::HostConfig;
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Method, Request, Transport, TransportError};
use crate::types::{CreateFile, CreateResponse, DeleteFile, FileMetadata};

/// GitHub-backed image host.
///
/// Commits uploaded images to a configured repository through the
/// Contents API and hands back `raw.githubusercontent.com` download
/// URLs. Every operation is a fresh round-trip; nothing about the
/// remote repository is cached locally.
///
/// The host is parameterized over its [`Transport`] so tests can run
/// against a recorded fake; production code uses the default
/// [`HttpTransport`].
pub struct GitHubImageHost<T = HttpTransport> {
    transport: T,
    api_url: String,
    config: HostConfig,
    url_prefix: String,
}

impl GitHubImageHost<HttpTransport> {
    /// Create a host with the default transport and an empty
    /// configuration. Not usable until [`set_config`](Self::set_config)
    /// supplies a complete [`HostConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for GitHubImageHost<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> GitHubImageHost<T> {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a host over a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self::with_api_url(transport, Self::DEFAULT_API_URL)
    }

    /// Create a host with a custom API base URL (GitHub Enterprise).
    pub fn with_api_url(transport: T, api_url: impl Into<String>) -> Self {
        let config = HostConfig::default();
        let url_prefix = raw_url_prefix(&config.user_name, &config.repository_name);
        Self {
            transport,
            api_url: api_url.into(),
            config,
            url_prefix,
        }
    }

    /// Replace the active configuration and recompute the download URL
    /// prefix. Performs no validation and no I/O.
    pub fn set_config(&mut self, config: HostConfig) {
        self.url_prefix = raw_url_prefix(&config.user_name, &config.repository_name);
        self.config = config;
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Whether the token, user name and repository name are all set.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.config.is_complete()
    }

    /// Probe a candidate configuration against its repository endpoint.
    ///
    /// The candidate does not have to be the active configuration.
    /// Returns the raw response body on success so callers can surface
    /// whatever GitHub said about the repository.
    ///
    /// # Errors
    ///
    /// [`Error::IncompleteConfig`] when any field of the candidate is
    /// empty; [`Error::ConfigRejected`] carrying the response body when
    /// the probe fails (bad token, missing repository, network trouble).
    pub fn test_config(&self, candidate: &HostConfig) -> Result<String> {
        if !candidate.is_complete() {
            return Err(Error::IncompleteConfig);
        }

        let url = format!(
            "{}/repos/{}/{}",
            self.api_url, candidate.user_name, candidate.repository_name
        );
        let reply = self.transport.send(&Request {
            method: Method::Get,
            url,
            headers: common_headers(candidate.token()),
            body: None,
        });

        let message = reply.body_text();
        if reply.is_ok() {
            Ok(message)
        } else {
            Err(Error::ConfigRejected { message })
        }
    }

    /// Upload `content` to `path` in the repository and return the
    /// public download URL.
    ///
    /// An existing resource at `path` is never overwritten; the call
    /// fails instead. On success exactly one commit is created in the
    /// repository.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] for an empty path (no network calls are
    /// made), [`Error::NotReady`] for an incomplete configuration,
    /// [`Error::AlreadyExists`] when `path` is taken, and
    /// [`Error::QueryFailed`]/[`Error::CreateFailed`] for transport
    /// failures or a malformed create response.
    pub fn create(&self, content: &[u8], path: &str) -> Result<String> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        self.create_resource(content, path)
    }

    fn create_resource(&self, content: &[u8], path: &str) -> Result<String> {
        debug_assert!(!path.is_empty());

        if !self.is_ready() {
            return Err(Error::NotReady);
        }

        let headers = self.common_headers();
        let url = self.contents_url(path);

        // Never overwrite: probe for an existing resource first.
        let reply = self.transport.send(&Request {
            method: Method::Get,
            url: url.clone(),
            headers: headers.clone(),
            body: None,
        });
        match reply.error {
            None => {
                return Err(Error::AlreadyExists {
                    path: path.to_string(),
                });
            }
            Some(TransportError::NotFound) => {}
            Some(_) => {
                return Err(Error::QueryFailed {
                    error: reply.error_text(),
                    body: reply.body_text(),
                    url,
                });
            }
        }

        let body = CreateFile {
            message: format!("VX_ADD: {path}"),
            content: BASE64.encode(content),
        };
        let reply = self.transport.send(&Request {
            method: Method::Put,
            url: url.clone(),
            headers,
            body: Some(serde_json::to_vec(&body).unwrap_or_default()),
        });
        if reply.error.is_some() {
            return Err(Error::CreateFailed {
                error: reply.error_text(),
                body: reply.body_text(),
                url,
            });
        }

        let parsed: CreateResponse = serde_json::from_slice(&reply.body).unwrap_or_default();
        let download_url = parsed
            .content
            .and_then(|content| content.download_url)
            .unwrap_or_default();
        if download_url.is_empty() {
            // The PUT went through but the response is not the shape we
            // expect; report the create as failed.
            return Err(Error::CreateFailed {
                error: reply.error_text(),
                body: reply.body_text(),
                url,
            });
        }

        debug!(url = %download_url, "created resource");
        Ok(download_url)
    }

    /// Whether `url` points into this host's repository, i.e. starts
    /// with the derived `raw.githubusercontent.com` prefix.
    #[must_use]
    pub fn owns_url(&self, url: &str) -> bool {
        url.starts_with(&self.url_prefix)
    }

    /// Delete the resource behind a download URL previously returned by
    /// [`create`](Self::create).
    ///
    /// Callers must check [`owns_url`](Self::owns_url) first; passing a
    /// foreign URL is a programming error.
    ///
    /// The content SHA fetched in the first round-trip may be stale by
    /// the time the DELETE lands. The Contents API has no atomic
    /// compare-and-delete, so the race stays; concurrent writers to the
    /// same path are the caller's problem.
    ///
    /// # Errors
    ///
    /// [`Error::NotReady`] for an incomplete configuration,
    /// [`Error::FetchInfoFailed`]/[`Error::FetchShaFailed`] when the
    /// metadata probe fails or carries no SHA, and
    /// [`Error::DeleteFailed`] when the DELETE itself fails.
    pub fn remove(&self, url: &str) -> Result<()> {
        debug_assert!(self.owns_url(url));

        if !self.is_ready() {
            return Err(Error::NotReady);
        }

        let path = purify_resource_path(url.strip_prefix(&self.url_prefix).unwrap_or(url));

        let headers = self.common_headers();
        let contents_url = self.contents_url(&path);

        // First round-trip: the current content SHA.
        let reply = self.transport.send(&Request {
            method: Method::Get,
            url: contents_url.clone(),
            headers: headers.clone(),
            body: None,
        });
        if !reply.is_ok() {
            return Err(Error::FetchInfoFailed { path });
        }

        let metadata: FileMetadata = serde_json::from_slice(&reply.body).unwrap_or_default();
        let sha = metadata.sha.unwrap_or_default();
        if sha.is_empty() {
            return Err(Error::FetchShaFailed {
                body: reply.body_text(),
                path,
            });
        }

        let body = DeleteFile {
            message: format!("VX_DEL: {path}"),
            sha,
        };
        let reply = self.transport.send(&Request {
            method: Method::Delete,
            url: contents_url,
            headers,
            body: Some(serde_json::to_vec(&body).unwrap_or_default()),
        });
        if !reply.is_ok() {
            return Err(Error::DeleteFailed {
                body: reply.body_text(),
                path,
            });
        }

        debug!(%path, "deleted resource");
        Ok(())
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, self.config.user_name, self.config.repository_name, path
        )
    }

    fn common_headers(&self) -> Vec<(String, String)> {
        common_headers(self.config.token())
    }
}

impl<T> fmt::Debug for GitHubImageHost<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubImageHost")
            .field("api_url", &self.api_url)
            .field("url_prefix", &self.url_prefix)
            .finish_non_exhaustive()
    }
}

fn raw_url_prefix(user_name: &str, repository_name: &str) -> String {
    format!("https://raw.githubusercontent.com/{user_name}/{repository_name}/master/")
}

/// Headers every Contents API call carries.
fn common_headers(token: &str) -> Vec<(String, String)> {
    vec![
        ("Authorization".to_string(), format!("token {token}")),
        (
            "Accept".to_string(),
            "application/vnd.github.v3+json".to_string(),
        ),
    ]
}

/// Turn the tail of a download URL back into a repository-relative
/// path: drop any query or fragment, then percent-decode.
fn purify_resource_path(tail: &str) -> String {
    let tail = tail.split(['?', '#']).next().unwrap_or(tail);
    percent_decode_str(tail).decode_utf8_lossy().into_owned()
}
