//! Image host errors.

use thiserror::Error;

/// Result type for image host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`GitHubImageHost`](crate::GitHubImageHost).
///
/// Every variant renders to the message shown to the user; transport
/// details are folded into the message rather than kept as sources so
/// callers can display errors directly.
#[derive(Debug, Error)]
pub enum Error {
    /// A candidate configuration has at least one empty field.
    #[error("PersonalAccessToken/UserName/RepositoryName should not be empty.")]
    IncompleteConfig,

    /// The repository probe rejected a candidate configuration.
    /// Carries the raw response body for diagnosis.
    #[error("{message}")]
    ConfigRejected {
        /// Raw response body from the repository endpoint.
        message: String,
    },

    /// The active configuration is missing a token, user or repository.
    #[error("Invalid GitHub image host configuration.")]
    NotReady,

    /// Create was called with an empty repository path.
    #[error("Failed to create image with empty path.")]
    EmptyPath,

    /// The target path is already taken; resources are never overwritten.
    #[error("The resource already exists at the image host ({path}).")]
    AlreadyExists {
        /// Repository-relative path of the existing resource.
        path: String,
    },

    /// The existence probe before a create failed with something other
    /// than "not found".
    #[error("Failed to query the resource at the image host ({url}) ({error}) ({body}).")]
    QueryFailed {
        /// Contents API URL that was queried.
        url: String,
        /// Transport error description.
        error: String,
        /// Raw response body.
        body: String,
    },

    /// The PUT creating the resource failed, or succeeded with a
    /// response missing the download URL.
    #[error("Failed to create resource at the image host ({url}) ({error}) ({body}).")]
    CreateFailed {
        /// Contents API URL that was written to.
        url: String,
        /// Transport error description.
        error: String,
        /// Raw response body.
        body: String,
    },

    /// The metadata fetch before a delete failed at the transport level.
    #[error("Failed to fetch information about the resource ({path}).")]
    FetchInfoFailed {
        /// Repository-relative path of the resource.
        path: String,
    },

    /// The metadata fetch succeeded but carried no content SHA.
    #[error("Failed to fetch SHA about the resource ({path}) ({body}).")]
    FetchShaFailed {
        /// Repository-relative path of the resource.
        path: String,
        /// Raw response body.
        body: String,
    },

    /// The DELETE call failed.
    #[error("Failed to delete resource ({path}) ({body}).")]
    DeleteFailed {
        /// Repository-relative path of the resource.
        path: String,
        /// Raw response body.
        body: String,
    },
}
