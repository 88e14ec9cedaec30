//! # vximg-github
//!
//! GitHub image host backend for vximg. Uploaded images are committed
//! as files to a user-owned repository through the GitHub Contents API
//! and served back over `raw.githubusercontent.com`.
//!
//! # Security
//!
//! Personal access tokens are stored using `SecretString` which
//! automatically zeroizes memory when dropped, reducing credential
//! exposure in memory dumps.

mod client;
mod config;
mod error;
mod transport;
mod types;

pub use client::GitHubImageHost;
pub use config::HostConfig;
pub use error::{Error, Result};
// Re-export SecretString for constructing HostConfig values
pub use secrecy::SecretString;
pub use transport::{HttpTransport, Method, Reply, Request, Transport, TransportError};
