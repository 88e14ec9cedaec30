//! HTTP transport seam.
//!
//! The image host talks to GitHub through the [`Transport`] trait so
//! tests can substitute a deterministic fake for the real network.
//! [`HttpTransport`] is the production implementation over a blocking
//! [`reqwest`] client.

use std::fmt;

use reqwest::StatusCode;
use reqwest::blocking::Client;

/// HTTP method subset used by the Contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read a resource or its metadata.
    Get,
    /// Create a resource.
    Put,
    /// Delete a resource.
    Delete,
}

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs, sent verbatim.
    pub headers: Vec<(String, String)>,
    /// Raw request body, if any.
    pub body: Option<Vec<u8>>,
}

/// Transport-level failure classification.
///
/// `NotFound` is kept separate from other statuses because the create
/// path branches on it: a 404 from the existence probe means the path
/// is free to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered 404.
    NotFound,
    /// Any other non-success HTTP status.
    Status(u16),
    /// The request never produced a response.
    Network(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Network(message) => write!(f, "{message}"),
        }
    }
}

/// Result of one round-trip: the error classification, if any, plus
/// whatever body bytes were read. A reply with an error still carries
/// the body so callers can surface the server's diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    /// Transport error, `None` on 2xx.
    pub error: Option<TransportError>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Reply {
    /// Whether the round-trip succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Body bytes as text, lossily decoded.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Error description, empty when the reply succeeded.
    #[must_use]
    pub fn error_text(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

/// A synchronous request/response channel.
pub trait Transport {
    /// Perform one blocking round-trip.
    fn send(&self, request: &Request) -> Reply;
}

/// [`Transport`] backed by a blocking [`reqwest`] client.
#[derive(Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default client settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Reply {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        match builder.send() {
            Ok(response) => {
                let status = response.status();
                let body = response.bytes().map(|b| b.to_vec()).unwrap_or_default();
                let error = if status.is_success() {
                    None
                } else if status == StatusCode::NOT_FOUND {
                    Some(TransportError::NotFound)
                } else {
                    Some(TransportError::Status(status.as_u16()))
                };
                Reply { error, body }
            }
            Err(err) => Reply {
                error: Some(TransportError::Network(err.to_string())),
                body: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        assert_eq!(TransportError::NotFound.to_string(), "not found");
        assert_eq!(TransportError::Status(403).to_string(), "HTTP 403");
        assert_eq!(
            TransportError::Network("connection refused".to_string()).to_string(),
            "connection refused"
        );
    }

    #[test]
    fn test_reply_accessors() {
        let reply = Reply {
            error: None,
            body: b"{\"ok\":true}".to_vec(),
        };
        assert!(reply.is_ok());
        assert_eq!(reply.body_text(), "{\"ok\":true}");
        assert_eq!(reply.error_text(), "");

        let reply = Reply {
            error: Some(TransportError::Status(500)),
            body: Vec::new(),
        };
        assert!(!reply.is_ok());
        assert_eq!(reply.error_text(), "HTTP 500");
    }
}
