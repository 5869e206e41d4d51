// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use thiserror::Error;

use crate::auth::AuthType;

pub type Result<T> = std::result::Result<T, DiscogsError>;

/// A non-2xx response from the Discogs API.
///
/// `message` is the response body, which Discogs normally fills with a
/// JSON error payload such as `{"message": "Release not found."}`. Bytes
/// that are not valid UTF-8 are replaced with U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Database resources that call sites can report as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Release,
    MasterRelease,
    Artist,
    Label,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Release => "Release",
            Resource::MasterRelease => "Master release",
            Resource::Artist => "Artist",
            Resource::Label => "Label",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DiscogsError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("failed to unmarshal response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("missing required auth credentials of type {auth_type} for endpoint: {endpoint}")]
    MissingCredentials { auth_type: AuthType, endpoint: String },

    #[error("no matching route found for endpoint: {endpoint}")]
    NoRouteMatched { endpoint: String },

    #[error("{resource} ID {id} not found: {}", .error.message)]
    NotFound {
        resource: Resource,
        id: u64,
        #[source]
        error: HttpError,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to encode request body: {0}")]
    EncodeBody(#[source] serde_json::Error),

    #[error("failed to encode query parameters: {0}")]
    EncodeQuery(String),
}

impl DiscogsError {
    /// Returns the underlying HTTP error, if this error carries one.
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            DiscogsError::Http(error) | DiscogsError::NotFound { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Narrows a 404 into a resource-specific `NotFound`. Every other error
    /// is returned unchanged.
    pub(crate) fn not_found_as(self, resource: Resource, id: u64) -> Self {
        match self {
            DiscogsError::Http(error) if error.is_not_found() => {
                DiscogsError::NotFound {
                    resource,
                    id,
                    error,
                }
            }
            other => other,
        }
    }
}
