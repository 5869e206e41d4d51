// SPDX-License-Identifier: GPL-3.0-or-later

//! Endpoint routing to the authentication class each Discogs endpoint requires.

use std::collections::HashMap;

use crate::auth::AuthType;
use crate::error::{DiscogsError, Result};

/// Mapping from endpoint pattern to required authentication.
///
/// Patterns are `/`-delimited; a segment wrapped in braces (`{release_id}`)
/// matches any literal value at that position. Lookup order is unspecified,
/// so a table must never contain two patterns that match the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<String, AuthType>,
}

impl RouteTable {
    /// An empty table. Every lookup against it fails.
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, pattern: impl Into<String>, auth_type: AuthType) -> Self {
        self.insert(pattern, auth_type);
        self
    }

    pub fn insert(&mut self, pattern: impl Into<String>, auth_type: AuthType) {
        self.routes.insert(pattern.into(), auth_type);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve the authentication class for a literal endpoint path.
    pub fn resolve(&self, endpoint: &str) -> Result<AuthType> {
        self.routes
            .iter()
            .find(|(pattern, _)| is_match(pattern, endpoint))
            .map(|(_, auth_type)| *auth_type)
            .ok_or_else(|| DiscogsError::NoRouteMatched {
                endpoint: endpoint.to_string(),
            })
    }
}

impl Default for RouteTable {
    /// The database endpoints this client knows about.
    fn default() -> Self {
        Self::empty()
            .with_route("/releases/{release_id}", AuthType::None)
            .with_route("/releases/{release_id}/rating", AuthType::None)
            .with_route("/releases/{release_id}/rating/{username}", AuthType::None)
            .with_route("/releases/{release_id}/stats", AuthType::None)
            .with_route("/masters/{master_id}", AuthType::None)
            .with_route("/masters/{master_id}/versions", AuthType::None)
            .with_route("/artists/{artist_id}", AuthType::None)
            .with_route("/artists/{artist_id}/releases", AuthType::None)
            .with_route("/labels/{label_id}", AuthType::None)
            .with_route("/labels/{label_id}/releases", AuthType::None)
            .with_route("/database/search", AuthType::KeySecret)
    }
}

/// Whether `endpoint` instantiates `pattern`.
pub fn is_match(pattern: &str, endpoint: &str) -> bool {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let endpoint_parts: Vec<&str> = endpoint.split('/').collect();
    if pattern_parts.len() != endpoint_parts.len() {
        return false;
    }

    pattern_parts
        .iter()
        .zip(&endpoint_parts)
        .all(|(pattern_part, endpoint_part)| {
            is_placeholder(pattern_part) || pattern_part == endpoint_part
        })
}

fn is_placeholder(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}
