use async_trait::async_trait;
use axum::http::HeaderMap;

use mtx_gate::Identity;

use crate::error::{ServerError, ServerResult};

/// Wire-level credentials, extracted from request headers.
#[derive(Clone, Debug)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Pull credentials out of the `Authorization` header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| Self::Bearer(token.to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

/// Token-is-username authentication.
///
/// The bearer token is taken as the caller's name; names listed in
/// `superusers` get the ownership bypass. Suitable for development and
/// tests — a real deployment substitutes its own provider.
pub struct TokenAuth {
    superusers: Vec<String>,
}

impl TokenAuth {
    pub fn new(superusers: Vec<String>) -> Self {
        Self { superusers }
    }
}

#[async_trait]
impl AuthProvider for TokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) if token.is_empty() => {
                Err(ServerError::AuthFailed("empty bearer token".into()))
            }
            Credentials::Bearer(token) => {
                if self.superusers.iter().any(|s| s == token) {
                    Ok(Identity::superuser(token.clone()))
                } else {
                    Ok(Identity::user(token.clone()))
                }
            }
            Credentials::Anonymous => Ok(Identity::user("anonymous")),
        }
    }
}
