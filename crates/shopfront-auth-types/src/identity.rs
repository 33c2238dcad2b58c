//! Gateway-injected identity extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-shopfront-user-id";
pub const USER_EMAIL_HEADER: &str = "x-shopfront-user-email";
pub const USER_NAME_HEADER: &str = "x-shopfront-user-name";

/// Authenticated identity injected by the gateway.
///
/// `x-shopfront-user-id` is required; email and display name are forwarded
/// when the identity provider knows them. Returns 401 if the id is absent or
/// cannot be parsed as UUID. Role classification happens in the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl IdentityHeaders {
    fn from_parts(parts: &Parts) -> Option<Self> {
        let user_id = header_str(parts, USER_ID_HEADER)?.parse::<Uuid>().ok()?;
        Some(Self {
            user_id,
            email: header_str(parts, USER_EMAIL_HEADER).map(str::to_owned),
            name: header_str(parts, USER_NAME_HEADER).map(str::to_owned),
        })
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = Self::from_parts(parts);
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

/// The caller of a request: an authenticated identity or nobody.
///
/// Never rejects. Handlers whose operations degrade for anonymous callers
/// (empty lists, `isAdmin: false`) take this instead of `IdentityHeaders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User(IdentityHeaders),
}

impl Caller {
    pub fn identity(&self) -> Option<&IdentityHeaders> {
        match self {
            Self::Anonymous => None,
            Self::User(identity) => Some(identity),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.identity().map(|identity| identity.user_id)
    }
}

impl From<IdentityHeaders> for Caller {
    fn from(identity: IdentityHeaders) -> Self {
        Self::User(identity)
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let caller = match IdentityHeaders::from_parts(parts) {
            Some(identity) => Self::User(identity),
            None => {
                if parts.headers.contains_key(USER_ID_HEADER) {
                    tracing::debug!("ignoring malformed identity header");
                }
                Self::Anonymous
            }
        };
        async move { Ok(caller) }
    }
}
