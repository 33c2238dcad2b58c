//! Mock gateway identity for tests.
//!
//! Services receive `x-shopfront-user-*` headers injected by the gateway
//! after it authenticates the caller. `MockAuth` builds those headers so
//! tests need no real gateway.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use shopfront_auth_types::identity::{
    IdentityHeaders, USER_EMAIL_HEADER, USER_ID_HEADER, USER_NAME_HEADER,
};

/// Identity injected into test requests.
#[derive(Debug, Clone)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl MockAuth {
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            name: None,
        }
    }

    /// A fresh identity with a random id and `<handle>@example.com`.
    pub fn random(handle: &str) -> Self {
        Self::new(Uuid::now_v7(), format!("{handle}@example.com"))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The extractor value a handler would receive for this identity.
    pub fn identity(&self) -> IdentityHeaders {
        IdentityHeaders {
            user_id: self.user_id,
            email: Some(self.email.clone()),
            name: self.name.clone(),
        }
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(USER_EMAIL_HEADER),
            HeaderValue::from_str(&self.email).unwrap(),
        );
        if let Some(name) = &self.name {
            map.insert(
                HeaderName::from_static(USER_NAME_HEADER),
                HeaderValue::from_str(name).unwrap(),
            );
        }
        map
    }
}
