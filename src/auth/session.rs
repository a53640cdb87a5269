//! Login sessions and the session extractor.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Super,
    Seller,
}

/// Authenticated request context
///
/// Handlers receive it as an extractor argument; there is no ambient
/// "current user".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_super(&self) -> bool {
        self.role == Role::Super
    }

    /// Reject anyone but SUPER accounts
    pub fn require_super(&self) -> Result<(), AppError> {
        if self.is_super() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "This page is only available to administrators".to_string(),
            ))
        }
    }
}

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    email: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        username: "admin",
        password: "admin",
        email: "admin@company.com",
        role: Role::Super,
    },
    DemoAccount {
        username: "seller",
        password: "seller",
        email: "seller@company.com",
        role: Role::Seller,
    },
];

/// Check demo credentials and open a session with a fresh token.
pub fn authenticate(username: &str, password: &str) -> Option<Session> {
    let username = username.trim();
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.username == username && account.password == password)
        .map(|account| Session {
            token: Uuid::new_v4().to_string(),
            username: account.username.to_string(),
            email: account.email.to_string(),
            role: account.role,
        })
}

/// Token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        let session = state
            .cache
            .session(token)
            .await
            .ok_or(AppError::Unauthorized)?;

        let session = (*session).clone();
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}
