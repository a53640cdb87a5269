//! Login, logout and navigation handlers

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::AppState;

use super::navigation::{navigation_for, NavItem};
use super::session::{authenticate, Role, Session};

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub navigation: Vec<NavItem>,
}

/// Navigation for the current session
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub role: Role,
    pub items: Vec<NavItem>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/navigation", get(navigation))
}

/// Demo login handler
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let Some(session) = authenticate(&request.username, &request.password) else {
        tracing::warn!("Rejected login for user {:?}", request.username.trim());
        return Err(AppError::InvalidCredentials);
    };

    let session = state.cache.insert_session(session).await;
    tracing::info!("User {} logged in as {:?}", session.username, session.role);

    Ok(Json(LoginResponse {
        token: session.token.clone(),
        username: session.username.clone(),
        email: session.email.clone(),
        role: session.role,
        navigation: navigation_for(session.role),
    }))
}

/// Logout handler; the token stops working immediately
pub async fn logout(State(state): State<AppState>, session: Session) -> StatusCode {
    state.cache.invalidate_session(&session.token).await;
    tracing::info!("User {} logged out", session.username);
    StatusCode::NO_CONTENT
}

/// Role-filtered sidebar entries
pub async fn navigation(session: Session) -> Json<NavigationResponse> {
    Json(NavigationResponse {
        role: session.role,
        items: navigation_for(session.role),
    })
}
