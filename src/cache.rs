//! In-memory caching using moka
//!
//! Holds login sessions keyed by bearer token. Sessions expire after the
//! configured idle time.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::auth::Session;

/// Most sessions kept at once; the oldest are evicted beyond this
const MAX_SESSIONS: u64 = 10_000;

/// Application cache holding login sessions
#[derive(Clone)]
pub struct AppCache {
    /// Sessions (token -> Session)
    pub sessions: Cache<String, Arc<Session>>,
}

impl AppCache {
    /// Create a new cache whose sessions expire after `session_ttl` of inactivity
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(session_ttl)
                .build(),
        }
    }

    /// Store a session under its token
    pub async fn insert_session(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.sessions
            .insert(session.token.clone(), session.clone())
            .await;
        session
    }

    /// Look up a session by token
    pub async fn session(&self, token: &str) -> Option<Arc<Session>> {
        let session = self.sessions.get(token).await;
        if session.is_some() {
            debug!("Cache HIT for session");
        } else {
            debug!("Cache MISS for session");
        }
        session
    }

    /// Invalidate a single session (logout)
    pub async fn invalidate_session(&self, token: &str) {
        self.sessions.invalidate(token).await;
        info!("Session invalidated");
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            sessions_size: self.sessions.entry_count(),
        }
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub sessions_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authenticate;

    #[tokio::test]
    async fn test_session_roundtrip_and_logout() {
        let cache = AppCache::new(Duration::from_secs(60));
        let session = authenticate("admin", "admin").unwrap();
        let token = session.token.clone();

        cache.insert_session(session).await;
        let found = cache.session(&token).await.unwrap();
        assert_eq!(found.username, "admin");

        cache.invalidate_session(&token).await;
        assert!(cache.session(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_logout_leaves_other_sessions() {
        let cache = AppCache::new(Duration::from_secs(60));
        let first = cache.insert_session(authenticate("admin", "admin").unwrap()).await;
        let second = cache.insert_session(authenticate("seller", "seller").unwrap()).await;

        cache.invalidate_session(&first.token).await;

        assert!(cache.session(&first.token).await.is_none());
        assert_eq!(cache.session(&second.token).await.unwrap().username, "seller");
    }
}
