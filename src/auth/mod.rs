//! Demo authentication, sessions and role-gated navigation.

pub mod navigation;
pub mod routes;
pub mod session;

pub use navigation::{navigation_for, NavItem};
pub use routes::router;
pub use session::{authenticate, bearer_token, Role, Session};
