//! Sidebar navigation filtered by role.

use serde::Serialize;

use super::session::Role;

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    #[serde(skip)]
    roles: &'static [Role],
}

const ALL_ROLES: &[Role] = &[Role::Super, Role::Seller];
const SUPER_ONLY: &[Role] = &[Role::Super];

const NAVIGATION: [NavItem; 5] = [
    NavItem { name: "Dashboard", href: "/dashboard", roles: ALL_ROLES },
    NavItem { name: "Buildings", href: "/buildings", roles: ALL_ROLES },
    NavItem { name: "Units", href: "/units", roles: ALL_ROLES },
    NavItem { name: "Plots", href: "/plots", roles: SUPER_ONLY },
    NavItem { name: "Sellers", href: "/sellers", roles: SUPER_ONLY },
];

impl NavItem {
    pub fn visible_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Entries the role may see, in sidebar order
pub fn navigation_for(role: Role) -> Vec<NavItem> {
    NAVIGATION
        .iter()
        .filter(|item| item.visible_to(role))
        .copied()
        .collect()
}
