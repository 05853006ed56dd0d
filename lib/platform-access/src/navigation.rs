//! Role-aware navigation.
//!
//! The sidebar is composed from static groups of entries. The general and
//! resources groups are shown to everyone; each role group is shown only
//! when the current role matches it exactly, and is otherwise left out
//! entirely rather than rendered disabled.


use crate::role::Role;

/// Route users without a role are sent to from the dashboard link.
pub const LOGIN_ROUTE: &str = "/login";

/// Routes that render without the sidebar.
const SIDEBAR_HIDDEN_ROUTES: [&str; 2] = ["/", LOGIN_ROUTE];

/// Icon shown next to a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Home,
    User,
    Bell,
    Settings,
    Users,
    Shield,
    BarChart,
    Database,
    Flask,
    FileText,
    AlertTriangle,
    ClipboardCheck,
    Truck,
    Search,
    HelpCircle,
}

impl Icon {
    /// Returns the icon name, usable as a CSS class suffix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::User => "user",
            Self::Bell => "bell",
            Self::Settings => "settings",
            Self::Users => "users",
            Self::Shield => "shield",
            Self::BarChart => "bar-chart",
            Self::Database => "database",
            Self::Flask => "flask",
            Self::FileText => "file-text",
            Self::AlertTriangle => "alert-triangle",
            Self::ClipboardCheck => "clipboard-check",
            Self::Truck => "truck",
            Self::Search => "search",
            Self::HelpCircle => "help-circle",
        }
    }
}

/// Which role may see an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredRole {
    /// Visible regardless of role, including without one.
    Any,
    /// Visible only to this role.
    Role(Role),
}

impl RequiredRole {
    /// Returns true if a user with `current` may see the entry.
    #[must_use]
    pub fn admits(&self, current: Option<Role>) -> bool {
        match self {
            Self::Any => true,
            Self::Role(required) => current == Some(*required),
        }
    }
}

/// A single sidebar link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub route: String,
    pub label: &'static str,
    pub icon: Icon,
    pub required_role: RequiredRole,
    /// True when `route` equals the current path.
    pub active: bool,
}

impl NavigationEntry {
    fn new(route: impl Into<String>, label: &'static str, icon: Icon, required_role: RequiredRole) -> Self {
        Self {
            route: route.into(),
            label,
            icon,
            required_role,
            active: false,
        }
    }
}

/// A titled run of sidebar links sharing one visibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGroup {
    pub title: &'static str,
    pub required_role: RequiredRole,
    pub entries: Vec<NavigationEntry>,
}

type Link = (&'static str, &'static str, Icon);

const ADMIN_LINKS: &[Link] = &[
    ("/admin/dashboard", "Dashboard", Icon::Home),
    ("/admin/roles", "Role Management", Icon::Users),
    ("/admin/upgrades", "System Upgrades", Icon::Shield),
    ("/admin/analytics", "Analytics", Icon::BarChart),
    ("/admin/database", "Database", Icon::Database),
];

const MANUFACTURER_LINKS: &[Link] = &[
    ("/manufacturer/register", "Register Product", Icon::Flask),
    ("/manufacturer/products", "My Products", Icon::FileText),
    ("/manufacturer/analytics", "Analytics", Icon::BarChart),
];

const REGULATOR_LINKS: &[Link] = &[
    ("/regulator/issues", "Issue Tracker", Icon::AlertTriangle),
    ("/regulator/audit", "Audit Trail", Icon::ClipboardCheck),
    ("/regulator/analytics", "Analytics", Icon::BarChart),
];

const DISTRIBUTOR_LINKS: &[Link] = &[
    ("/distributor/track", "Shipment Tracking", Icon::Truck),
    ("/distributor/analytics", "Analytics", Icon::BarChart),
];

const PUBLIC_LINKS: &[Link] = &[
    ("/public/report", "Report Issue", Icon::AlertTriangle),
    ("/public/search", "Search Products", Icon::Search),
    ("/public/faq", "FAQ", Icon::HelpCircle),
];

/// Returns the title and links of a role's own group.
fn role_links(role: Role) -> (&'static str, &'static [Link]) {
    match role {
        Role::Admin => ("Administration", ADMIN_LINKS),
        Role::Manufacturer => ("Manufacturing", MANUFACTURER_LINKS),
        Role::Regulator => ("Regulation", REGULATOR_LINKS),
        Role::Distributor => ("Distribution", DISTRIBUTOR_LINKS),
        Role::Public => ("Public Access", PUBLIC_LINKS),
    }
}

/// Returns the dashboard link target for a role, or the login page without one.
#[must_use]
pub fn dashboard_route(role: Option<Role>) -> String {
    role.map_or_else(|| LOGIN_ROUTE.to_string(), |role| role.dashboard_route())
}

/// The group shown to everyone. Its dashboard link depends on the role.
#[must_use]
pub fn general_group(role: Option<Role>) -> NavigationGroup {
    let any = RequiredRole::Any;
    NavigationGroup {
        title: "General",
        required_role: any,
        entries: vec![
            NavigationEntry::new(dashboard_route(role), "Dashboard", Icon::Home, any),
            NavigationEntry::new("/profile", "Profile", Icon::User, any),
            NavigationEntry::new("/notifications", "Notifications", Icon::Bell, any),
            NavigationEntry::new("/settings", "Settings", Icon::Settings, any),
        ],
    }
}

/// The group holding a role's own sections.
#[must_use]
pub fn role_group(role: Role) -> NavigationGroup {
    let (title, links) = role_links(role);
    let required = RequiredRole::Role(role);
    NavigationGroup {
        title,
        required_role: required,
        entries: links
            .iter()
            .map(|(route, label, icon)| NavigationEntry::new(*route, *label, *icon, required))
            .collect(),
    }
}

/// Help and other resources, shown to everyone.
#[must_use]
pub fn resources_group() -> NavigationGroup {
    NavigationGroup {
        title: "Resources",
        required_role: RequiredRole::Any,
        entries: vec![NavigationEntry::new(
            "/help",
            "Help Center",
            Icon::HelpCircle,
            RequiredRole::Any,
        )],
    }
}

/// Marks entries whose route equals `current_path` exactly as active.
pub fn mark_active(entries: &mut [NavigationEntry], current_path: &str) {
    for entry in entries {
        entry.active = entry.route == current_path;
    }
}

/// Builds the sidebar groups visible to `current_role` on `current_path`.
///
/// Groups come out in sidebar order: general, the role's own group, then
/// resources. Groups whose required role does not admit `current_role`
/// are dropped.
#[must_use]
pub fn compute_navigation(current_role: Option<Role>, current_path: &str) -> Vec<NavigationGroup> {
    std::iter::once(general_group(current_role))
        .chain(Role::ALL.into_iter().map(role_group))
        .chain(std::iter::once(resources_group()))
        .filter(|group| group.required_role.admits(current_role))
        .map(|mut group| {
            group
                .entries
                .retain(|entry| entry.required_role.admits(current_role));
            mark_active(&mut group.entries, current_path);
            group
        })
        .collect()
}

/// Flat list of the entries [`compute_navigation`] would show.
#[must_use]
pub fn compute_visible_entries(
    current_role: Option<Role>,
    current_path: &str,
) -> Vec<NavigationEntry> {
    compute_navigation(current_role, current_path)
        .into_iter()
        .flat_map(|group| group.entries)
        .collect()
}

/// Returns true if `path` renders with the sidebar.
#[must_use]
pub fn sidebar_visible(path: &str) -> bool {
    !SIDEBAR_HIDDEN_ROUTES.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    fn routes(entries: &[NavigationEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.route.as_str()).collect()
    }

    fn group_titles(groups: &[NavigationGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.title).collect()
    }

    #[test]
    fn required_role_admits() {
        assert!(RequiredRole::Any.admits(None));
        assert!(RequiredRole::Any.admits(Some(Role::Public)));
        assert!(RequiredRole::Role(Role::Admin).admits(Some(Role::Admin)));
        assert!(!RequiredRole::Role(Role::Admin).admits(Some(Role::Regulator)));
        assert!(!RequiredRole::Role(Role::Admin).admits(None));
    }

    #[test]
    fn no_role_shows_general_and_resources_only() {
        let groups = compute_navigation(None, "/profile");
        assert_eq!(group_titles(&groups), ["General", "Resources"]);

        let entries = compute_visible_entries(None, "/profile");
        assert_eq!(
            routes(&entries),
            ["/login", "/profile", "/notifications", "/settings", "/help"]
        );
    }

    #[test]
    fn each_role_sees_only_its_own_group() {
        for role in Role::ALL {
            let groups = compute_navigation(Some(role), "/settings");
            let (title, _) = role_links(role);
            assert_eq!(group_titles(&groups), ["General", title, "Resources"]);

            for entry in groups.iter().flat_map(|g| &g.entries) {
                assert!(entry.required_role.admits(Some(role)), "{entry:?}");
            }
        }
    }

    #[test]
    fn role_specific_routes_never_leak() {
        for current in Role::ALL {
            let entries = compute_visible_entries(Some(current), "/help");
            for other in Role::ALL.into_iter().filter(|r| *r != current) {
                let prefix = format!("/{}/", other.as_str());
                assert!(
                    entries.iter().all(|e| !e.route.starts_with(&prefix)),
                    "{current} sees {other} routes"
                );
            }
        }
    }

    #[test]
    fn dashboard_link_follows_role() {
        let entries = compute_visible_entries(Some(Role::Distributor), "/help");
        assert_eq!(entries[0].route, "/distributor/dashboard");
        assert_eq!(dashboard_route(None), LOGIN_ROUTE);
    }

    #[test]
    fn active_marking_is_exact() {
        let mut entries = vec![
            NavigationEntry::new("/profile", "Profile", Icon::User, RequiredRole::Any),
            NavigationEntry::new("/settings", "Settings", Icon::Settings, RequiredRole::Any),
        ];
        mark_active(&mut entries, "/profile");
        assert!(entries[0].active);
        assert!(!entries[1].active);

        mark_active(&mut entries, "/profile/edit");
        assert!(entries.iter().all(|e| !e.active));
    }

    #[test]
    fn composed_entries_mark_current_path() {
        let entries = compute_visible_entries(Some(Role::Regulator), "/regulator/audit");
        let active: Vec<_> = entries.iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].route, "/regulator/audit");
    }

    #[test]
    fn admin_dashboard_is_active_in_both_groups() {
        let entries = compute_visible_entries(Some(Role::Admin), "/admin/dashboard");
        let active = entries.iter().filter(|e| e.active).count();
        assert_eq!(active, 2);
    }

    #[test]
    fn direct_visit_to_regulator_dashboard() {
        let store = SessionStore::new(MemoryStore::new());
        let path = "/regulator/dashboard";

        let role = store.resolve_role_for_path(path);
        assert_eq!(role, Some(Role::Regulator));
        assert_eq!(store.read_role(), Some(Role::Regulator));

        let groups = compute_navigation(role, path);
        assert_eq!(
            group_titles(&groups),
            ["General", "Regulation", "Resources"]
        );
        let entries = compute_visible_entries(role, path);
        assert!(entries.iter().all(|e| !e.route.starts_with("/admin/")
            && !e.route.starts_with("/manufacturer/")
            && !e.route.starts_with("/distributor/")));
        assert!(entries.iter().any(|e| e.route == "/regulator/dashboard" && e.active));
    }

    #[test]
    fn sidebar_hidden_on_landing_and_login() {
        assert!(!sidebar_visible("/"));
        assert!(!sidebar_visible("/login"));
        assert!(sidebar_visible("/profile"));
        assert!(sidebar_visible("/admin/dashboard"));
    }

    #[test]
    fn icon_names() {
        assert_eq!(Icon::BarChart.as_str(), "bar-chart");
        assert_eq!(Icon::HelpCircle.as_str(), "help-circle");
    }
}
