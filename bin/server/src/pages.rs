//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod help;
pub mod home;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod role_section;
pub mod settings;

// Re-export all page components for convenient access
pub use help::HelpPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use notifications::NotificationsPage;
pub use profile::ProfilePage;
pub use role_section::RoleSectionPage;
pub use settings::SettingsPage;
