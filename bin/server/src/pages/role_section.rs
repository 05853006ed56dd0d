//! Role-prefixed pages such as `/manufacturer/products`.

use drugledger_platform_access::Role;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// Turns a path section like `register` into a heading.
fn section_title(section: &str) -> String {
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Dashboard".to_string(),
    }
}

fn section_summary(role: Role, section: &str) -> &'static str {
    match (role, section) {
        (_, "dashboard") => "An overview of recent activity for your role.",
        (Role::Admin, "roles") => "Assign roles to wallet addresses.",
        (Role::Admin, "upgrades") => "Review and schedule contract upgrades.",
        (Role::Admin, "database") => "Inspect ledger records.",
        (Role::Manufacturer, "register") => "Register a new drug batch on the ledger.",
        (Role::Manufacturer, "products") => "Browse the products you have registered.",
        (Role::Regulator, "issues") => "Open compliance issues awaiting review.",
        (Role::Regulator, "audit") => "The audit trail of recorded transfers.",
        (Role::Distributor, "track") => "Track shipments in transit.",
        (Role::Public, "report") => "Report a suspicious or counterfeit product.",
        (Role::Public, "search") => "Look up a product by its batch number.",
        (Role::Public, "faq") => "Answers to common questions.",
        (_, "analytics") => "Charts and figures for your role.",
        _ => "Nothing here yet.",
    }
}

/// Page for any `/{role}/{section}` path.
///
/// Unknown role tokens render the not-found message. Sections are not
/// restricted: any section under a known role renders.
#[component]
pub fn RoleSectionPage() -> impl IntoView {
    let params = use_params_map();
    let role = move || params.with(|p| p.get("role").and_then(|token| Role::from_token(&token)));
    let section = move || params.with(|p| p.get("section").unwrap_or_default());

    move || match role() {
        Some(role) => {
            let section = section();
            view! {
                <div class="role-page">
                    <p class="role-badge">{role.label()}</p>
                    <h1>{section_title(&section)}</h1>
                    <p>{section_summary(role, &section)}</p>
                </div>
            }
            .into_any()
        }
        None => view! { <p class="not-found">"Page not found"</p> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_title_capitalizes() {
        assert_eq!(section_title("products"), "Products");
        assert_eq!(section_title(""), "Dashboard");
    }

    #[test]
    fn section_summary_falls_back() {
        assert_eq!(
            section_summary(Role::Regulator, "audit"),
            "The audit trail of recorded transfers."
        );
        assert_eq!(section_summary(Role::Public, "roles"), "Nothing here yet.");
        assert_eq!(
            section_summary(Role::Distributor, "analytics"),
            "Charts and figures for your role."
        );
    }
}
