//! Help center page component.

use drugledger_platform_access::Role;
use leptos::prelude::*;

/// Help center listing what each role can do.
#[component]
pub fn HelpPage() -> impl IntoView {
    view! {
        <div class="help-page">
            <h1>"Help Center"</h1>
            <section class="settings-section">
                <h2>"Getting started"</h2>
                <p>
                    "Connect a wallet from the login page. Your address decides your role; "
                    "addresses without an assigned role get public access."
                </p>
            </section>
            <section class="settings-section">
                <h2>"Roles"</h2>
                <ul>
                    {Role::ALL.into_iter().map(|role| view! {
                        <li>
                            <strong>{role.label()}</strong>
                            " "
                            <code>{role.dashboard_route()}</code>
                        </li>
                    }).collect_view()}
                </ul>
            </section>
        </div>
    }
}
