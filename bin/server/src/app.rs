//! Main Leptos application component and routing.

use crate::pages::{
    HelpPage, HomePage, LoginPage, NotificationsPage, ProfilePage, RoleSectionPage, SettingsPage,
};
use crate::sidebar::Sidebar;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="DrugLedger"/>
        <Router>
            <div class="layout">
                <Sidebar/>
                <main class="container">
                    <Routes fallback=|| "Page not found".into_view()>
                        <Route path=path!("/") view=HomePage/>
                        <Route path=path!("/login") view=LoginPage/>
                        <Route path=path!("/profile") view=ProfilePage/>
                        <Route path=path!("/settings") view=SettingsPage/>
                        <Route path=path!("/notifications") view=NotificationsPage/>
                        <Route path=path!("/help") view=HelpPage/>
                        <Route path=path!("/:role/:section") view=RoleSectionPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
