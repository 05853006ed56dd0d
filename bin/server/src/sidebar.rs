//! Role-aware sidebar.

use crate::client::{with_preferences, with_session};
use drugledger_platform_access::{NavigationGroup, Role, compute_navigation, sidebar_visible};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

/// Sidebar listing the navigation for the current role.
///
/// The role is re-resolved on every path change: a role-prefixed path
/// wins over the stored role and is written back. Until the first
/// client-side resolution the sidebar renders as if no role were known.
#[component]
pub fn Sidebar() -> impl IntoView {
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let (role, set_role) = signal(Option::<Role>::None);
    let (display_name, set_display_name) = signal("User".to_string());
    let (avatar_url, set_avatar_url) = signal(Option::<&'static str>::None);

    Effect::new(move || {
        let path = pathname.get();
        let (resolved, session) =
            with_session(|store| (store.resolve_role_for_path(&path), store.read_session()));
        let name = session
            .as_ref()
            .map_or("User", |session| session.display_name())
            .to_string();
        set_role.set(resolved);
        set_display_name.set(name);
        set_avatar_url.set(Some(with_preferences(|prefs| prefs.avatar().url)));
    });

    let groups = Memo::new(move |_| compute_navigation(role.get(), &pathname.get()));

    let logout = move |_| {
        with_session(|store| store.clear_session());
        set_role.set(None);
        tracing::info!("logged out");
        navigate("/", NavigateOptions::default());
    };

    view! {
        <Show when=move || sidebar_visible(&pathname.get())>
            <aside class="sidebar">
                <div class="sidebar-user">
                    {move || avatar_url.get().map(|url| view! {
                        <img class="avatar" src=url alt="avatar"/>
                    })}
                    <div>
                        <span class="user-name">{move || display_name.get()}</span>
                        <span class="user-role">
                            {move || role.get().map(|r| r.label()).unwrap_or("Not connected")}
                        </span>
                    </div>
                </div>
                <nav class="sidebar-nav">
                    {move || {
                        groups
                            .get()
                            .into_iter()
                            .map(|group| view! { <NavGroup group=group/> })
                            .collect_view()
                    }}
                </nav>
                <button class="logout-button" on:click=logout.clone()>"Log out"</button>
            </aside>
        </Show>
    }
}

#[component]
fn NavGroup(group: NavigationGroup) -> impl IntoView {
    view! {
        <section class="nav-group">
            <h3>{group.title}</h3>
            <ul>
                {group.entries.into_iter().map(|entry| {
                    let class = if entry.active { "nav-link active" } else { "nav-link" };
                    view! {
                        <li>
                            <a href=entry.route class=class>
                                <span class=format!("icon icon-{}", entry.icon.as_str())></span>
                                {entry.label}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </section>
    }
}
