//! Notifications page component.

use leptos::prelude::*;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    view! {
        <div class="notifications-page">
            <h1>"Notifications"</h1>
            <p class="empty-state">"You have no notifications."</p>
        </div>
    }
}
