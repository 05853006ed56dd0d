//! Profile page.

use crate::client::{with_preferences, with_session};
use drugledger_platform_access::{Profile, Role};
use leptos::prelude::*;

/// Shows the connected wallet and lets the user edit name and email.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (role, set_role) = signal(Option::<Role>::None);
    let (address, set_address) = signal(Option::<String>::None);
    let (avatar_url, set_avatar_url) = signal(Option::<&'static str>::None);
    let (save_message, set_save_message) = signal(Option::<String>::None);

    Effect::new(move || {
        let session = with_session(|store| store.read_session());
        if let Some(session) = session {
            set_role.set(Some(session.role()));
            set_address.set(session.address().map(|a| a.abbreviated()));
            if let Some(profile) = session.profile() {
                set_name.set(profile.name.clone());
                set_email.set(profile.email.clone());
            }
        }
        set_avatar_url.set(Some(with_preferences(|prefs| prefs.avatar().url)));
    });

    let save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let profile = Profile::new(name.get_untracked(), email.get_untracked());
        with_session(|store| store.save_profile(&profile));
        set_save_message.set(Some("Profile saved!".to_string()));
    };

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>

            <section class="settings-section">
                <div class="profile-header">
                    {move || avatar_url.get().map(|url| view! {
                        <img class="avatar" src=url alt="avatar"/>
                    })}
                    <div>
                        <div class="setting-row">
                            <label>"Wallet"</label>
                            <span>{move || address.get().unwrap_or_else(|| "Not connected".to_string())}</span>
                        </div>
                        <div class="setting-row">
                            <label>"Role"</label>
                            <span>{move || role.get().map(|r| r.label()).unwrap_or("Not set")}</span>
                        </div>
                    </div>
                </div>
            </section>

            <section class="settings-section">
                <form on:submit=save>
                    <div class="setting-row">
                        <label for="name">"Display Name"</label>
                        <input
                            type="text"
                            id="name"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="setting-row">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="setting-row">
                        <button type="submit" class="save-button">"Save Profile"</button>
                        {move || save_message.get().map(|msg| view! { <span class="save-message">{msg}</span> })}
                    </div>
                </form>
            </section>
        </div>
    }
}
