//! Settings page: interface language and avatar.

use crate::client::{browser_language, with_preferences};
use drugledger_core::AvatarId;
use drugledger_platform_access::{AVATARS, Language};
use leptos::prelude::*;

/// User settings page.
///
/// Preferences live in the browser, so the page shows defaults until the
/// stored values are read after hydration.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let (language, set_language) = signal(Language::default());
    let (auto_detect, set_auto_detect) = signal(true);
    let (avatar_id, set_avatar_id) = signal(AVATARS[0].id);
    let (save_message, set_save_message) = signal(Option::<String>::None);

    Effect::new(move || {
        let tag = browser_language();
        with_preferences(|prefs| {
            set_auto_detect.set(prefs.auto_detect());
            set_language.set(prefs.language(tag.as_deref()));
            set_avatar_id.set(prefs.avatar().id);
        });
    });

    let choose_language = move |code: String| {
        if let Some(lang) = Language::from_code(&code) {
            with_preferences(|prefs| prefs.set_language(lang));
            set_language.set(lang);
            set_auto_detect.set(false);
            set_save_message.set(Some(format!("Language set to {}", lang.native_name())));
        }
    };

    let toggle_auto_detect = move |enabled: bool| {
        let tag = browser_language();
        let lang = with_preferences(|prefs| prefs.set_auto_detect(enabled, tag.as_deref()));
        set_auto_detect.set(enabled);
        set_language.set(lang);
    };

    let choose_avatar = move |id: &'static str| {
        if let Some(avatar) = with_preferences(|prefs| prefs.set_avatar(&AvatarId::new(id))) {
            set_avatar_id.set(avatar.id);
            set_save_message.set(Some(format!("Avatar changed to {}", avatar.nickname)));
        }
    };

    view! {
        <div class="settings-page">
            <h1>"Settings"</h1>

            <section class="settings-section">
                <h2>"Language"</h2>
                <div class="setting-row">
                    <label for="auto-detect">"Detect from browser"</label>
                    <input
                        type="checkbox"
                        id="auto-detect"
                        prop:checked=move || auto_detect.get()
                        on:change=move |ev| toggle_auto_detect(event_target_checked(&ev))
                    />
                </div>
                <div class="setting-row">
                    <label for="language">"Language"</label>
                    <LanguageSelector
                        current=language
                        disabled=auto_detect
                        on_change=choose_language
                    />
                </div>
            </section>

            <section class="settings-section">
                <h2>"Avatar"</h2>
                <div class="avatar-grid">
                    {AVATARS.iter().map(|avatar| {
                        let id = avatar.id;
                        view! {
                            <button
                                class="avatar-option"
                                class:selected=move || avatar_id.get() == id
                                on:click=move |_| choose_avatar(id)
                            >
                                <img src=avatar.url alt=avatar.nickname/>
                                <span>{avatar.nickname}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>
            </section>

            {move || save_message.get().map(|msg| view! { <span class="save-message">{msg}</span> })}
        </div>
    }
}

/// Language selector component.
#[component]
fn LanguageSelector(
    current: ReadSignal<Language>,
    disabled: ReadSignal<bool>,
    on_change: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <select
            id="language"
            class="language-select"
            disabled=move || disabled.get()
            on:change=move |ev| on_change(event_target_value(&ev))
        >
            {Language::ALL.into_iter().map(|lang| {
                view! {
                    <option value=lang.code() selected=move || current.get() == lang>
                        {lang.native_name()}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}
