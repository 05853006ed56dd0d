//! Login page and the connect-timing server function.

use crate::client::{PendingTimers, with_session};
use drugledger_platform_access::registry::DEMO_WALLETS;
use drugledger_platform_access::{
    AddressRegistry, ConnectFlow, ConnectPhase, ConnectTiming, ConnectionMethod,
};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Server function returning the configured connection delays.
#[server]
pub async fn get_connect_timing() -> Result<ConnectTiming, ServerFnError> {
    use crate::error::ConfigError;
    use axum::Extension;

    let Extension(timing): Extension<ConnectTiming> = leptos_axum::extract().await.map_err(|e| {
        tracing::error!(error = %e, "connect timing missing from request extensions");
        ConfigError::Missing {
            name: "connect timing".to_string(),
        }
        .into_server_error()
    })?;
    Ok(timing)
}

fn phase_message(phase: &ConnectPhase) -> Option<String> {
    match phase {
        ConnectPhase::Idle => None,
        ConnectPhase::Connecting { .. } => Some("Connecting to wallet...".to_string()),
        ConnectPhase::Detecting { address } => Some(format!(
            "Connected {}. Detecting your role...",
            address.abbreviated()
        )),
        ConnectPhase::Redirecting { role, .. } => Some(format!(
            "Welcome, {}. Redirecting to your dashboard...",
            role.label()
        )),
    }
}

/// Wallet connection page.
///
/// Walks the connect flow through its phases on timers. Leaving the page
/// cancels any pending step.
#[component]
pub fn LoginPage() -> impl IntoView {
    let flow = RwSignal::new(ConnectFlow::default());
    let (manual_input, set_manual_input) = signal(String::new());
    let timing = Resource::new(|| (), |_| get_connect_timing());
    let timers = PendingTimers::new();
    let navigate = use_navigate();

    let connect = {
        let timers = timers.clone();
        move |_| {
            let timing = timing
                .get_untracked()
                .and_then(Result::ok)
                .unwrap_or_default();
            let started = flow.try_update(|f| f.begin(&manual_input.get_untracked()));
            if !matches!(started, Some(Ok(_))) {
                return;
            }

            let detect_timers = timers.clone();
            let navigate = navigate.clone();
            timers.schedule(timing.connect_delay(), move || {
                if !matches!(flow.try_update(ConnectFlow::connected), Some(Ok(_))) {
                    return;
                }
                let redirect_timers = detect_timers.clone();
                detect_timers.schedule(timing.detect_delay(), move || {
                    let registry = AddressRegistry::demo();
                    let detected =
                        flow.try_update(|f| with_session(|store| f.detect(&registry, store)));
                    let Some(Ok(session)) = detected else {
                        return;
                    };
                    let route = session.dashboard_route();
                    redirect_timers.schedule(timing.redirect_delay(), move || {
                        navigate(&route, NavigateOptions::default());
                    });
                });
            });
        }
    };

    let cancel = move |_| {
        timers.cancel_all();
        flow.update(ConnectFlow::reset);
    };

    let busy = move || flow.with(|f| f.phase().is_busy());
    let manual = move || flow.with(|f| f.method() == ConnectionMethod::Manual);

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Connect your wallet"</h1>
                <p>"Your wallet address decides which part of DrugLedger you can use."</p>

                <div class="method-toggle">
                    <button
                        class:selected=move || !manual()
                        disabled=busy
                        on:click=move |_| flow.update(|f| f.set_method(ConnectionMethod::Auto))
                    >
                        "Generate address"
                    </button>
                    <button
                        class:selected=manual
                        disabled=busy
                        on:click=move |_| flow.update(|f| f.set_method(ConnectionMethod::Manual))
                    >
                        "Enter address"
                    </button>
                </div>

                <Show when=manual>
                    <div class="setting-row">
                        <label for="wallet-address">"Wallet address"</label>
                        <input
                            type="text"
                            id="wallet-address"
                            placeholder="0x..."
                            disabled=busy
                            prop:value=move || manual_input.get()
                            on:input=move |ev| set_manual_input.set(event_target_value(&ev))
                        />
                    </div>
                </Show>

                {move || flow.with(|f| f.error().map(|err| view! {
                    <p class="error-message">{err.to_string()}</p>
                }))}

                {move || flow.with(|f| phase_message(f.phase())).map(|message| view! {
                    <p class="status-message">{message}</p>
                })}

                <Show
                    when=busy
                    fallback=move || view! {
                        <button class="login-button" on:click=connect.clone()>"Connect wallet"</button>
                    }
                >
                    <button class="cancel-button" on:click=cancel.clone()>"Cancel"</button>
                </Show>

                <section class="demo-wallets">
                    <h2>"Demo wallets"</h2>
                    <ul>
                        {DEMO_WALLETS.iter().map(|(address, role)| {
                            let address = *address;
                            view! {
                                <li>
                                    <button
                                        class="demo-wallet"
                                        disabled=busy
                                        on:click=move |_| {
                                            flow.update(|f| f.set_method(ConnectionMethod::Manual));
                                            set_manual_input.set(address.to_string());
                                        }
                                    >
                                        <code>{address}</code>
                                        " "
                                        {role.label()}
                                    </button>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </section>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drugledger_core::WalletAddress;
    use drugledger_platform_access::Role;

    #[test]
    fn idle_has_no_status() {
        assert_eq!(phase_message(&ConnectPhase::Idle), None);
    }

    #[test]
    fn detecting_shows_abbreviated_address() {
        let phase = ConnectPhase::Detecting {
            address: WalletAddress::new("0x1234567890abcd"),
        };
        let message = phase_message(&phase).expect("message");
        assert!(message.contains("0x1234...abcd"));
    }

    #[test]
    fn redirecting_names_role() {
        let phase = ConnectPhase::Redirecting {
            address: WalletAddress::new("0x789"),
            role: Role::Regulator,
            route: "/regulator/dashboard".to_string(),
        };
        let message = phase_message(&phase).expect("message");
        assert!(message.contains(Role::Regulator.label()));
    }
}
