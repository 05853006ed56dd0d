//! Landing page component.

use leptos::prelude::*;

/// The landing page.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"DrugLedger"</h1>
            <p>"Pharmaceutical supply chain tracking on a shared ledger."</p>
            <ul class="feature-list">
                <li>"Manufacturers register drug batches."</li>
                <li>"Distributors record every hand-off."</li>
                <li>"Regulators audit the full trail."</li>
                <li>"Anyone can verify a product or report a counterfeit."</li>
            </ul>
            <a href="/login" class="cta-button">"Connect wallet"</a>
        </div>
    }
}
