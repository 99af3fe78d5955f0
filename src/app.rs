//! Root application component and context providers.

use gateway::GatewayConfig;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::upload_panel::UploadPanel;

/// Root application component.
///
/// Provides the gateway configuration and, in the browser, the one stylesheet
/// cache every widget shares for the lifetime of the page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(GatewayConfig::default());

    #[cfg(feature = "csr")]
    provide_context(StoredValue::new_local(crate::util::style::StyleCache::browser()));

    view! {
        <Title text="IPFS Drop"/>
        <main class="drop">
            <h1 class="drop__heading">"Drop files on IPFS"</h1>
            <UploadPanel/>
        </main>
    }
}
