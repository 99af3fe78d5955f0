//! Thin wrappers over browser window and clipboard APIs.
//!
//! Requires a browser environment; non-`csr` builds compile these as no-ops so
//! callers stay free of feature gates.

/// Open `url` in a new browsing context.
#[cfg(feature = "csr")]
pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.open_with_url_and_target(url, "_blank") {
        log::warn!("failed to open {url}: {err:?}");
    }
}

#[cfg(not(feature = "csr"))]
pub fn open_in_new_tab(_url: &str) {}

/// Write `text` to the system clipboard.
#[cfg(feature = "csr")]
pub fn copy_to_clipboard(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(clipboard) = window.navigator().clipboard() else {
        log::warn!("clipboard is unavailable");
        return;
    };
    let promise = clipboard.write_text(text);
    leptos::task::spawn_local(async move {
        if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
            log::warn!("clipboard write failed: {err:?}");
        }
    });
}

#[cfg(not(feature = "csr"))]
pub fn copy_to_clipboard(_text: &str) {}
