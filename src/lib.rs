//! # ipfs-drop
//!
//! Leptos + WASM widgets for uploading local files to an IPFS gateway.
//!
//! A file picker hands each chosen file to the upload controller, which posts
//! it to the gateway's `add` endpoint and tracks it on its own card: progress
//! while sending, then a browse link with folder and copy-hash actions, or an
//! error. Gateway-specific parsing and link building live in the `gateway`
//! crate so they can be tested without a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Root component and context providers |
//! | [`components`] | File picker, action button, upload card, upload panel |
//! | [`state`] | Upload card state machine and the upload list |
//! | [`net`] | XHR transfer and the upload controller |
//! | [`util`] | Single-flight cache, stylesheet loading, browser helpers |

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed.
    console_log::init_with_level(log::Level::Debug).unwrap_or_default();
    leptos::mount::mount_to_body(app::App);
}
