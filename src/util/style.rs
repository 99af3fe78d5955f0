//! Stylesheet loading shared by every widget.
//!
//! Each widget inlines its own stylesheet. Text is fetched once per URL and
//! memoized in a [`StyleCache`] created at startup, so mounting many cards
//! costs one request per stylesheet rather than one per card.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch is logged and the widget renders unstyled. The failure stays
//! cached for the URL; nothing is retried.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use super::async_cache::{AsyncCache, PendingValue};

/// Stylesheet for the file picker.
pub const FILE_CHOOSER_CSS: &str = "./file-chooser.css";
/// Stylesheet for action buttons.
pub const CUSTOM_BUTTON_CSS: &str = "./custom-button.css";
/// Stylesheet for upload cards.
pub const UPLOAD_PROGRESS_CSS: &str = "./upload-progress.css";

/// Why a stylesheet could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// The request never produced a response.
    #[error("stylesheet request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("stylesheet request returned status {0}")]
    Status(u16),
}

/// Fetches stylesheet text for a URL.
pub type StyleFetcher = Rc<dyn Fn(&str) -> LocalBoxFuture<'static, Result<String, StyleError>>>;

/// Application-wide memo of stylesheet text keyed by URL.
#[derive(Clone)]
pub struct StyleCache {
    cache: AsyncCache<String, String, StyleError>,
    fetch: StyleFetcher,
}

impl StyleCache {
    pub fn new(
        spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
        fetch: impl Fn(&str) -> LocalBoxFuture<'static, Result<String, StyleError>> + 'static,
    ) -> Self {
        Self {
            cache: AsyncCache::new(spawner),
            fetch: Rc::new(fetch),
        }
    }

    /// Cache backed by `gloo-net` fetches and `spawn_local`.
    #[cfg(feature = "csr")]
    pub fn browser() -> Self {
        use futures::FutureExt;

        Self::new(
            |fut| leptos::task::spawn_local(fut),
            |url| fetch_stylesheet(url.to_owned()).boxed_local(),
        )
    }

    /// Pending text for `url`, fetching it on first request.
    pub fn stylesheet(&self, url: &str) -> PendingValue<String, StyleError> {
        let fetch = Rc::clone(&self.fetch);
        self.cache.get_or_create(url.to_owned(), move || fetch(url))
    }

    /// Number of distinct stylesheets requested so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Wait for a stylesheet, logging and swallowing failures.
///
/// Returns `None` when the text is unavailable so the caller can leave its
/// style element empty.
pub async fn resolve_style(pending: PendingValue<String, StyleError>, url: &str) -> Option<String> {
    match pending.wait().await {
        Ok(text) => Some(text),
        Err(err) => {
            log::error!("failed to load stylesheet {url}: {err}");
            None
        }
    }
}

#[cfg(feature = "csr")]
async fn fetch_stylesheet(url: String) -> Result<String, StyleError> {
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| StyleError::Request(e.to_string()))?;
    if !resp.ok() {
        return Err(StyleError::Status(resp.status()));
    }
    resp.text()
        .await
        .map_err(|e| StyleError::Request(e.to_string()))
}
