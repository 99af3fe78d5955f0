//! Inline `<style>` element backed by the shared stylesheet cache.

use leptos::prelude::*;

/// Style element for one widget.
///
/// Renders empty right away and fills in once the stylesheet text is
/// available. Without a cache in context, or when the fetch fails, it stays
/// empty and the widget renders unstyled.
#[component]
pub fn WidgetStyle(href: &'static str) -> impl IntoView {
    let css = RwSignal::new(String::new());

    #[cfg(feature = "csr")]
    {
        use crate::util::style::{StyleCache, resolve_style};

        if let Some(styles) = use_context::<StoredValue<StyleCache, LocalStorage>>() {
            let pending = styles.with_value(|cache| cache.stylesheet(href));
            leptos::task::spawn_local(async move {
                if let Some(text) = resolve_style(pending, href).await {
                    css.set(text);
                }
            });
        }
    }

    view! { <style data-href=href>{move || css.get()}</style> }
}
