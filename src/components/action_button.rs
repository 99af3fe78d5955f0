//! Labelled button that runs a callback on click.

use leptos::prelude::*;

use crate::components::widget_style::WidgetStyle;
use crate::util::style::CUSTOM_BUTTON_CSS;

/// Button with a text label and a zero-argument action.
///
/// Clicks do not bubble to the surrounding card.
#[component]
pub fn ActionButton(
    #[prop(into)] label: String,
    #[prop(into)] on_click: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="custom-button"
            on:click=move |ev: leptos::ev::MouseEvent| {
                ev.stop_propagation();
                on_click.run(());
            }
        >
            <WidgetStyle href=CUSTOM_BUTTON_CSS/>
            <span class="custom-button__label">{label}</span>
        </button>
    }
}
